//! Call records: one entry per intercepted invocation.

use crate::core::output::compact_line;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Keyword arguments, keyed by parameter name.
pub type Kwargs = BTreeMap<String, Value>;

/// Calling convention of an intercepted member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CallKind {
    #[serde(rename = "method")]
    InstanceMethod,
    #[serde(rename = "classmethod")]
    ClassMethod,
    #[serde(rename = "staticmethod")]
    StaticMethod,
    #[serde(rename = "property.get")]
    PropertyGet,
    #[serde(rename = "property.set")]
    PropertySet,
    #[serde(rename = "property.del")]
    PropertyDelete,
}

impl CallKind {
    pub const ALL: [CallKind; 6] = [
        CallKind::InstanceMethod,
        CallKind::ClassMethod,
        CallKind::StaticMethod,
        CallKind::PropertyGet,
        CallKind::PropertySet,
        CallKind::PropertyDelete,
    ];

    pub fn is_property(self) -> bool {
        matches!(
            self,
            CallKind::PropertyGet | CallKind::PropertySet | CallKind::PropertyDelete
        )
    }

    /// Suffix distinguishing the three property operations (`get`, `set`, `del`).
    pub fn accessor_suffix(self) -> Option<&'static str> {
        match self {
            CallKind::PropertyGet => Some("get"),
            CallKind::PropertySet => Some("set"),
            CallKind::PropertyDelete => Some("del"),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallKind::InstanceMethod => "method",
            CallKind::ClassMethod => "classmethod",
            CallKind::StaticMethod => "staticmethod",
            CallKind::PropertyGet => "property.get",
            CallKind::PropertySet => "property.set",
            CallKind::PropertyDelete => "property.del",
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single intercepted call.
///
/// `args` never includes the receiver (instance or class). For property
/// operations `member` is the property's base name; use
/// [`CallRecord::qualified_name`] for the `name.get` / `name.set` /
/// `name.del` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    kind: CallKind,
    owner: String,
    member: String,
    args: Vec<Value>,
    kwargs: Kwargs,
}

impl CallRecord {
    pub fn new(
        kind: CallKind,
        owner: impl Into<String>,
        member: impl Into<String>,
        args: Vec<Value>,
        kwargs: Kwargs,
    ) -> Self {
        Self {
            kind,
            owner: owner.into(),
            member: member.into(),
            args,
            kwargs,
        }
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }

    /// Name of the wrapped type the member was declared on.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    pub fn qualified_name(&self) -> String {
        match self.kind.accessor_suffix() {
            Some(suffix) => format!("{}.{}", self.member, suffix),
            None => self.member.clone(),
        }
    }

    /// Argument list rendered the way a call site would spell it.
    pub fn render_args(&self) -> String {
        let positional = self.args.iter().map(|v| v.to_string());
        let keyword = self.kwargs.iter().map(|(k, v)| format!("{}={}", k, v));
        positional.chain(keyword).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.owner,
            self.qualified_name(),
            compact_line(&self.render_args(), 120)
        )
    }
}
