//! The interception capability and spy construction.
//!
//! A [`SpyBase`] owns a call log and a naming policy. Composing it with
//! exactly one wrapped class (and any overrides) through [`SpyBuilder`]
//! produces a [`SpyClass`]: a subclass of the wrapped class whose
//! non-overridden members record into the log and then forward to the
//! wrapped class's own member.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use spybase::{Class, SpyBase};
//!
//! let real = Class::builder("Adder")
//!     .method("add_one", |_, args, _| Ok(json!(args[0].as_i64().unwrap_or(0) + 1)))
//!     .method("add_two", |_, args, _| Ok(json!(args[0].as_i64().unwrap_or(0) + 2)))
//!     .build();
//!
//! let base = SpyBase::new();
//! let spy = base
//!     .spy("AdderSpy")
//!     .wraps(&real)
//!     .method("add_two", |_, _, _| Ok(json!(0)))
//!     .build()
//!     .unwrap();
//!
//! let mut adder = spy.instantiate().unwrap();
//! assert_eq!(adder.call("add_one", &[json!(1)]).unwrap(), json!(2));
//! assert_eq!(adder.call("add_two", &[json!(1)]).unwrap(), json!(0));
//!
//! let calls = base.get_calls();
//! assert_eq!(calls.len(), 1);
//! assert_eq!(calls[0].member(), "add_one");
//! ```

use crate::core::class::{Class, ClassBuilder, Instance};
use crate::core::classify::{self, Target};
use crate::core::config::{LogScope, NamePolicy, SpyConfig};
use crate::core::error::SpyError;
use crate::core::guard::{self, Verdict};
use crate::core::log::CallLog;
use crate::core::member::{Member, MemberResult, Property};
use crate::core::output::preview_names;
use crate::core::record::{CallRecord, Kwargs};
use crate::core::wrap::{self, Recorder, Wrapper};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

/// The interception capability.
///
/// Spies built from one `SpyBase` share its log unless they are built with
/// [`LogScope::PerType`].
#[derive(Debug)]
pub struct SpyBase {
    log: Arc<CallLog>,
    config: SpyConfig,
    policy: NamePolicy,
}

static GLOBAL: LazyLock<SpyBase> = LazyLock::new(SpyBase::new);

impl Default for SpyBase {
    fn default() -> Self {
        Self::new()
    }
}

impl SpyBase {
    pub fn new() -> Self {
        Self {
            log: Arc::new(CallLog::new()),
            config: SpyConfig::default(),
            policy: NamePolicy::default(),
        }
    }

    pub fn with_config(config: SpyConfig) -> Result<Self, SpyError> {
        let policy = config.name_policy()?;
        Ok(Self {
            log: Arc::new(CallLog::new()),
            config,
            policy,
        })
    }

    /// Process-wide capability with default configuration.
    pub fn global() -> &'static SpyBase {
        &GLOBAL
    }

    pub fn config(&self) -> &SpyConfig {
        &self.config
    }

    pub fn log(&self) -> &Arc<CallLog> {
        &self.log
    }

    /// Every record in the shared log, in invocation order.
    pub fn get_calls(&self) -> Vec<CallRecord> {
        self.log.calls()
    }

    pub fn clear_calls(&self) {
        self.log.clear();
    }

    /// Start defining a spy type named `name`.
    pub fn spy(&self, name: impl Into<String>) -> SpyBuilder<'_> {
        SpyBuilder {
            base: self,
            name: name.into(),
            wrapped: Vec::new(),
            overrides: FxHashMap::default(),
            log_scope: self.config.log_scope,
        }
    }
}

/// Composition of the capability with a wrapped class and overrides.
pub struct SpyBuilder<'a> {
    base: &'a SpyBase,
    name: String,
    wrapped: Vec<Arc<Class>>,
    overrides: FxHashMap<String, Member>,
    log_scope: LogScope,
}

impl<'a> SpyBuilder<'a> {
    /// The class being spied on. Exactly one is required.
    pub fn wraps(mut self, class: &Arc<Class>) -> Self {
        self.wrapped.push(Arc::clone(class));
        self
    }

    pub fn log_scope(mut self, scope: LogScope) -> Self {
        self.log_scope = scope;
        self
    }

    /// Declare an override. Same-name members of the wrapped class are then
    /// left alone, whatever their calling convention.
    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.overrides.insert(name.into(), member);
        self
    }

    pub fn method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        self.member(name, Member::method(f))
    }

    pub fn class_method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Arc<Class>, &[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        self.member(name, Member::class_method(f))
    }

    pub fn static_method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        self.member(name, Member::static_method(f))
    }

    pub fn property(self, name: impl Into<String>, property: Property) -> Self {
        self.member(name, Member::Property(property))
    }

    /// Resolve the wrapped class, install wrappers, and produce the spy.
    pub fn build(self) -> Result<SpyClass, SpyError> {
        let wrapped = resolve_wrapped(&self.name, &self.wrapped)?;
        let log = match self.log_scope {
            LogScope::Shared => Arc::clone(&self.base.log),
            LogScope::PerType => Arc::new(CallLog::new()),
        };
        let rec = Recorder::new(Arc::clone(&log), wrapped.name());

        let mut members = self.overrides.clone();
        let mut installed = Vec::new();
        let mut skipped = Vec::new();

        for target in classify::classify(&wrapped, &self.base.policy) {
            if guard::check(&self.overrides, &target.name, target.kind) == Verdict::Skip {
                tracing::debug!(
                    spy = %self.name,
                    owner = %wrapped.name(),
                    member = %target.name,
                    kind = %target.kind,
                    "override present, not intercepting"
                );
                skipped.push(format!("{}:{}", target.name, target.kind));
                continue;
            }
            let Some(original) = wrapped.declared(&target.name) else {
                continue;
            };
            let Some(wrapper) = wrap::build(&rec, &target, original) else {
                continue;
            };
            tracing::debug!(
                spy = %self.name,
                owner = %wrapped.name(),
                member = %target.name,
                kind = %target.kind,
                "installing interceptor"
            );
            install(&mut members, &target, wrapper);
            installed.push(format!("{}:{}", target.name, target.kind));
        }

        tracing::debug!(
            spy = %self.name,
            owner = %wrapped.name(),
            installed = %preview_names(&installed, 8),
            skipped = %preview_names(&skipped, 8),
            "spy type built"
        );

        let class = ClassBuilder::from_parts(self.name, Some(Arc::clone(&wrapped)), members);
        Ok(SpyClass {
            class,
            wrapped,
            log,
        })
    }
}

fn resolve_wrapped(spy: &str, candidates: &[Arc<Class>]) -> Result<Arc<Class>, SpyError> {
    match candidates {
        [only] => Ok(Arc::clone(only)),
        [] => Err(SpyError::Standalone {
            spy: spy.to_string(),
        }),
        many => Err(SpyError::Ambiguous {
            spy: spy.to_string(),
            candidates: many.iter().map(|c| c.name().to_string()).collect(),
        }),
    }
}

/// Put one wrapper into the spy's member table. Property accessors merge
/// into whatever property the table already holds for that name, so a
/// partial override keeps its own accessors next to the wrapped ones.
fn install(members: &mut FxHashMap<String, Member>, target: &Target, wrapper: Wrapper) {
    let name = target.name.clone();
    let accessor = match wrapper {
        Wrapper::Method(f) => {
            members.insert(name, Member::Method(f));
            return;
        }
        Wrapper::ClassMethod(f) => {
            members.insert(name, Member::ClassMethod(f));
            return;
        }
        Wrapper::StaticMethod(f) => {
            members.insert(name, Member::StaticMethod(f));
            return;
        }
        Wrapper::Getter(f) => Property {
            get: Some(f),
            ..Property::default()
        },
        Wrapper::Setter(f) => Property {
            set: Some(f),
            ..Property::default()
        },
        Wrapper::Deleter(f) => Property {
            delete: Some(f),
            ..Property::default()
        },
    };
    let existing = match members.remove(&name) {
        Some(Member::Property(p)) => p,
        _ => Property::default(),
    };
    members.insert(name, Member::Property(existing.merged_over(accessor)));
}

/// A built spy type.
#[derive(Debug, Clone)]
pub struct SpyClass {
    class: Arc<Class>,
    wrapped: Arc<Class>,
    log: Arc<CallLog>,
}

impl SpyClass {
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    pub fn name(&self) -> &str {
        self.class.name()
    }

    /// The class being spied on.
    pub fn wrapped(&self) -> &Arc<Class> {
        &self.wrapped
    }

    /// The log this spy records into.
    pub fn log(&self) -> &Arc<CallLog> {
        &self.log
    }

    pub fn instantiate(&self) -> MemberResult<Instance> {
        self.class.instantiate()
    }

    pub fn instantiate_with(&self, args: &[Value], kwargs: &Kwargs) -> MemberResult<Instance> {
        self.class.instantiate_with(args, kwargs)
    }

    pub fn call(&self, name: &str, args: &[Value]) -> MemberResult {
        self.class.call(name, args)
    }

    pub fn call_with(&self, name: &str, args: &[Value], kwargs: &Kwargs) -> MemberResult {
        self.class.call_with(name, args, kwargs)
    }

    pub fn get_calls(&self) -> Vec<CallRecord> {
        self.log.calls()
    }

    pub fn clear_calls(&self) {
        self.log.clear();
    }

    pub fn report(&self) -> String {
        self.log.report()
    }
}
