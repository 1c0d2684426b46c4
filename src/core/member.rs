//! Member descriptors: the callable shapes a class can declare.

use crate::core::class::{Class, Instance};
use crate::core::record::Kwargs;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Result of invoking a member implementation.
///
/// Errors are opaque to the spy layer; they are handed back to the caller
/// exactly as the implementation produced them.
pub type MemberResult<T = Value> = Result<T, anyhow::Error>;

pub type InstanceFn = Arc<dyn Fn(&mut Instance, &[Value], &Kwargs) -> MemberResult + Send + Sync>;
pub type ClassFn = Arc<dyn Fn(&Arc<Class>, &[Value], &Kwargs) -> MemberResult + Send + Sync>;
pub type StaticFn = Arc<dyn Fn(&[Value], &Kwargs) -> MemberResult + Send + Sync>;
pub type GetterFn = Arc<dyn Fn(&Instance) -> MemberResult + Send + Sync>;
pub type SetterFn = Arc<dyn Fn(&mut Instance, Value) -> MemberResult<()> + Send + Sync>;
pub type DeleterFn = Arc<dyn Fn(&mut Instance) -> MemberResult<()> + Send + Sync>;

/// A directly-declared class member.
#[derive(Clone)]
pub enum Member {
    /// Receives the instance it was called on.
    Method(InstanceFn),
    /// Receives the class it was called through.
    ClassMethod(ClassFn),
    /// Receives no implicit argument.
    StaticMethod(StaticFn),
    Property(Property),
}

impl Member {
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        Member::Method(Arc::new(f))
    }

    pub fn class_method<F>(f: F) -> Self
    where
        F: Fn(&Arc<Class>, &[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        Member::ClassMethod(Arc::new(f))
    }

    pub fn static_method<F>(f: F) -> Self
    where
        F: Fn(&[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        Member::StaticMethod(Arc::new(f))
    }

    pub fn convention(&self) -> &'static str {
        match self {
            Member::Method(_) => "method",
            Member::ClassMethod(_) => "classmethod",
            Member::StaticMethod(_) => "staticmethod",
            Member::Property(_) => "property",
        }
    }

    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Member::Property(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Property(p) => fmt::Debug::fmt(p, f),
            other => write!(f, "Member::{}", other.convention()),
        }
    }
}

/// A property with independently optional accessors.
///
/// An absent accessor makes the matching operation fail at the object-model
/// level (e.g. a property without a setter is read-only).
#[derive(Clone, Default)]
pub struct Property {
    pub get: Option<GetterFn>,
    pub set: Option<SetterFn>,
    pub delete: Option<DeleterFn>,
}

impl Property {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn getter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Instance) -> MemberResult + Send + Sync + 'static,
    {
        self.get = Some(Arc::new(f));
        self
    }

    pub fn setter<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Instance, Value) -> MemberResult<()> + Send + Sync + 'static,
    {
        self.set = Some(Arc::new(f));
        self
    }

    pub fn deleter<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Instance) -> MemberResult<()> + Send + Sync + 'static,
    {
        self.delete = Some(Arc::new(f));
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.set.is_none() && self.delete.is_none()
    }

    /// Take each accessor from `self` when present, otherwise from `fallback`.
    pub fn merged_over(self, fallback: Property) -> Property {
        Property {
            get: self.get.or(fallback.get),
            set: self.set.or(fallback.set),
            delete: self.delete.or(fallback.delete),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .field("delete", &self.delete.is_some())
            .finish()
    }
}
