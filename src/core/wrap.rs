//! Wrapper factory: intercepting replacements, one constructor per calling
//! convention.
//!
//! Every wrapper appends its record before invoking the original and hands
//! back the original's result or error untouched.

use crate::core::classify::Target;
use crate::core::class::{Class, Instance};
use crate::core::log::CallLog;
use crate::core::member::{
    ClassFn, DeleterFn, GetterFn, InstanceFn, Member, SetterFn, StaticFn,
};
use crate::core::record::{CallKind, CallRecord, Kwargs};
use serde_json::Value;
use std::sync::Arc;

/// Appends records on behalf of one wrapped type.
#[derive(Debug, Clone)]
pub struct Recorder {
    log: Arc<CallLog>,
    owner: Arc<str>,
}

impl Recorder {
    pub fn new(log: Arc<CallLog>, owner: &str) -> Self {
        Self {
            log,
            owner: Arc::from(owner),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn record(&self, kind: CallKind, member: &str, args: Vec<Value>, kwargs: Kwargs) {
        tracing::trace!(owner = %self.owner, member, kind = %kind, "intercepted call");
        self.log
            .append(CallRecord::new(kind, &*self.owner, member, args, kwargs));
    }
}

/// A produced replacement: a whole member, or one property accessor.
#[derive(Clone)]
pub enum Wrapper {
    Method(InstanceFn),
    ClassMethod(ClassFn),
    StaticMethod(StaticFn),
    Getter(GetterFn),
    Setter(SetterFn),
    Deleter(DeleterFn),
}

pub fn wrap_instance_method(rec: Recorder, name: &str, original: InstanceFn) -> InstanceFn {
    let name: Arc<str> = Arc::from(name);
    Arc::new(move |this: &mut Instance, args: &[Value], kwargs: &Kwargs| {
        rec.record(CallKind::InstanceMethod, &name, args.to_vec(), kwargs.clone());
        original(this, args, kwargs)
    })
}

pub fn wrap_class_method(rec: Recorder, name: &str, original: ClassFn) -> ClassFn {
    let name: Arc<str> = Arc::from(name);
    Arc::new(move |class: &Arc<Class>, args: &[Value], kwargs: &Kwargs| {
        rec.record(CallKind::ClassMethod, &name, args.to_vec(), kwargs.clone());
        original(class, args, kwargs)
    })
}

pub fn wrap_static_method(rec: Recorder, name: &str, original: StaticFn) -> StaticFn {
    let name: Arc<str> = Arc::from(name);
    Arc::new(move |args: &[Value], kwargs: &Kwargs| {
        rec.record(CallKind::StaticMethod, &name, args.to_vec(), kwargs.clone());
        original(args, kwargs)
    })
}

pub fn wrap_getter(rec: Recorder, name: &str, original: GetterFn) -> GetterFn {
    let name: Arc<str> = Arc::from(name);
    Arc::new(move |this: &Instance| {
        rec.record(CallKind::PropertyGet, &name, Vec::new(), Kwargs::new());
        original(this)
    })
}

pub fn wrap_setter(rec: Recorder, name: &str, original: SetterFn) -> SetterFn {
    let name: Arc<str> = Arc::from(name);
    Arc::new(move |this: &mut Instance, value: Value| {
        rec.record(CallKind::PropertySet, &name, vec![value.clone()], Kwargs::new());
        original(this, value)
    })
}

pub fn wrap_deleter(rec: Recorder, name: &str, original: DeleterFn) -> DeleterFn {
    let name: Arc<str> = Arc::from(name);
    Arc::new(move |this: &mut Instance| {
        rec.record(CallKind::PropertyDelete, &name, Vec::new(), Kwargs::new());
        original(this)
    })
}

/// Build the replacement for one classified operation of `original`.
///
/// Returns `None` when the target does not match the member's shape (for
/// instance a `PropertySet` target on a property with no setter).
pub fn build(rec: &Recorder, target: &Target, original: &Member) -> Option<Wrapper> {
    let rec = rec.clone();
    let name = target.name.as_str();
    let wrapper = match (target.kind, original) {
        (CallKind::InstanceMethod, Member::Method(f)) => {
            Wrapper::Method(wrap_instance_method(rec, name, Arc::clone(f)))
        }
        (CallKind::ClassMethod, Member::ClassMethod(f)) => {
            Wrapper::ClassMethod(wrap_class_method(rec, name, Arc::clone(f)))
        }
        (CallKind::StaticMethod, Member::StaticMethod(f)) => {
            Wrapper::StaticMethod(wrap_static_method(rec, name, Arc::clone(f)))
        }
        (CallKind::PropertyGet, Member::Property(p)) => {
            Wrapper::Getter(wrap_getter(rec, name, Arc::clone(p.get.as_ref()?)))
        }
        (CallKind::PropertySet, Member::Property(p)) => {
            Wrapper::Setter(wrap_setter(rec, name, Arc::clone(p.set.as_ref()?)))
        }
        (CallKind::PropertyDelete, Member::Property(p)) => {
            Wrapper::Deleter(wrap_deleter(rec, name, Arc::clone(p.delete.as_ref()?)))
        }
        _ => return None,
    };
    Some(wrapper)
}
