//! Call classification: which operations of a class's own members can be
//! intercepted, and under which calling convention.

use crate::core::class::Class;
use crate::core::config::NamePolicy;
use crate::core::member::Member;
use crate::core::record::CallKind;

/// One interceptable operation on a directly-declared member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Target {
    pub name: String,
    pub kind: CallKind,
}

/// Operations a single member exposes. Properties yield one entry per
/// accessor they actually define; everything else yields exactly one.
pub fn kinds_of(member: &Member) -> Vec<CallKind> {
    match member {
        Member::Method(_) => vec![CallKind::InstanceMethod],
        Member::ClassMethod(_) => vec![CallKind::ClassMethod],
        Member::StaticMethod(_) => vec![CallKind::StaticMethod],
        Member::Property(p) => {
            let mut kinds = Vec::with_capacity(3);
            if p.get.is_some() {
                kinds.push(CallKind::PropertyGet);
            }
            if p.set.is_some() {
                kinds.push(CallKind::PropertySet);
            }
            if p.delete.is_some() {
                kinds.push(CallKind::PropertyDelete);
            }
            kinds
        }
    }
}

/// Classify every member `class` declares itself, skipping reserved names.
/// Inherited members are not considered. Sorted by name, then kind.
pub fn classify(class: &Class, policy: &NamePolicy) -> Vec<Target> {
    let mut targets = Vec::new();
    for name in class.declared_names() {
        if policy.is_reserved(name) {
            continue;
        }
        let Some(member) = class.declared(name) else {
            continue;
        };
        for kind in kinds_of(member) {
            targets.push(Target {
                name: name.to_string(),
                kind,
            });
        }
    }
    targets.sort();
    targets
}
