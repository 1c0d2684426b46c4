//! Override guard: a member the spy declares itself is never intercepted.

use crate::core::member::Member;
use crate::core::record::CallKind;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Intercept,
    /// The spy supplies its own definition.
    Skip,
}

/// Judge one operation against the spy's override table.
///
/// Any same-name override wins regardless of calling convention. When both
/// sides are properties, accessors are judged one at a time: only the
/// accessors the override defines are skipped.
pub fn check(overrides: &FxHashMap<String, Member>, name: &str, kind: CallKind) -> Verdict {
    let Some(own) = overrides.get(name) else {
        return Verdict::Intercept;
    };
    match (own, kind) {
        (Member::Property(p), CallKind::PropertyGet) if p.get.is_none() => Verdict::Intercept,
        (Member::Property(p), CallKind::PropertySet) if p.set.is_none() => Verdict::Intercept,
        (Member::Property(p), CallKind::PropertyDelete) if p.delete.is_none() => {
            Verdict::Intercept
        }
        _ => Verdict::Skip,
    }
}
