//! The process-wide capability lives for the whole test binary, so this
//! binary holds a single test.

mod support;

use serde_json::json;
use spybase::{CallKind, SpyBase, args};
use support::spy_test_class;

#[test]
fn test_global_capability_shares_one_log() {
    let base = SpyBase::global();
    assert!(std::ptr::eq(base, SpyBase::global()));
    base.clear_calls();

    let spy = spy_test_class(base);
    let mut s = spy.instantiate().unwrap();
    assert_eq!(s.call("instance_method_normal", &args![1]).unwrap(), json!(2));
    assert_eq!(s.call("instance_method_towrap", &args![1]).unwrap(), json!(5));

    let calls = SpyBase::global().get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind(), CallKind::InstanceMethod);

    SpyBase::global().clear_calls();
    SpyBase::global().clear_calls();
    assert!(base.get_calls().is_empty());
    assert!(spy.get_calls().is_empty());
}
