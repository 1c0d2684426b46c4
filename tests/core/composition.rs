mod support;

use serde_json::json;
use spybase::{Class, SpyBase, SpyError, args};
use support::my_test_class;

#[test]
fn test_spy_without_wrapped_type_fails_at_definition() {
    let base = SpyBase::new();
    let err = base
        .spy("Lonely")
        .method("anything", |_, _, _| Ok(json!(1)))
        .build()
        .unwrap_err();
    assert!(matches!(err, SpyError::Standalone { ref spy } if spy == "Lonely"));
    assert!(err.to_string().contains("does not wrap any type"));
}

#[test]
fn test_spy_with_two_wrapped_types_is_ambiguous() {
    let base = SpyBase::new();
    let other = Class::builder("Other").build();
    let err = base
        .spy("Greedy")
        .wraps(&my_test_class())
        .wraps(&other)
        .build()
        .unwrap_err();
    match err {
        SpyError::Ambiguous { spy, candidates } => {
            assert_eq!(spy, "Greedy");
            assert_eq!(candidates, vec!["MyTestClass", "Other"]);
        }
        other => panic!("expected ambiguous composition, got {other}"),
    }
}

#[test]
fn test_failed_definition_installs_nothing() {
    let base = SpyBase::new();
    let _ = base.spy("Broken").build();
    assert!(base.get_calls().is_empty());
}

#[test]
fn test_wrapped_class_is_left_untouched() {
    let base = SpyBase::new();
    let real = my_test_class();
    let _spy = base.spy("Spy").wraps(&real).build().unwrap();

    let mut direct = real.instantiate().unwrap();
    assert_eq!(direct.call("instance_method_normal", &args![1]).unwrap(), json!(2));
    assert!(base.get_calls().is_empty());
}

#[test]
fn test_spy_of_a_spy_records_against_the_inner_spy() {
    let base = SpyBase::new();
    let inner = base.spy("Inner").wraps(&my_test_class()).build().unwrap();
    let outer = base.spy("Outer").wraps(inner.class()).build().unwrap();

    let mut s = outer.instantiate().unwrap();
    assert_eq!(s.call("instance_method_normal", &args![1]).unwrap(), json!(2));

    let owners: Vec<_> = base
        .get_calls()
        .iter()
        .map(|c| c.owner().to_string())
        .collect();
    assert_eq!(owners, vec!["Inner", "MyTestClass"]);
}
