//! spybase: call-interception spies for tests
//!
//! **Wrap a type, override the members your test cares about, and let every
//! other call be logged and forwarded to the real implementation.**
//!
//! Writing a full stub for a type under test means guessing which members
//! the code will touch. A spy removes the guess: compose the interception
//! capability with the real class, define only the members you want to
//! control, and read the call log to see what else was reached.
//!
//! # Core Principles
//!
//! - **Transparent**: intercepted calls return exactly what the original
//!   returns and fail exactly the way it fails
//! - **Overrides win**: any member the spy declares itself is never wrapped
//!   and never logged
//! - **Ordered**: the log holds one record per call, in invocation order
//! - **Explicit**: the wrapped type, the overrides, and the log scope are
//!   all builder inputs; nothing is inferred from declaration order
//!
//! # Architecture
//!
//! ## Object model
//!
//! Rust has no runtime class reflection, so classes are built from explicit
//! member descriptors ([`ClassBuilder`]): instance methods, class methods,
//! static methods, and properties with optional get/set/delete accessors.
//! Values are `serde_json::Value`; member errors are `anyhow::Error` and are
//! never rewritten by the spy layer.
//!
//! ## The trigger
//!
//! [`SpyBuilder::build`] runs once per spy type. It resolves the one wrapped
//! class, classifies its directly-declared members, drops those the spy
//! overrides, and installs a recording wrapper for each remaining operation.
//!
//! ## The log
//!
//! A [`SpyBase`] owns a [`CallLog`] shared by every spy built from it.
//! Use [`LogScope::PerType`] to give a spy its own log instead.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use spybase::{args, CallKind, Class, SpyBase};
//!
//! let real = Class::builder("Clock")
//!     .method("now", |_, _, _| Ok(json!(1_700_000_000)))
//!     .method("sleep", |_, _, _| Ok(json!(null)))
//!     .build();
//!
//! let base = SpyBase::new();
//! let spy = base
//!     .spy("ClockSpy")
//!     .wraps(&real)
//!     .method("now", |_, _, _| Ok(json!(0)))
//!     .build()
//!     .unwrap();
//!
//! let mut clock = spy.instantiate().unwrap();
//! assert_eq!(clock.call("now", &[]).unwrap(), json!(0));
//! clock.call("sleep", &args![5]).unwrap();
//!
//! let calls = base.get_calls();
//! assert_eq!(calls.len(), 1);
//! assert_eq!(calls[0].kind(), CallKind::InstanceMethod);
//! assert_eq!(calls[0].qualified_name(), "sleep");
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: records, the call log, the object model, and the
//!   interception engine

pub mod core;

pub use crate::core::class::{Class, ClassBuilder, Instance};
pub use crate::core::config::{LogScope, NamePolicy, SpyConfig, load_config};
pub use crate::core::error::{AccessError, SpyError};
pub use crate::core::log::CallLog;
pub use crate::core::member::{Member, MemberResult, Property};
pub use crate::core::record::{CallKind, CallRecord, Kwargs};
pub use crate::core::spy::{SpyBase, SpyBuilder, SpyClass};

/// Build a positional argument list from `json!`-compatible expressions.
///
/// ```
/// use serde_json::json;
/// let args = spybase::args![1, "two", [3]];
/// assert_eq!(args, vec![json!(1), json!("two"), json!([3])]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<::serde_json::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$(::serde_json::json!($value)),+]
    };
}

/// Build a [`Kwargs`] map from `name => value` pairs.
///
/// ```
/// use serde_json::json;
/// let kwargs = spybase::kwargs! { "unit" => "cm", "scale" => 2 };
/// assert_eq!(kwargs["scale"], json!(2));
/// ```
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::Kwargs::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Kwargs::new();
        $(map.insert(::std::string::String::from($name), ::serde_json::json!($value));)+
        map
    }};
}
