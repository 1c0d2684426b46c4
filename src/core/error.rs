use std::io;
use thiserror::Error;

/// Errors raised while defining a spy type or loading its configuration.
///
/// These surface at definition time; nothing here is ever produced by a
/// forwarded call.
#[derive(Error, Debug)]
pub enum SpyError {
    #[error("spy `{spy}` does not wrap any type; compose it with exactly one wrapped type")]
    Standalone { spy: String },
    #[error("spy `{spy}` wraps {} types ({}); compose it with exactly one wrapped type", .candidates.len(), .candidates.join(", "))]
    Ambiguous { spy: String, candidates: Vec<String> },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid reserved-name pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by the object model itself while dispatching a call or an
/// attribute access. Member implementations never see these; they reach the
/// caller boxed in an `anyhow::Error` and can be recovered with
/// `downcast_ref::<AccessError>()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("'{class}' has no member '{name}'")]
    NoSuchMember { class: String, name: String },
    #[error("property '{name}' of '{class}' has no setter")]
    ReadOnly { class: String, name: String },
    #[error("property '{name}' of '{class}' has no getter")]
    Unreadable { class: String, name: String },
    #[error("property '{name}' of '{class}' has no deleter")]
    Undeletable { class: String, name: String },
    #[error("'{class}.{name}' is an instance method and needs an instance")]
    NeedsInstance { class: String, name: String },
    #[error("'{class}.{name}' is a property and cannot be called")]
    NotCallable { class: String, name: String },
}
