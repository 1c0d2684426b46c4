//! Core modules for spybase's interception engine.
//!
//! Leaf-first: records and the log, the object model the engine operates
//! on, then classification, override guarding, wrapper construction, and
//! the spy trigger that ties them together.

pub mod class;
pub mod classify;
pub mod config;
pub mod error;
pub mod guard;
pub mod log;
pub mod member;
pub mod output;
pub mod record;
pub mod spy;
pub mod wrap;
