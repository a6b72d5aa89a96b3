//! Common utility functions shared by the codecs and the engine.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Minimal dependencies** - only chrono for datetime utilities

pub mod datetime;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use datetime::parse_datetime;
pub use string::{
    ensure_plain_field, flag, join_list, none_if_empty, parse_flag, split_list,
    COMPOUND_SEPARATOR, FIELD_SEPARATOR,
};
