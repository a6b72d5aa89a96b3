//! Charsheet engine library.
//!
//! File-backed storage for character folders, plus the use cases a sheet UI
//! calls into.
//!
//! ## Structure
//!
//! - `infrastructure/` - Ports, local adapters, config, and repositories
//! - `use_cases/` - Operations the UI invokes, one module per sheet area
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures shared by use case tests.
#[cfg(test)]
mod test_fixtures;

pub use app::App;
pub use infrastructure::config::{AppConfig, DataPaths};
pub use infrastructure::error::StoreError;
