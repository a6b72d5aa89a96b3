//! Infrastructure: ports, their local implementations, and the file-backed
//! repositories.

pub mod clock;
pub mod config;
pub mod error;
pub mod file_storage;
pub mod persistence;
pub mod ports;
pub mod reference_loader;
