//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - File access (local disk in production, mocks for I/O failures in tests)
//! - Clock (for deterministic note timestamps)

use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};

// =============================================================================
// File Storage
// =============================================================================

/// Port for file system operations.
///
/// Repositories never call `std::fs` directly; they go through this trait so
/// failure paths can be exercised with a mock.
#[cfg_attr(test, mockall::automock)]
pub trait FileStoragePort: Send + Sync {
    /// Create all directories in the path if they don't exist.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write a string to a file, replacing any previous content.
    fn write_str(&self, path: &Path, data: &str) -> io::Result<()>;

    /// Read file contents as string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Immediate subdirectories of `path`.
    fn list_dirs(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Remove a directory and all its contents.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
