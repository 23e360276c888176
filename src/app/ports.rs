//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PassportService (domain)
//! ```
//!
//! Driven adapters (clock, event sinks, storage) implement these traits.
//! The [`PassportService`](super::service::PassportService) consumes them
//! via generics, so the domain core never reads the wall clock or touches
//! a storage backend directly.
//!
//! ## Notes
//!
//! - **Clock** is the only suspension point. Every simulated network call
//!   awaits [`Clock::sleep`]; test clocks complete immediately.
//! - All port errors are typed. Callers must handle every variant.

use core::future::Future;
use core::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: wall clock + timer → domain)
// ───────────────────────────────────────────────────────────────

/// Time source and timer for simulated latencies.
pub trait Clock {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used for expiry calculations.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Suspend for `duration`. Completes immediately for a zero duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (log, UI toast, test
/// recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ key-value store)
// ───────────────────────────────────────────────────────────────

/// Namespaced key-value storage backing the audit trail.
///
/// # Contract
///
/// - Keys are namespaced to prevent collisions between subsystems.
/// - A write either fully replaces the value or fails; no partial writes.
pub trait StoragePort {
    /// Read a value. Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key. Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Backend capacity exhausted.
    Full,
    /// Generic I/O error.
    IoError,
    /// A stored blob failed to decode.
    Corrupted,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
            Self::Corrupted => write!(f, "stored value corrupted"),
        }
    }
}
