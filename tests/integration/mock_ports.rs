//! Mock port adapters for integration tests.
//!
//! The clock records every requested sleep and returns immediately, the
//! sink records every event, and the storage can be told to fail writes
//! so error propagation from the audit trail is observable.

use core::time::Duration;
use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use dogpassport::app::events::AppEvent;
use dogpassport::app::ports::{Clock, EventSink, StorageError, StoragePort};
use dogpassport::app::service::PassportService;
use dogpassport::config::PassportConfig;

// ── RecordingClock ────────────────────────────────────────────

/// Fixed at 2026-10-19 12:00 UTC.
#[derive(Default)]
pub struct RecordingClock {
    pub slept: RefCell<Vec<Duration>>,
}

#[allow(dead_code)]
impl RecordingClock {
    pub fn sleeps_ms(&self) -> Vec<u64> {
        self.slept
            .borrow()
            .iter()
            .map(|d| d.as_millis() as u64)
            .collect()
    }

    pub fn reset(&self) {
        self.slept.borrow_mut().clear();
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn last(&self) -> Option<&AppEvent> {
        self.events.last()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockStorage ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockStorage {
    store: HashMap<String, Vec<u8>>,
    pub fail_writes: bool,
    pub writes: usize,
}

#[allow(dead_code)]
impl MockStorage {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl StoragePort for MockStorage {
    fn read(&self, ns: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.store.get(&format!("{ns}::{key}")) {
            Some(v) if v.len() > buf.len() => Err(StorageError::Full),
            Some(v) => {
                buf[..v.len()].copy_from_slice(v);
                Ok(v.len())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, ns: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        self.writes += 1;
        self.store.insert(format!("{ns}::{key}"), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, ns: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&format!("{ns}::{key}"));
        Ok(())
    }

    fn exists(&self, ns: &str, key: &str) -> bool {
        self.store.contains_key(&format!("{ns}::{key}"))
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub type TestService = PassportService<RecordingClock, MockStorage>;

/// Service over the embedded fixtures, started and signed in as `user_id`.
pub fn service_as(user_id: &str) -> (TestService, RecordingSink) {
    service_with(PassportConfig::default(), MockStorage::default(), Some(user_id))
}

pub fn service_with(
    config: PassportConfig,
    storage: MockStorage,
    user_id: Option<&str>,
) -> (TestService, RecordingSink) {
    let mut svc =
        PassportService::with_fixtures(config, RecordingClock::default(), storage).unwrap();
    let mut sink = RecordingSink::default();
    if let Some(id) = user_id {
        svc.switch_user(id, &mut sink).unwrap();
    }
    svc.start(&mut sink);
    sink.events.clear();
    (svc, sink)
}
