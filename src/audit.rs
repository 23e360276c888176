//! Audit trail.
//!
//! Stores up to `capacity` audit events in a [`StoragePort`] ring buffer
//! under the "audit" namespace. Each slot holds one postcard-encoded
//! [`AuditEvent`]; a separate index key records the next slot to write.
//! Once full, the oldest event is overwritten.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::ports::{StorageError, StoragePort};

const AUDIT_NAMESPACE: &str = "audit";
const AUDIT_INDEX_KEY: &str = "idx";
/// Upper bound for one encoded event.
const MAX_EVENT_BYTES: usize = 2048;
/// Metadata values longer than this are cut on a char boundary.
pub const MAX_META_CHARS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DocumentUploaded,
    DocumentVerified,
    VerificationRequested,
    VerificationSubmitted,
    QrCodeScanned,
    NfcTapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorType {
    Handler,
    Business,
    Admin,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub actor_id: String,
    pub actor_type: ActorType,
    pub dog_id: Option<String>,
    pub record_id: Option<String>,
    pub organization_id: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub success: bool,
    pub error: Option<String>,
}

impl AuditEvent {
    /// A successful event with a fresh `EVT-<uuid>` id.
    pub fn new(
        event_type: EventType,
        timestamp: DateTime<Utc>,
        actor_id: impl Into<String>,
        actor_type: ActorType,
    ) -> Self {
        Self {
            id: format!("EVT-{}", Uuid::new_v4()),
            event_type,
            timestamp,
            actor_id: actor_id.into(),
            actor_type,
            dog_id: None,
            record_id: None,
            organization_id: None,
            metadata: BTreeMap::new(),
            success: true,
            error: None,
        }
    }

    pub fn dog(mut self, dog_id: impl Into<String>) -> Self {
        self.dog_id = Some(dog_id.into());
        self
    }

    pub fn record(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    pub fn organization(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut value = value.into();
        if let Some((cut, _)) = value.char_indices().nth(MAX_META_CHARS) {
            value.truncate(cut);
        }
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.success = false;
        self.error = Some(error.into());
        self
    }
}

/// Storage-backed ring buffer of audit events.
#[derive(Debug)]
pub struct AuditTrail {
    capacity: usize,
    write_index: usize,
}

impl AuditTrail {
    /// `capacity` is clamped to at least one slot.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            write_index: 0,
        }
    }

    /// Load the write index from storage, or default to 0.
    pub fn init(&mut self, store: &impl StoragePort) {
        let mut buf = [0u8; 4];
        if let Ok(4) = store.read(AUDIT_NAMESPACE, AUDIT_INDEX_KEY, &mut buf) {
            self.write_index = u32::from_le_bytes(buf) as usize % self.capacity;
        }
    }

    /// Encode `event` for a slot, rejecting it if it cannot fit.
    pub fn encode(event: &AuditEvent) -> Result<Vec<u8>, StorageError> {
        let bytes = postcard::to_allocvec(event).map_err(|_| StorageError::Corrupted)?;
        if bytes.len() > MAX_EVENT_BYTES {
            warn!("AUDIT | event {} too large ({} bytes)", event.id, bytes.len());
            return Err(StorageError::Full);
        }
        Ok(bytes)
    }

    /// Write an event to the next ring slot and advance the index.
    pub fn append(
        &mut self,
        store: &mut impl StoragePort,
        event: &AuditEvent,
    ) -> Result<(), StorageError> {
        let bytes = Self::encode(event)?;
        store.write(AUDIT_NAMESPACE, &Self::slot_key(self.write_index), &bytes)?;

        self.write_index = (self.write_index + 1) % self.capacity;
        let idx_bytes = (self.write_index as u32).to_le_bytes();
        store.write(AUDIT_NAMESPACE, AUDIT_INDEX_KEY, &idx_bytes)?;
        debug!("AUDIT | {:?} {}", event.event_type, event.id);
        Ok(())
    }

    /// All stored events, oldest first. Undecodable slots are skipped.
    pub fn read_all(&self, store: &impl StoragePort) -> Vec<AuditEvent> {
        // Slots from the write index onward are older than those before it.
        let order = (self.write_index..self.capacity).chain(0..self.write_index);
        let mut buf = vec![0u8; MAX_EVENT_BYTES];
        let mut events = Vec::new();
        for i in order {
            if let Ok(len) = store.read(AUDIT_NAMESPACE, &Self::slot_key(i), &mut buf) {
                match postcard::from_bytes::<AuditEvent>(&buf[..len]) {
                    Ok(event) => events.push(event),
                    Err(_) => warn!("AUDIT | slot {i} corrupted, skipped"),
                }
            }
        }
        events
    }

    /// Erase all events and reset the index.
    pub fn clear(&mut self, store: &mut impl StoragePort) -> Result<(), StorageError> {
        for i in 0..self.capacity {
            store.delete(AUDIT_NAMESPACE, &Self::slot_key(i))?;
        }
        store.delete(AUDIT_NAMESPACE, AUDIT_INDEX_KEY)?;
        self.write_index = 0;
        Ok(())
    }

    pub fn count(&self, store: &impl StoragePort) -> usize {
        (0..self.capacity)
            .filter(|i| store.exists(AUDIT_NAMESPACE, &Self::slot_key(*i)))
            .count()
    }

    fn slot_key(index: usize) -> String {
        format!("e{index}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStorage;
    use chrono::TimeZone;

    fn event(n: u32) -> AuditEvent {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, n).unwrap();
        AuditEvent::new(EventType::QrCodeScanned, at, "biz-1", ActorType::Business)
            .dog("dog-001")
            .meta("n", n.to_string())
    }

    #[test]
    fn trail_starts_at_zero() {
        let trail = AuditTrail::new(4);
        assert_eq!(trail.write_index, 0);
        assert_eq!(trail.count(&MemoryStorage::new()), 0);
    }

    #[test]
    fn append_and_read_single_event() {
        let mut store = MemoryStorage::new();
        let mut trail = AuditTrail::new(4);
        let e = event(1).organization("org-7");

        trail.append(&mut store, &e).unwrap();
        let events = trail.read_all(&store);
        assert_eq!(events, [e]);
        assert!(events[0].id.starts_with("EVT-"));
        assert!(events[0].success);
    }

    #[test]
    fn ring_wraps_and_keeps_newest_oldest_first() {
        let mut store = MemoryStorage::new();
        let mut trail = AuditTrail::new(4);

        for n in 0..6 {
            trail.append(&mut store, &event(n)).unwrap();
        }
        let events = trail.read_all(&store);
        assert_eq!(events.len(), 4);
        let ns: Vec<&str> = events.iter().map(|e| e.metadata["n"].as_str()).collect();
        assert_eq!(ns, ["2", "3", "4", "5"]);
    }

    #[test]
    fn index_survives_reinit() {
        let mut store = MemoryStorage::new();
        let mut trail = AuditTrail::new(4);
        trail.append(&mut store, &event(0)).unwrap();
        trail.append(&mut store, &event(1)).unwrap();

        let mut reopened = AuditTrail::new(4);
        reopened.init(&store);
        reopened.append(&mut store, &event(2)).unwrap();
        assert_eq!(reopened.count(&store), 3);
    }

    #[test]
    fn clear_erases_all() {
        let mut store = MemoryStorage::new();
        let mut trail = AuditTrail::new(4);

        trail.append(&mut store, &event(1)).unwrap();
        trail.append(&mut store, &event(2)).unwrap();
        trail.clear(&mut store).unwrap();

        assert!(trail.read_all(&store).is_empty());
        assert_eq!(trail.write_index, 0);
    }

    #[test]
    fn failed_event_carries_error() {
        let e = event(0).failed("unknown credential");
        assert!(!e.success);
        assert_eq!(e.error.as_deref(), Some("unknown credential"));
    }

    #[test]
    fn zero_capacity_is_one_slot() {
        let mut store = MemoryStorage::new();
        let mut trail = AuditTrail::new(0);
        trail.append(&mut store, &event(0)).unwrap();
        trail.append(&mut store, &event(1)).unwrap();
        assert_eq!(trail.count(&store), 1);
        assert_eq!(trail.read_all(&store)[0].metadata["n"], "1");
    }

    #[test]
    fn long_metadata_is_cut_and_still_fits() {
        let name = format!("{}rabies.pdf", "é".repeat(3000));
        let e = event(0).meta("file_name", name);
        assert_eq!(e.metadata["file_name"].chars().count(), MAX_META_CHARS);

        let mut store = MemoryStorage::new();
        let mut trail = AuditTrail::new(2);
        trail.append(&mut store, &e).unwrap();
        assert_eq!(trail.read_all(&store), [e]);
    }

    #[test]
    fn oversized_event_is_rejected_before_writing() {
        let mut e = event(0);
        e.actor_id = "x".repeat(MAX_EVENT_BYTES);
        assert_eq!(AuditTrail::encode(&e), Err(StorageError::Full));

        let mut store = MemoryStorage::new();
        let mut trail = AuditTrail::new(2);
        assert_eq!(trail.append(&mut store, &e), Err(StorageError::Full));
        assert_eq!(trail.count(&store), 0);
    }
}
