//! Fuzz target: `AuditTrail` ring buffer
//!
//! Plants arbitrary bytes in audit slots and the index key, then drives
//! `init` / `append` / `read_all` / `clear` and verifies:
//! - No panics when decoding corrupted slots
//! - `read_all` never returns more events than the ring capacity
//! - `clear` leaves the ring empty
//!
//! cargo fuzz run fuzz_audit_trail

#![no_main]

use chrono::{TimeZone, Utc};
use dogpassport::adapters::memory::MemoryStorage;
use dogpassport::app::ports::StoragePort;
use dogpassport::audit::{ActorType, AuditEvent, AuditTrail, EventType};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = (data[0] as usize % 8) + 1;
    let mut store = MemoryStorage::new();

    // Garbage in the index and in a few slots.
    let _ = store.write("audit", "idx", &data[1..data.len().min(5)]);
    for (i, chunk) in data[1..].chunks(16).take(capacity).enumerate() {
        let _ = store.write("audit", &format!("e{i}"), chunk);
    }

    let mut trail = AuditTrail::new(capacity);
    trail.init(&store);
    let before = trail.read_all(&store);
    assert!(before.len() <= capacity);

    let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let writes = data[1] as usize % 12;
    for n in 0..writes {
        let note = String::from_utf8_lossy(&data[..data.len().min(n + 2)]).into_owned();
        let event = AuditEvent::new(EventType::QrCodeScanned, at, "fuzz", ActorType::Business)
            .meta("note", note);
        let _ = trail.append(&mut store, &event);
    }

    let events = trail.read_all(&store);
    assert!(
        events.len() <= capacity,
        "read_all returned {} events, capacity {capacity}",
        events.len()
    );

    let _ = trail.clear(&mut store);
    assert!(trail.read_all(&store).is_empty());
});
