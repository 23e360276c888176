//! Fuzz target: upload classification and credential parsing
//!
//! Feeds arbitrary file names and bytes through `documents::process` and
//! arbitrary strings through the QR / NFC decoders.
//!
//! Invariants checked:
//! - No panics for any name or payload
//! - The fingerprint is always 64 lowercase hex characters
//! - Decoded dog ids are never longer than the credential
//!
//! cargo fuzz run fuzz_document_pipeline

#![no_main]

use dogpassport::documents;
use dogpassport::verification::business;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let split = data.first().map_or(0, |b| *b as usize).min(data.len());
    let (name_bytes, payload) = data.split_at(split);
    let name = String::from_utf8_lossy(name_bytes);

    let doc = documents::process(&name, payload);
    assert_eq!(doc.file_hash.len(), 64);
    assert!(doc.file_hash.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    assert_eq!(doc.wallet_category, doc.detected_type.wallet_category());

    assert!(business::dog_id_from_qr(&name).len() <= name.len());
    assert!(business::dog_id_from_nfc(&name).len() <= name.len());
});
