//! Fraud and abuse heuristics.
//!
//! Flags produced here are internal. They feed the review queue and are
//! never part of the public summary a business sees.

use crate::model::{Dog, VetRecord};

/// Hex-encoded SHA-256 of a document's bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = hmac_sha256::Hash::hash(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// Flags for a single document checked against every known document.
pub fn check_document(record: &VetRecord, all_records: &[VetRecord]) -> Vec<String> {
    let mut flags = Vec::new();

    if let Some(hash) = &record.file_hash {
        let reused = all_records
            .iter()
            .any(|r| r.dog_id != record.dog_id && r.file_hash.as_deref() == Some(hash.as_str()));
        if reused {
            flags.push("Document hash matches another dog's document - possible reuse".to_string());
        }
    }

    let name = record.file_name.to_lowercase();
    if name.contains("fake") {
        flags.push("Filename suggests fake document".to_string());
    }
    if name.contains("invalid") {
        flags.push("Filename suggests invalid document".to_string());
    }
    flags
}

/// Cross-dog data inconsistencies (shared microchip numbers).
pub fn check_dog_consistency(dog: &Dog, all_dogs: &[Dog]) -> Vec<String> {
    let mut flags = Vec::new();
    if let Some(chip) = dog.microchip.as_deref().filter(|c| !c.is_empty()) {
        let shared = all_dogs
            .iter()
            .any(|d| d.id != dog.id && d.microchip.as_deref() == Some(chip));
        if shared {
            flags.push(format!("Microchip {chip} used by multiple dogs"));
        }
    }
    flags
}

/// Overall risk in 0..=1. Fraud flags weigh three times an inconsistency.
pub fn risk_score(fraud_flags: usize, inconsistency_flags: usize) -> f32 {
    (fraud_flags as f32 * 0.3 + inconsistency_flags as f32 * 0.1).min(1.0)
}

/// Every fraud flag for a dog: its own documents plus dog-level checks.
pub fn flags_for_dog(
    dog: &Dog,
    dog_records: &[&VetRecord],
    all_records: &[VetRecord],
    all_dogs: &[Dog],
) -> Vec<String> {
    let mut flags: Vec<String> = dog_records
        .iter()
        .flat_map(|r| check_document(r, all_records))
        .collect();
    flags.extend(check_dog_consistency(dog, all_dogs));
    flags.dedup();
    flags
}
