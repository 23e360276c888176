//! Public status summary for businesses scanning a dog's QR code or
//! tapping its NFC tag.
//!
//! Only ADA-safe information goes in here: no internal scores, no breed
//! remarks, no fraud flags.

use chrono::NaiveDate;
use serde::Serialize;

use super::derive_record_status;
use super::engine::VerificationLevel;
use crate::model::{Dog, DocumentType, RecordStatus, ServiceRole, VetRecord, WalletCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccinationStatus {
    Current,
    ExpiringSoon,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicStatusSummary {
    pub dog_id: String,
    pub dog_name: String,
    pub handler_name: String,
    pub verification_level: VerificationLevel,
    pub service_role: Option<ServiceRole>,
    pub tasks_description: String,
    pub vaccination_status: VaccinationStatus,
    pub training_verified: bool,
    pub vet_verified: bool,
    pub public_access_test_passed: bool,
    pub behavior_status: &'static str,
    pub qr_code_url: String,
    pub nfc_token: String,
}

pub fn public_status(
    dog: &Dog,
    handler_name: &str,
    records: &[&VetRecord],
    level: VerificationLevel,
    today: NaiveDate,
    window_days: i64,
) -> PublicStatusSummary {
    let training_verified = records.iter().any(|r| {
        r.wallet_category() == WalletCategory::TrainingVerification
            && r.verified_by_trainer
            && r.is_active()
    });
    let vet_verified = records.iter().any(|r| r.verified_by_vet && r.is_active());
    let public_access_test_passed = records
        .iter()
        .any(|r| r.document_type == DocumentType::PublicAccessTest && r.is_active());

    PublicStatusSummary {
        dog_id: dog.id.clone(),
        dog_name: dog.name.clone(),
        handler_name: handler_name.to_string(),
        verification_level: level,
        service_role: dog.service_role(),
        tasks_description: tasks_description(dog, records),
        vaccination_status: vaccination_status(records, today, window_days),
        training_verified,
        vet_verified,
        public_access_test_passed,
        behavior_status: "calm",
        qr_code_url: qr_code_for(&dog.id),
        nfc_token: nfc_token_for(&dog.id),
    }
}

/// Status across the dog's active vaccination records. Expired shots are
/// ignored; with no active vaccination on file the dog reads as expired.
pub fn vaccination_status(
    records: &[&VetRecord],
    today: NaiveDate,
    window_days: i64,
) -> VaccinationStatus {
    let statuses: Vec<RecordStatus> = records
        .iter()
        .filter(|r| r.wallet_category() == WalletCategory::Vaccinations && r.is_active())
        .map(|r| derive_record_status(r.expiration_date, today, window_days))
        .filter(|s| *s != RecordStatus::Expired)
        .collect();

    if statuses.is_empty() {
        VaccinationStatus::Expired
    } else if statuses.contains(&RecordStatus::ExpiringSoon) {
        VaccinationStatus::ExpiringSoon
    } else {
        VaccinationStatus::Current
    }
}

/// Tasks of the first training record that lists any, else the dog's own
/// description.
fn tasks_description(dog: &Dog, records: &[&VetRecord]) -> String {
    let certified = records.iter().find(|r| {
        r.wallet_category() == WalletCategory::TrainingVerification
            && !r.tasks_certified.is_empty()
    });
    if let Some(r) = certified {
        return r.tasks_certified.join(", ");
    }
    dog.task_description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "Service dog tasks".to_string())
}

pub fn qr_code_for(dog_id: &str) -> String {
    format!("/qr/{dog_id}")
}

pub fn nfc_token_for(dog_id: &str) -> String {
    format!("nfc_{dog_id}")
}

/// Dog id encoded in a scanned QR code (`/qr/<id>` or `qr_<id>`).
pub fn dog_id_from_qr(code: &str) -> &str {
    let code = code.trim();
    code.strip_prefix("/qr/")
        .or_else(|| code.strip_prefix("qr_"))
        .unwrap_or(code)
}

/// Dog id encoded in an NFC token (`nfc_<id>`).
pub fn dog_id_from_nfc(token: &str) -> &str {
    let token = token.trim();
    token.strip_prefix("nfc_").unwrap_or(token)
}
