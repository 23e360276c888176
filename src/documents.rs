//! Document pipeline: filename classification, fingerprinting, the
//! simulated extraction pass and the automated record review.
//!
//! Nothing here reads file contents beyond hashing them. Classification
//! is keyword matching on the lower-cased file name; the first rule that
//! matches wins.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{
    AnalysisDecision, Dog, DocumentCategory, DocumentType, RecordAnalysis, RecordStatus, VetRecord,
    WalletCategory,
};
use crate::verification::fraud;

/// Confidence at or below which a processed document goes to manual review.
pub const MANUAL_REVIEW_THRESHOLD: f32 = 0.7;

const CONFIDENCE_NORMAL: f32 = 0.85;
const CONFIDENCE_SUSPECT: f32 = 0.45;
const RISK_DENIED: f32 = 0.85;
const RISK_ACCEPTED: f32 = 0.15;

// ── Classification ────────────────────────────────────────────

/// Keyword rule: matches when every term of at least one group is present.
struct Rule {
    any_of: &'static [&'static [&'static str]],
    doc: DocumentType,
}

static RULES: &[Rule] = &[
    Rule { any_of: &[&["rabies"]], doc: DocumentType::RabiesCertificate },
    Rule { any_of: &[&["dhpp"], &["dhlpp"]], doc: DocumentType::Dhpp },
    Rule { any_of: &[&["bordetella"], &["kennel"]], doc: DocumentType::Bordetella },
    Rule { any_of: &[&["hip", "screen"]], doc: DocumentType::HipScreening },
    Rule { any_of: &[&["elbow"]], doc: DocumentType::ElbowScreening },
    Rule { any_of: &[&["eye"], &["ophthal"]], doc: DocumentType::EyeScreening },
    Rule { any_of: &[&["cardiac"], &["heart"]], doc: DocumentType::CardiacScreening },
    Rule { any_of: &[&["wellness"], &["annual"]], doc: DocumentType::WellnessExam },
    Rule { any_of: &[&["task", "attest"]], doc: DocumentType::ServiceTaskAttestation },
    Rule { any_of: &[&["train", "cert"]], doc: DocumentType::TrainingCertificate },
    Rule { any_of: &[&["public", "access"]], doc: DocumentType::PublicAccessTest },
    Rule { any_of: &[&["health", "cert"]], doc: DocumentType::HealthCertificate },
    Rule { any_of: &[&["surgery"]], doc: DocumentType::SurgeryReport },
    Rule { any_of: &[&["prescription"], &["rx"]], doc: DocumentType::Prescription },
    Rule { any_of: &[&["microchip"]], doc: DocumentType::MicrochipRegistration },
    Rule { any_of: &[&["groom"]], doc: DocumentType::Grooming },
];

/// Document type guessed from a file name.
pub fn classify(file_name: &str) -> DocumentType {
    let name = file_name.to_lowercase();
    RULES
        .iter()
        .find(|rule| {
            rule.any_of
                .iter()
                .any(|group| group.iter().all(|term| name.contains(term)))
        })
        .map_or(DocumentType::Other, |rule| rule.doc)
}

// ── Processing ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Processed,
    ManualReview,
}

/// Result of running one uploaded file through the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedDocument {
    pub file_name: String,
    pub file_hash: String,
    pub detected_type: DocumentType,
    pub wallet_category: WalletCategory,
    /// Fields the extractor pulled out. Values are canned per type.
    pub extracted: BTreeMap<&'static str, String>,
    pub confidence: f32,
    pub status: ProcessingStatus,
}

/// Classify and fingerprint one file.
pub fn process(file_name: &str, bytes: &[u8]) -> ProcessedDocument {
    let detected_type = classify(file_name);
    let confidence = if file_name.to_lowercase().contains("fake") {
        CONFIDENCE_SUSPECT
    } else {
        CONFIDENCE_NORMAL
    };
    let status = if confidence > MANUAL_REVIEW_THRESHOLD {
        ProcessingStatus::Processed
    } else {
        ProcessingStatus::ManualReview
    };

    ProcessedDocument {
        file_name: file_name.to_string(),
        file_hash: fraud::fingerprint(bytes),
        detected_type,
        wallet_category: detected_type.wallet_category(),
        extracted: extract(detected_type),
        confidence,
        status,
    }
}

fn extract(doc: DocumentType) -> BTreeMap<&'static str, String> {
    let mut fields = BTreeMap::new();
    match doc {
        DocumentType::RabiesCertificate => {
            fields.insert("vaccine_name", "Rabies".to_string());
        }
        DocumentType::ServiceTaskAttestation => {
            fields.insert("tasks_certified", "PTSD alert, Grounding techniques".to_string());
            fields.insert("trainer_name", "Example Training Institute".to_string());
        }
        _ => {}
    }
    fields
}

impl ProcessedDocument {
    /// Wallet record for this document. Uploads carry no expiration date,
    /// so the record starts out active.
    pub fn into_record(self, id: String, dog_id: &str, uploaded_at: NaiveDate) -> VetRecord {
        let tasks_certified = match self.detected_type {
            DocumentType::ServiceTaskAttestation => self
                .extracted
                .get("tasks_certified")
                .map(|t| t.split(", ").map(str::to_string).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        VetRecord {
            id,
            dog_id: dog_id.to_string(),
            category: self.detected_type.category(),
            document_type: self.detected_type,
            status: RecordStatus::Active,
            expiration_date: None,
            uploaded_at,
            verified_by_vet: false,
            verified_by_trainer: false,
            vet_name: None,
            vet_clinic: None,
            notes: None,
            tasks_certified,
            file_hash: Some(self.file_hash),
            file_name: self.file_name,
            analysis: None,
        }
    }
}

/// Group record references by wallet section, preserving input order
/// within each section.
pub fn sort_into_wallet<'a>(
    records: impl IntoIterator<Item = &'a VetRecord>,
) -> BTreeMap<WalletCategory, Vec<&'a VetRecord>> {
    let mut wallet: BTreeMap<WalletCategory, Vec<&VetRecord>> = BTreeMap::new();
    for r in records {
        wallet.entry(r.wallet_category()).or_default().push(r);
    }
    wallet
}

// ── Record review ─────────────────────────────────────────────

/// Automated authenticity review of a single record.
pub fn analyze(record: &VetRecord) -> RecordAnalysis {
    let name = record.file_name.to_lowercase();
    if name.contains("fake") || name.contains("invalid") {
        RecordAnalysis {
            decision: AnalysisDecision::Denied,
            risk_score: RISK_DENIED,
            issues: vec![
                "Document appears tampered".to_string(),
                "Missing or inconsistent metadata".to_string(),
            ],
        }
    } else {
        RecordAnalysis {
            decision: AnalysisDecision::Accepted,
            risk_score: RISK_ACCEPTED,
            issues: Vec::new(),
        }
    }
}

/// A dog counts as verified once it has an accepted vaccination and an
/// accepted training or vet-visit document.
pub fn recompute_verified(dog: &mut Dog, records: &[&VetRecord]) -> bool {
    let accepted_in = |cats: &[DocumentCategory]| {
        records
            .iter()
            .any(|r| r.is_accepted() && cats.contains(&r.category))
    };
    dog.verified = accepted_in(&[DocumentCategory::Vaccination])
        && accepted_in(&[DocumentCategory::TrainingCert, DocumentCategory::VetVisit]);
    dog.verified
}
