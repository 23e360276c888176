//! Evidence-based verification engine.
//!
//! Computes internal scores and review flags from a dog's records, then
//! derives the public verification level. Scores and flags stay internal;
//! businesses only ever see the level (see [`super::business`]).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::breed::{self, RoleFit};
use super::fraud;
use crate::model::{Dog, DocumentType, ServiceRole, VetRecord, WalletCategory};

/// Public, evidence-based level shown to businesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationLevel {
    Yellow,
    Green,
    Blue,
}

/// Internal scores for one dog. Never leaves the admin surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternalScores {
    pub dog_id: String,
    pub service_eligibility: f32,
    pub training_evidence: f32,
    pub health_completeness: f32,
    pub breed_compatibility: f32,
    /// 0..=1, from the fraud and mismatch flag counts.
    pub fraud_risk: f32,
    pub fraud_flags: Vec<String>,
    pub mismatch_flags: Vec<String>,
    pub requires_review: bool,
    pub review_reason: Option<String>,
}

const MOBILITY_MIN_WEIGHT_LBS: f32 = 50.0;
const REVIEW_THRESHOLD: f32 = 0.7;
const BLUE_THRESHOLD: f32 = 0.8;
const RECENT_TRAINING_YEARS: i32 = 2;

/// Score a dog's evidence. `fraud_flags` come from [`super::fraud`].
pub fn compute_scores(
    dog: &Dog,
    records: &[&VetRecord],
    fraud_flags: Vec<String>,
    today: NaiveDate,
) -> InternalScores {
    let service_eligibility = service_eligibility(records);
    let training_evidence = training_evidence(records, today);
    let health_completeness = health_completeness(dog, records);
    let breed_compatibility = breed_compatibility(dog);
    let mismatch_flags = mismatch_flags(dog, records);
    let fraud_risk = fraud::risk_score(fraud_flags.len(), mismatch_flags.len());

    let requires_review = !fraud_flags.is_empty()
        || !mismatch_flags.is_empty()
        || !at_least(service_eligibility, REVIEW_THRESHOLD)
        || !at_least(training_evidence, REVIEW_THRESHOLD);

    let review_reason = requires_review.then(|| {
        if !mismatch_flags.is_empty() {
            mismatch_flags.join("; ")
        } else if !fraud_flags.is_empty() {
            "Fraud flags detected".to_string()
        } else {
            "Low scores require review".to_string()
        }
    });

    InternalScores {
        dog_id: dog.id.clone(),
        service_eligibility,
        training_evidence,
        health_completeness,
        breed_compatibility,
        fraud_risk,
        fraud_flags,
        mismatch_flags,
        requires_review,
        review_reason,
    }
}

/// Derive the public level from records and the internal scores.
pub fn determine_level(records: &[&VetRecord], scores: &InternalScores) -> VerificationLevel {
    let active_in = |cat: WalletCategory| {
        records
            .iter()
            .any(|r| r.wallet_category() == cat && r.is_active())
    };
    if !active_in(WalletCategory::Vaccinations) || !active_in(WalletCategory::TrainingVerification)
    {
        return VerificationLevel::Yellow;
    }

    let vet_verified = records.iter().any(|r| r.verified_by_vet);
    let trainer_verified = records.iter().any(|r| r.verified_by_trainer);
    if !vet_verified || !trainer_verified {
        return VerificationLevel::Green;
    }

    if at_least(scores.service_eligibility, BLUE_THRESHOLD)
        && at_least(scores.training_evidence, BLUE_THRESHOLD)
        && at_least(scores.health_completeness, BLUE_THRESHOLD)
        && !scores.requires_review
    {
        VerificationLevel::Blue
    } else {
        VerificationLevel::Green
    }
}

// ── Scores ────────────────────────────────────────────────────

/// Threshold comparison that tolerates f32 rounding of summed weights.
fn at_least(score: f32, threshold: f32) -> bool {
    score + 1e-6 >= threshold
}

fn has_active(records: &[&VetRecord], doc: DocumentType) -> bool {
    records
        .iter()
        .any(|r| r.document_type == doc && r.is_active())
}

fn service_eligibility(records: &[&VetRecord]) -> f32 {
    let mut score = 0.0;
    if has_active(records, DocumentType::RabiesCertificate) {
        score += 0.3;
    }
    if has_active(records, DocumentType::ServiceTaskAttestation) {
        score += 0.3;
    }
    if has_active(records, DocumentType::PublicAccessTest) {
        score += 0.2;
    }
    if records
        .iter()
        .any(|r| r.document_type.is_screening() && r.is_active())
    {
        score += 0.2;
    }
    f32::min(score, 1.0)
}

fn training_evidence(records: &[&VetRecord], today: NaiveDate) -> f32 {
    let training: Vec<&&VetRecord> = records
        .iter()
        .filter(|r| r.wallet_category() == WalletCategory::TrainingVerification)
        .collect();
    if training.is_empty() {
        return 0.0;
    }
    let mut score = 0.5;
    if training.iter().any(|r| r.verified_by_trainer) {
        score += 0.3;
    }
    if training
        .iter()
        .any(|r| r.uploaded_at.year() >= today.year() - RECENT_TRAINING_YEARS)
    {
        score += 0.2;
    }
    f32::min(score, 1.0)
}

fn health_completeness(dog: &Dog, records: &[&VetRecord]) -> f32 {
    let mut score = 0.0;
    if has_active(records, DocumentType::RabiesCertificate) {
        score += 0.3;
    }
    if has_active(records, DocumentType::Dhpp) {
        score += 0.2;
    }
    if let Some(info) = breed::lookup(&dog.breed) {
        let recommended = info.recommended_screenings;
        if !recommended.is_empty() {
            let completed = recommended
                .iter()
                .filter(|s| has_active(records, s.document_type()))
                .count();
            score += 0.3 * completed as f32 / recommended.len() as f32;
        }
    }
    if records.iter().any(|r| r.verified_by_vet) {
        score += 0.2;
    }
    f32::min(score, 1.0)
}

fn breed_compatibility(dog: &Dog) -> f32 {
    let (Some(info), Some(role)) = (breed::lookup(&dog.breed), dog.service_role()) else {
        return 0.5;
    };
    match info.fit(role) {
        RoleFit::Ideal => 1.0,
        RoleFit::Suitable => 0.8,
        RoleFit::Atypical => 0.6,
    }
}

// ── Flags ─────────────────────────────────────────────────────

fn mismatch_flags(dog: &Dog, records: &[&VetRecord]) -> Vec<String> {
    let mut flags = Vec::new();
    let role = dog.service_role();

    if role == Some(ServiceRole::Mobility) && dog.weight > 0.0 && dog.weight < MOBILITY_MIN_WEIGHT_LBS
    {
        flags.push(format!(
            "Small size ({} lbs) for mobility task - requires additional documentation",
            dog.weight
        ));
    }

    let Some(info) = breed::lookup(&dog.breed) else {
        return flags;
    };

    if let Some(role) = role {
        if info.fit(role) == RoleFit::Atypical {
            flags.push(format!(
                "Breed-task mismatch: {} not typically used for {}",
                dog.breed,
                role.as_str()
            ));
        }
    }

    for screening in info.recommended_screenings.iter().take(2) {
        if !has_active(records, screening.document_type()) {
            flags.push(format!(
                "Missing recommended screening: {} for {}",
                screening.name(),
                dog.breed
            ));
        }
    }
    flags
}
