//! Verification-status model.
//!
//! ```text
//!   premium ∧ approved ───────────────▶ BLUE
//!   submitted ∧ uploaded ─────────────▶ GREEN
//!   submitted ∧ ¬uploaded ────────────▶ YELLOW   (advertised for 7 days)
//!   otherwise ────────────────────────▶ NONE
//! ```
//!
//! Rules are evaluated top-down; the first match wins. Record status is
//! a pure function of the expiration date and "today".

pub mod breed;
pub mod business;
pub mod engine;
pub mod fraud;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{CheckmarkStatus, Dog, RecordStatus, SubscriptionTier, VetVerificationStatus};

/// Days before expiration at which a record starts showing as expiring.
pub const DEFAULT_EXPIRING_WINDOW_DAYS: i64 = 30;

/// The four inputs the checkmark depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckmarkInputs {
    pub service_dog_info_submitted: bool,
    pub vet_info_uploaded: bool,
    pub vet_verification_status: VetVerificationStatus,
    pub subscription_tier: SubscriptionTier,
}

impl CheckmarkInputs {
    pub fn for_dog(dog: &Dog, owner_tier: SubscriptionTier) -> Self {
        Self {
            service_dog_info_submitted: dog.service_dog_info_submitted,
            vet_info_uploaded: dog.vet_info_uploaded,
            vet_verification_status: dog.vet_verification_status,
            subscription_tier: owner_tier,
        }
    }
}

pub fn derive_checkmark(inputs: CheckmarkInputs) -> CheckmarkStatus {
    let approved = inputs.vet_verification_status == VetVerificationStatus::Approved;
    if inputs.subscription_tier.is_premium() && approved {
        CheckmarkStatus::Blue
    } else if inputs.service_dog_info_submitted && inputs.vet_info_uploaded {
        CheckmarkStatus::Green
    } else if inputs.service_dog_info_submitted {
        CheckmarkStatus::Yellow
    } else {
        CheckmarkStatus::None
    }
}

/// Status of a record with the given expiration date as seen on `today`.
///
/// A record without an expiration date never expires. Expiring on
/// `today` itself counts as expiring-soon, not expired.
pub fn derive_record_status(
    expiration: Option<NaiveDate>,
    today: NaiveDate,
    window_days: i64,
) -> RecordStatus {
    let Some(expires) = expiration else {
        return RecordStatus::Active;
    };
    let days = (expires - today).num_days();
    if days < 0 {
        RecordStatus::Expired
    } else if days <= window_days {
        RecordStatus::ExpiringSoon
    } else {
        RecordStatus::Active
    }
}

impl RecordStatus {
    /// Status from a raw user-entered date (`YYYY-MM-DD`). Absent or
    /// unparseable input is treated as "no expiration".
    pub fn from_raw_expiration(raw: Option<&str>, today: NaiveDate, window_days: i64) -> Self {
        let parsed = raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        derive_record_status(parsed, today, window_days)
    }
}

// ── Fixture invariants ────────────────────────────────────────

/// A way in which a dog's authored checkmark disagrees with its flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvariantViolation {
    /// Blue without a premium owner or without vet approval.
    BlueNotEarned { dog_id: String },
    /// Green without both submissions.
    GreenIncomplete { dog_id: String },
    /// Yellow although vet records are uploaded or info is missing.
    YellowInconsistent { dog_id: String },
    /// The authored value differs from what the rules derive.
    Mismatch {
        dog_id: String,
        authored: CheckmarkStatus,
        derived: CheckmarkStatus,
    },
}

impl core::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BlueNotEarned { dog_id } => {
                write!(f, "{dog_id}: blue without premium tier and vet approval")
            }
            Self::GreenIncomplete { dog_id } => {
                write!(f, "{dog_id}: green without info submitted and records uploaded")
            }
            Self::YellowInconsistent { dog_id } => {
                write!(f, "{dog_id}: yellow requires info submitted and no records uploaded")
            }
            Self::Mismatch {
                dog_id,
                authored,
                derived,
            } => write!(
                f,
                "{dog_id}: authored {} but rules derive {}",
                authored.label(),
                derived.label()
            ),
        }
    }
}

/// Compare a dog's authored checkmark with the derivation rules.
pub fn audit_dog(dog: &Dog, owner_tier: SubscriptionTier) -> Vec<InvariantViolation> {
    let mut out = Vec::new();
    let id = || dog.id.clone();
    match dog.checkmark_status {
        CheckmarkStatus::Blue => {
            if !owner_tier.is_premium()
                || dog.vet_verification_status != VetVerificationStatus::Approved
            {
                out.push(InvariantViolation::BlueNotEarned { dog_id: id() });
            }
        }
        CheckmarkStatus::Green => {
            if !(dog.service_dog_info_submitted && dog.vet_info_uploaded) {
                out.push(InvariantViolation::GreenIncomplete { dog_id: id() });
            }
        }
        CheckmarkStatus::Yellow => {
            if !dog.service_dog_info_submitted || dog.vet_info_uploaded {
                out.push(InvariantViolation::YellowInconsistent { dog_id: id() });
            }
        }
        CheckmarkStatus::None => {}
    }
    let derived = derive_checkmark(CheckmarkInputs::for_dog(dog, owner_tier));
    if derived != dog.checkmark_status {
        out.push(InvariantViolation::Mismatch {
            dog_id: id(),
            authored: dog.checkmark_status,
            derived,
        });
    }
    out
}
