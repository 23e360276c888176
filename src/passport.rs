//! Passport card: the badge a handler shows at a venue.
//!
//! Modes only change presentation. The QR payload is JSON so any scanner
//! can read the dog id back out.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::fixtures::Store;
use crate::model::{
    AppointmentStatus, AppointmentType, CheckmarkStatus, Dog, RecordStatus, VetRecord,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassportMode {
    #[default]
    Default,
    Flight,
    Rideshare,
    Restaurant,
    Allergy,
}

impl PassportMode {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Flight,
        Self::Rideshare,
        Self::Restaurant,
        Self::Allergy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Flight => "flight",
            Self::Rideshare => "rideshare",
            Self::Restaurant => "restaurant",
            Self::Allergy => "allergy",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Default => "Standard Badge",
            Self::Flight => "Flight Mode",
            Self::Rideshare => "Rideshare Mode",
            Self::Restaurant => "Restaurant Mode",
            Self::Allergy => "Allergy Mode",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Default => "General public access verification",
            Self::Flight => "TSA-ready documents and verification",
            Self::Rideshare => "Uber/Lyft optimized verification",
            Self::Restaurant => "Public access cleared for dining",
            Self::Allergy => "Hypoallergenic transparency",
        }
    }

    /// Documents a venue in this mode typically asks to see.
    pub fn required_documents(self) -> &'static [&'static str] {
        match self {
            Self::Flight => &[
                "Service Dog Task Attestation",
                "Rabies Vaccination",
                "Health Certificate",
            ],
            Self::Rideshare => &["Service Dog Certification", "Vaccination Records"],
            Self::Default | Self::Restaurant | Self::Allergy => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredDocument {
    pub name: &'static str,
    pub present: bool,
}

/// Payload encoded into the passport QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub dog_id: String,
    pub name: String,
    pub verified: bool,
    pub checkmark_status: CheckmarkStatus,
    pub mode: PassportMode,
    pub timestamp: String,
    pub service_dog_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassportCard {
    pub dog_id: String,
    pub dog_name: String,
    pub breed: String,
    pub mode: PassportMode,
    pub title: &'static str,
    pub description: &'static str,
    pub mode_badges: Vec<String>,
    pub dog_badges: Vec<&'static str>,
    pub checkmark: CheckmarkStatus,
    pub checkmark_label: &'static str,
    pub required_documents: Vec<RequiredDocument>,
    /// JSON-encoded [`QrPayload`].
    pub qr_payload: String,
}

/// Build the card for `dog` in `mode` at `now`.
pub fn card(
    store: &Store,
    dog: &Dog,
    mode: PassportMode,
    now: DateTime<Utc>,
) -> serde_json::Result<PassportCard> {
    let checkmark = store.displayed_checkmark(dog);
    let records = store.records_of(&dog.id);

    let required_documents = mode
        .required_documents()
        .iter()
        .map(|&name| RequiredDocument {
            name,
            present: document_present(name, &records),
        })
        .collect();

    let payload = QrPayload {
        dog_id: dog.id.clone(),
        name: dog.name.clone(),
        verified: checkmark >= CheckmarkStatus::Green,
        checkmark_status: checkmark,
        mode,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        service_dog_id: dog.service_dog_id.clone(),
    };

    Ok(PassportCard {
        dog_id: dog.id.clone(),
        dog_name: dog.name.clone(),
        breed: dog.breed.clone(),
        mode,
        title: mode.title(),
        description: mode.description(),
        mode_badges: mode_badges(store, dog, mode),
        dog_badges: short_badges(dog),
        checkmark,
        checkmark_label: checkmark.label(),
        required_documents,
        qr_payload: serde_json::to_string(&payload)?,
    })
}

fn mode_badges(store: &Store, dog: &Dog, mode: PassportMode) -> Vec<String> {
    let fixed: &[&str] = match mode {
        PassportMode::Default | PassportMode::Restaurant => {
            &["ADA Compliant", "Public Access Authorized"]
        }
        PassportMode::Flight => &["TSA Approved", "DOT Compliant", "Health Certificate Valid"],
        PassportMode::Rideshare => &["ADA Compliant", "Rideshare Verified"],
        PassportMode::Allergy => {
            let last_groomed = store
                .appointments
                .iter()
                .filter(|a| {
                    a.dog_id == dog.id
                        && a.kind == AppointmentType::Grooming
                        && a.status == AppointmentStatus::Completed
                })
                .map(|a| a.date)
                .max();
            return vec![
                format!("Hypoallergenic Rating: {}", dog.hypoallergenic_rating.label()),
                match last_groomed {
                    Some(d) => format!("Last Groomed: {d}"),
                    None => "Last Groomed: not recorded".to_string(),
                },
            ];
        }
    };
    fixed.iter().map(|s| s.to_string()).collect()
}

/// Compact badge names used on the card face.
fn short_badges(dog: &Dog) -> Vec<&'static str> {
    let b = &dog.badges;
    [
        (b.ada_compliant, "ADA"),
        (b.tsa_approved, "TSA"),
        (b.vet_verified, "Vet Verified"),
        (b.hypoallergenic, "Hypoallergenic"),
    ]
    .into_iter()
    .filter_map(|(held, name)| held.then_some(name))
    .collect()
}

/// A document counts as present when an active record's file name
/// contains the first word of the document name, ignoring case.
pub fn document_present(name: &str, records: &[&VetRecord]) -> bool {
    let Some(first) = name.split_whitespace().next() else {
        return false;
    };
    let first = first.to_lowercase();
    records
        .iter()
        .filter(|r| r.status == RecordStatus::Active)
        .any(|r| r.file_name.to_lowercase().contains(&first))
}
