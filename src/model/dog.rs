use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Displayed verification tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckmarkStatus {
    None,
    Yellow,
    Green,
    Blue,
}

impl CheckmarkStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Not Verified",
            Self::Yellow => "Pending Verification",
            Self::Green => "Verified",
            Self::Blue => "Premium Verified",
        }
    }

    /// Explanation shown next to the badge.
    pub fn description(self) -> &'static str {
        match self {
            Self::None => "No service dog information submitted",
            Self::Yellow => "Temporary - Service dog info submitted, awaiting vet records",
            Self::Green => "Service dog info and vet records complete",
            Self::Blue => "Premium subscription with veterinarian verification",
        }
    }

    /// The UI renders no badge at all for `None`.
    pub fn is_rendered(self) -> bool {
        self != Self::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VetVerificationStatus {
    #[default]
    None,
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    Ptsd,
    Mobility,
    MedicalAlert,
    Hearing,
    Vision,
    Psychiatric,
    Autism,
    Other,
}

impl TaskType {
    /// Role used by the breed compatibility tables.
    pub fn service_role(self) -> Option<ServiceRole> {
        match self {
            Self::Ptsd | Self::Psychiatric => Some(ServiceRole::Psychiatric),
            Self::Mobility => Some(ServiceRole::Mobility),
            Self::MedicalAlert => Some(ServiceRole::MedicalAlert),
            Self::Hearing => Some(ServiceRole::Hearing),
            Self::Vision => Some(ServiceRole::Guide),
            Self::Autism => Some(ServiceRole::AutismSupport),
            Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRole {
    Mobility,
    Guide,
    Psychiatric,
    MedicalAlert,
    AutismSupport,
    Hearing,
}

impl ServiceRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobility => "mobility",
            Self::Guide => "guide",
            Self::Psychiatric => "psychiatric",
            Self::MedicalAlert => "medical_alert",
            Self::AutismSupport => "autism_support",
            Self::Hearing => "hearing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HypoallergenicRating {
    High,
    Moderate,
    Low,
    #[default]
    Unknown,
}

impl HypoallergenicRating {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DogBadges {
    pub ada_compliant: bool,
    pub tsa_approved: bool,
    pub vet_verified: bool,
    pub hypoallergenic: bool,
    pub public_access_cleared: bool,
}

impl DogBadges {
    /// Display names of the badges this dog has earned.
    pub fn earned(&self) -> Vec<&'static str> {
        [
            (self.ada_compliant, "ADA Compliant"),
            (self.tsa_approved, "TSA Approved"),
            (self.vet_verified, "Vet Verified"),
            (self.hypoallergenic, "Hypoallergenic"),
            (self.public_access_cleared, "Public Access Cleared"),
        ]
        .into_iter()
        .filter_map(|(held, name)| held.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// A dog profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub breed: String,
    /// Body weight in pounds.
    pub weight: f32,
    pub age: u8,
    pub sex: String,
    #[serde(default)]
    pub microchip: Option<String>,
    #[serde(default)]
    pub task_type: Option<TaskType>,
    #[serde(default)]
    pub task_description: Option<String>,
    #[serde(default)]
    pub service_dog_id: Option<String>,
    #[serde(default)]
    pub trainer_name: Option<String>,
    #[serde(default)]
    pub certification_date: Option<NaiveDate>,
    pub checkmark_status: CheckmarkStatus,
    #[serde(default)]
    pub badges: DogBadges,
    #[serde(default)]
    pub hypoallergenic_rating: HypoallergenicRating,
    pub service_dog_info_submitted: bool,
    pub vet_info_uploaded: bool,
    #[serde(default)]
    pub vet_verification_status: VetVerificationStatus,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    /// Result of the last record analysis pass.
    #[serde(default)]
    pub verified: bool,
}

impl Dog {
    pub fn service_role(&self) -> Option<ServiceRole> {
        self.task_type.and_then(TaskType::service_role)
    }
}
