use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Active,
    ExpiringSoon,
    Expired,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::ExpiringSoon => "expiring-soon",
            Self::Expired => "expired",
        }
    }
}

/// Front-end grouping of documents in the records screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentCategory {
    Vaccination,
    TrainingCert,
    VetVisit,
    Prescription,
    Grooming,
    Health,
    Other,
}

impl DocumentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vaccination => "vaccination",
            Self::TrainingCert => "training-cert",
            Self::VetVisit => "vet-visit",
            Self::Prescription => "prescription",
            Self::Grooming => "grooming",
            Self::Health => "health",
            Self::Other => "other",
        }
    }
}

/// Wallet section a document is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletCategory {
    Vaccinations,
    MedicalRecords,
    TrainingVerification,
    IdentityOwnership,
}

impl WalletCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Vaccinations => "Vaccinations",
            Self::MedicalRecords => "Medical Records",
            Self::TrainingVerification => "Training Verification",
            Self::IdentityOwnership => "Identity & Ownership",
        }
    }
}

/// Fine-grained document kind used as verification evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    RabiesCertificate,
    Dhpp,
    Bordetella,
    HipScreening,
    ElbowScreening,
    EyeScreening,
    CardiacScreening,
    WellnessExam,
    HealthCertificate,
    SurgeryReport,
    Prescription,
    Grooming,
    ServiceTaskAttestation,
    TrainingCertificate,
    PublicAccessTest,
    MicrochipRegistration,
    Other,
}

impl DocumentType {
    pub fn wallet_category(self) -> WalletCategory {
        match self {
            Self::RabiesCertificate | Self::Dhpp | Self::Bordetella => WalletCategory::Vaccinations,
            Self::ServiceTaskAttestation | Self::TrainingCertificate | Self::PublicAccessTest => {
                WalletCategory::TrainingVerification
            }
            Self::MicrochipRegistration | Self::Other => WalletCategory::IdentityOwnership,
            _ => WalletCategory::MedicalRecords,
        }
    }

    pub fn category(self) -> DocumentCategory {
        match self {
            Self::RabiesCertificate | Self::Dhpp | Self::Bordetella => DocumentCategory::Vaccination,
            Self::ServiceTaskAttestation | Self::TrainingCertificate | Self::PublicAccessTest => {
                DocumentCategory::TrainingCert
            }
            Self::WellnessExam | Self::HealthCertificate => DocumentCategory::VetVisit,
            Self::Prescription => DocumentCategory::Prescription,
            Self::Grooming => DocumentCategory::Grooming,
            Self::HipScreening
            | Self::ElbowScreening
            | Self::EyeScreening
            | Self::CardiacScreening
            | Self::SurgeryReport
            | Self::MicrochipRegistration => DocumentCategory::Health,
            Self::Other => DocumentCategory::Other,
        }
    }

    pub fn is_screening(self) -> bool {
        matches!(
            self,
            Self::HipScreening | Self::ElbowScreening | Self::EyeScreening | Self::CardiacScreening
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDecision {
    Accepted,
    Denied,
}

/// Outcome of the automated document review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAnalysis {
    pub decision: AnalysisDecision,
    pub risk_score: f32,
    pub issues: Vec<String>,
}

/// A health or training document in a dog's wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetRecord {
    pub id: String,
    pub dog_id: String,
    pub file_name: String,
    pub category: DocumentCategory,
    pub document_type: DocumentType,
    pub status: RecordStatus,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    pub uploaded_at: NaiveDate,
    pub verified_by_vet: bool,
    #[serde(default)]
    pub verified_by_trainer: bool,
    #[serde(default)]
    pub vet_name: Option<String>,
    #[serde(default)]
    pub vet_clinic: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tasks_certified: Vec<String>,
    /// Hex SHA-256 of the uploaded file, when known.
    #[serde(default)]
    pub file_hash: Option<String>,
    #[serde(default)]
    pub analysis: Option<RecordAnalysis>,
}

impl VetRecord {
    pub fn is_active(&self) -> bool {
        self.status != RecordStatus::Expired
    }

    pub fn wallet_category(&self) -> WalletCategory {
        self.document_type.wallet_category()
    }

    pub fn days_until_expiration(&self, today: NaiveDate) -> Option<i64> {
        self.expiration_date.map(|d| (d - today).num_days())
    }

    pub fn is_accepted(&self) -> bool {
        matches!(
            self.analysis,
            Some(RecordAnalysis {
                decision: AnalysisDecision::Accepted,
                ..
            })
        )
    }
}
