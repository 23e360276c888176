//! Breed capability matrix.
//!
//! Used for internal review flags and recommendations only. A breed is
//! never grounds for denying public access.

use crate::model::{DocumentType, ServiceRole};

/// A health screening a breed should have on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screening {
    HipDysplasia,
    ElbowDysplasia,
    EyeExam,
    Cardiac,
}

impl Screening {
    pub fn name(self) -> &'static str {
        match self {
            Self::HipDysplasia => "hip_dysplasia",
            Self::ElbowDysplasia => "elbow_dysplasia",
            Self::EyeExam => "eye_exam",
            Self::Cardiac => "cardiac",
        }
    }

    /// Document that satisfies this screening.
    pub fn document_type(self) -> DocumentType {
        match self {
            Self::HipDysplasia => DocumentType::HipScreening,
            Self::ElbowDysplasia => DocumentType::ElbowScreening,
            Self::EyeExam => DocumentType::EyeScreening,
            Self::Cardiac => DocumentType::CardiacScreening,
        }
    }
}

#[derive(Debug)]
pub struct BreedCapability {
    pub breed_name: &'static str,
    pub ideal_roles: &'static [ServiceRole],
    pub suitable_roles: &'static [ServiceRole],
    /// Typical adult weight in pounds (min, max).
    pub weight_range_lbs: (f32, f32),
    pub temperament: &'static [&'static str],
    /// Ordered by importance.
    pub recommended_screenings: &'static [Screening],
}

impl BreedCapability {
    pub fn fit(&self, role: ServiceRole) -> RoleFit {
        if self.ideal_roles.contains(&role) {
            RoleFit::Ideal
        } else if self.suitable_roles.contains(&role) {
            RoleFit::Suitable
        } else {
            RoleFit::Atypical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFit {
    Ideal,
    Suitable,
    Atypical,
}

use ServiceRole::{AutismSupport, Guide, Hearing, MedicalAlert, Mobility, Psychiatric};
use Screening::{Cardiac, ElbowDysplasia, EyeExam, HipDysplasia};

static BREEDS: &[BreedCapability] = &[
    BreedCapability {
        breed_name: "Labrador Retriever",
        ideal_roles: &[Guide, Mobility, MedicalAlert],
        suitable_roles: &[Psychiatric, AutismSupport],
        weight_range_lbs: (55.0, 80.0),
        temperament: &["friendly", "outgoing", "trainable", "calm"],
        recommended_screenings: &[HipDysplasia, ElbowDysplasia, EyeExam, Cardiac],
    },
    BreedCapability {
        breed_name: "Golden Retriever",
        ideal_roles: &[Guide, Psychiatric, AutismSupport],
        suitable_roles: &[Mobility, MedicalAlert],
        weight_range_lbs: (55.0, 75.0),
        temperament: &["gentle", "calm", "intelligent", "patient"],
        recommended_screenings: &[HipDysplasia, ElbowDysplasia, EyeExam, Cardiac],
    },
    BreedCapability {
        breed_name: "Standard Poodle",
        ideal_roles: &[Psychiatric, MedicalAlert, AutismSupport],
        suitable_roles: &[Guide, Hearing],
        weight_range_lbs: (40.0, 70.0),
        temperament: &["intelligent", "alert", "trainable"],
        recommended_screenings: &[HipDysplasia, EyeExam, Cardiac],
    },
];

/// Look up a breed by exact name.
pub fn lookup(breed: &str) -> Option<&'static BreedCapability> {
    BREEDS.iter().find(|b| b.breed_name == breed)
}
