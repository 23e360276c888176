//! Domain entities, one tagged struct per entity with explicit enums for
//! every closed set of values. Field names serialise in camelCase to match
//! the fixture files.

pub mod content;
pub mod dog;
pub mod record;
pub mod user;

pub use content::{
    Appointment, AppointmentStatus, AppointmentType, Audience, AuthorRole, BlogCategory,
    BlogComment, BlogPost, EducationCard, GuideType, MealLog, PartnerCategory, ResourcePartner,
    SupportCategory, SupportTopic, TravelDifficulty, TravelGuide,
};
pub use dog::{
    CheckmarkStatus, Dog, DogBadges, HypoallergenicRating, ServiceRole, TaskType,
    VetVerificationStatus,
};
pub use record::{
    AnalysisDecision, DocumentCategory, DocumentType, RecordAnalysis, RecordStatus, VetRecord,
    WalletCategory,
};
pub use user::{SubscriptionTier, User};
