use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Health ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Vet,
    Grooming,
    Training,
    CheckUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub dog_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub date: NaiveDate,
    #[serde(default)]
    pub vet_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    pub id: String,
    pub dog_id: String,
    pub date: NaiveDate,
    pub food_type: String,
    pub amount: String,
    #[serde(default)]
    pub notes: Option<String>,
}

// ── Community ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogCategory {
    Tips,
    Story,
    Research,
    Event,
    Question,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    Handler,
    Vet,
    Trainer,
    Moderator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub author: String,
    pub author_role: AuthorRole,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub likes: u32,
    pub comments: u32,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogComment {
    pub id: String,
    pub post_id: String,
    pub author: String,
    pub content: String,
    pub likes: u32,
    pub created_at: NaiveDate,
}

// ── Support ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportCategory {
    Account,
    Verification,
    Technical,
    Legal,
    Health,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTopic {
    pub id: String,
    pub category: SupportCategory,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub related_topics: Vec<String>,
}

// ── Travel & partners ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuideType {
    Airline,
    Rideshare,
    Restaurant,
    Hotel,
    NationalPark,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelDifficulty {
    Easy,
    Moderate,
    Complex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelGuide {
    pub id: String,
    pub destination: String,
    pub guide_type: GuideType,
    pub title: String,
    pub content: String,
    pub tips: Vec<String>,
    pub documents: Vec<String>,
    pub difficulty: TravelDifficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerCategory {
    Airline,
    Rideshare,
    Restaurant,
    Hotel,
    Grooming,
    Insurance,
    Veterinary,
    Training,
    Retail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePartner {
    pub id: String,
    pub name: String,
    pub category: PartnerCategory,
    pub description: String,
    pub badge: String,
}

// ── Education ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Handler,
    Staff,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub audience: Audience,
    /// Minutes.
    pub read_time: u32,
}
