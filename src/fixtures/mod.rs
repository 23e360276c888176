//! Mock data store.
//!
//! Every collection is parsed once from JSON embedded in the binary. The
//! store is read-only after load apart from in-memory additions made by
//! uploads and record analysis, which are never written back.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::config::{PassportConfig, RecordStatusSource};
use crate::error::{Error, NotFound, Result};
use crate::model::{
    Appointment, BlogComment, BlogPost, CheckmarkStatus, Dog, EducationCard, MealLog,
    ResourcePartner, SubscriptionTier, SupportTopic, TravelGuide, User, VetRecord,
};
use crate::verification::{self, CheckmarkInputs, InvariantViolation};

const USERS: &str = include_str!("data/users.json");
const DOGS: &str = include_str!("data/dogs.json");
const RECORDS: &str = include_str!("data/records.json");
const APPOINTMENTS: &str = include_str!("data/appointments.json");
const MEALS: &str = include_str!("data/meals.json");
const BLOG_POSTS: &str = include_str!("data/blog_posts.json");
const BLOG_COMMENTS: &str = include_str!("data/blog_comments.json");
const SUPPORT_TOPICS: &str = include_str!("data/support_topics.json");
const TRAVEL_GUIDES: &str = include_str!("data/travel_guides.json");
const PARTNERS: &str = include_str!("data/partners.json");
const EDUCATION_CARDS: &str = include_str!("data/education_cards.json");

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub users: Vec<User>,
    pub dogs: Vec<Dog>,
    pub records: Vec<VetRecord>,
    pub appointments: Vec<Appointment>,
    pub meals: Vec<MealLog>,
    pub blog_posts: Vec<BlogPost>,
    pub blog_comments: Vec<BlogComment>,
    pub support_topics: Vec<SupportTopic>,
    pub travel_guides: Vec<TravelGuide>,
    pub partners: Vec<ResourcePartner>,
    pub education_cards: Vec<EducationCard>,
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| Error::Fixture(format!("{name}: {e}")))
}

impl Store {
    /// Parse the embedded fixtures and prepare them for `today`.
    pub fn load(cfg: &PassportConfig, today: NaiveDate) -> Result<Self> {
        let mut store = Self {
            users: parse("users", USERS)?,
            dogs: parse("dogs", DOGS)?,
            records: parse("records", RECORDS)?,
            appointments: parse("appointments", APPOINTMENTS)?,
            meals: parse("meals", MEALS)?,
            blog_posts: parse("blog_posts", BLOG_POSTS)?,
            blog_comments: parse("blog_comments", BLOG_COMMENTS)?,
            support_topics: parse("support_topics", SUPPORT_TOPICS)?,
            travel_guides: parse("travel_guides", TRAVEL_GUIDES)?,
            partners: parse("partners", PARTNERS)?,
            education_cards: parse("education_cards", EDUCATION_CARDS)?,
        };
        store.prepare(cfg, today);
        info!(
            "Fixtures loaded: {} users, {} dogs, {} records",
            store.users.len(),
            store.dogs.len(),
            store.records.len()
        );
        Ok(store)
    }

    /// Apply the configured record-status policy and report checkmark
    /// invariant violations. Violations are logged, never corrected.
    pub fn prepare(&mut self, cfg: &PassportConfig, today: NaiveDate) {
        if cfg.record_status_source == RecordStatusSource::Derived {
            self.refresh_record_status(today, cfg.expiring_soon_window_days);
        }
        for v in self.audit() {
            warn!("Fixture invariant violated: {v:?}");
        }
    }

    pub fn refresh_record_status(&mut self, today: NaiveDate, window_days: i64) {
        for r in &mut self.records {
            let status = verification::derive_record_status(r.expiration_date, today, window_days);
            if status != r.status {
                debug!(
                    "Record {} status {} -> {}",
                    r.id,
                    r.status.as_str(),
                    status.as_str()
                );
                r.status = status;
            }
        }
    }

    /// Checkmark invariant violations across all dogs.
    pub fn audit(&self) -> Vec<InvariantViolation> {
        self.dogs
            .iter()
            .flat_map(|d| verification::audit_dog(d, self.owner_tier(d)))
            .collect()
    }

    // ── Lookups ───────────────────────────────────────────────

    pub fn user(&self, id: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| NotFound::User(id.to_string()).into())
    }

    pub fn dog(&self, id: &str) -> Result<&Dog> {
        self.dogs
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| NotFound::Dog(id.to_string()).into())
    }

    pub fn record(&self, id: &str) -> Result<&VetRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| NotFound::Record(id.to_string()).into())
    }

    pub fn record_mut(&mut self, id: &str) -> Result<&mut VetRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| NotFound::Record(id.to_string()).into())
    }

    /// Tier of the dog's owner. A dog whose owner is missing is treated as
    /// belonging to a free account.
    pub fn owner_tier(&self, dog: &Dog) -> SubscriptionTier {
        self.users
            .iter()
            .find(|u| u.id == dog.user_id)
            .map_or(SubscriptionTier::Free, |u| u.subscription_tier)
    }

    pub fn owner_name(&self, dog: &Dog) -> &str {
        self.users
            .iter()
            .find(|u| u.id == dog.user_id)
            .map_or("", |u| u.name.as_str())
    }

    /// The checkmark the UI shows: always derived from the dog's flags.
    pub fn displayed_checkmark(&self, dog: &Dog) -> CheckmarkStatus {
        verification::derive_checkmark(CheckmarkInputs::for_dog(dog, self.owner_tier(dog)))
    }

    pub fn records_of(&self, dog_id: &str) -> Vec<&VetRecord> {
        self.records.iter().filter(|r| r.dog_id == dog_id).collect()
    }

    pub fn add_record(&mut self, record: VetRecord) {
        debug!("Record {} added for {}", record.id, record.dog_id);
        self.records.push(record);
    }
}
