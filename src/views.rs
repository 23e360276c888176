//! Read-only projections over the store.
//!
//! Every filter returns references in fixture order and is idempotent:
//! filtering an already-filtered list by the same criteria yields the
//! same list.

use log::debug;
use serde::Deserialize;

use crate::fixtures::Store;
use crate::model::{
    Appointment, AppointmentStatus, Audience, BlogCategory, BlogComment, BlogPost, Dog,
    DocumentCategory, EducationCard, GuideType, MealLog, PartnerCategory, RecordStatus,
    ResourcePartner, SupportCategory, SupportTopic, TravelGuide, VetRecord,
};

/// Audience selector for the education screen. `All` ignores audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceFilter {
    #[default]
    All,
    Handler,
    Staff,
}

// ── Dogs ──────────────────────────────────────────────────────

pub fn dogs_of_user<'a>(store: &'a Store, user_id: &str) -> Vec<&'a Dog> {
    store.dogs.iter().filter(|d| d.user_id == user_id).collect()
}

/// The dog shown by default for a user: the first one they own.
pub fn primary_dog<'a>(store: &'a Store, user_id: &str) -> Option<&'a Dog> {
    store.dogs.iter().find(|d| d.user_id == user_id)
}

// ── Records ───────────────────────────────────────────────────

pub fn filter_records<'a, I>(
    records: I,
    category: Option<DocumentCategory>,
    status: Option<RecordStatus>,
) -> Vec<&'a VetRecord>
where
    I: IntoIterator<Item = &'a VetRecord>,
{
    records
        .into_iter()
        .filter(|r| category.is_none_or(|c| r.category == c))
        .filter(|r| status.is_none_or(|s| r.status == s))
        .collect()
}

pub fn records_for_dog<'a>(
    store: &'a Store,
    dog_id: &str,
    category: Option<DocumentCategory>,
    status: Option<RecordStatus>,
) -> Vec<&'a VetRecord> {
    debug!("records dog={dog_id} category={category:?} status={status:?}");
    filter_records(
        store.records.iter().filter(|r| r.dog_id == dog_id),
        category,
        status,
    )
}

/// Distinct categories in first-seen order with their record counts.
pub fn categories_with_counts<'a, I>(records: I) -> Vec<(DocumentCategory, usize)>
where
    I: IntoIterator<Item = &'a VetRecord>,
{
    let mut out: Vec<(DocumentCategory, usize)> = Vec::new();
    for r in records {
        match out.iter_mut().find(|(c, _)| *c == r.category) {
            Some((_, n)) => *n += 1,
            None => out.push((r.category, 1)),
        }
    }
    out
}

pub fn expiring_records<'a>(store: &'a Store, dog_id: &str) -> Vec<&'a VetRecord> {
    records_for_dog(store, dog_id, None, Some(RecordStatus::ExpiringSoon))
}

pub fn expired_records<'a>(store: &'a Store, dog_id: &str) -> Vec<&'a VetRecord> {
    records_for_dog(store, dog_id, None, Some(RecordStatus::Expired))
}

/// Expiring-soon records across every dog a user owns.
pub fn expiring_count_for_user(store: &Store, user_id: &str) -> usize {
    let dogs = dogs_of_user(store, user_id);
    store
        .records
        .iter()
        .filter(|r| r.status == RecordStatus::ExpiringSoon)
        .filter(|r| dogs.iter().any(|d| d.id == r.dog_id))
        .count()
}

// ── Community ─────────────────────────────────────────────────

pub fn blog_posts(store: &Store, category: Option<BlogCategory>) -> Vec<&BlogPost> {
    store
        .blog_posts
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .collect()
}

pub fn comments_for_post<'a>(store: &'a Store, post_id: &str) -> Vec<&'a BlogComment> {
    store
        .blog_comments
        .iter()
        .filter(|c| c.post_id == post_id)
        .collect()
}

// ── Support ───────────────────────────────────────────────────

/// Topics in `category` whose question or answer contains `query`,
/// ignoring case. An empty query matches everything.
pub fn support_topics<'a>(
    store: &'a Store,
    category: Option<SupportCategory>,
    query: Option<&str>,
) -> Vec<&'a SupportTopic> {
    let needle = query.map(str::trim).unwrap_or_default().to_lowercase();
    store
        .support_topics
        .iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .filter(|t| {
            needle.is_empty()
                || t.question.to_lowercase().contains(&needle)
                || t.answer.to_lowercase().contains(&needle)
        })
        .collect()
}

// ── Travel & education ────────────────────────────────────────

pub fn travel_guides(store: &Store, guide_type: Option<GuideType>) -> Vec<&TravelGuide> {
    store
        .travel_guides
        .iter()
        .filter(|g| guide_type.is_none_or(|t| g.guide_type == t))
        .collect()
}

pub fn partners(store: &Store, category: Option<PartnerCategory>) -> Vec<&ResourcePartner> {
    store
        .partners
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .collect()
}

pub fn education_cards(store: &Store, audience: AudienceFilter) -> Vec<&EducationCard> {
    store
        .education_cards
        .iter()
        .filter(|c| match audience {
            AudienceFilter::All => true,
            AudienceFilter::Handler => matches!(c.audience, Audience::Handler | Audience::Both),
            AudienceFilter::Staff => matches!(c.audience, Audience::Staff | Audience::Both),
        })
        .collect()
}

// ── Health ────────────────────────────────────────────────────

/// Scheduled appointments for a dog, soonest first. Ties keep fixture order.
pub fn upcoming_appointments<'a>(store: &'a Store, dog_id: &str) -> Vec<&'a Appointment> {
    let mut out: Vec<&Appointment> = store
        .appointments
        .iter()
        .filter(|a| a.dog_id == dog_id && a.status == AppointmentStatus::Scheduled)
        .collect();
    out.sort_by_key(|a| a.date);
    out
}

pub fn meals_for_dog<'a>(store: &'a Store, dog_id: &str) -> Vec<&'a MealLog> {
    store.meals.iter().filter(|m| m.dog_id == dog_id).collect()
}
