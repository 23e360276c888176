use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Premium,
    Blue,
    Family,
}

impl SubscriptionTier {
    /// Every paid tier carries premium verification privileges.
    pub fn is_premium(self) -> bool {
        !matches!(self, Self::Free)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Premium => "Premium",
            Self::Blue => "Blue",
            Self::Family => "Family",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Imperial,
    Metric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannels {
    pub push: bool,
    pub email: bool,
    pub sms: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub notifications: NotificationChannels,
    pub theme: Theme,
    pub language: String,
    pub units: Units,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            notifications: NotificationChannels {
                push: true,
                email: true,
                sms: false,
            },
            theme: Theme::Auto,
            language: "en".to_string(),
            units: Units::Imperial,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    pub dogs_managed: u32,
    pub records_uploaded: u32,
    pub community_posts: u32,
    pub travel_bookings: u32,
}

/// A handler account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub subscription_expires_at: Option<NaiveDate>,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub stats: UserStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_free_is_not_premium() {
        assert!(!SubscriptionTier::Free.is_premium());
        for tier in [
            SubscriptionTier::Premium,
            SubscriptionTier::Blue,
            SubscriptionTier::Family,
        ] {
            assert!(tier.is_premium(), "{tier:?}");
        }
    }

    #[test]
    fn minimal_user_json_fills_defaults() {
        let u: User = serde_json::from_str(
            r#"{"id":"u","email":"a@b.c","name":"A","subscriptionTier":"free","createdAt":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(u.preferences.language, "en");
        assert_eq!(u.stats.dogs_managed, 0);
        assert!(u.subscription_expires_at.is_none());
    }
}
