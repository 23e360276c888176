//! Bottom navigation shell.

use serde::Serialize;

use crate::fixtures::Store;
use crate::model::{SubscriptionTier, User};
use crate::views;

/// (label, href, carries the expiring-records badge)
const NAV_ITEMS: [(&str, &str, bool); 10] = [
    ("Home", "/dashboard", false),
    ("Wallet", "/dashboard/wallet", false),
    ("Health", "/dashboard/health", true),
    ("Connect", "/dashboard/community", false),
    ("Blog", "/dashboard/blog", false),
    ("Records", "/dashboard/records", true),
    ("Travel", "/dashboard/travel", false),
    ("Partners", "/dashboard/resources", false),
    ("Learn", "/dashboard/education", false),
    ("Support", "/dashboard/support", false),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub badge: Option<usize>,
    /// What the badge bubble shows, e.g. `"3"` or `"9+"`.
    pub badge_label: Option<String>,
    pub active: bool,
}

/// Nav items for the signed-in user (if any) on `route`.
pub fn nav_items(store: &Store, user: Option<&User>, route: &str, cap: usize) -> Vec<NavItem> {
    let expiring = user.map_or(0, |u| views::expiring_count_for_user(store, &u.id));
    let badge = (expiring > 0).then_some(expiring);

    NAV_ITEMS
        .iter()
        .map(|&(label, href, badged)| {
            let badge = if badged { badge } else { None };
            NavItem {
                label,
                href,
                badge,
                badge_label: badge.map(|n| badge_label(n, cap)),
                active: is_active(route, href),
            }
        })
        .collect()
}

pub fn badge_label(count: usize, cap: usize) -> String {
    if count > cap {
        format!("{cap}+")
    } else {
        count.to_string()
    }
}

/// Exact match, or a sub-route of `href`.
pub fn is_active(route: &str, href: &str) -> bool {
    route == href
        || route
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn subscription_badge(tier: SubscriptionTier) -> &'static str {
    tier.label()
}
