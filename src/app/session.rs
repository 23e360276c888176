//! Simulated authentication session.
//!
//! Every sign-in path waits out its configured latency on the [`Clock`]
//! and then succeeds, provided the form passes client-side validation.
//! Login and biometric login both resolve to the configured default user;
//! signup resolves to that user with the submitted name and email.

use core::time::Duration;

use log::{info, warn};

use super::ports::Clock;
use crate::config::SimulatedDelays;
use crate::error::{Result, ValidationError};
use crate::fixtures::Store;
use crate::model::User;

#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    user: Option<User>,
    loading: bool,
}

impl AuthSession {
    /// A session that starts signed out.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already signed in as `user`.
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// True while a simulated request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        store: &Store,
        default_user: &str,
        delays: &SimulatedDelays,
        clock: &impl Clock,
    ) -> Result<&User> {
        validate_email(email)?;
        require("password", password)?;
        let user = store.user(default_user)?.clone();
        self.resolve(clock, delays.login_ms).await;
        info!("SESSION | login {}", user.id);
        Ok(self.user.insert(user))
    }

    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        store: &Store,
        default_user: &str,
        delays: &SimulatedDelays,
        clock: &impl Clock,
    ) -> Result<&User> {
        require("name", name)?;
        validate_email(email)?;
        require("password", password)?;
        let mut user = store.user(default_user)?.clone();
        user.name = name.trim().to_string();
        user.email = email.trim().to_string();
        self.resolve(clock, delays.signup_ms).await;
        info!("SESSION | signup {} <{}>", user.name, user.email);
        Ok(self.user.insert(user))
    }

    pub async fn biometric_login(
        &mut self,
        store: &Store,
        default_user: &str,
        delays: &SimulatedDelays,
        clock: &impl Clock,
    ) -> Result<&User> {
        let user = store.user(default_user)?.clone();
        self.resolve(clock, delays.biometric_ms).await;
        info!("SESSION | biometric login {}", user.id);
        Ok(self.user.insert(user))
    }

    /// Demo user picker. Takes effect immediately.
    pub fn switch_user(&mut self, store: &Store, user_id: &str) -> Result<&User> {
        let user = store.user(user_id)?.clone();
        info!("SESSION | switched to {}", user.id);
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) {
        if let Some(u) = self.user.take() {
            info!("SESSION | logout {}", u.id);
        }
    }

    /// The signed-in user, or [`ValidationError::NotSignedIn`].
    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or_else(|| ValidationError::NotSignedIn.into())
    }

    async fn resolve(&mut self, clock: &impl Clock, delay_ms: u64) {
        self.loading = true;
        clock.sleep(Duration::from_millis(delay_ms)).await;
        self.loading = false;
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        warn!("SESSION | {field} missing");
        return Err(ValidationError::MissingField(field).into());
    }
    Ok(())
}

/// `local@domain.tld` with non-empty parts and no whitespace.
fn validate_email(email: &str) -> Result<()> {
    require("email", email)?;
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        warn!("SESSION | rejected email {email:?}");
        return Err(ValidationError::InvalidEmail(email.to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PassportConfig;
    use crate::error::Error;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use futures_lite::future::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingClock {
        slept: RefCell<Vec<Duration>>,
    }

    impl Clock for RecordingClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
        }

        async fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
        }
    }

    fn store() -> Store {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        Store::load(&PassportConfig::default(), today).unwrap()
    }

    #[test]
    fn login_waits_then_resolves_default_user() {
        let s = store();
        let clock = RecordingClock::default();
        let delays = SimulatedDelays::default();
        let mut session = AuthSession::new();
        let user = block_on(session.login("john@example.com", "pw", &s, "user-1", &delays, &clock))
            .unwrap();
        assert_eq!(user.id, "user-1");
        assert!(session.is_signed_in());
        assert!(!session.is_loading());
        assert_eq!(*clock.slept.borrow(), [Duration::from_millis(800)]);
    }

    #[test]
    fn signup_overrides_name_and_email() {
        let s = store();
        let clock = RecordingClock::default();
        let mut session = AuthSession::new();
        let user = block_on(session.signup(
            "Ava Stone",
            "ava@example.org",
            "secret",
            &s,
            "user-1",
            &SimulatedDelays::instant(),
            &clock,
        ))
        .unwrap();
        assert_eq!(user.name, "Ava Stone");
        assert_eq!(user.email, "ava@example.org");
        assert_eq!(user.id, "user-1");
    }

    #[test]
    fn invalid_email_is_rejected_without_waiting() {
        let s = store();
        let clock = RecordingClock::default();
        let mut session = AuthSession::new();
        for bad in ["john", "john@", "@example.com", "john@example", "jo hn@example.com"] {
            let err = block_on(session.login(bad, "pw", &s, "user-1", &SimulatedDelays::default(), &clock))
                .unwrap_err();
            assert!(
                matches!(err, Error::Validation(ValidationError::InvalidEmail(_))),
                "{bad}: {err:?}"
            );
        }
        assert!(clock.slept.borrow().is_empty());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn empty_fields_are_reported_by_name() {
        let s = store();
        let clock = RecordingClock::default();
        let mut session = AuthSession::new();
        let delays = SimulatedDelays::instant();
        let err = block_on(session.signup(" ", "a@b.co", "pw", &s, "user-1", &delays, &clock))
            .unwrap_err();
        assert_eq!(err, Error::Validation(ValidationError::MissingField("name")));
        let err = block_on(session.login("a@b.co", "", &s, "user-1", &delays, &clock)).unwrap_err();
        assert_eq!(err, Error::Validation(ValidationError::MissingField("password")));
    }

    #[test]
    fn biometric_uses_its_own_delay() {
        let s = store();
        let clock = RecordingClock::default();
        let mut session = AuthSession::new();
        block_on(session.biometric_login(&s, "user-1", &SimulatedDelays::default(), &clock)).unwrap();
        assert_eq!(*clock.slept.borrow(), [Duration::from_millis(1500)]);
    }

    #[test]
    fn logout_and_switch() {
        let s = store();
        let mut session = AuthSession::signed_in(s.user("user-1").unwrap().clone());
        session.logout();
        assert!(session.user().is_none());
        assert_eq!(
            session.require_user().unwrap_err(),
            Error::Validation(ValidationError::NotSignedIn)
        );
        assert_eq!(session.switch_user(&s, "user-3").unwrap().name, "Maria Garcia");
        assert!(session.switch_user(&s, "user-99").is_err());
    }
}
