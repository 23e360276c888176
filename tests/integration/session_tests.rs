//! Simulated sign-in flows through the passport service.

use dogpassport::app::commands::AppCommand;
use dogpassport::app::events::AppEvent;
use dogpassport::config::PassportConfig;
use dogpassport::error::{Error, NotFound, ValidationError};
use futures_lite::future::block_on;

use super::mock_ports::{MockStorage, RecordingSink, TestService, service_with};

fn signed_out() -> (TestService, RecordingSink) {
    service_with(PassportConfig::default(), MockStorage::default(), None)
}

#[test]
fn service_starts_signed_out() {
    let (svc, _) = signed_out();
    assert!(svc.current_user().is_none());
    assert!(!svc.session().is_signed_in());
}

#[test]
fn login_resolves_to_default_user_after_delay() {
    let (mut svc, mut sink) = signed_out();

    block_on(svc.login("someone@example.com", "hunter2", &mut sink)).unwrap();

    assert_eq!(svc.current_user().unwrap().id, "user-1");
    assert_eq!(svc.clock().sleeps_ms(), [800]);
    assert!(!svc.session().is_loading());
    assert_eq!(
        sink.events,
        [AppEvent::SessionChanged {
            user_id: Some("user-1".into())
        }]
    );
}

#[test]
fn invalid_email_fails_before_any_delay() {
    let (mut svc, mut sink) = signed_out();

    let err = block_on(svc.login("not-an-email", "pw", &mut sink)).unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidEmail(_))
    ));
    assert!(svc.clock().sleeps_ms().is_empty());
    assert!(svc.current_user().is_none());
    assert!(sink.events.is_empty());
}

#[test]
fn blank_password_is_a_missing_field() {
    let (mut svc, mut sink) = signed_out();

    let err = block_on(svc.login("a@b.co", "   ", &mut sink)).unwrap_err();

    assert_eq!(
        err,
        Error::Validation(ValidationError::MissingField("password"))
    );
}

#[test]
fn signup_keeps_submitted_name_and_email() {
    let (mut svc, mut sink) = signed_out();

    block_on(svc.signup("Ada Handler", "ada@example.org", "pw", &mut sink)).unwrap();

    let user = svc.current_user().unwrap();
    assert_eq!(user.name, "Ada Handler");
    assert_eq!(user.email, "ada@example.org");
    assert_eq!(svc.clock().sleeps_ms(), [800]);
}

#[test]
fn biometric_login_takes_longer() {
    let (mut svc, mut sink) = signed_out();

    block_on(svc.biometric_login(&mut sink)).unwrap();

    assert_eq!(svc.current_user().unwrap().id, "user-1");
    assert_eq!(svc.clock().sleeps_ms(), [1500]);
}

#[test]
fn switch_user_is_immediate() {
    let (mut svc, mut sink) = signed_out();

    svc.switch_user("user-3", &mut sink).unwrap();

    assert_eq!(svc.current_user().unwrap().name, "Maria Garcia");
    assert!(svc.clock().sleeps_ms().is_empty());
}

#[test]
fn switch_to_unknown_user_keeps_session() {
    let (mut svc, mut sink) = signed_out();
    svc.switch_user("user-2", &mut sink).unwrap();

    let err = svc.switch_user("user-99", &mut sink).unwrap_err();

    assert_eq!(err, Error::NotFound(NotFound::User("user-99".into())));
    assert_eq!(svc.current_user().unwrap().id, "user-2");
}

#[test]
fn logout_via_command_clears_user() {
    let (mut svc, mut sink) = signed_out();
    block_on(svc.handle_command(AppCommand::BiometricLogin, &mut sink)).unwrap();

    block_on(svc.handle_command(AppCommand::Logout, &mut sink)).unwrap();

    assert!(svc.current_user().is_none());
    assert_eq!(
        sink.last(),
        Some(&AppEvent::SessionChanged { user_id: None })
    );
}

#[test]
fn default_user_follows_config() {
    let config = PassportConfig {
        default_user_id: "user-4".into(),
        ..PassportConfig::default()
    };
    let (mut svc, mut sink) = service_with(config, MockStorage::default(), None);

    block_on(svc.handle_command(
        AppCommand::Login {
            email: "x@y.io".into(),
            password: "pw".into(),
        },
        &mut sink,
    ))
    .unwrap();

    assert_eq!(svc.current_user().unwrap().name, "David Lee");
}
