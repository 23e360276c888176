//! Verification request wizard driven through the passport service.

use dogpassport::app::events::AppEvent;
use dogpassport::audit::{ActorType, EventType};
use dogpassport::error::{Error, WizardError};
use dogpassport::fsm::StateId;
use dogpassport::fsm::context::WizardInput;
use futures_lite::future::block_on;

use super::mock_ports::service_as;

#[test]
fn full_request_reaches_submitted_with_both_signatures() {
    let (mut svc, mut sink) = service_as("user-1");

    let snap = block_on(svc.request_verification("dog-001", &mut sink)).unwrap();

    assert_eq!(snap.state, StateId::Submitted);
    assert!(snap.submitted);
    assert_eq!(snap.handler_signature.as_deref(), Some("John Doe"));
    assert_eq!(snap.vet_signature.as_deref(), Some("Dr. Emily Chen, DVM"));
}

#[test]
fn signature_steps_wait_for_their_delays() {
    let (mut svc, mut sink) = service_as("user-1");

    block_on(svc.request_verification("dog-001", &mut sink)).unwrap();

    assert_eq!(svc.clock().sleeps_ms(), [2000, 2000]);
}

#[test]
fn each_transition_is_emitted_in_order() {
    let (mut svc, mut sink) = service_as("user-1");

    block_on(svc.request_verification("dog-002", &mut sink)).unwrap();

    let steps: Vec<(StateId, StateId)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::WizardStepChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        steps,
        [
            (StateId::Overview, StateId::Request),
            (StateId::Request, StateId::Review),
            (StateId::Review, StateId::HandlerSigned),
            (StateId::HandlerSigned, StateId::Submitted),
        ]
    );
    assert_eq!(
        sink.last(),
        Some(&AppEvent::VerificationSubmitted {
            dog_id: "dog-002".into(),
            handler_signature: "John Doe".into(),
            vet_signature: "Dr. Alan Ruiz, DVM".into(),
        })
    );
}

#[test]
fn request_and_submission_are_audited() {
    let (mut svc, mut sink) = service_as("user-1");

    block_on(svc.request_verification("dog-001", &mut sink)).unwrap();

    let events = svc.audit_events();
    let kinds: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        kinds,
        [EventType::VerificationRequested, EventType::VerificationSubmitted]
    );
    assert!(events.iter().all(|e| e.actor_id == "user-1"));
    assert!(events.iter().all(|e| e.actor_type == ActorType::Handler));
    assert!(events.iter().all(|e| e.dog_id.as_deref() == Some("dog-001")));
}

#[test]
fn incomplete_profile_cannot_start_a_request() {
    // Max has service info but no vet records.
    let (mut svc, mut sink) = service_as("user-2");

    let err = block_on(svc.wizard_step("dog-003", WizardInput::StartRequest, &mut sink))
        .unwrap_err();

    assert_eq!(err, Error::Wizard(WizardError::ProfileIncomplete));
    assert_eq!(svc.wizard("dog-003").unwrap().state, StateId::Overview);
    assert!(sink.events.is_empty());
    assert_eq!(svc.audit_count(), 0);
}

#[test]
fn out_of_order_input_is_rejected() {
    let (mut svc, mut sink) = service_as("user-1");

    let err =
        block_on(svc.wizard_step("dog-001", WizardInput::HandlerSign, &mut sink)).unwrap_err();

    assert_eq!(
        err,
        Error::Wizard(WizardError::InvalidStep {
            state: "Overview",
            input: "handler-sign",
        })
    );
    // Only a signature accepted from Review waits.
    assert!(svc.clock().sleeps_ms().is_empty());
}

#[test]
fn cancel_returns_to_overview_and_drops_signatures() {
    let (mut svc, mut sink) = service_as("user-1");
    for input in [
        WizardInput::StartRequest,
        WizardInput::Submit,
        WizardInput::HandlerSign,
    ] {
        block_on(svc.wizard_step("dog-001", input, &mut sink)).unwrap();
    }
    assert_eq!(
        svc.wizard("dog-001").unwrap().handler_signature.as_deref(),
        Some("John Doe")
    );

    let snap = block_on(svc.wizard_step("dog-001", WizardInput::Cancel, &mut sink)).unwrap();

    assert_eq!(snap.state, StateId::Overview);
    assert_eq!(snap.handler_signature, None);
    assert!(!snap.submitted);
}

#[test]
fn cancel_in_overview_is_a_no_op() {
    let (mut svc, mut sink) = service_as("user-1");

    let snap = block_on(svc.wizard_step("dog-001", WizardInput::Cancel, &mut sink)).unwrap();

    assert_eq!(snap.state, StateId::Overview);
    assert!(sink.events.is_empty());
}

#[test]
fn submitted_is_terminal() {
    let (mut svc, mut sink) = service_as("user-1");
    block_on(svc.request_verification("dog-001", &mut sink)).unwrap();

    let err = block_on(svc.wizard_step("dog-001", WizardInput::Cancel, &mut sink)).unwrap_err();

    assert!(matches!(
        err,
        Error::Wizard(WizardError::InvalidStep {
            state: "Submitted",
            ..
        })
    ));
    assert!(svc.wizard("dog-001").unwrap().submitted);
}

#[test]
fn handler_is_the_owner_when_someone_else_is_signed_in() {
    let (mut svc, mut sink) = service_as("user-3");

    let snap = block_on(svc.request_verification("dog-001", &mut sink)).unwrap();

    assert_eq!(snap.handler_signature.as_deref(), Some("John Doe"));
}

#[test]
fn wizard_never_changes_the_checkmark() {
    let (mut svc, mut sink) = service_as("user-1");
    let before = svc.store().dog("dog-002").unwrap().clone();

    block_on(svc.request_verification("dog-002", &mut sink)).unwrap();

    assert_eq!(svc.store().dog("dog-002").unwrap(), &before);
}

#[test]
fn wizards_are_independent_per_dog() {
    let (mut svc, mut sink) = service_as("user-1");

    block_on(svc.wizard_step("dog-001", WizardInput::StartRequest, &mut sink)).unwrap();

    assert_eq!(svc.wizard("dog-001").unwrap().state, StateId::Request);
    assert_eq!(svc.open_wizard("dog-002").unwrap().state, StateId::Overview);
}
