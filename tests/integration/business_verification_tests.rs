//! Business lookups, the evidence engine and the admin queues.

use dogpassport::app::events::{AppEvent, ScanMethod};
use dogpassport::audit::{ActorType, EventType};
use dogpassport::config::PassportConfig;
use dogpassport::error::{Error, NotFound};
use dogpassport::verification::business::VaccinationStatus;
use dogpassport::verification::engine::VerificationLevel;
use futures_lite::future::block_on;

use super::mock_ports::{MockStorage, service_as, service_with};

// ── Lookups ───────────────────────────────────────────────────

#[test]
fn qr_lookup_returns_public_status_and_audits_the_scan() {
    let (mut svc, mut sink) = service_as("user-1");

    let summary = svc.lookup("/qr/dog-001", Some("biz-42"), &mut sink).unwrap();

    assert_eq!(summary.dog_name, "Buddy");
    assert_eq!(summary.handler_name, "John Doe");
    assert_eq!(summary.verification_level, VerificationLevel::Blue);
    assert_eq!(summary.vaccination_status, VaccinationStatus::ExpiringSoon);
    assert_eq!(summary.qr_code_url, "/qr/dog-001");
    assert_eq!(summary.nfc_token, "nfc_dog-001");

    let events = svc.audit_events();
    assert_eq!(events.len(), 1);
    let scan = &events[0];
    assert_eq!(scan.event_type, EventType::QrCodeScanned);
    assert_eq!(scan.actor_type, ActorType::Business);
    assert_eq!(scan.actor_id, "biz-42");
    assert_eq!(scan.organization_id.as_deref(), Some("biz-42"));
    assert_eq!(scan.metadata["verification_level"], "blue");
    assert!(scan.success);

    assert_eq!(
        sink.last(),
        Some(&AppEvent::CredentialScanned {
            dog_id: "dog-001".into(),
            method: ScanMethod::QrCode,
            level: VerificationLevel::Blue,
        })
    );
}

#[test]
fn expired_shot_beside_a_valid_one_does_not_read_expired() {
    // Luna: rabies rec-10 expiring soon, bordetella rec-13 expired.
    let (mut svc, mut sink) = service_as("user-1");

    let summary = svc.lookup("dog-002", Some("biz-7"), &mut sink).unwrap();

    assert_eq!(summary.vaccination_status, VaccinationStatus::ExpiringSoon);
}

#[test]
fn nfc_tap_is_audited_separately() {
    let (mut svc, mut sink) = service_as("user-1");

    let summary = svc.lookup("nfc_dog-002", None, &mut sink).unwrap();

    assert_eq!(summary.dog_id, "dog-002");
    assert_eq!(summary.verification_level, VerificationLevel::Green);
    let events = svc.audit_events();
    assert_eq!(events[0].event_type, EventType::NfcTapped);
    assert_eq!(events[0].actor_id, "unknown");
    assert_eq!(events[0].organization_id, None);
}

#[test]
fn plain_dog_id_and_legacy_qr_prefix_resolve() {
    let (mut svc, mut sink) = service_as("user-1");

    let by_id = svc.lookup("dog-001", None, &mut sink).unwrap();
    let by_legacy = svc.lookup("qr_dog-001", None, &mut sink).unwrap();

    assert_eq!(by_id, by_legacy);
    assert_eq!(svc.audit_count(), 2);
}

#[test]
fn unknown_credential_fails_and_is_audited_as_failure() {
    let (mut svc, mut sink) = service_as("user-1");

    let err = svc.lookup("/qr/dog-999", Some("biz-1"), &mut sink).unwrap_err();

    assert_eq!(err, Error::NotFound(NotFound::Credential("dog-999".into())));
    let events = svc.audit_events();
    assert_eq!(events.len(), 1);
    assert!(!events[0].success);
    assert_eq!(events[0].error.as_deref(), Some("Dog not found"));
    assert!(sink.events.is_empty());
}

#[test]
fn public_summary_never_exposes_internal_scores() {
    let (mut svc, mut sink) = service_as("user-1");

    for dog in ["dog-001", "dog-002", "dog-003", "dog-004"] {
        let summary = svc.lookup(dog, None, &mut sink).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        let obj = json.as_object().unwrap();
        for internal in [
            "service_eligibility",
            "training_evidence",
            "health_completeness",
            "breed_compatibility",
            "fraud_flags",
            "mismatch_flags",
            "requires_review",
            "review_reason",
        ] {
            assert!(!obj.contains_key(internal), "{dog} leaks {internal}");
        }
    }
}

#[test]
fn storage_failure_surfaces_from_lookup() {
    let (mut svc, mut sink) = service_with(
        PassportConfig::default(),
        MockStorage::failing(),
        Some("user-1"),
    );

    let err = svc.lookup("dog-001", None, &mut sink).unwrap_err();

    assert!(matches!(err, Error::Storage(_)));
}

// ── Engine ────────────────────────────────────────────────────

#[test]
fn fixture_dogs_get_expected_levels() {
    let (svc, _) = service_as("user-1");

    assert_eq!(svc.assess("dog-001").unwrap().level, VerificationLevel::Blue);
    assert_eq!(svc.assess("dog-002").unwrap().level, VerificationLevel::Green);
    assert_eq!(svc.assess("dog-003").unwrap().level, VerificationLevel::Yellow);
}

#[test]
fn review_queue_holds_dogs_needing_a_human() {
    let (svc, _) = service_as("user-1");

    let queue: Vec<String> = svc.review_queue().into_iter().map(|s| s.dog_id).collect();

    assert!(queue.contains(&"dog-002".to_string()));
    assert!(queue.contains(&"dog-004".to_string()));
    assert!(!queue.contains(&"dog-001".to_string()));
    let pip = svc.assess("dog-004").unwrap().scores;
    assert!(!pip.mismatch_flags.is_empty());
    assert!(pip.review_reason.is_some());
}

#[test]
fn suspicious_upload_lands_on_fraud_list() {
    let (mut svc, mut sink) = service_as("user-2");
    assert!(svc.fraud_list().is_empty());

    block_on(svc.upload(
        "dog-003",
        &[("fake_rabies_certificate.pdf".into(), b"scan".to_vec())],
        &mut sink,
    ))
    .unwrap();

    let fraud = svc.fraud_list();
    assert_eq!(fraud.len(), 1);
    assert_eq!(fraud[0].dog_id, "dog-003");
    assert!(fraud[0].requires_review);
}

#[test]
fn reused_document_flags_both_dogs() {
    let (mut svc, mut sink) = service_as("user-1");
    let bytes = b"identical scan bytes".to_vec();

    block_on(svc.upload("dog-001", &[("rabies.pdf".into(), bytes.clone())], &mut sink)).unwrap();
    block_on(svc.upload("dog-002", &[("rabies.pdf".into(), bytes)], &mut sink)).unwrap();

    let flagged: Vec<String> = svc.fraud_list().into_iter().map(|s| s.dog_id).collect();
    assert_eq!(flagged, ["dog-001", "dog-002"]);
}
