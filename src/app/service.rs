//! Application service: the hexagonal core.
//!
//! [`PassportService`] owns the fixture store, the session, one wizard per
//! dog and the audit trail. It exposes a UI-agnostic API. All time and
//! storage access flows through port traits injected at construction, and
//! events leave through an [`EventSink`] passed at call sites, so the
//! entire service is testable with fakes.
//!
//! ```text
//!      Clock ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                │        PassportService        │
//! StoragePort ◀──│ Session · Wizards · Engine    │
//!                └──────────────────────────────┘
//! ```

use core::time::Duration;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use super::commands::AppCommand;
use super::events::{AppEvent, ScanMethod};
use super::ports::{Clock, EventSink, StoragePort};
use super::session::AuthSession;
use crate::audit::{ActorType, AuditEvent, AuditTrail, EventType};
use crate::config::PassportConfig;
use crate::documents::{self, ProcessedDocument};
use crate::error::{NotFound, Result, WizardError};
use crate::fixtures::Store;
use crate::fsm::context::{WizardContext, WizardInput};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::model::{Dog, RecordAnalysis, User, VetRecord, WalletCategory};
use crate::verification::business::{self, PublicStatusSummary};
use crate::verification::engine::{self, InternalScores, VerificationLevel};
use crate::verification::fraud;

const ANONYMOUS: &str = "anonymous";
const UNKNOWN_ORG: &str = "unknown";

// ───────────────────────────────────────────────────────────────
// Result types
// ───────────────────────────────────────────────────────────────

/// Read-only view of a dog's verification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSnapshot {
    pub dog_id: String,
    pub state: StateId,
    pub state_name: &'static str,
    pub handler_signature: Option<String>,
    pub vet_signature: Option<String>,
    pub submitted: bool,
}

/// One uploaded file after classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedRecord {
    pub record_id: String,
    pub document: ProcessedDocument,
}

/// Evidence assessment of one dog: internal scores plus the public level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub level: VerificationLevel,
    pub scores: InternalScores,
}

struct Wizard {
    fsm: Fsm,
    ctx: WizardContext,
}

impl Wizard {
    fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            dog_id: self.ctx.dog_id.clone(),
            state: self.fsm.current_state(),
            state_name: self.fsm.current_name(),
            handler_signature: self.ctx.handler_signature.clone(),
            vet_signature: self.ctx.vet_signature.clone(),
            submitted: self.ctx.submitted,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// PassportService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct PassportService<C: Clock, S: StoragePort> {
    config: PassportConfig,
    store: Store,
    session: AuthSession,
    wizards: BTreeMap<String, Wizard>,
    audit: AuditTrail,
    clock: C,
    storage: S,
}

impl<C: Clock, S: StoragePort> PassportService<C, S> {
    /// Construct the service around an already-loaded store.
    ///
    /// Starts signed out. Call [`start`](Self::start) next.
    pub fn new(config: PassportConfig, store: Store, clock: C, storage: S) -> Self {
        let mut audit = AuditTrail::new(config.audit_capacity);
        audit.init(&storage);
        Self {
            config,
            store,
            session: AuthSession::new(),
            wizards: BTreeMap::new(),
            audit,
            clock,
            storage,
        }
    }

    /// Load the embedded fixtures for the clock's current date.
    pub fn with_fixtures(config: PassportConfig, clock: C, storage: S) -> Result<Self> {
        let store = Store::load(&config, clock.today())?;
        Ok(Self::new(config, store, clock, storage))
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let user_id = self.session.user().map(|u| u.id.clone());
        info!(
            "PassportService started (user={})",
            user_id.as_deref().unwrap_or("-")
        );
        sink.emit(&AppEvent::Started { user_id });
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &PassportConfig {
        &self.config
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    // ── Session ───────────────────────────────────────────────

    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let user = self
            .session
            .login(
                email,
                password,
                &self.store,
                &self.config.default_user_id,
                &self.config.delays,
                &self.clock,
            )
            .await?;
        let user_id = Some(user.id.clone());
        sink.emit(&AppEvent::SessionChanged { user_id });
        Ok(())
    }

    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let user = self
            .session
            .signup(
                name,
                email,
                password,
                &self.store,
                &self.config.default_user_id,
                &self.config.delays,
                &self.clock,
            )
            .await?;
        let user_id = Some(user.id.clone());
        sink.emit(&AppEvent::SessionChanged { user_id });
        Ok(())
    }

    pub async fn biometric_login(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let user = self
            .session
            .biometric_login(
                &self.store,
                &self.config.default_user_id,
                &self.config.delays,
                &self.clock,
            )
            .await?;
        let user_id = Some(user.id.clone());
        sink.emit(&AppEvent::SessionChanged { user_id });
        Ok(())
    }

    pub fn switch_user(&mut self, user_id: &str, sink: &mut impl EventSink) -> Result<()> {
        let user = self.session.switch_user(&self.store, user_id)?;
        let user_id = Some(user.id.clone());
        sink.emit(&AppEvent::SessionChanged { user_id });
        Ok(())
    }

    pub fn logout(&mut self, sink: &mut impl EventSink) {
        self.session.logout();
        sink.emit(&AppEvent::SessionChanged { user_id: None });
    }

    // ── Verification request wizard ───────────────────────────

    /// Current wizard state for `dog_id`, opening a wizard if none exists.
    pub fn open_wizard(&mut self, dog_id: &str) -> Result<WizardSnapshot> {
        Ok(self.wizard_mut(dog_id)?.snapshot())
    }

    /// Wizard state for `dog_id` without opening one.
    pub fn wizard(&self, dog_id: &str) -> Option<WizardSnapshot> {
        self.wizards.get(dog_id).map(Wizard::snapshot)
    }

    /// Feed one input into the dog's wizard.
    ///
    /// Signature steps wait out their simulated delay before the state
    /// changes. The dog's checkmark is never modified.
    pub async fn wizard_step(
        &mut self,
        dog_id: &str,
        input: WizardInput,
        sink: &mut impl EventSink,
    ) -> Result<WizardSnapshot> {
        let delays = self.config.delays.clone();
        let actor = self.actor_id();
        let now = self.clock.now();

        let wizard = self.wizard_mut(dog_id)?;
        let from = wizard.fsm.current_state();
        let delay_ms = match (from, input) {
            (StateId::Review, WizardInput::HandlerSign) => delays.esign_ms,
            (StateId::HandlerSigned, WizardInput::VetSign) => delays.vet_sign_ms,
            _ => 0,
        };
        if delay_ms > 0 {
            self.clock.sleep(Duration::from_millis(delay_ms)).await;
        }

        let wizard = self.wizard_mut(dog_id)?;
        let to = wizard.fsm.step(input, &mut wizard.ctx)?;
        let snapshot = wizard.snapshot();
        if to == from {
            return Ok(snapshot);
        }

        sink.emit(&AppEvent::WizardStepChanged {
            dog_id: dog_id.to_string(),
            from,
            to,
        });

        let audited = match to {
            StateId::Request => Some(EventType::VerificationRequested),
            StateId::Submitted => Some(EventType::VerificationSubmitted),
            _ => None,
        };
        if let Some(event_type) = audited {
            let event = AuditEvent::new(event_type, now, actor, ActorType::Handler).dog(dog_id);
            self.audit.append(&mut self.storage, &event)?;
        }

        if to == StateId::Submitted {
            sink.emit(&AppEvent::VerificationSubmitted {
                dog_id: dog_id.to_string(),
                handler_signature: snapshot.handler_signature.clone().unwrap_or_default(),
                vet_signature: snapshot.vet_signature.clone().unwrap_or_default(),
            });
        }
        Ok(snapshot)
    }

    /// Run the whole request flow: start, submit, both signatures.
    pub async fn request_verification(
        &mut self,
        dog_id: &str,
        sink: &mut impl EventSink,
    ) -> Result<WizardSnapshot> {
        let mut snapshot = self.open_wizard(dog_id)?;
        for input in [
            WizardInput::StartRequest,
            WizardInput::Submit,
            WizardInput::HandlerSign,
            WizardInput::VetSign,
        ] {
            snapshot = self.wizard_step(dog_id, input, sink).await?;
        }
        Ok(snapshot)
    }

    fn wizard_mut(&mut self, dog_id: &str) -> Result<&mut Wizard> {
        if !self.wizards.contains_key(dog_id) {
            let dog = self.store.dog(dog_id)?;
            let profile_complete = dog.service_dog_info_submitted && dog.vet_info_uploaded;
            let vet_on_file = self
                .store
                .records
                .iter()
                .filter(|r| r.dog_id == dog_id && r.verified_by_vet)
                .find_map(|r| r.vet_name.clone());
            let handler = self.handler_name(dog).to_string();
            let mut ctx = WizardContext::new(dog_id, handler, profile_complete, vet_on_file);
            let mut fsm = Fsm::new(build_state_table(), StateId::Overview);
            fsm.start(&mut ctx);
            self.wizards.insert(dog_id.to_string(), Wizard { fsm, ctx });
        }
        self.wizards
            .get_mut(dog_id)
            .ok_or_else(|| WizardError::NotStarted(dog_id.to_string()).into())
    }

    /// Signed-in user's name when they own the dog, else the owner's name.
    fn handler_name<'a>(&'a self, dog: &'a Dog) -> &'a str {
        match self.session.user() {
            Some(u) if u.id == dog.user_id => &u.name,
            _ => self.store.owner_name(dog),
        }
    }

    // ── Document pipeline ─────────────────────────────────────

    /// Classify `files` and append them to the dog's wallet.
    ///
    /// Every file is classified and its audit event encoded before the
    /// wallet changes, so a rejected batch leaves the store untouched.
    pub async fn upload(
        &mut self,
        dog_id: &str,
        files: &[(String, Vec<u8>)],
        sink: &mut impl EventSink,
    ) -> Result<Vec<UploadedRecord>> {
        self.store.dog(dog_id)?;
        let delays = self.config.delays.clone();
        self.clock
            .sleep(Duration::from_millis(delays.upload_ms))
            .await;

        let today = self.clock.today();
        let actor = self.actor_id();
        let mut staged = Vec::with_capacity(files.len());
        for (name, bytes) in files {
            self.clock
                .sleep(Duration::from_millis(delays.document_processing_ms))
                .await;
            let document = documents::process(name, bytes);
            let record_id = format!("rec-{}", Uuid::new_v4());
            if document.status == documents::ProcessingStatus::ManualReview {
                warn!("UPLOAD | {} flagged for manual review", name);
            }

            let event = AuditEvent::new(
                EventType::DocumentUploaded,
                self.clock.now(),
                actor.clone(),
                ActorType::Handler,
            )
            .dog(dog_id)
            .record(record_id.clone())
            .meta("file_name", name.clone())
            .meta("document_type", document.detected_type.category().as_str())
            .meta("confidence", format!("{:.2}", document.confidence));
            AuditTrail::encode(&event)?;
            staged.push((UploadedRecord { record_id, document }, event));
        }

        for (_, event) in &staged {
            self.audit.append(&mut self.storage, event)?;
        }

        let mut uploaded = Vec::with_capacity(staged.len());
        for (up, _) in staged {
            self.store.add_record(
                up.document
                    .clone()
                    .into_record(up.record_id.clone(), dog_id, today),
            );
            uploaded.push(up);
        }

        sink.emit(&AppEvent::RecordsUploaded {
            dog_id: dog_id.to_string(),
            record_ids: uploaded.iter().map(|u| u.record_id.clone()).collect(),
        });
        Ok(uploaded)
    }

    /// Group the dog's records into wallet sections.
    pub async fn ai_sort(&self, dog_id: &str) -> Result<BTreeMap<WalletCategory, Vec<&VetRecord>>> {
        self.store.dog(dog_id)?;
        self.clock
            .sleep(Duration::from_millis(self.config.delays.ai_sort_ms))
            .await;
        Ok(documents::sort_into_wallet(
            self.store.records.iter().filter(|r| r.dog_id == dog_id),
        ))
    }

    /// Review one record and refresh its dog's `verified` flag.
    pub fn analyze_record(
        &mut self,
        record_id: &str,
        sink: &mut impl EventSink,
    ) -> Result<RecordAnalysis> {
        let record = self.store.record_mut(record_id)?;
        let analysis = documents::analyze(record);
        record.analysis = Some(analysis.clone());
        let dog_id = record.dog_id.clone();

        let records: Vec<&VetRecord> = self
            .store
            .records
            .iter()
            .filter(|r| r.dog_id == dog_id)
            .collect();
        let dog = self
            .store
            .dogs
            .iter_mut()
            .find(|d| d.id == dog_id)
            .ok_or_else(|| NotFound::Dog(dog_id.clone()))?;
        let dog_verified = documents::recompute_verified(dog, &records);

        let event = AuditEvent::new(
            EventType::DocumentVerified,
            self.clock.now(),
            self.actor_id(),
            ActorType::System,
        )
        .dog(dog_id.as_str())
        .record(record_id)
        .meta("decision", format!("{:?}", analysis.decision).to_lowercase())
        .meta("risk_score", format!("{:.2}", analysis.risk_score));
        self.audit.append(&mut self.storage, &event)?;

        sink.emit(&AppEvent::RecordAnalyzed {
            record_id: record_id.to_string(),
            decision: analysis.decision,
            dog_verified,
        });
        Ok(analysis)
    }

    // ── Verification engine ───────────────────────────────────

    /// Internal scores and public level for one dog.
    pub fn assess(&self, dog_id: &str) -> Result<Assessment> {
        let dog = self.store.dog(dog_id)?;
        Ok(self.assess_dog(dog))
    }

    fn assess_dog(&self, dog: &Dog) -> Assessment {
        let records = self.store.records_of(&dog.id);
        let fraud_flags =
            fraud::flags_for_dog(dog, &records, &self.store.records, &self.store.dogs);
        let scores = engine::compute_scores(dog, &records, fraud_flags, self.clock.today());
        let level = engine::determine_level(&records, &scores);
        Assessment { level, scores }
    }

    /// Dogs whose evidence needs a human reviewer, in fixture order.
    pub fn review_queue(&self) -> Vec<InternalScores> {
        self.store
            .dogs
            .iter()
            .map(|d| self.assess_dog(d).scores)
            .filter(|s| s.requires_review)
            .collect()
    }

    /// Dogs with at least one fraud flag.
    pub fn fraud_list(&self) -> Vec<InternalScores> {
        self.store
            .dogs
            .iter()
            .map(|d| self.assess_dog(d).scores)
            .filter(|s| !s.fraud_flags.is_empty())
            .collect()
    }

    // ── Business lookups ──────────────────────────────────────

    /// ADA-safe status for a business. `credential` is a dog id, a QR code
    /// (`/qr/<id>`, `qr_<id>`) or an NFC token (`nfc_<id>`).
    pub fn lookup(
        &mut self,
        credential: &str,
        organization_id: Option<&str>,
        sink: &mut impl EventSink,
    ) -> Result<PublicStatusSummary> {
        let credential = credential.trim();
        let (method, dog_id) = if credential.starts_with("nfc_") {
            (ScanMethod::Nfc, business::dog_id_from_nfc(credential))
        } else if credential.starts_with("/qr/") || credential.starts_with("qr_") {
            (ScanMethod::QrCode, business::dog_id_from_qr(credential))
        } else {
            (ScanMethod::DogId, credential)
        };
        self.public_status(dog_id, method, organization_id, sink)
    }

    pub fn public_status(
        &mut self,
        dog_id: &str,
        method: ScanMethod,
        organization_id: Option<&str>,
        sink: &mut impl EventSink,
    ) -> Result<PublicStatusSummary> {
        let event_type = match method {
            ScanMethod::Nfc => EventType::NfcTapped,
            ScanMethod::QrCode | ScanMethod::DogId => EventType::QrCodeScanned,
        };
        let mut event = AuditEvent::new(
            event_type,
            self.clock.now(),
            organization_id.unwrap_or(UNKNOWN_ORG),
            ActorType::Business,
        )
        .dog(dog_id);
        if let Some(org) = organization_id {
            event = event.organization(org);
        }

        let Ok(dog) = self.store.dog(dog_id) else {
            warn!("SCAN | unknown credential for '{dog_id}'");
            self.audit
                .append(&mut self.storage, &event.failed("Dog not found"))?;
            return Err(NotFound::Credential(dog_id.to_string()).into());
        };

        let level = self.assess_dog(dog).level;
        let records = self.store.records_of(dog_id);
        let summary = business::public_status(
            dog,
            self.store.owner_name(dog),
            &records,
            level,
            self.clock.today(),
            self.config.expiring_soon_window_days,
        );

        let event = event.meta("verification_level", format!("{level:?}").to_lowercase());
        self.audit.append(&mut self.storage, &event)?;
        sink.emit(&AppEvent::CredentialScanned {
            dog_id: dog_id.to_string(),
            method,
            level,
        });
        Ok(summary)
    }

    // ── Audit trail ───────────────────────────────────────────

    /// Audit events, oldest first.
    pub fn audit_events(&self) -> Vec<AuditEvent> {
        self.audit.read_all(&self.storage)
    }

    pub fn audit_count(&self) -> usize {
        self.audit.count(&self.storage)
    }

    pub fn clear_audit(&mut self) -> Result<()> {
        self.audit.clear(&mut self.storage)?;
        info!("Audit trail cleared");
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (CLI, UI button, script).
    pub async fn handle_command(
        &mut self,
        cmd: AppCommand,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::Login { email, password } => self.login(&email, &password, sink).await,
            AppCommand::Signup {
                name,
                email,
                password,
            } => self.signup(&name, &email, &password, sink).await,
            AppCommand::BiometricLogin => self.biometric_login(sink).await,
            AppCommand::SwitchUser(id) => self.switch_user(&id, sink),
            AppCommand::Logout => {
                self.logout(sink);
                Ok(())
            }
            AppCommand::Wizard { dog_id, input } => {
                self.wizard_step(&dog_id, input, sink).await.map(|_| ())
            }
            AppCommand::AiSort(dog_id) => self.ai_sort(&dog_id).await.map(|_| ()),
            AppCommand::AnalyzeRecord(record_id) => {
                self.analyze_record(&record_id, sink).map(|_| ())
            }
            AppCommand::ClearAudit => self.clear_audit(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn actor_id(&self) -> String {
        self.session
            .user()
            .map_or_else(|| ANONYMOUS.to_string(), |u| u.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStorage;
    use chrono::{DateTime, TimeZone, Utc};
    use futures_lite::future::block_on;

    struct InstantClock;

    impl Clock for InstantClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
        }

        async fn sleep(&self, _duration: Duration) {}
    }

    #[derive(Default)]
    struct Events(Vec<AppEvent>);

    impl EventSink for Events {
        fn emit(&mut self, event: &AppEvent) {
            self.0.push(event.clone());
        }
    }

    fn service() -> PassportService<InstantClock, MemoryStorage> {
        PassportService::with_fixtures(PassportConfig::default(), InstantClock, MemoryStorage::new())
            .unwrap()
    }

    #[test]
    fn start_emits_signed_out() {
        let mut svc = service();
        let mut events = Events::default();
        svc.start(&mut events);
        assert_eq!(events.0, [AppEvent::Started { user_id: None }]);
    }

    #[test]
    fn wizard_snapshot_tracks_state() {
        let mut svc = service();
        let mut events = Events::default();
        let snap = block_on(svc.wizard_step("dog-001", WizardInput::StartRequest, &mut events))
            .unwrap();
        assert_eq!(snap.state, StateId::Request);
        assert_eq!(svc.wizard("dog-001").unwrap().state_name, "Request");
        assert!(svc.wizard("dog-002").is_none());
    }

    #[test]
    fn unknown_dog_has_no_wizard() {
        let mut svc = service();
        assert!(svc.open_wizard("dog-999").is_err());
    }
}
