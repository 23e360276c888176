//! Outbound application events.
//!
//! The [`PassportService`](super::service::PassportService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them: log them, show a toast,
//! or record them in a test.

use crate::fsm::StateId;
use crate::model::AnalysisDecision;
use crate::verification::engine::VerificationLevel;

/// How a business looked up a dog's public status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMethod {
    DogId,
    QrCode,
    Nfc,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service is ready (carries the signed-in user, if any).
    Started { user_id: Option<String> },

    /// A user signed in, signed up, switched or signed out (`None`).
    SessionChanged { user_id: Option<String> },

    /// A dog's verification request wizard moved between states.
    WizardStepChanged {
        dog_id: String,
        from: StateId,
        to: StateId,
    },

    /// Both signatures are in and the request was submitted.
    VerificationSubmitted {
        dog_id: String,
        handler_signature: String,
        vet_signature: String,
    },

    /// Files were classified and added to a dog's wallet.
    RecordsUploaded {
        dog_id: String,
        record_ids: Vec<String>,
    },

    /// A record went through automated review.
    RecordAnalyzed {
        record_id: String,
        decision: AnalysisDecision,
        dog_verified: bool,
    },

    /// A business looked up a dog's public status.
    CredentialScanned {
        dog_id: String,
        method: ScanMethod,
        level: VerificationLevel,
    },
}
