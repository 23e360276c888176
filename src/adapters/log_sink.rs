//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `env_logger` in the CLI). A UI adapter
//! would implement the same trait to raise toasts instead.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { user_id } => {
                info!("START | user={}", user_id.as_deref().unwrap_or("-"));
            }
            AppEvent::SessionChanged { user_id } => {
                info!("SESSION | user={}", user_id.as_deref().unwrap_or("-"));
            }
            AppEvent::WizardStepChanged { dog_id, from, to } => {
                info!("WIZARD | {} | {:?} -> {:?}", dog_id, from, to);
            }
            AppEvent::VerificationSubmitted {
                dog_id,
                handler_signature,
                vet_signature,
            } => {
                info!(
                    "VERIFY | {} | submitted | handler={} vet={}",
                    dog_id, handler_signature, vet_signature
                );
            }
            AppEvent::RecordsUploaded { dog_id, record_ids } => {
                info!(
                    "UPLOAD | {} | {} record(s): {}",
                    dog_id,
                    record_ids.len(),
                    record_ids.join(",")
                );
            }
            AppEvent::RecordAnalyzed {
                record_id,
                decision,
                dog_verified,
            } => {
                info!(
                    "ANALYZE | {} | {:?} | dog_verified={}",
                    record_id, decision, dog_verified
                );
            }
            AppEvent::CredentialScanned {
                dog_id,
                method,
                level,
            } => {
                info!("SCAN | {} | {:?} | level={:?}", dog_id, method, level);
            }
        }
    }
}
