//! Blackboard threaded through every wizard handler.
//!
//! Holds what the handlers need to decide a step (profile completeness,
//! the vet on file), the input being processed, and what the wizard has
//! collected so far. The wizard never touches the dog record itself.

use serde::Serialize;

use crate::error::WizardError;

/// Label used when no vet-verified record names a veterinarian.
pub const PENDING_VET: &str = "Pending veterinarian";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardInput {
    StartRequest,
    Submit,
    HandlerSign,
    VetSign,
    Cancel,
}

impl WizardInput {
    pub fn name(self) -> &'static str {
        match self {
            Self::StartRequest => "start-request",
            Self::Submit => "submit",
            Self::HandlerSign => "handler-sign",
            Self::VetSign => "vet-sign",
            Self::Cancel => "cancel",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WizardContext {
    // -- Subject --
    pub dog_id: String,
    pub handler_name: String,
    /// Service dog info submitted and vet records uploaded.
    pub profile_complete: bool,
    /// Vet named on the first vet-verified record, if any.
    pub vet_on_file: Option<String>,

    // -- Step --
    pub pending: Option<WizardInput>,
    pub error: Option<WizardError>,

    // -- Collected --
    pub handler_signature: Option<String>,
    pub vet_signature: Option<String>,
    pub submitted: bool,
}

impl WizardContext {
    pub fn new(
        dog_id: impl Into<String>,
        handler_name: impl Into<String>,
        profile_complete: bool,
        vet_on_file: Option<String>,
    ) -> Self {
        Self {
            dog_id: dog_id.into(),
            handler_name: handler_name.into(),
            profile_complete,
            vet_on_file,
            pending: None,
            error: None,
            handler_signature: None,
            vet_signature: None,
            submitted: false,
        }
    }

    /// Record that `input` is not accepted in `state`.
    pub fn reject(&mut self, state: &'static str) {
        if let Some(input) = self.pending {
            self.error = Some(WizardError::InvalidStep {
                state,
                input: input.name(),
            });
        }
    }

    pub fn clear_signatures(&mut self) {
        self.handler_signature = None;
        self.vet_signature = None;
    }
}
