//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (CLI, UI
//! buttons) that the [`PassportService`](super::service::PassportService)
//! interprets and acts upon.

use crate::fsm::context::WizardInput;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Sign in with email and password.
    Login { email: String, password: String },

    /// Create an account and sign in.
    Signup {
        name: String,
        email: String,
        password: String,
    },

    /// Sign in with the device's biometric prompt.
    BiometricLogin,

    /// Demo user picker.
    SwitchUser(String),

    Logout,

    /// Feed one step into a dog's verification request wizard.
    Wizard { dog_id: String, input: WizardInput },

    /// Run a dog's records through the wallet sorter.
    AiSort(String),

    /// Run automated review on one record.
    AnalyzeRecord(String),

    /// Erase the audit trail.
    ClearAudit,
}
