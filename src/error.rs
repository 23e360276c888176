//! Unified error types for the Dog Passport core.
//!
//! A single `Error` enum that every subsystem converts into, so the CLI
//! edge and the application service handle failures uniformly.

use core::fmt;

use crate::app::ports::StorageError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An id did not resolve against the fixture store.
    NotFound(NotFound),
    /// User input failed client-side validation.
    Validation(ValidationError),
    /// The verification wizard rejected a step.
    Wizard(WizardError),
    /// Configuration is invalid or could not be loaded.
    Config(String),
    /// Embedded fixture data failed to parse.
    Fixture(String),
    /// The audit storage backend failed.
    Storage(StorageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(e) => write!(f, "not found: {e}"),
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Wizard(e) => write!(f, "verification: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Fixture(msg) => write!(f, "fixture: {msg}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Lookup failures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    User(String),
    Dog(String),
    Record(String),
    Post(String),
    /// A QR code or NFC token that does not name a known dog.
    Credential(String),
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user '{id}'"),
            Self::Dog(id) => write!(f, "dog '{id}'"),
            Self::Record(id) => write!(f, "record '{id}'"),
            Self::Post(id) => write!(f, "blog post '{id}'"),
            Self::Credential(code) => write!(f, "credential '{code}'"),
        }
    }
}

impl From<NotFound> for Error {
    fn from(e: NotFound) -> Self {
        Self::NotFound(e)
    }
}

// ---------------------------------------------------------------------------
// Form validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was empty.
    MissingField(&'static str),
    /// The email address has no `@` or no domain part.
    InvalidEmail(String),
    /// An action needs a signed-in user.
    NotSignedIn,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidEmail(email) => write!(f, "'{email}' is not a valid email address"),
            Self::NotSignedIn => write!(f, "sign in first"),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Verification wizard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The dog profile or vet records are missing.
    ProfileIncomplete,
    /// The requested step is not valid from the current state.
    InvalidStep {
        state: &'static str,
        input: &'static str,
    },
    /// No wizard is open for this dog.
    NotStarted(String),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProfileIncomplete => write!(
                f,
                "Please complete your dog profile and upload vet records first."
            ),
            Self::InvalidStep { state, input } => {
                write!(f, "cannot {input} while in {state}")
            }
            Self::NotStarted(dog) => write!(f, "no verification request open for '{dog}'"),
        }
    }
}

impl From<WizardError> for Error {
    fn from(e: WizardError) -> Self {
        Self::Wizard(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_profile_message_matches_ui_copy() {
        let e = Error::from(WizardError::ProfileIncomplete);
        assert_eq!(
            e.to_string(),
            "verification: Please complete your dog profile and upload vet records first."
        );
    }

    #[test]
    fn not_found_names_the_id() {
        let e = Error::from(NotFound::Dog("dog-9".into()));
        assert_eq!(e.to_string(), "not found: dog 'dog-9'");
    }

    #[test]
    fn missing_field_display() {
        assert_eq!(
            ValidationError::MissingField("email").to_string(),
            "email is required"
        );
    }
}
