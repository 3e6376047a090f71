//! Form controllers for the account screens.
//!
//! Each controller owns its field values and error map, validates
//! synchronously on every change, and drives exactly one [`Session`]
//! operation on submit. Views render the observable state and decide
//! navigation; controllers own every error message and its field
//! attribution, and the session only passes raw failures through.
//!
//! [`Session`]: account_client::Session

pub mod profile;
pub mod signup;

use serde::Serialize;

pub use profile::{ProfileField, ProfileForm};
pub use signup::{SignUpField, SignUpForm};

pub(crate) const EMAIL_TAKEN_ERROR: &str =
    "Email address has already taken. Please choose another email.";

/// Lifecycle of a form. `Submitting` spans a single in-flight request;
/// the view disables the submit action while it lasts, and the form
/// returns to `Editing` on every outcome. There is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
}

/// Per-field error map. Name and email carry a single message (empty =
/// valid); the password group aggregates violations because validity
/// depends on several fields at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: String,
    pub email: String,
    pub password: Vec<String>,
}

impl FieldErrors {
    /// True when every field is valid and submit is permitted.
    pub fn is_clear(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.password.is_empty()
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The operation went through.
    Success,
    /// Field errors are set: either local validation failed before any
    /// network call, or the server rejected with a code that maps to a
    /// field.
    Invalid,
    /// Unrecognized failure (network, timeout, unknown server code).
    /// Carries the user-facing notification; field errors are untouched.
    Failed(String),
}
