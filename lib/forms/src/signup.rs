//! Sign-up form controller.

use std::sync::Arc;

use account_client::Session;
use account_validate::{password, validate_email, validate_name};

use crate::{EMAIL_TAKEN_ERROR, FieldErrors, FormPhase, SubmitOutcome};

const EMPTY_PASSWORD: &str = "Please type your desired password.";
const SIGNUP_FAILED: &str = "Unable to create your account. Please try again.";

/// Editable fields of the sign-up form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

/// Sign-up screen state: field values, error map, and the submit
/// lifecycle. One instance per mounted screen.
pub struct SignUpForm {
    session: Arc<Session>,
    phase: FormPhase,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    errors: FieldErrors,
}

impl SignUpForm {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            phase: FormPhase::Editing,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            errors: FieldErrors::default(),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    /// Store a keystroke and synchronously re-validate the touched field.
    /// Password and confirmation validate as one group.
    pub fn set_value(&mut self, field: SignUpField, value: &str) {
        match field {
            SignUpField::Name => {
                self.name = value.to_string();
                self.validate_name();
            }
            SignUpField::Email => {
                self.email = value.to_string();
                self.validate_email();
            }
            SignUpField::Password => {
                self.password = value.to_string();
                self.validate_password_group();
            }
            SignUpField::ConfirmPassword => {
                self.confirm_password = value.to_string();
                self.validate_password_group();
            }
        }
    }

    fn validate_name(&mut self) {
        self.errors.name = validate_name(&self.name).to_string();
    }

    fn validate_email(&mut self) {
        self.errors.email = validate_email(&self.email).to_string();
    }

    /// Sign-up always requires a password: both fields empty collapses to
    /// a single prompt instead of the full rule set.
    fn validate_password_group(&mut self) {
        if self.password.is_empty() && self.confirm_password.is_empty() {
            self.errors.password = vec![EMPTY_PASSWORD.to_string()];
            return;
        }
        let check = password::evaluate(&self.password, &self.confirm_password);
        self.errors.password = check.violations.iter().map(|v| v.to_string()).collect();
    }

    /// Re-validate everything against current values, then register.
    ///
    /// Any field error aborts before the network call and leaves values
    /// in place. On success the password fields are cleared (a password
    /// is never echoed back) and the view decides navigation.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.validate_password_group();
        self.validate_email();
        self.validate_name();
        if !self.errors.is_clear() {
            return SubmitOutcome::Invalid;
        }

        self.phase = FormPhase::Submitting;
        let result = self
            .session
            .register(&self.name, &self.email, &self.password, &self.confirm_password)
            .await;
        self.phase = FormPhase::Editing;

        match result {
            Ok(()) => {
                self.password.clear();
                self.confirm_password.clear();
                SubmitOutcome::Success
            }
            Err(err) if err.code() == Some("EMAIL_ALREADY_TAKEN") => {
                self.errors.email = EMAIL_TAKEN_ERROR.to_string();
                SubmitOutcome::Invalid
            }
            Err(err) => {
                tracing::warn!(%err, "sign-up request failed");
                SubmitOutcome::Failed(SIGNUP_FAILED.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use account_client::{FakeGateway, MemoryStore, Session};

    fn form() -> (Arc<FakeGateway>, SignUpForm) {
        let gateway = Arc::new(FakeGateway::new());
        let session = Arc::new(Session::new(
            gateway.clone(),
            Arc::new(MemoryStore::new()),
        ));
        (gateway, SignUpForm::new(session))
    }

    fn fill_valid(form: &mut SignUpForm) {
        form.set_value(SignUpField::Name, "Ada Lovelace");
        form.set_value(SignUpField::Email, "ada@x.io");
        form.set_value(SignUpField::Password, "abc123!");
        form.set_value(SignUpField::ConfirmPassword, "abc123!");
    }

    #[test]
    fn both_password_fields_empty_collapse_to_one_prompt() {
        let (_gateway, mut form) = form();
        form.set_value(SignUpField::Password, "");
        assert_eq!(form.errors().password, vec![EMPTY_PASSWORD.to_string()]);
    }

    #[test]
    fn keystrokes_validate_the_touched_field_only() {
        let (_gateway, mut form) = form();
        form.set_value(SignUpField::Email, "nope");
        assert_eq!(form.errors().email, "Invalid Email Address format.");
        // Name untouched, so no name error yet.
        assert_eq!(form.errors().name, "");
    }

    #[tokio::test]
    async fn submit_with_a_missing_name_aborts_before_the_network() {
        let (gateway, mut form) = form();
        form.set_value(SignUpField::Email, "x@y.co");
        form.set_value(SignUpField::Password, "abc123!");
        form.set_value(SignUpField::ConfirmPassword, "abc123!");

        assert_eq!(form.submit().await, SubmitOutcome::Invalid);
        assert_eq!(form.errors().name, "Full Name is required.");
        assert_eq!(gateway.request_count(), 0);
        // Values stay put for the user to fix.
        assert_eq!(form.email(), "x@y.co");
        assert_eq!(form.password(), "abc123!");
    }

    #[tokio::test]
    async fn successful_submit_clears_only_the_password_fields() {
        let (gateway, mut form) = form();
        fill_valid(&mut form);

        assert_eq!(form.submit().await, SubmitOutcome::Success);
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.name(), "Ada Lovelace");
        assert_eq!(form.email(), "ada@x.io");
        assert_eq!(form.password(), "");
        assert_eq!(form.confirm_password(), "");
        assert_eq!(gateway.request_count(), 1);
    }

    #[tokio::test]
    async fn email_taken_maps_to_an_email_field_error() {
        let (gateway, mut form) = form();
        fill_valid(&mut form);
        gateway.push_rejection(409, "EMAIL_ALREADY_TAKEN");

        assert_eq!(form.submit().await, SubmitOutcome::Invalid);
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.errors().email, EMAIL_TAKEN_ERROR);
        // Name and password untouched by the failure.
        assert_eq!(form.name(), "Ada Lovelace");
        assert_eq!(form.password(), "abc123!");
    }

    #[tokio::test]
    async fn unknown_failures_become_a_notification_without_field_errors() {
        let (gateway, mut form) = form();
        fill_valid(&mut form);
        gateway.push_rejection(500, "INTERNAL");

        let outcome = form.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed(SIGNUP_FAILED.to_string()));
        assert!(form.errors().is_clear());
    }

    #[tokio::test]
    async fn submit_re_validates_stale_state() {
        let (gateway, mut form) = form();
        fill_valid(&mut form);
        // Simulate a value changing without its error being refreshed.
        form.name.clear();

        assert_eq!(form.submit().await, SubmitOutcome::Invalid);
        assert_eq!(form.errors().name, "Full Name is required.");
        assert_eq!(gateway.request_count(), 0);
    }
}
