//! Profile-edit form controller.
//!
//! Seeded from the session's user profile and kept in sync through an
//! explicit observer pull: [`ProfileForm::sync_from_session`] re-seeds
//! only pristine fields, so an external profile change never clobbers
//! in-flight edits. Overwriting edits requires the explicit
//! [`ProfileForm::refresh`] action.

use std::sync::Arc;

use account_client::{ApiError, ProfileUpdate, Session, User};
use account_validate::{password, validate_email, validate_name};
use tokio::sync::watch;

use crate::{EMAIL_TAKEN_ERROR, FieldErrors, FormPhase, SubmitOutcome};

const MISSING_CURRENT: &str = "Please type your current password.";
const MISSING_NEW: &str = "Please type your new desired password.";
const CURRENT_MISMATCH: &str = "Your current password does not match the record.";
const EDIT_FAILED: &str = "Unable to update your profile. Please try again.";
const DELETE_FAILED: &str = "There is a problem deleting your account.";

/// Editable fields of the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
}

/// Profile screen state. One instance per mounted screen, scoped to its
/// lifetime rather than shared process-wide.
pub struct ProfileForm {
    session: Arc<Session>,
    user_rx: watch::Receiver<User>,
    phase: FormPhase,
    name: String,
    email: String,
    current_password: String,
    new_password: String,
    confirm_password: String,
    // Pristine tracking: a dirty field is never re-seeded by sync.
    name_dirty: bool,
    email_dirty: bool,
    errors: FieldErrors,
}

impl ProfileForm {
    /// Mount the form, seeded from the session's current user.
    pub fn new(session: Arc<Session>) -> Self {
        let user_rx = session.subscribe_user();
        let user = user_rx.borrow().clone();
        Self {
            session,
            user_rx,
            phase: FormPhase::Editing,
            name: user.name,
            email: user.email,
            current_password: String::new(),
            new_password: String::new(),
            confirm_password: String::new(),
            name_dirty: false,
            email_dirty: false,
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

    pub fn current_password(&self) -> &str {
        &self.current_password
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    /// Store a keystroke and synchronously re-validate the touched field.
    /// The three password fields validate as one group.
    pub fn set_value(&mut self, field: ProfileField, value: &str) {
        match field {
            ProfileField::Name => {
                self.name = value.to_string();
                self.name_dirty = true;
                self.validate_name();
            }
            ProfileField::Email => {
                self.email = value.to_string();
                self.email_dirty = true;
                self.validate_email();
            }
            ProfileField::CurrentPassword => {
                self.current_password = value.to_string();
                self.validate_password_group();
            }
            ProfileField::NewPassword => {
                self.new_password = value.to_string();
                self.validate_password_group();
            }
            ProfileField::ConfirmPassword => {
                self.confirm_password = value.to_string();
                self.validate_password_group();
            }
        }
    }

    /// Pull the latest session user and re-seed only pristine fields.
    /// One-way sync, session to form; in-flight edits are never clobbered.
    pub fn sync_from_session(&mut self) {
        if !self.user_rx.has_changed().unwrap_or(false) {
            return;
        }
        let user = self.user_rx.borrow_and_update().clone();
        if !self.name_dirty {
            self.name = user.name;
            self.validate_name();
        }
        if !self.email_dirty {
            self.email = user.email;
            self.validate_email();
        }
    }

    /// Explicit refresh: fetch the profile and overwrite the editable
    /// fields with the server's answer, discarding local name/email edits.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let user = self.session.fetch_profile().await?;
        // The broadcast this fetch triggered is consumed here.
        let _ = self.user_rx.borrow_and_update();
        self.name = user.name;
        self.email = user.email;
        self.name_dirty = false;
        self.email_dirty = false;
        self.validate_name();
        self.validate_email();
        Ok(())
    }

    fn validate_name(&mut self) {
        self.errors.name = validate_name(&self.name).to_string();
    }

    fn validate_email(&mut self) {
        self.errors.email = validate_email(&self.email).to_string();
    }

    /// An entirely empty password group means "keep the current password"
    /// and is valid, unlike sign-up. A partially filled group prompts for
    /// the missing pieces before the policy itself runs.
    fn validate_password_group(&mut self) {
        self.errors.password.clear();

        let has_current = !self.current_password.is_empty();
        let has_new = !self.new_password.is_empty();
        let has_confirm = !self.confirm_password.is_empty();

        if !has_current && !has_new && !has_confirm {
            return;
        }
        if !has_current && (has_new || has_confirm) {
            self.errors.password.push(MISSING_CURRENT.to_string());
        }
        if !has_new && (has_current || has_confirm) {
            self.errors.password.push(MISSING_NEW.to_string());
        }
        if has_new || has_confirm {
            let check = password::evaluate(&self.new_password, &self.confirm_password);
            self.errors
                .password
                .extend(check.violations.iter().map(|v| v.to_string()));
        }
    }

    /// Re-validate everything, then `PATCH` the profile. Password fields
    /// are put on the wire only when non-empty and are cleared after a
    /// successful save.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.validate_password_group();
        self.validate_email();
        self.validate_name();
        if !self.errors.is_clear() {
            return SubmitOutcome::Invalid;
        }

        let update = ProfileUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            current_password: non_empty(&self.current_password),
            new_password: non_empty(&self.new_password),
            confirm_password: non_empty(&self.confirm_password),
        };

        self.phase = FormPhase::Submitting;
        let result = self.session.edit_profile(update).await;
        self.phase = FormPhase::Editing;

        match result {
            Ok(()) => {
                self.current_password.clear();
                self.new_password.clear();
                self.confirm_password.clear();
                // The saved values are the session's values again.
                self.name_dirty = false;
                self.email_dirty = false;
                let _ = self.user_rx.borrow_and_update();
                SubmitOutcome::Success
            }
            Err(err) if err.code() == Some("EMAIL_ALREADY_TAKEN") => {
                self.errors.email = EMAIL_TAKEN_ERROR.to_string();
                SubmitOutcome::Invalid
            }
            Err(err) if err.code() == Some("CURRENT_PASSWORD_NOT_MATCH") => {
                self.errors.password = vec![CURRENT_MISMATCH.to_string()];
                SubmitOutcome::Invalid
            }
            Err(err) => {
                tracing::warn!(%err, "profile update failed");
                SubmitOutcome::Failed(EDIT_FAILED.to_string())
            }
        }
    }

    /// Delete the account. Any failure is reported as a notification and
    /// leaves both the session and the form untouched; delete never
    /// partially applies.
    pub async fn delete_account(&mut self) -> SubmitOutcome {
        self.phase = FormPhase::Submitting;
        let result = self.session.delete_account().await;
        self.phase = FormPhase::Editing;

        match result {
            Ok(()) => SubmitOutcome::Success,
            Err(err) => {
                tracing::warn!(%err, "account deletion failed");
                SubmitOutcome::Failed(DELETE_FAILED.to_string())
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
