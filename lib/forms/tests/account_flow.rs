//! End-to-end form flows against a recording gateway.

use std::sync::Arc;

use account_client::{FakeGateway, MemoryStore, Method, Session};
use account_forms::{ProfileField, ProfileForm, SignUpField, SignUpForm, SubmitOutcome};
use serde_json::json;

fn harness() -> (Arc<FakeGateway>, Arc<Session>) {
    let gateway = Arc::new(FakeGateway::new());
    let session = Arc::new(Session::new(gateway.clone(), Arc::new(MemoryStore::new())));
    (gateway, session)
}

#[tokio::test]
async fn signup_with_a_missing_name_never_reaches_the_network() {
    let (gateway, session) = harness();
    let mut form = SignUpForm::new(session);

    form.set_value(SignUpField::Email, "x@y.co");
    form.set_value(SignUpField::Password, "abc123!");
    form.set_value(SignUpField::ConfirmPassword, "abc123!");

    assert_eq!(form.submit().await, SubmitOutcome::Invalid);
    assert_eq!(form.errors().name, "Full Name is required.");
    assert_eq!(gateway.request_count(), 0);
}

#[tokio::test]
async fn signup_rejected_for_a_taken_email_returns_to_editing() {
    let (gateway, session) = harness();
    let mut form = SignUpForm::new(session);

    form.set_value(SignUpField::Name, "Ada Lovelace");
    form.set_value(SignUpField::Email, "ada@x.io");
    form.set_value(SignUpField::Password, "abc123!");
    form.set_value(SignUpField::ConfirmPassword, "abc123!");
    gateway.push_rejection(409, "EMAIL_ALREADY_TAKEN");

    assert_eq!(form.submit().await, SubmitOutcome::Invalid);
    assert!(!form.errors().email.is_empty());
    // Untouched by the failure; the user fixes the email and retries.
    assert_eq!(form.name(), "Ada Lovelace");
    assert_eq!(form.password(), "abc123!");
}

#[tokio::test]
async fn full_account_lifecycle() {
    let (gateway, session) = harness();

    // Sign up.
    let mut signup = SignUpForm::new(session.clone());
    signup.set_value(SignUpField::Name, "Ada Lovelace");
    signup.set_value(SignUpField::Email, "ada@x.io");
    signup.set_value(SignUpField::Password, "abc123!");
    signup.set_value(SignUpField::ConfirmPassword, "abc123!");
    assert_eq!(signup.submit().await, SubmitOutcome::Success);

    // Sign in, then load the profile.
    gateway.push_reply(Ok(json!({"token": "tok-1"})));
    session.authenticate("ada@x.io", "abc123!").await.unwrap();

    gateway.push_reply(Ok(
        json!({"id": "u1", "name": "Ada Lovelace", "email": "ada@x.io"}),
    ));
    session.fetch_profile().await.unwrap();

    // Edit the profile with a password change.
    let mut profile = ProfileForm::new(session.clone());
    assert_eq!(profile.name(), "Ada Lovelace");
    profile.set_value(ProfileField::Name, "Countess of Lovelace");
    profile.set_value(ProfileField::CurrentPassword, "abc123!");
    profile.set_value(ProfileField::NewPassword, "xyz789!");
    profile.set_value(ProfileField::ConfirmPassword, "xyz789!");
    assert_eq!(profile.submit().await, SubmitOutcome::Success);
    assert_eq!(session.user().name, "Countess of Lovelace");

    // Delete the account; the session resets in the same step.
    assert_eq!(profile.delete_account().await, SubmitOutcome::Success);
    assert!(!session.is_authenticated());
    assert!(session.user().is_empty());

    // One request per operation, in order, no retries.
    let requests = gateway.requests();
    let trail: Vec<(Method, &str)> = requests
        .iter()
        .map(|r| (r.method, r.path.as_str()))
        .collect();
    assert_eq!(
        trail,
        vec![
            (Method::Post, "/user"),
            (Method::Post, "/login"),
            (Method::Get, "/user"),
            (Method::Patch, "/user"),
            (Method::Delete, "/user"),
        ]
    );

    // Authenticated calls carried the bearer token; anonymous ones did not.
    assert!(requests[0].token.is_none());
    assert!(requests[1].token.is_none());
    assert_eq!(requests[2].token.as_deref(), Some("tok-1"));
    assert_eq!(requests[3].token.as_deref(), Some("tok-1"));
    assert_eq!(requests[4].token.as_deref(), Some("tok-1"));
}
