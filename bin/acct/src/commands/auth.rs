//! Sign-up, login, logout.

use std::sync::Arc;

use account_client::Session;
use account_forms::{SignUpField, SignUpForm, SubmitOutcome};
use anyhow::Result;

use super::print_field_errors;

pub async fn signup(session: Arc<Session>, name: &str, email: &str) -> Result<()> {
    let password = rpassword::prompt_password("Choose a password: ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;

    let mut form = SignUpForm::new(session);
    form.set_value(SignUpField::Name, name);
    form.set_value(SignUpField::Email, email);
    form.set_value(SignUpField::Password, &password);
    form.set_value(SignUpField::ConfirmPassword, &confirm);

    match form.submit().await {
        SubmitOutcome::Success => {
            println!("Account created. Sign in with `acct login --email {}`.", email);
            Ok(())
        }
        SubmitOutcome::Invalid => {
            print_field_errors(form.errors());
            anyhow::bail!("sign-up rejected");
        }
        SubmitOutcome::Failed(notification) => anyhow::bail!(notification),
    }
}

pub async fn login(session: Arc<Session>, email: &str) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;

    session
        .authenticate(email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("login failed: {}", e))?;

    println!("Logged in as {}.", email);
    Ok(())
}

pub fn logout(session: &Session) -> Result<()> {
    session.logout();
    println!("Logged out.");
    Ok(())
}
