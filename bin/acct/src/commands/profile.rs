//! Profile view, edit, delete, and the users listing.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use account_client::Session;
use account_forms::{ProfileField, ProfileForm, SubmitOutcome};
use anyhow::Result;

use super::print_field_errors;

pub async fn show(session: Arc<Session>) -> Result<()> {
    let user = session.fetch_profile().await?;
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

pub async fn edit(
    session: Arc<Session>,
    name: Option<String>,
    email: Option<String>,
    change_password: bool,
) -> Result<()> {
    let mut form = ProfileForm::new(session);
    // Seed from the server before applying edits.
    form.refresh().await?;

    if let Some(name) = name {
        form.set_value(ProfileField::Name, &name);
    }
    if let Some(email) = email {
        form.set_value(ProfileField::Email, &email);
    }
    if change_password {
        let current = rpassword::prompt_password("Current password: ")?;
        let new = rpassword::prompt_password("New password: ")?;
        let confirm = rpassword::prompt_password("Confirm new password: ")?;
        form.set_value(ProfileField::CurrentPassword, &current);
        form.set_value(ProfileField::NewPassword, &new);
        form.set_value(ProfileField::ConfirmPassword, &confirm);
    }

    match form.submit().await {
        SubmitOutcome::Success => {
            println!("Profile updated.");
            Ok(())
        }
        SubmitOutcome::Invalid => {
            print_field_errors(form.errors());
            anyhow::bail!("profile update rejected");
        }
        SubmitOutcome::Failed(notification) => anyhow::bail!(notification),
    }
}

pub async fn delete(session: Arc<Session>, yes: bool) -> Result<()> {
    if !yes {
        print!("Really delete your account? This cannot be undone. [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let mut form = ProfileForm::new(session);
    match form.delete_account().await {
        SubmitOutcome::Success => {
            println!("Account deleted.");
            Ok(())
        }
        SubmitOutcome::Failed(notification) => anyhow::bail!(notification),
        SubmitOutcome::Invalid => anyhow::bail!("account deletion rejected"),
    }
}

pub async fn users(session: Arc<Session>) -> Result<()> {
    let users = session.list_users().await?;
    println!("{}", serde_json::to_string_pretty(&users)?);
    Ok(())
}
