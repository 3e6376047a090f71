//! Wire types for the account service.

use serde::{Deserialize, Serialize};

/// POST — authenticate with email + password.
pub const LOGIN_ROUTE: &str = "/login";
/// POST (register), GET (fetch), PATCH (edit), DELETE (delete account).
pub const USER_ROUTE: &str = "/user";
/// GET — list all users.
pub const USERS_ROUTE: &str = "/users";

/// Partial user profile. The server may omit any field; the password is
/// never part of this record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    /// True for the "no user" state that accompanies an empty token.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_empty() && self.email.is_empty()
    }
}

/// `POST /login` body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /user` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// `PATCH /user` body.
///
/// The optional password fields are omitted from the wire entirely when
/// `None`; a present-but-empty value would read as a password change
/// attempt on the server side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
}

/// `POST /login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
