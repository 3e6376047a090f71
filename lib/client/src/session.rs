//! Client session state.
//!
//! One [`Session`] per process, constructed at startup and shared by
//! reference with every consumer. It holds the bearer token and the
//! current user profile, maps each account operation onto exactly one
//! HTTP call, and writes every mutation through to the [`SessionStore`].
//! Observers (the profile form) subscribe to user changes through a watch
//! channel.
//!
//! Invariant: an empty token always goes with an empty user. Transitions
//! that clear the token clear the user inside the same critical section.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::watch;

use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway, Method};
use crate::store::{PersistedSession, SessionStore};
use crate::types::{
    Credentials, LOGIN_ROUTE, LoginResponse, ProfileUpdate, RegisterRequest, USER_ROUTE,
    USERS_ROUTE, User,
};

struct SessionData {
    token: String,
    user: User,
}

/// Shared client session.
pub struct Session {
    gateway: Arc<dyn Gateway>,
    store: Arc<dyn SessionStore>,
    // Never held across an await point.
    state: RwLock<SessionData>,
    user_tx: watch::Sender<User>,
}

impl Session {
    /// Create the session, restoring the persisted record if present.
    ///
    /// A corrupt or unreadable record degrades to a fresh unauthenticated
    /// session; startup never fails on persistence.
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<dyn SessionStore>) -> Self {
        let mut restored = match store.load() {
            Ok(record) => record.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, "failed to restore session record, starting unauthenticated");
                PersistedSession::default()
            }
        };
        // An empty token never carries a user, even out of a stale record.
        if restored.token.is_empty() {
            restored.user = User::default();
        }
        let (user_tx, _) = watch::channel(restored.user.clone());
        Self {
            gateway,
            store,
            state: RwLock::new(SessionData {
                token: restored.token,
                user: restored.user,
            }),
            user_tx,
        }
    }

    // ── Read access ─────────────────────────────────────────────────

    /// Current bearer token; empty string means unauthenticated.
    pub fn token(&self) -> String {
        self.read().token.clone()
    }

    /// Snapshot of the current user profile.
    pub fn user(&self) -> User {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.read().token.is_empty()
    }

    /// Subscribe to user-profile changes. The receiver always holds the
    /// latest snapshot; token-only transitions do not wake it.
    pub fn subscribe_user(&self) -> watch::Receiver<User> {
        self.user_tx.subscribe()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.state.read().expect("session lock")
    }

    /// Token for an authenticated call, or the local not-authenticated
    /// failure. Never touches the network.
    fn require_token(&self) -> Result<String, ApiError> {
        let token = self.token();
        if token.is_empty() {
            return Err(ApiError::NotAuthenticated);
        }
        Ok(token)
    }

    /// Apply a mutation and write it through to the store in one step.
    ///
    /// A store write failure is logged, not surfaced: the in-memory
    /// session stays authoritative for the life of the process.
    fn commit(&self, apply: impl FnOnce(&mut SessionData)) {
        let record = {
            let mut state = self.state.write().expect("session lock");
            apply(&mut state);
            PersistedSession {
                token: state.token.clone(),
                user: state.user.clone(),
            }
        };

        let persisted = if record.token.is_empty() && record.user.is_empty() {
            self.store.clear()
        } else {
            self.store.save(&record)
        };
        if let Err(err) = persisted {
            tracing::warn!(%err, "failed to persist session record");
        }

        self.user_tx.send_if_modified(|current| {
            if *current != record.user {
                *current = record.user.clone();
                true
            } else {
                false
            }
        });
    }

    // ── Operations ──────────────────────────────────────────────────

    /// `POST /login`. Stores the returned token; the profile is fetched
    /// separately. Failures propagate unchanged, no retry.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let body = to_body(&Credentials {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response = self
            .gateway
            .send(ApiRequest::new(Method::Post, LOGIN_ROUTE).body(body))
            .await?;
        let login: LoginResponse = serde_json::from_value(response)
            .map_err(|e| ApiError::Decode(format!("login response: {}", e)))?;

        self.commit(|state| state.token = login.token);
        tracing::debug!("authenticated");
        Ok(())
    }

    /// `POST /user`. Registration does not sign the new account in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), ApiError> {
        let body = to_body(&RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        })?;
        self.gateway
            .send(ApiRequest::new(Method::Post, USER_ROUTE).body(body))
            .await?;
        Ok(())
    }

    /// `GET /user`. Replaces the stored profile wholesale with the
    /// server's answer.
    pub async fn fetch_profile(&self) -> Result<User, ApiError> {
        let token = self.require_token()?;
        let response = self
            .gateway
            .send(ApiRequest::new(Method::Get, USER_ROUTE).token(token))
            .await?;
        let user: User = serde_json::from_value(response)
            .map_err(|e| ApiError::Decode(format!("profile response: {}", e)))?;

        self.commit(|state| state.user = user.clone());
        Ok(user)
    }

    /// `PATCH /user`. Password fields go on the wire only when present in
    /// `update`. On success the local profile takes the new name/email.
    pub async fn edit_profile(&self, update: ProfileUpdate) -> Result<(), ApiError> {
        let token = self.require_token()?;
        let body = to_body(&update)?;
        self.gateway
            .send(ApiRequest::new(Method::Patch, USER_ROUTE).token(token).body(body))
            .await?;

        self.commit(|state| {
            state.user.name = update.name.clone();
            state.user.email = update.email.clone();
        });
        Ok(())
    }

    /// `DELETE /user`, then the logout transition. On failure the session
    /// is left fully intact; delete never partially applies.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let token = self.require_token()?;
        self.gateway
            .send(
                ApiRequest::new(Method::Delete, USER_ROUTE)
                    .token(token)
                    .body(json!({})),
            )
            .await?;
        self.logout();
        Ok(())
    }

    /// Local-only transition: token and user are cleared together and the
    /// persisted record is removed. Never fails, never calls the server.
    pub fn logout(&self) {
        self.commit(|state| {
            state.token.clear();
            state.user = User::default();
        });
        tracing::debug!("logged out");
    }

    /// `GET /users`. The list is returned, not stored.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let token = self.require_token()?;
        let response = self
            .gateway
            .send(ApiRequest::new(Method::Get, USERS_ROUTE).token(token))
            .await?;
        serde_json::from_value(response)
            .map_err(|e| ApiError::Decode(format!("users response: {}", e)))
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(format!("request body: {}", e)))
}
