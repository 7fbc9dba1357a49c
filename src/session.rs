// src/session.rs
//! Signed-in user context shared with request handlers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            display_name: None,
            signed_in_at: Utc::now(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Holds at most one session. Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<UserSession>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous session
    pub async fn sign_in(&self, session: UserSession) {
        info!("User {} signed in", session.email);
        *self.inner.write().await = Some(session);
    }

    pub async fn sign_out(&self) -> Option<UserSession> {
        let previous = self.inner.write().await.take();
        if let Some(session) = &previous {
            info!("User {} signed out", session.email);
        }
        previous
    }

    pub async fn current(&self) -> Option<UserSession> {
        self.inner.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
