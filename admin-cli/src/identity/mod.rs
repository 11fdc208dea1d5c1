//! Delegated identity login.
//!
//! The admin view never authenticates anyone itself. It asks an
//! [`IdentityProvider`] to log in, reads back the resulting [`Identity`] and
//! hands its bearer token to the contact store.

mod device;
mod session;

pub use device::DeviceFlowProvider;
pub use session::SessionFile;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An authenticated caller as issued by the identity provider
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Identity {
    access_token: String,
    #[zeroize(skip)]
    expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn new(access_token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Bearer token for the contact store
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// What the user must do to approve a device login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePrompt {
    pub verification_uri: String,
    pub user_code: String,
}

/// Progress of the most recent login attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginStatus {
    #[default]
    Idle,
    /// Login started; carries the approval prompt once the provider issued one
    LoggingIn(Option<DevicePrompt>),
    Success,
    LoginError(String),
}

impl LoginStatus {
    pub fn is_logging_in(&self) -> bool {
        matches!(self, Self::LoggingIn(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("User is already authenticated")]
    AlreadyAuthenticated,

    #[error("A login is already in progress")]
    LoginInProgress,

    #[error("Identity provider misconfigured: {0}")]
    Config(String),

    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// External authority that logs the admin in
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run an interactive login. Fails with
    /// [`IdentityError::AlreadyAuthenticated`] while an identity is held.
    async fn login(&self) -> Result<(), IdentityError>;

    /// Forget the current identity, including any persisted session
    async fn clear_session(&self);

    fn identity(&self) -> Option<Identity>;

    fn login_status(&self) -> LoginStatus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_identity_debug_hides_token() {
        let identity = Identity::new("secret-token", None);
        let printed = format!("{:?}", identity);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("redacted"));
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        assert!(!Identity::new("t", None).is_expired_at(now));
        assert!(Identity::new("t", Some(now - Duration::seconds(1))).is_expired_at(now));
        assert!(!Identity::new("t", Some(now + Duration::hours(1))).is_expired_at(now));
    }
}
