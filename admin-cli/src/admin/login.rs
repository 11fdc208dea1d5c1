use std::time::Duration;
use tracing::{info, warn};

use crate::identity::{IdentityError, IdentityProvider};

/// Pause between clearing a stale session and logging in again
pub const RELOGIN_DELAY: Duration = Duration::from_millis(300);

pub const LOGIN_FAILED_MESSAGE: &str = "Failed to login with Internet Identity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    /// The provider reported a stale session that was cleared before retrying
    Recovered,
}

/// Log in once; on `AlreadyAuthenticated` clear the session, wait `delay`
/// and try exactly one more time.
pub async fn login_with_recovery(
    provider: &dyn IdentityProvider,
    delay: Duration,
) -> Result<LoginOutcome, IdentityError> {
    match provider.login().await {
        Ok(()) => Ok(LoginOutcome::LoggedIn),
        Err(IdentityError::AlreadyAuthenticated) => {
            warn!("Identity provider holds a stale session, clearing and retrying");
            provider.clear_session().await;
            tokio::time::sleep(delay).await;
            provider.login().await?;
            info!("Login succeeded after clearing stale session");
            Ok(LoginOutcome::Recovered)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::identity::{Identity, IdentityError, IdentityProvider, LoginStatus};

    /// Identity provider replaying scripted login results
    #[derive(Default)]
    pub struct ScriptedProvider {
        results: Mutex<VecDeque<Result<(), IdentityError>>>,
        identity: Mutex<Option<Identity>>,
        logins: AtomicUsize,
        clears: AtomicUsize,
    }

    impl ScriptedProvider {
        pub fn new(results: Vec<Result<(), IdentityError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                ..Self::default()
            }
        }

        pub fn logins(&self) -> usize {
            self.logins.load(Ordering::SeqCst)
        }

        pub fn clears(&self) -> usize {
            self.clears.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityProvider for ScriptedProvider {
        async fn login(&self) -> Result<(), IdentityError> {
            self.logins.fetch_add(1, Ordering::SeqCst);
            let result = self.results.lock().unwrap().pop_front().unwrap_or(Ok(()));
            if result.is_ok() {
                *self.identity.lock().unwrap() = Some(Identity::new("mock-token", None));
            }
            result
        }

        async fn clear_session(&self) {
            self.clears.fetch_add(1, Ordering::SeqCst);
            *self.identity.lock().unwrap() = None;
        }

        fn identity(&self) -> Option<Identity> {
            self.identity.lock().unwrap().clone()
        }

        fn login_status(&self) -> LoginStatus {
            LoginStatus::Idle
        }
    }
}
