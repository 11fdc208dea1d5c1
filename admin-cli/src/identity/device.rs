use async_trait::async_trait;
use chrono::Utc;
use oauth2::basic::BasicClient;
use oauth2::devicecode::StandardDeviceAuthorizationResponse;
use oauth2::reqwest::async_http_client;
use oauth2::{AuthType, AuthUrl, ClientId, DeviceAuthorizationUrl, Scope, TokenResponse, TokenUrl};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

use super::{DevicePrompt, Identity, IdentityError, IdentityProvider, LoginStatus, SessionFile};
use crate::config::IdentitySettings;

#[derive(Default)]
struct ProviderState {
    identity: Option<Identity>,
    status: LoginStatus,
}

/// OAuth 2.0 device authorization grant.
///
/// The user approves the login in a browser on any device using the code
/// shown in the console; this side polls the token endpoint until approved.
pub struct DeviceFlowProvider {
    client: BasicClient,
    scopes: Vec<String>,
    session: SessionFile,
    state: RwLock<ProviderState>,
}

impl DeviceFlowProvider {
    /// Build a provider and restore any unexpired saved session
    pub fn new(settings: &IdentitySettings, session: SessionFile) -> Result<Self, IdentityError> {
        let auth_url = AuthUrl::new(settings.auth_url.clone())
            .map_err(|e| IdentityError::Config(format!("auth_url: {}", e)))?;
        let token_url = TokenUrl::new(settings.token_url.clone())
            .map_err(|e| IdentityError::Config(format!("token_url: {}", e)))?;
        let device_url = DeviceAuthorizationUrl::new(settings.device_auth_url.clone())
            .map_err(|e| IdentityError::Config(format!("device_auth_url: {}", e)))?;

        let client = BasicClient::new(
            ClientId::new(settings.client_id.clone()),
            None,
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody)
        .set_device_authorization_url(device_url);

        let identity = session.load();
        if identity.is_some() {
            info!("Restored saved identity session");
        }

        Ok(Self {
            client,
            scopes: settings.scopes.clone(),
            session,
            state: RwLock::new(ProviderState {
                identity,
                status: LoginStatus::Idle,
            }),
        })
    }

    fn set_status(&self, status: LoginStatus) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .status = status;
    }

    fn fail(&self, err: IdentityError) -> IdentityError {
        warn!("Identity login failed: {}", err);
        self.set_status(LoginStatus::LoginError(err.to_string()));
        err
    }

    async fn run_device_flow(&self) -> Result<Identity, IdentityError> {
        let mut request = self
            .client
            .exchange_device_code()
            .map_err(|e| IdentityError::Config(e.to_string()))?;
        for scope in &self.scopes {
            request = request.add_scope(Scope::new(scope.clone()));
        }

        let details: StandardDeviceAuthorizationResponse = request
            .request_async(async_http_client)
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        let prompt = DevicePrompt {
            verification_uri: details.verification_uri().to_string(),
            user_code: details.user_code().secret().clone(),
        };
        info!("Waiting for device approval at {}", prompt.verification_uri);
        self.set_status(LoginStatus::LoggingIn(Some(prompt)));

        let token = self
            .client
            .exchange_device_access_token(&details)
            .request_async(async_http_client, tokio::time::sleep, None)
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        let expires_at = token
            .expires_in()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);

        Ok(Identity::new(token.access_token().secret().clone(), expires_at))
    }
}

#[async_trait]
impl IdentityProvider for DeviceFlowProvider {
    async fn login(&self) -> Result<(), IdentityError> {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let expired = state.identity.as_ref().map(|identity| identity.is_expired_at(Utc::now()));
            if let Some(expired) = expired {
                if !expired {
                    return Err(IdentityError::AlreadyAuthenticated);
                }
                info!("Identity session expired; starting a new login");
                state.identity = None;
                self.session.clear();
            }
            if state.status.is_logging_in() {
                return Err(IdentityError::LoginInProgress);
            }
            state.status = LoginStatus::LoggingIn(None);
        }
        debug!("Starting device authorization");

        let identity = self.run_device_flow().await.map_err(|e| self.fail(e))?;

        if let Err(e) = self.session.save(&identity) {
            warn!("Cannot persist identity session: {}", e);
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.identity = Some(identity);
        state.status = LoginStatus::Success;
        info!("Identity login succeeded");
        Ok(())
    }

    async fn clear_session(&self) {
        self.session.clear();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.identity = None;
        state.status = LoginStatus::Idle;
    }

    fn identity(&self) -> Option<Identity> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .identity
            .as_ref()
            .filter(|identity| !identity.is_expired_at(Utc::now()))
            .cloned()
    }

    fn login_status(&self) -> LoginStatus {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .status
            .clone()
    }
}
