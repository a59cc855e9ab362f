use std::sync::Arc;

use log::{debug, info};

use crate::http::{ApiClient, ApiError};
use crate::models::{LoginRequest, LoginResponse};

const LOGIN_PATH: &str = "/auth/login";

/// Session management on top of the API client.
#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Authenticates and stores the issued access and refresh tokens.
    ///
    /// A token store that refuses the write fails the login, so a caller
    /// never believes it is signed in without a persisted session.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.client.post(LOGIN_PATH, credentials).await?;

        self.client.set_token(&response.auth.access_token).await?;
        self.client.set_refresh_token(&response.auth.refresh_token).await?;

        info!(
            email = credentials.email.as_str(),
            access_token_expire = response.auth.access_token_expire.as_str(),
            tfa_enabled = response.tfa.enabled;
            "Logged in"
        );
        Ok(response)
    }

    /// Forgets the stored session. Never fails.
    pub async fn logout(&self) {
        self.client.clear_tokens().await;
        info!("Logged out");
    }

    pub async fn is_authenticated(&self) -> bool {
        let authenticated = self.client.get_token().await.is_some();
        debug!(
            authenticated = authenticated,
            has_refresh_token = self.client.get_refresh_token().await.is_some();
            "Checked session"
        );
        authenticated
    }
}
