//! The slice of the remote auth protocol this console consumes: resolve the
//! identity behind an access token, and revoke a session.

use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{Backend, BackendError, error_for_response};

/// The authenticated identity behind an access token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

impl Backend {
    /// Resolves the identity for `token`. An expired or unknown token comes
    /// back as an API error from the auth service.
    #[instrument(skip(self, token))]
    pub async fn current_user(&self, token: &str) -> Result<AuthUser, BackendError> {
        info!("Fetching current identity");
        let request = self.http.get(self.auth_url("user"));

        let response = self.authorize(request, token).send().await?;
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(response.json().await?)
    }

    /// Revokes the session behind `token`. Used both by the explicit logout
    /// route and by the access gate when it turns away a non-administrator.
    #[instrument(skip(self, token))]
    pub async fn sign_out(&self, token: &str) -> Result<(), BackendError> {
        info!("Signing out session");
        let request = self.http.post(self.auth_url("logout"));

        let response = self.authorize(request, token).send().await?;
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(())
    }
}
