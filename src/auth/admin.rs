use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::{Backend, SelectQuery};
use crate::error::AppError;
use crate::models::PROFILES_TABLE;

/// An administrator that passed the access gate. Carries the access token so
/// handlers can issue backend calls under the caller's own row-level
/// permissions.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
struct AdminFlag {
    is_admin: Option<bool>,
}

/// The gate admits a profile only when its administrator flag is exactly
/// `true`. A missing row or an unset flag is a denial.
pub fn admits(is_admin: Option<bool>) -> bool {
    is_admin == Some(true)
}

/// Runs the full admission check for `token`.
///
/// No identity behind the token is an authentication failure. Anything after
/// that (a missing profile, a failed fetch, a flag that is not `true`)
/// terminates the session and comes back as an authorization failure. A
/// transient fetch error is treated the same as "not an administrator";
/// there is no retry.
#[tracing::instrument(name = "admin_gate", skip(backend, token))]
pub async fn check_admin(backend: &Backend, token: &str) -> Result<AdminUser, AppError> {
    let identity = match backend.current_user(token).await {
        Ok(identity) => identity,
        Err(err) => {
            return Err(AppError::Authentication(format!(
                "No identity behind access token: {err}"
            )));
        }
    };

    let flag: Option<AdminFlag> = backend
        .select_one(
            token,
            SelectQuery::new(PROFILES_TABLE, "is_admin").eq("id", &identity.id.to_string()),
        )
        .await
        .ok();

    if admits(flag.and_then(|f| f.is_admin)) {
        Ok(AdminUser {
            id: identity.id,
            email: identity.email,
            access_token: token.to_string(),
        })
    } else {
        // Session of a non-administrator is revoked outright; a failed
        // revocation does not change the denial.
        let _ = backend.sign_out(token).await;
        tracing::warn!(user_id = %identity.id, "Denied non-administrator");
        Err(AppError::Authorization(
            "Profile is not an administrator".to_string(),
        ))
    }
}
