use rocket::Request;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::response::Redirect;

use crate::backend::Backend;
use crate::error::AppError;

use super::{AdminUser, check_admin};

/// Where denied callers land: the public entry route, with an error
/// indicator when the caller was authenticated but not an administrator.
pub const ENTRY_ROUTE: &str = "/";
pub const DENIED_ROUTE: &str =
    "/?error=Acesso%20negado.%20Voc%C3%AA%20n%C3%A3o%20%C3%A9%20um%20administrador.";

fn bearer_token(request: &Request<'_>) -> Option<String> {
    if let Some(header) = request.headers().get_one("Authorization") {
        if let Some(token) = header.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    request
        .cookies()
        .get_private("access_token")
        .map(|cookie| cookie.value().to_string())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(token) = bearer_token(request) else {
            return Outcome::Error((Status::Unauthorized, ()));
        };

        let backend = match request.rocket().state::<Backend>() {
            Some(backend) => backend,
            _ => {
                tracing::error!("Backend client not found in managed state");
                return Outcome::Error((Status::InternalServerError, ()));
            }
        };

        match check_admin(backend, &token).await {
            Ok(admin) => {
                tracing::info!(user_id = %admin.id, "Administrator admitted");
                Outcome::Success(admin)
            }
            Err(AppError::Authentication(msg)) => {
                tracing::warn!(message = %msg, "Admin gate: no identity");
                Outcome::Error((Status::Unauthorized, ()))
            }
            Err(err) => {
                err.log_and_record("Admin gate");
                Outcome::Error((Status::Forbidden, ()))
            }
        }
    }
}

#[catch(401)]
pub fn unauthorized_api(_req: &Request) -> Redirect {
    Redirect::to(ENTRY_ROUTE)
}

#[catch(403)]
pub fn forbidden_api(_req: &Request) -> Redirect {
    Redirect::to(DENIED_ROUTE)
}
