use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationError};

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationResponse {
    pub status: &'static str,
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationResponse {
    pub fn new(errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            status: "error",
            errors,
        }
    }

    pub fn with_error(field: &str, message: &str) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self::new(errors)
    }
}

fn from_validator_errors(errors: validator::ValidationErrors) -> Custom<Json<ValidationResponse>> {
    let mut error_map = HashMap::new();

    for (field, field_errors) in errors.field_errors() {
        let error_messages: Vec<String> = field_errors
            .iter()
            .map(|error| {
                error
                    .message
                    .clone()
                    .unwrap_or_else(|| "Invalid value".into())
                    .to_string()
            })
            .collect();

        error_map.insert(field.to_string(), error_messages);
    }

    Custom(
        Status::UnprocessableEntity,
        Json(ValidationResponse::new(error_map)),
    )
}

/// Runs derive-based validation on a JSON body, handing back the inner value.
pub trait JsonValidateExt<T> {
    fn validate_custom(self) -> Result<T, Custom<Json<ValidationResponse>>>;
}

impl<T: Validate> JsonValidateExt<T> for Json<T> {
    fn validate_custom(self) -> Result<T, Custom<Json<ValidationResponse>>> {
        let inner = self.into_inner();
        match inner.validate() {
            Ok(()) => Ok(inner),
            Err(errors) => Err(from_validator_errors(errors)),
        }
    }
}

/// Maps an application error into the field-keyed response shape the admin
/// frontend renders inline.
pub trait AppErrorExt<T> {
    fn validate_custom(self) -> Result<T, Custom<Json<ValidationResponse>>>;
}

impl<T> AppErrorExt<T> for Result<T, AppError> {
    fn validate_custom(self) -> Result<T, Custom<Json<ValidationResponse>>> {
        self.map_err(|err| {
            err.log_and_record("API validation error");
            let status = err.status_code();

            let (field, message) = match &err {
                AppError::Backend(backend_err) => {
                    ("backend", format!("Backend error: {backend_err}"))
                }
                AppError::Authentication(msg) => {
                    ("authentication", format!("Authentication error: {msg}"))
                }
                AppError::Authorization(msg) => {
                    ("authorization", format!("Permission denied: {msg}"))
                }
                AppError::NotFound(msg) => ("resource", format!("Not found: {msg}")),
                AppError::Validation(msg) => ("validation", msg.clone()),
                AppError::Internal(_) => ("server", "Internal server error".to_string()),
            };

            Custom(status, Json(ValidationResponse::with_error(field, &message)))
        })
    }
}

/// Rejects values that are empty once trimmed. Shared by the achievement and
/// theme forms, which abort locally before any remote call.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("non_blank").with_message("Campo obrigatório".into()));
    }
    Ok(())
}
