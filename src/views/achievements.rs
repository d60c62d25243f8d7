//! Achievement editor logic: draft validation, metric-driven target
//! coercion, the derived target label, and save dispatch.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::auth::AdminUser;
use crate::backend::Backend;
use crate::catalog::{self, AchievementIcon, MetricKind};
use crate::error::AppError;
use crate::models::ACHIEVEMENTS_TABLE;

use super::SaveCommand;

/// Editable fields of an achievement definition. Serializes with the stored
/// column names, so a validated draft doubles as the row payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AchievementDraft {
    #[validate(custom(function = crate::validation::non_blank))]
    pub title: String,
    #[validate(custom(function = crate::validation::non_blank))]
    pub description: String,
    #[serde(rename = "icon_name")]
    pub icon: AchievementIcon,
    pub metric_name: String,
    pub metric_target: i64,
    pub is_active: bool,
}

impl AchievementDraft {
    /// Checks the metric against the catalog and coerces the target for
    /// boolean-typed metrics to exactly 0 or 1, whatever the raw input held.
    pub fn normalized(mut self) -> Result<Self, AppError> {
        let metric = catalog::metric(&self.metric_name).ok_or_else(|| {
            AppError::Validation(format!("Unknown metric: {}", self.metric_name))
        })?;

        match metric.kind {
            MetricKind::Boolean => {
                self.metric_target = if self.metric_target != 0 { 1 } else { 0 };
            }
            MetricKind::Numeric => {
                if self.metric_target < 1 {
                    return Err(AppError::Validation(
                        "A meta deve ser um número positivo".to_string(),
                    ));
                }
            }
        }

        Ok(self)
    }
}

/// Display string for a configured target, driven by the metric's declared
/// type and unit: `Sim (Concluído)` / `Não` for boolean metrics, value plus
/// unit suffix otherwise.
pub fn target_label(metric_name: &str, target: i64) -> String {
    match catalog::metric(metric_name) {
        Some(metric) => match metric.kind {
            MetricKind::Boolean => {
                if target == 1 {
                    "Sim (Concluído)".to_string()
                } else {
                    "Não".to_string()
                }
            }
            MetricKind::Numeric => format!("{} {}", target, metric.unit),
        },
        _ => target.to_string(),
    }
}

/// Human label for the metric itself; unknown keys fall back to the raw key.
pub fn metric_label(metric_name: &str) -> String {
    match catalog::metric(metric_name) {
        Some(metric) => metric.label.to_string(),
        _ => metric_name.to_string(),
    }
}

/// Dispatches a normalized draft through the insert or update operation the
/// command names. One atomic remote call either way.
#[instrument(skip(backend, user, draft))]
pub async fn save_achievement(
    backend: &Backend,
    user: &AdminUser,
    command: SaveCommand<i64>,
    draft: AchievementDraft,
) -> Result<(), AppError> {
    let draft = draft.normalized()?;

    match command {
        SaveCommand::Create => {
            info!(title = %draft.title, "Creating achievement");
            backend
                .insert_row(&user.access_token, ACHIEVEMENTS_TABLE, &draft)
                .await?;
        }
        SaveCommand::Update(id) => {
            info!(id, title = %draft.title, "Updating achievement");
            backend
                .update_row(
                    &user.access_token,
                    ACHIEVEMENTS_TABLE,
                    "id",
                    &id.to_string(),
                    &draft,
                )
                .await?;
        }
    }

    Ok(())
}
