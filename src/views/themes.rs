//! Theme editor logic: the draft payload with its ordered guiding-text
//! blocks, the cover-image upload plan, and save dispatch.
//!
//! The cover flow mirrors what the admin frontend shows: picking a file
//! yields a local preview immediately, but what gets persisted is always the
//! storage public URL produced here. The preview URL never leaves the form.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AdminUser;
use crate::backend::Backend;
use crate::error::AppError;
use crate::models::{Difficulty, GuidingText, THEMES_TABLE};

use super::SaveCommand;

pub const COVER_BUCKET: &str = "theme_images";
pub const COVER_PREFIX: &str = "theme_covers";

/// Category suggestions offered by the form; the stored value stays a free
/// string.
pub const CATEGORY_SUGGESTIONS: [&str; 5] =
    ["Atualidades", "Filosofia", "Ciência", "Educação", "Social"];

/// Editable fields of a writing theme. No id: creates never carry one, and
/// updates take theirs from the command.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ThemeDraft {
    #[validate(custom(function = crate::validation::non_blank))]
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Difficulty,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub guiding_texts: Vec<GuidingText>,
    pub structure_model: Option<String>,
}

/// A newly chosen cover file accompanying a submission.
#[derive(Debug, Clone)]
pub struct NewCover {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// What happens to the cover on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverPlan {
    /// No new file: the previously persisted URL (or none) is kept unchanged.
    Keep(Option<String>),
    /// Upload first, then persist the object's public URL.
    Upload { path: String },
}

/// Decides the cover plan for a submission. The object path is derived from
/// the current time and the (sanitized) file name, so re-submitting the same
/// file produces a fresh path while upsert still tolerates collisions.
pub fn plan_cover(
    stored_url: Option<String>,
    new_cover: Option<&NewCover>,
    now_millis: i64,
) -> CoverPlan {
    match new_cover {
        Some(cover) => CoverPlan::Upload {
            path: format!(
                "{COVER_PREFIX}/{now_millis}_{}",
                sanitize_file_name(&cover.file_name)
            ),
        },
        _ => CoverPlan::Keep(stored_url),
    }
}

/// Object paths travel inside URLs; anything outside a conservative set is
/// folded to underscores.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Saves a theme: uploads the new cover first when one was chosen (upsert
/// semantics), substitutes the resulting public URL into the draft, then
/// dispatches the insert or update the command names.
#[instrument(skip(backend, user, draft, new_cover))]
pub async fn save_theme(
    backend: &Backend,
    user: &AdminUser,
    command: SaveCommand<Uuid>,
    mut draft: ThemeDraft,
    new_cover: Option<NewCover>,
) -> Result<(), AppError> {
    let now_millis = chrono::Utc::now().timestamp_millis();

    match plan_cover(draft.cover_image_url.take(), new_cover.as_ref(), now_millis) {
        CoverPlan::Keep(stored_url) => {
            draft.cover_image_url = stored_url;
        }
        CoverPlan::Upload { path } => {
            if let Some(cover) = new_cover {
                backend
                    .upload_object(
                        &user.access_token,
                        COVER_BUCKET,
                        &path,
                        &cover.content_type,
                        cover.bytes,
                        true,
                    )
                    .await?;
            }
            draft.cover_image_url = Some(backend.public_object_url(COVER_BUCKET, &path));
        }
    }

    match command {
        SaveCommand::Create => {
            info!(title = %draft.title, "Creating writing theme");
            backend
                .insert_row(&user.access_token, THEMES_TABLE, &draft)
                .await?;
        }
        SaveCommand::Update(id) => {
            info!(%id, title = %draft.title, "Updating writing theme");
            backend
                .update_row(&user.access_token, THEMES_TABLE, "id", &id.to_string(), &draft)
                .await?;
        }
    }

    Ok(())
}
