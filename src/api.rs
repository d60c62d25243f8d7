use base64::{Engine as _, engine::general_purpose::STANDARD};
use rocket::State;
use rocket::http::{CookieJar, Status};
use rocket::response::Redirect;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AdminUser;
use crate::backend::{Backend, BackendError, SelectQuery};
use crate::catalog::{AchievementIcon, METRIC_CATALOG, MetricDefinition};
use crate::error::AppError;
use crate::models::{
    ACHIEVEMENTS_TABLE, Achievement, PROFILES_TABLE, STUDENT_LIST_COLUMNS, STUDENT_ROLES,
    StudentProfile, StudentRow, THEME_LIST_COLUMNS, THEMES_TABLE, ThemeRow, WriteTheme,
};
use crate::validation::{AppErrorExt, JsonValidateExt, ValidationResponse};
use crate::views::SaveCommand;
use crate::views::achievements::{
    AchievementDraft, metric_label, save_achievement, target_label,
};
use crate::views::students::{Roster, RosterStats, StatusFilter, StudentCard};
use crate::views::themes::{CATEGORY_SUGGESTIONS, NewCover, ThemeDraft, save_theme};

fn parse_uuid(id: &str) -> Result<Uuid, Status> {
    Uuid::parse_str(id).map_err(|_| Status::BadRequest)
}

/// Single-row reads answer 406 when no row matched the filter.
fn not_found_as(err: BackendError, what: &str) -> AppError {
    match err.status() {
        Some(406) => AppError::NotFound(format!("{what} not found")),
        _ => AppError::Backend(err),
    }
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

#[post("/logout")]
pub async fn api_logout(
    user: AdminUser,
    backend: &State<Backend>,
    cookies: &CookieJar<'_>,
) -> Redirect {
    let _ = backend.sign_out(&user.access_token).await;
    cookies.remove_private(rocket::http::Cookie::build("access_token"));
    Redirect::to("/")
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct StudentListResponse {
    pub stats: RosterStats,
    pub rows: Vec<StudentRow>,
}

async fn fetch_roster(backend: &Backend, user: &AdminUser) -> Result<Roster, AppError> {
    let rows: Vec<StudentRow> = backend
        .select_rows(
            &user.access_token,
            SelectQuery::new(PROFILES_TABLE, STUDENT_LIST_COLUMNS)
                .eq_any("user_role", &STUDENT_ROLES)
                .order_desc("created_at"),
        )
        .await?;
    Ok(Roster::new(rows))
}

fn roster_response(roster: &Roster) -> StudentListResponse {
    StudentListResponse {
        stats: roster.stats(),
        rows: roster.rows().to_vec(),
    }
}

#[get("/students?<q>&<status>")]
pub async fn api_get_students(
    q: Option<String>,
    status: Option<StatusFilter>,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<StudentListResponse>, Status> {
    let roster = fetch_roster(backend, &user).await?;

    let query = q.unwrap_or_default();
    let status = status.unwrap_or_default();
    let rows = roster
        .visible(&query, status)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(StudentListResponse {
        stats: roster.stats(),
        rows,
    }))
}

#[get("/students/<id>")]
pub async fn api_get_student(
    id: &str,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<StudentCard>, Status> {
    let id = parse_uuid(id)?;

    let profile: StudentProfile = backend
        .select_one(
            &user.access_token,
            SelectQuery::new(PROFILES_TABLE, "*").eq("id", &id.to_string()),
        )
        .await
        .map_err(|err| not_found_as(err, "Student"))?;

    Ok(Json(StudentCard::from(&profile)))
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub verified: bool,
}

#[derive(Serialize)]
struct VerifyPatch {
    is_verified: bool,
}

/// Toggles the verification badge. The snapshot is patched only after the
/// remote update succeeds; a failure leaves it at the pre-mutation value.
#[post("/students/<id>/verify", data = "<request>")]
pub async fn api_set_student_verified(
    id: &str,
    request: Json<VerifyRequest>,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<StudentListResponse>, Status> {
    let id = parse_uuid(id)?;
    let mut roster = fetch_roster(backend, &user).await?;

    backend
        .update_row(
            &user.access_token,
            PROFILES_TABLE,
            "id",
            &id.to_string(),
            &VerifyPatch {
                is_verified: request.verified,
            },
        )
        .await
        .map_err(AppError::from)?;

    if !roster.mark_verified(id, request.verified) {
        return Err(Status::NotFound);
    }

    Ok(Json(roster_response(&roster)))
}

/// Physical delete. Exactly one remote delete scoped to this id; the row
/// leaves the snapshot only on success.
#[delete("/students/<id>")]
pub async fn api_delete_student(
    id: &str,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<StudentListResponse>, Status> {
    let id = parse_uuid(id)?;
    let mut roster = fetch_roster(backend, &user).await?;

    backend
        .delete_row(&user.access_token, PROFILES_TABLE, "id", &id.to_string())
        .await
        .map_err(AppError::from)?;

    if !roster.remove(id) {
        return Err(Status::NotFound);
    }

    Ok(Json(roster_response(&roster)))
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct AchievementView {
    #[serde(flatten)]
    pub row: Achievement,
    pub metric_label: String,
    pub target_label: String,
}

#[derive(Serialize)]
pub struct AchievementCatalogResponse {
    pub metrics: &'static [MetricDefinition],
    pub icons: Vec<AchievementIcon>,
}

async fn fetch_achievements(
    backend: &Backend,
    user: &AdminUser,
) -> Result<Vec<AchievementView>, AppError> {
    let rows: Vec<Achievement> = backend
        .select_rows(
            &user.access_token,
            SelectQuery::new(ACHIEVEMENTS_TABLE, "*").order_desc("created_at"),
        )
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| AchievementView {
            metric_label: metric_label(&row.metric_name),
            target_label: target_label(&row.metric_name, row.metric_target),
            row,
        })
        .collect())
}

#[get("/achievements")]
pub async fn api_get_achievements(
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<Vec<AchievementView>>, Status> {
    let list = fetch_achievements(backend, &user).await?;
    Ok(Json(list))
}

/// The static selectors behind the editor: metric catalog and icon set.
#[get("/achievements/catalog")]
pub fn api_get_achievement_catalog(_user: AdminUser) -> Json<AchievementCatalogResponse> {
    Json(AchievementCatalogResponse {
        metrics: METRIC_CATALOG,
        icons: AchievementIcon::ALL.to_vec(),
    })
}

#[post("/achievements", data = "<draft>")]
pub async fn api_create_achievement(
    draft: Json<AchievementDraft>,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<Vec<AchievementView>>, Custom<Json<ValidationResponse>>> {
    let draft = draft.validate_custom()?;

    save_achievement(backend, &user, SaveCommand::Create, draft)
        .await
        .validate_custom()?;

    let list = fetch_achievements(backend, &user).await.validate_custom()?;
    Ok(Json(list))
}

#[put("/achievements/<id>", data = "<draft>")]
pub async fn api_update_achievement(
    id: i64,
    draft: Json<AchievementDraft>,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<Vec<AchievementView>>, Custom<Json<ValidationResponse>>> {
    let draft = draft.validate_custom()?;

    save_achievement(backend, &user, SaveCommand::Update(id), draft)
        .await
        .validate_custom()?;

    let list = fetch_achievements(backend, &user).await.validate_custom()?;
    Ok(Json(list))
}

/// Removes the definition only. Awards already granted to users live in a
/// table owned by the gamification service and survive this delete.
#[delete("/achievements/<id>")]
pub async fn api_delete_achievement(
    id: i64,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<Vec<AchievementView>>, Status> {
    backend
        .delete_row(&user.access_token, ACHIEVEMENTS_TABLE, "id", &id.to_string())
        .await
        .map_err(AppError::from)?;

    let list = fetch_achievements(backend, &user).await?;
    Ok(Json(list))
}

// ---------------------------------------------------------------------------
// Writing themes
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ThemeListResponse {
    pub rows: Vec<ThemeRow>,
    pub category_suggestions: [&'static str; 5],
}

#[derive(Deserialize)]
pub struct CoverPayload {
    pub file_name: String,
    pub content_type: String,
    /// Base64-encoded file content.
    pub data: String,
}

#[derive(Deserialize, Validate)]
pub struct ThemeSaveRequest {
    #[validate(nested)]
    pub theme: ThemeDraft,
    pub new_cover: Option<CoverPayload>,
}

fn decode_cover(payload: Option<CoverPayload>) -> Result<Option<NewCover>, AppError> {
    match payload {
        Some(payload) => {
            let bytes = STANDARD
                .decode(payload.data.as_bytes())
                .map_err(|err| AppError::Validation(format!("Invalid cover encoding: {err}")))?;
            Ok(Some(NewCover {
                file_name: payload.file_name,
                content_type: payload.content_type,
                bytes,
            }))
        }
        _ => Ok(None),
    }
}

async fn fetch_themes(backend: &Backend, user: &AdminUser) -> Result<Vec<ThemeRow>, AppError> {
    Ok(backend
        .select_rows(
            &user.access_token,
            SelectQuery::new(THEMES_TABLE, THEME_LIST_COLUMNS).order_desc("created_at"),
        )
        .await?)
}

#[get("/themes")]
pub async fn api_get_themes(
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<ThemeListResponse>, Status> {
    let rows = fetch_themes(backend, &user).await?;
    Ok(Json(ThemeListResponse {
        rows,
        category_suggestions: CATEGORY_SUGGESTIONS,
    }))
}

#[get("/themes/<id>")]
pub async fn api_get_theme(
    id: &str,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<WriteTheme>, Status> {
    let id = parse_uuid(id)?;

    let theme: WriteTheme = backend
        .select_one(
            &user.access_token,
            SelectQuery::new(THEMES_TABLE, "*").eq("id", &id.to_string()),
        )
        .await
        .map_err(|err| not_found_as(err, "Theme"))?;

    Ok(Json(theme))
}

#[post("/themes", data = "<request>")]
pub async fn api_create_theme(
    request: Json<ThemeSaveRequest>,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<ThemeListResponse>, Custom<Json<ValidationResponse>>> {
    let request = request.validate_custom()?;
    let new_cover = decode_cover(request.new_cover).validate_custom()?;

    save_theme(backend, &user, SaveCommand::Create, request.theme, new_cover)
        .await
        .validate_custom()?;

    let rows = fetch_themes(backend, &user).await.validate_custom()?;
    Ok(Json(ThemeListResponse {
        rows,
        category_suggestions: CATEGORY_SUGGESTIONS,
    }))
}

#[put("/themes/<id>", data = "<request>")]
pub async fn api_update_theme(
    id: &str,
    request: Json<ThemeSaveRequest>,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<ThemeListResponse>, Custom<Json<ValidationResponse>>> {
    let id = Uuid::parse_str(id)
        .map_err(|_| AppError::Validation("Invalid theme id".to_string()))
        .validate_custom()?;
    let request = request.validate_custom()?;
    let new_cover = decode_cover(request.new_cover).validate_custom()?;

    save_theme(
        backend,
        &user,
        SaveCommand::Update(id),
        request.theme,
        new_cover,
    )
    .await
    .validate_custom()?;

    let rows = fetch_themes(backend, &user).await.validate_custom()?;
    Ok(Json(ThemeListResponse {
        rows,
        category_suggestions: CATEGORY_SUGGESTIONS,
    }))
}

#[delete("/themes/<id>")]
pub async fn api_delete_theme(
    id: &str,
    user: AdminUser,
    backend: &State<Backend>,
) -> Result<Json<ThemeListResponse>, Status> {
    let id = parse_uuid(id)?;

    backend
        .delete_row(&user.access_token, THEMES_TABLE, "id", &id.to_string())
        .await
        .map_err(AppError::from)?;

    let rows = fetch_themes(backend, &user).await?;
    Ok(Json(ThemeListResponse {
        rows,
        category_suggestions: CATEGORY_SUGGESTIONS,
    }))
}
