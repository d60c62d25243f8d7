use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::AchievementIcon;

pub const PROFILES_TABLE: &str = "profiles";
pub const ACHIEVEMENTS_TABLE: &str = "conquistas";
pub const THEMES_TABLE: &str = "write_themes";

/// Roles whose profiles show up in the student roster.
pub const STUDENT_ROLES: [&str; 2] = ["student", "access_code_user"];

pub const STUDENT_LIST_COLUMNS: &str =
    "id,user_id,full_name,nickname,created_at,is_verified,address_city,address_state";

/// Roster projection of a profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRow {
    pub id: Uuid,
    pub user_id: i64,
    pub full_name: Option<String>,
    pub nickname: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_verified: bool,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
}

/// Full profile row as read for the detail card. Profiles are created by the
/// registration flow, which lives outside this console; most fields are
/// optional there and therefore nullable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: i64,
    pub full_name: Option<String>,
    pub nickname: Option<String>,
    pub date_of_birth: Option<String>,
    pub pronoun: Option<String>,
    pub cpf: Option<String>,
    pub address_cep: Option<String>,
    pub address_street: Option<String>,
    pub address_number: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_country: Option<String>,
    pub education_level: Option<String>,
    pub course: Option<String>,
    pub education_year: Option<String>,
    pub institution: Option<String>,
    pub selected_modules: Option<Vec<String>>,
    pub theme: Option<String>,
    pub font_size: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// One achievement definition. The icon deserializes through the closed
/// enumeration, so a row with an unknown `icon_name` fails the read instead
/// of rendering a substitute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    #[serde(rename = "icon_name")]
    pub icon: AchievementIcon,
    pub metric_name: String,
    pub metric_target: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// One ordered unit of theme content: a text passage, or an image reference
/// with caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GuidingText {
    Text {
        #[serde(default)]
        content: String,
    },
    Image {
        #[serde(default)]
        url: String,
        #[serde(default)]
        caption: String,
    },
}

pub const THEME_LIST_COLUMNS: &str = "id,title,category,difficulty,created_at";

/// List projection of a writing theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRow {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
}

/// Full writing-theme row as loaded into the edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteTheme {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Difficulty,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub guiding_texts: Vec<GuidingText>,
    pub structure_model: Option<String>,
    pub created_at: DateTime<Utc>,
}
