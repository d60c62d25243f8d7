//! Student roster: the fetched snapshot, its search and status filters, and
//! the patch rules applied after a remote mutation succeeds. Also the
//! presentation helpers for the read-only detail card.

use chrono::NaiveDate;
use rocket::FromFormField;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{StudentProfile, StudentRow};

pub const EMPTY_FIELD: &str = "Não preenchido";
pub const EMPTY_LIST: &str = "Nenhum";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromFormField)]
pub enum StatusFilter {
    #[default]
    All,
    Verified,
    Unverified,
}

impl StatusFilter {
    fn admits(&self, row: &StudentRow) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Verified => row.is_verified,
            StatusFilter::Unverified => !row.is_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterStats {
    pub total: usize,
    pub verified: usize,
}

/// The authoritative local snapshot of the student list. Search and the
/// status filter are derived views; they never mutate the snapshot.
#[derive(Debug, Clone)]
pub struct Roster {
    rows: Vec<StudentRow>,
}

impl Roster {
    pub fn new(rows: Vec<StudentRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[StudentRow] {
        &self.rows
    }

    /// Stats cover the whole snapshot, not the filtered view.
    pub fn stats(&self) -> RosterStats {
        RosterStats {
            total: self.rows.len(),
            verified: self.rows.iter().filter(|row| row.is_verified).count(),
        }
    }

    /// Rows passing the status filter AND the case-insensitive substring
    /// search over name, nickname, and the numeric user id as a string.
    pub fn visible(&self, query: &str, status: StatusFilter) -> Vec<&StudentRow> {
        let query = query.to_lowercase();
        self.rows
            .iter()
            .filter(|row| status.admits(row))
            .filter(|row| matches_query(row, &query))
            .collect()
    }

    /// Patches the verification flag of one row. Callers invoke this only
    /// after the remote update succeeded; on failure the snapshot stays at
    /// its pre-mutation value.
    pub fn mark_verified(&mut self, id: Uuid, verified: bool) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.is_verified = verified;
                true
            }
            _ => false,
        }
    }

    /// Drops one row. Same rule: only after the remote delete succeeded.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }
}

fn matches_query(row: &StudentRow, lowercase_query: &str) -> bool {
    if lowercase_query.is_empty() {
        return true;
    }

    row.full_name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(lowercase_query))
        || row
            .nickname
            .as_deref()
            .is_some_and(|nickname| nickname.to_lowercase().contains(lowercase_query))
        || row.user_id.to_string().contains(lowercase_query)
}

/// Platform display id: `FH` plus the numeric id zero-padded to six digits.
pub fn format_display_id(user_id: i64) -> String {
    format!("FH{user_id:06}")
}

pub fn present_text(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => EMPTY_FIELD.to_string(),
    }
}

pub fn present_bool(value: bool) -> &'static str {
    if value { "Sim" } else { "Não" }
}

pub fn present_list(values: Option<&[String]>) -> String {
    match values {
        Some(values) if !values.is_empty() => values.join(", "),
        _ => EMPTY_LIST.to_string(),
    }
}

/// Dates arrive as `YYYY-MM-DD` and render localized; anything unparseable
/// is shown as stored.
pub fn present_date(value: Option<&str>) -> String {
    match value {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date.format("%d/%m/%Y").to_string(),
            Err(_) => raw.to_string(),
        },
        _ => EMPTY_FIELD.to_string(),
    }
}

/// The detail card: every field already passed through presentation, so the
/// frontend renders values verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct StudentCard {
    pub id: Uuid,
    pub display_id: String,
    pub full_name: String,
    pub is_verified: bool,
    pub nickname: String,
    pub date_of_birth: String,
    pub pronoun: String,
    pub cpf: String,
    pub education_level: String,
    pub course: String,
    pub education_year: String,
    pub institution: String,
    pub address: String,
    pub address_city: String,
    pub address_state: String,
    pub address_cep: String,
    pub address_country: String,
    pub selected_modules: String,
    pub theme: String,
    pub font_size: String,
    pub registered_at: String,
}

impl From<&StudentProfile> for StudentCard {
    fn from(profile: &StudentProfile) -> Self {
        let address = match (
            profile.address_street.as_deref(),
            profile.address_number.as_deref(),
        ) {
            (None, None) => EMPTY_FIELD.to_string(),
            (street, number) => {
                format!("{}, {}", street.unwrap_or_default(), number.unwrap_or_default())
            }
        };

        Self {
            id: profile.id,
            display_id: format_display_id(profile.user_id),
            full_name: present_text(profile.full_name.as_deref()),
            is_verified: profile.is_verified,
            nickname: present_text(profile.nickname.as_deref()),
            date_of_birth: present_date(profile.date_of_birth.as_deref()),
            pronoun: present_text(profile.pronoun.as_deref()),
            cpf: present_text(profile.cpf.as_deref()),
            education_level: present_text(profile.education_level.as_deref()),
            course: present_text(profile.course.as_deref()),
            education_year: present_text(profile.education_year.as_deref()),
            institution: present_text(profile.institution.as_deref()),
            address,
            address_city: present_text(profile.address_city.as_deref()),
            address_state: present_text(profile.address_state.as_deref()),
            address_cep: present_text(profile.address_cep.as_deref()),
            address_country: present_text(profile.address_country.as_deref()),
            selected_modules: present_list(profile.selected_modules.as_deref()),
            theme: present_text(profile.theme.as_deref()),
            font_size: present_text(profile.font_size.as_deref()),
            registered_at: profile
                .created_at
                .format("%d/%m/%Y %H:%M")
                .to_string(),
        }
    }
}
