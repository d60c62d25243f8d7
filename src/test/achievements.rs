use serde_json::json;
use validator::Validate;

use crate::catalog::AchievementIcon;
use crate::error::AppError;
use crate::views::achievements::{AchievementDraft, target_label};

fn draft(metric_name: &str, metric_target: i64) -> AchievementDraft {
    AchievementDraft {
        title: "Mestre da Matemática".to_string(),
        description: "Complete 10 exercícios sem errar.".to_string(),
        icon: AchievementIcon::Trophy,
        metric_name: metric_name.to_string(),
        metric_target,
        is_active: true,
    }
}

#[test]
fn test_boolean_metric_target_is_coerced_to_unit() {
    let normalized = draft("onboarding_completed", 5).normalized().unwrap();
    assert_eq!(normalized.metric_target, 1);

    let normalized = draft("profile_completed", 0).normalized().unwrap();
    assert_eq!(normalized.metric_target, 0);
}

#[test]
fn test_numeric_metric_target_passes_through() {
    let normalized = draft("login_streak", 7).normalized().unwrap();
    assert_eq!(normalized.metric_target, 7);
}

#[test]
fn test_numeric_metric_target_must_be_positive() {
    let result = draft("study_hours", 0).normalized();
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_unknown_metric_is_rejected() {
    let result = draft("keyboard_smashes", 3).normalized();
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_blank_title_and_description_fail_validation() {
    let mut blank_title = draft("login_streak", 7);
    blank_title.title = "   ".to_string();
    let errors = blank_title.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("title"));

    let mut blank_description = draft("login_streak", 7);
    blank_description.description = String::new();
    let errors = blank_description.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("description"));
}

#[test]
fn test_target_label_numeric_appends_unit() {
    assert_eq!(target_label("login_streak", 7), "7 dias seguidos");
    assert_eq!(target_label("study_hours", 40), "40 horas");
}

#[test]
fn test_target_label_boolean_renders_status() {
    assert_eq!(target_label("onboarding_completed", 1), "Sim (Concluído)");
    assert_eq!(target_label("onboarding_completed", 0), "Não");
}

#[test]
fn test_target_label_unknown_metric_falls_back_to_value() {
    assert_eq!(target_label("mystery_metric", 12), "12");
}

#[test]
fn test_unknown_icon_is_rejected_at_the_boundary() {
    let payload = json!({
        "title": "Pioneira",
        "description": "Primeira a entrar.",
        "icon_name": "Sparkles",
        "metric_name": "login_streak",
        "metric_target": 3,
        "is_active": true
    });

    let result: Result<AchievementDraft, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[test]
fn test_known_icon_parses_and_serializes_by_name() {
    let payload = json!({
        "title": "Pioneira",
        "description": "Primeira a entrar.",
        "icon_name": "GraduationCap",
        "metric_name": "login_streak",
        "metric_target": 3,
        "is_active": true
    });

    let draft: AchievementDraft = serde_json::from_value(payload).unwrap();
    assert_eq!(draft.icon, AchievementIcon::GraduationCap);

    let row = serde_json::to_value(&draft).unwrap();
    assert_eq!(row["icon_name"], "GraduationCap");
}

#[test]
fn test_icon_from_str_round_trips_the_closed_set() {
    for icon in AchievementIcon::ALL {
        assert_eq!(AchievementIcon::from_str(icon.as_str()).unwrap(), icon);
    }
    assert!(AchievementIcon::from_str("Sparkles").is_err());
}
