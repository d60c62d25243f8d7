use chrono::Utc;
use uuid::Uuid;

use crate::models::StudentRow;
use crate::views::students::{Roster, StatusFilter};

fn student(n: u128, user_id: i64, name: &str, nickname: &str, verified: bool) -> StudentRow {
    StudentRow {
        id: Uuid::from_u128(n),
        user_id,
        full_name: Some(name.to_string()),
        nickname: Some(nickname.to_string()),
        created_at: Utc::now(),
        is_verified: verified,
        address_city: Some("São Paulo".to_string()),
        address_state: Some("SP".to_string()),
    }
}

fn sample_roster() -> Roster {
    Roster::new(vec![
        student(1, 4123, "Ana Souza", "aninha", true),
        student(2, 88, "Bruno Lima", "bruno", false),
        student(3, 123, "Carla Mendes", "carlinha", true),
    ])
}

#[test]
fn test_empty_query_matches_all() {
    let roster = sample_roster();
    assert_eq!(roster.visible("", StatusFilter::All).len(), 3);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let roster = sample_roster();

    let visible = roster.visible("ANA", StatusFilter::All);
    let names: Vec<_> = visible
        .iter()
        .map(|row| row.full_name.as_deref().unwrap())
        .collect();

    assert_eq!(names, vec!["Ana Souza"]);
}

#[test]
fn test_search_matches_nickname() {
    let roster = sample_roster();

    let visible = roster.visible("carlinha", StatusFilter::All);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].user_id, 123);
}

#[test]
fn test_search_matches_user_id_as_string() {
    let roster = sample_roster();

    // "123" is a substring of both 4123 and 123.
    let visible = roster.visible("123", StatusFilter::All);
    assert_eq!(visible.len(), 2);
}

#[test]
fn test_filtered_view_is_exact_subset_of_snapshot() {
    let roster = sample_roster();
    let query = "a";

    let visible = roster.visible(query, StatusFilter::All);

    for row in roster.rows() {
        let name_hit = row
            .full_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(query));
        let nickname_hit = row
            .nickname
            .as_deref()
            .is_some_and(|nickname| nickname.to_lowercase().contains(query));
        let id_hit = row.user_id.to_string().contains(query);

        let expected = name_hit || nickname_hit || id_hit;
        let included = visible.iter().any(|visible_row| visible_row.id == row.id);
        assert_eq!(included, expected, "row {} mis-filtered", row.user_id);
    }
}

#[test]
fn test_status_filter_combines_with_search() {
    let roster = sample_roster();

    // "a" matches all three rows; verified narrows to Ana and Carla.
    let visible = roster.visible("a", StatusFilter::Verified);
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|row| row.is_verified));

    let visible = roster.visible("a", StatusFilter::Unverified);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].user_id, 88);
}

#[test]
fn test_stats_cover_whole_snapshot() {
    let roster = sample_roster();

    let stats = roster.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.verified, 2);
}

#[test]
fn test_mark_verified_patches_matching_row() {
    let mut roster = sample_roster();

    assert!(roster.mark_verified(Uuid::from_u128(2), true));
    assert!(roster.rows().iter().all(|row| row.is_verified));
}

#[test]
fn test_mark_verified_unknown_id_leaves_snapshot_unchanged() {
    let mut roster = sample_roster();
    let before: Vec<bool> = roster.rows().iter().map(|row| row.is_verified).collect();

    assert!(!roster.mark_verified(Uuid::from_u128(99), true));

    let after: Vec<bool> = roster.rows().iter().map(|row| row.is_verified).collect();
    assert_eq!(before, after);
}

#[test]
fn test_remove_drops_exactly_one_row() {
    let mut roster = sample_roster();

    assert!(roster.remove(Uuid::from_u128(2)));
    assert_eq!(roster.rows().len(), 2);
    assert!(roster.rows().iter().all(|row| row.id != Uuid::from_u128(2)));
}

#[test]
fn test_remove_unknown_id_leaves_snapshot_unchanged() {
    let mut roster = sample_roster();

    assert!(!roster.remove(Uuid::from_u128(99)));
    assert_eq!(roster.rows().len(), 3);
}
