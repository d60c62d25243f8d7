use crate::backend::SelectQuery;
use crate::test::utils::test_backend;

#[test]
fn test_select_query_builds_projection_and_order() {
    let query = SelectQuery::new("conquistas", "*").order_desc("created_at");

    assert_eq!(query.table(), "conquistas");
    assert_eq!(
        query.params(),
        &[
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
        ]
    );
}

#[test]
fn test_select_query_builds_equality_filter() {
    let query = SelectQuery::new("profiles", "is_admin").eq("id", "abc-123");

    assert_eq!(
        query.params(),
        &[
            ("select".to_string(), "is_admin".to_string()),
            ("id".to_string(), "eq.abc-123".to_string()),
        ]
    );
}

#[test]
fn test_select_query_builds_role_disjunction() {
    let query = SelectQuery::new("profiles", "id")
        .eq_any("user_role", &["student", "access_code_user"]);

    assert_eq!(
        query.params()[1],
        (
            "or".to_string(),
            "(user_role.eq.student,user_role.eq.access_code_user)".to_string()
        )
    );
}

#[test]
fn test_public_object_url_is_resolved_syntactically() {
    let backend = test_backend();

    assert_eq!(
        backend.public_object_url("theme_images", "theme_covers/1_a.png"),
        "http://127.0.0.1:9/storage/v1/object/public/theme_images/theme_covers/1_a.png"
    );
}
