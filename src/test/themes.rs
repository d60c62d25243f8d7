use serde_json::json;
use validator::Validate;

use crate::models::{Difficulty, GuidingText};
use crate::test::utils::test_backend;
use crate::views::themes::{
    COVER_BUCKET, CoverPlan, NewCover, ThemeDraft, plan_cover, sanitize_file_name,
};

fn theme_draft() -> ThemeDraft {
    ThemeDraft {
        title: "Educação digital no Brasil".to_string(),
        description: Some("Eixo temático sobre inclusão digital.".to_string()),
        category: Some("Atualidades".to_string()),
        difficulty: Difficulty::Medium,
        cover_image_url: None,
        guiding_texts: vec![GuidingText::Text {
            content: "Texto motivador inicial.".to_string(),
        }],
        structure_model: None,
    }
}

fn new_cover(file_name: &str) -> NewCover {
    NewCover {
        file_name: file_name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

#[test]
fn test_without_new_file_the_stored_url_is_kept_unchanged() {
    let plan = plan_cover(Some("https://x/old.png".to_string()), None, 1_700_000_000_000);
    assert_eq!(plan, CoverPlan::Keep(Some("https://x/old.png".to_string())));

    let plan = plan_cover(None, None, 1_700_000_000_000);
    assert_eq!(plan, CoverPlan::Keep(None));
}

#[test]
fn test_new_file_uploads_to_time_and_name_derived_path() {
    let cover = new_cover("capa.png");
    let plan = plan_cover(
        Some("blob:local-preview".to_string()),
        Some(&cover),
        1_700_000_000_000,
    );

    assert_eq!(
        plan,
        CoverPlan::Upload {
            path: "theme_covers/1700000000000_capa.png".to_string()
        }
    );
}

#[test]
fn test_persisted_cover_url_is_the_storage_public_url() {
    let backend = test_backend();
    let cover = new_cover("capa.png");

    let plan = plan_cover(
        Some("blob:local-preview".to_string()),
        Some(&cover),
        1_700_000_000_000,
    );
    let CoverPlan::Upload { path } = plan else {
        panic!("expected an upload plan");
    };

    let url = backend.public_object_url(COVER_BUCKET, &path);
    assert_eq!(
        url,
        "http://127.0.0.1:9/storage/v1/object/public/theme_images/theme_covers/1700000000000_capa.png"
    );
    // The local preview URL never survives to persistence.
    assert!(!url.contains("blob:"));
}

#[test]
fn test_file_names_are_sanitized_for_object_paths() {
    assert_eq!(sanitize_file_name("capa final (1).png"), "capa_final__1_.png");
    assert_eq!(sanitize_file_name("ok-name_2.jpg"), "ok-name_2.jpg");
}

#[test]
fn test_guiding_texts_parse_as_tagged_blocks_in_order() {
    let payload = json!([
        { "type": "text", "content": "Primeiro texto." },
        { "type": "image", "url": "https://cdn/x.png", "caption": "Fonte: IBGE" },
        { "type": "text", "content": "Segundo texto." }
    ]);

    let blocks: Vec<GuidingText> = serde_json::from_value(payload).unwrap();

    assert_eq!(
        blocks,
        vec![
            GuidingText::Text {
                content: "Primeiro texto.".to_string()
            },
            GuidingText::Image {
                url: "https://cdn/x.png".to_string(),
                caption: "Fonte: IBGE".to_string()
            },
            GuidingText::Text {
                content: "Segundo texto.".to_string()
            },
        ]
    );
}

#[test]
fn test_guiding_text_serializes_with_type_tag() {
    let block = GuidingText::Image {
        url: "https://cdn/x.png".to_string(),
        caption: "Legenda".to_string(),
    };

    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value["type"], "image");
    assert_eq!(value["url"], "https://cdn/x.png");
}

#[test]
fn test_unknown_block_type_is_rejected() {
    let payload = json!([{ "type": "video", "url": "https://cdn/x.mp4" }]);
    let result: Result<Vec<GuidingText>, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[test]
fn test_create_payload_carries_no_id() {
    let value = serde_json::to_value(theme_draft()).unwrap();
    assert!(value.get("id").is_none());
    assert_eq!(value["difficulty"], "medium");
}

#[test]
fn test_difficulty_levels_are_ordered_and_stored_lowercase() {
    assert!(Difficulty::Easy < Difficulty::Medium);
    assert!(Difficulty::Medium < Difficulty::Hard);
    assert_eq!(Difficulty::Hard.as_str(), "hard");
    assert_eq!(
        serde_json::to_value(Difficulty::Easy).unwrap(),
        serde_json::json!("easy")
    );
}

#[test]
fn test_blank_title_fails_validation() {
    let mut draft = theme_draft();
    draft.title = "  ".to_string();

    let errors = draft.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("title"));
}
