use pdf_bleed::constants::MAX_BLEED_SIZE;
use pdf_bleed::*;

#[test]
fn test_defaults() {
    let options = LayoutOptions::default();

    assert_eq!(options.bleed.bleed_size, 30);
    assert_eq!(options.bleed.crop_mark_length, 20);
    assert_eq!(options.bleed.crop_mark_color, "inverted");
    assert_eq!(options.bleed.bleed_mode, "repeat");
    assert_eq!(options.bleed.cut_mark_length, 50);
    assert_eq!(options.imposition.paper_size, "letter");
    assert_eq!(options.imposition.orientation, "portrait");
    assert_eq!(options.imposition.num_copies, 4);
    assert!(options.imposition.cut_marks);
    assert_eq!(options.imposition.margin, 1.0);
    assert_eq!(options.imposition.spacing, 0.0);
    assert_eq!(options.imposition.imposition_mark_length, 5.0);
}

#[test]
fn test_resolve_defaults() {
    let resolved = LayoutOptions::default().resolve().unwrap();

    assert_eq!(resolved.bleed, BleedSpec::new(30, BleedMode::Repeat));
    assert_eq!(resolved.marks, MarkStyle::default());
    assert_eq!(resolved.page, PageSpec::new(215.9, 279.4));
    assert_eq!(resolved.copy_count, 4);
    assert!(resolved.cut_marks_enabled);
}

#[test]
fn test_resolve_landscape_mirror() {
    let mut options = LayoutOptions::default();
    options.imposition.paper_size = "A4".to_string();
    options.imposition.orientation = "landscape".to_string();
    options.bleed.bleed_mode = "mirror".to_string();
    options.bleed.crop_mark_color = "#000000".to_string();

    let resolved = options.resolve().unwrap();
    assert_eq!(resolved.page, PageSpec::new(297.0, 210.0));
    assert_eq!(resolved.bleed.mode, BleedMode::Mirror);
    assert_eq!(resolved.marks.color, MarkColor::Fixed([0, 0, 0]));
}

#[test]
fn test_resolve_rejects_bad_names() {
    let mut options = LayoutOptions::default();
    options.imposition.paper_size = "banana".to_string();
    assert!(matches!(
        options.resolve(),
        Err(LayoutError::InvalidPaperSize(_))
    ));

    let mut options = LayoutOptions::default();
    options.imposition.orientation = "upside-down".to_string();
    assert!(matches!(
        options.resolve(),
        Err(LayoutError::InvalidOrientation(_))
    ));

    let mut options = LayoutOptions::default();
    options.bleed.bleed_mode = "smear".to_string();
    assert!(matches!(
        options.resolve(),
        Err(LayoutError::InvalidBleedMode(_))
    ));

    let mut options = LayoutOptions::default();
    options.bleed.crop_mark_color = "chartreuse-ish".to_string();
    assert!(matches!(options.resolve(), Err(LayoutError::InvalidColor(_))));
}

#[test]
fn test_validation_ranges() {
    let mut options = LayoutOptions::default();
    options.imposition.num_copies = 0;
    match options.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("copies")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    let mut options = LayoutOptions::default();
    options.imposition.spacing = f32::NAN;
    assert!(options.validate().is_err());

    let mut options = LayoutOptions::default();
    options.imposition.margin = f32::INFINITY;
    assert!(options.validate().is_err());

    let mut options = LayoutOptions::default();
    options.imposition.imposition_mark_length = -1.0;
    assert!(options.validate().is_err());

    let mut options = LayoutOptions::default();
    options.bleed.stroke_width = 0;
    assert!(options.validate().is_err());

    // Stroke width is irrelevant without bleed
    options.bleed.bleed_size = 0;
    assert!(options.validate().is_ok());
}

#[test]
fn test_negative_margin_and_spacing_are_accepted() {
    let mut options = LayoutOptions::default();
    options.imposition.spacing = -2.0;
    options.imposition.margin = -1.5;

    let resolved = options.resolve().unwrap();
    assert_eq!(resolved.spacing_mm, -2.0);
    assert_eq!(resolved.margin_mm, -1.5);
}

#[test]
fn test_bleed_size_is_bounded() {
    let mut options = LayoutOptions::default();
    options.bleed.bleed_size = MAX_BLEED_SIZE;
    assert!(options.validate().is_ok());

    options.bleed.bleed_size = u32::MAX / 2 + 1;
    match options.resolve() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("Bleed size")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_layout_request_carries_settings() {
    let resolved = LayoutOptions::default().resolve().unwrap();
    let request = resolved.layout_request(PhysicalSize::new(50.0, 80.0));

    assert_eq!(request.image, PhysicalSize::new(50.0, 80.0));
    assert_eq!(request.page, resolved.page);
    assert_eq!(request.copy_count, 4);
    assert_eq!(request.margin_mm, 1.0);
    assert_eq!(request.imposition_mark_length_mm, 5.0);
    assert!(request.cut_marks_enabled);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);

    let mut options = LayoutOptions::default();
    options.bleed.bleed_mode = "mirror".to_string();
    options.imposition.num_copies = 9;
    options.imposition.spacing = 2.5;

    options.save(&path).await.unwrap();
    let loaded = LayoutOptions::load(&path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    tokio::fs::write(&path, r#"{ "imposition": { "num_copies": 6 } }"#)
        .await
        .unwrap();

    let loaded = LayoutOptions::load(&path).await.unwrap();

    assert_eq!(loaded.imposition.num_copies, 6);
    assert_eq!(loaded.imposition.paper_size, "letter");
    assert_eq!(loaded.bleed, BleedOptions::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    match LayoutOptions::load(&path).await {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("parse")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
