use image::{Rgb, RgbImage};
use pdf_bleed::*;
use std::path::Path;

/// Write an RGB PNG, optionally tagged with a pHYs resolution in pixels/meter
fn write_png(path: &Path, image: &RgbImage, pixels_per_meter: Option<u32>) {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(ppm) = pixels_per_meter {
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(image.as_raw()).unwrap();
        writer.finish().unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8])
    })
}

#[tokio::test]
async fn test_load_png_with_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("art.png");
    // 3937 px/m is 100 ppi
    write_png(&path, &gradient(100, 50), Some(3937));

    let source = load_image(&path).await.unwrap();

    assert_eq!(source.raster.dimensions(), (100, 50));
    let resolution = source.resolution.unwrap();
    assert!((resolution.x_ppi - 100.0).abs() < 0.01);

    let size = source.physical_size();
    assert!((size.width_mm - 25.4).abs() < 0.01);
    assert!((size.height_mm - 12.7).abs() < 0.01);
}

#[tokio::test]
async fn test_load_png_without_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("art.png");
    write_png(&path, &gradient(72, 36), None);

    let source = load_image(&path).await.unwrap();

    assert_eq!(source.resolution, None);
    assert!((source.physical_size().width_mm - 25.4).abs() < 1e-4);
}

#[tokio::test]
async fn test_load_missing_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");

    match load_image(&path).await {
        Err(LayoutError::ImageDecode { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected ImageDecode, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_unrecognized_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.png");
    tokio::fs::write(&path, b"this is not an image").await.unwrap();

    assert!(matches!(
        load_image(&path).await,
        Err(LayoutError::ImageDecode { .. })
    ));
}

#[test]
fn test_zero_bleed_leaves_artwork_untouched() {
    let source = gradient(40, 30);
    let bleed = BleedSpec::new(0, BleedMode::Repeat);

    let artwork = prepare_artwork(source.clone(), &bleed, &MarkStyle::default()).unwrap();

    assert_eq!(artwork, source);
}

#[test]
fn test_bleed_adds_border_and_marks() {
    let source = RgbImage::from_pixel(100, 80, Rgb([255, 255, 255]));
    let bleed = BleedSpec::new(10, BleedMode::Repeat);

    let artwork = prepare_artwork(source, &bleed, &MarkStyle::default()).unwrap();

    assert_eq!(artwork.dimensions(), (120, 100));
    // Inverted marks on white come out black at the trim corner
    assert_eq!(artwork.get_pixel(10, 10), &Rgb([0, 0, 0]));
    // Far corner of the bleed is untouched by any mark
    assert_eq!(artwork.get_pixel(0, 99), &Rgb([255, 255, 255]));
}

#[test]
fn test_mirror_bleed_too_large() {
    let source = gradient(20, 12);
    let bleed = BleedSpec::new(12, BleedMode::Mirror);

    match prepare_artwork(source, &bleed, &MarkStyle::default()) {
        Err(LayoutError::ImageTooSmall {
            bleed_size,
            width,
            height,
        }) => assert_eq!((bleed_size, width, height), (12, 20, 12)),
        other => panic!("Expected ImageTooSmall, got {:?}", other),
    }
}

#[test]
fn test_layout_request_includes_bleed() {
    let source = SourceImage::new(gradient(80, 40), Some(Resolution::uniform(100.0)));
    let resolved = LayoutOptions::default().resolve().unwrap();

    let request = layout_request_for(&source, &resolved).unwrap();

    // 80 + 2 * 30 px at 100 ppi
    assert!((request.image.width_mm - 140.0 / 100.0 * 25.4).abs() < 1e-3);
    assert!((request.image.height_mm - 100.0 / 100.0 * 25.4).abs() < 1e-3);
}

#[test]
fn test_layout_request_rejects_overflowing_bleed() {
    let source = SourceImage::new(gradient(1, 1), None);
    let mut resolved = LayoutOptions::default().resolve().unwrap();
    resolved.bleed = BleedSpec::new(u32::MAX / 2 + 1, BleedMode::Repeat);

    assert!(matches!(
        layout_request_for(&source, &resolved),
        Err(LayoutError::Config(_))
    ));
    assert!(matches!(
        prepare_artwork(gradient(1, 1), &resolved.bleed, &resolved.marks),
        Err(LayoutError::Config(_))
    ));
}

#[tokio::test]
async fn test_invalid_paper_fails_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.pdf");

    let mut options = LayoutOptions::default();
    options.imposition.paper_size = "banana".to_string();

    // The input does not exist; paper resolution must fail first
    let result = create_imposition(dir.path().join("nope.png"), &output, &options).await;

    assert!(matches!(result, Err(LayoutError::InvalidPaperSize(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_failed_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("small.png");
    let output = dir.path().join("out.pdf");
    write_png(&input, &gradient(20, 20), None);

    let mut options = LayoutOptions::default();
    options.bleed.bleed_mode = "mirror".to_string();

    let result = create_imposition(&input, &output, &options).await;

    assert!(matches!(result, Err(LayoutError::ImageTooSmall { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_create_imposition_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flyer.png");
    let output = dir.path().join("flyer.pdf");
    write_png(&input, &gradient(100, 100), Some(3937));

    let summary = create_imposition(&input, &output, &LayoutOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.plan.positions.len(), 4);
    assert_eq!((summary.plan.columns, summary.plan.rows), (2, 2));
    assert_eq!(summary.statistics().copies, 4);

    let mut doc = lopdf::Document::load(&output).unwrap();
    doc.decompress();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);

    let content = doc.get_page_content(*pages.values().next().unwrap()).unwrap();
    let content = String::from_utf8_lossy(&content);
    assert_eq!(content.matches(" Do Q").count(), 4);
    assert_eq!(content.matches(" l S").count(), 32);
}

#[tokio::test]
async fn test_create_imposition_without_bleed_or_marks() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("card.png");
    let output = dir.path().join("card.pdf");
    write_png(&input, &gradient(60, 90), None);

    let mut options = LayoutOptions::default();
    options.bleed.bleed_size = 0;
    options.imposition.cut_marks = false;
    options.imposition.num_copies = 2;

    let summary = create_imposition(&input, &output, &options).await.unwrap();

    // No bleed: the request is the plain 60x90 px raster at 72 ppi
    assert!((summary.request.image.width_mm - 60.0 / 72.0 * 25.4).abs() < 1e-3);
    assert_eq!(summary.plan.positions.len(), 2);

    let mut doc = lopdf::Document::load(&output).unwrap();
    doc.decompress();
    let page_id = *doc.get_pages().values().next().unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    assert_eq!(String::from_utf8_lossy(&content).matches(" l S").count(), 0);
}
