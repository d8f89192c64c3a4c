use campaign_media::{
    app::{App, AppServices},
    image::{mime::detect_image_mime, ImageProcessor, ImageService, MockImageProcessor},
    models::{Config, PhotoRecord, Profile, SourceImage, VariantName},
    report::{calculate_size_savings, format_file_size, responsive_sources},
    store::{ContentStore, FileContentStore, MockContentStore},
    Error, ValidationError,
};
use image::{ImageFormat, RgbImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 251) as u8, (y % 241) as u8, ((x + y) % 239) as u8])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes
}

fn encoded_rgba(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 120, 255])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 90, 180, 0]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn test_family_upload_end_to_end() {
    let data = jpeg_bytes(1600, 1200);
    let source = SourceImage::new("family.jpg", detect_image_mime(&data), data);
    let processor = ImageProcessor::new(Config::DEFAULT_MAX_SOURCE_DIMENSION);
    let before = chrono::Utc::now();

    let set = processor
        .process_image(&source, Profile::Family)
        .await
        .unwrap();

    let widths: Vec<u32> = VariantName::ALL
        .iter()
        .map(|name| set.variant(*name).width)
        .collect();
    assert_eq!(widths, vec![1200, 600, 150]);
    assert_eq!(set.large.height, 900);
    assert_eq!(set.medium.height, 450);
    assert!(set.small.height == 112 || set.small.height == 113);
    assert!(set.metadata.processed_at >= before);

    // Every variant decodes back to its recorded size.
    for name in VariantName::ALL {
        let variant = set.variant(name);
        let decoded = image::load_from_memory(&variant.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (variant.width, variant.height));
    }
}

#[tokio::test]
async fn test_png_upload_keeps_png_variants() {
    let source = SourceImage::new("logo.png", "image/png", png_bytes(600, 300));
    let processor = ImageProcessor::new(Config::DEFAULT_MAX_SOURCE_DIMENSION);

    let set = processor.process_image(&source, Profile::Hero).await.unwrap();

    for name in VariantName::ALL {
        assert_eq!(set.variant(name).mime_type, "image/png");
    }
    let record = set.to_record(None);
    assert!(record.photo_medium.starts_with("data:image/png;base64,"));
}

async fn assert_converted_to_jpeg(data: Vec<u8>, expected_mime: &str) {
    let mime = detect_image_mime(&data);
    assert_eq!(mime, expected_mime);
    let source = SourceImage::new("upload", mime, data);
    let processor = ImageProcessor::new(Config::DEFAULT_MAX_SOURCE_DIMENSION);

    let set = processor
        .process_image(&source, Profile::Family)
        .await
        .unwrap();

    for name in VariantName::ALL {
        let variant = set.variant(name);
        assert_eq!(variant.mime_type, "image/jpeg");
        assert_eq!(
            image::guess_format(&variant.data).unwrap(),
            ImageFormat::Jpeg
        );
        let decoded = image::load_from_memory(&variant.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (variant.width, variant.height));
    }
    assert_eq!((set.large.width, set.large.height), (1200, 800));
    assert!(set
        .to_record(None)
        .photo_small
        .starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn test_gif_upload_becomes_jpeg() {
    assert_converted_to_jpeg(encoded_rgba(240, 160, ImageFormat::Gif), "image/gif").await;
}

#[tokio::test]
async fn test_webp_upload_becomes_jpeg() {
    assert_converted_to_jpeg(encoded_rgba(240, 160, ImageFormat::WebP), "image/webp").await;
}

#[tokio::test]
async fn test_truncated_upload_yields_decode_error() {
    let mut data = jpeg_bytes(50, 50);
    data.truncate(20);
    let source = SourceImage::new("broken.jpg", "image/jpeg", data);
    let processor = ImageProcessor::new(Config::DEFAULT_MAX_SOURCE_DIMENSION);

    let result = processor.process_image(&source, Profile::Family).await;

    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let source = SourceImage::new("huge.jpg", "image/jpeg", vec![0u8; 10 * 1024 * 1024 + 1]);
    let processor = ImageProcessor::new(Config::DEFAULT_MAX_SOURCE_DIMENSION);

    let err = processor
        .process_image(&source, Profile::Hero)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(ValidationError::TooLarge)));
    assert_eq!(
        err.to_string(),
        "Validation error: File size must be less than 10MB"
    );
}

#[tokio::test]
async fn test_app_stores_record_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::with_services(
        AppServices {
            image: Box::new(ImageProcessor::new(Config::DEFAULT_MAX_SOURCE_DIMENSION)),
            store: Box::new(FileContentStore::new(dir.path())),
        },
        false,
    );
    let source = SourceImage::new("stage.jpg", "image/jpeg", jpeg_bytes(900, 600));
    let alt = Some("Campaign stage at dusk".to_string());

    let report = app.upload("hero_intro", &source, alt.clone()).await.unwrap();

    let json = std::fs::read_to_string(dir.path().join("hero_intro.json")).unwrap();
    let stored: PhotoRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(stored, report.record);
    assert_eq!(stored.photo_metadata.original_name, "stage.jpg");
    assert_eq!(stored.photo_metadata.processed_sizes.large.width, 800);
    assert!(json.contains("\"processedAt\""));
    assert_eq!(stored.photo_alt, alt);

    let reopened = FileContentStore::new(dir.path());
    assert_eq!(reopened.load_photo("hero_intro").await.unwrap(), Some(stored));
}

#[tokio::test]
async fn test_savings_and_sources_from_mock_pipeline() {
    let store = MockContentStore::new();
    let app = App::with_services(
        AppServices {
            image: Box::new(MockImageProcessor::new().with_source_dimensions(3000, 2000)),
            store: Box::new(store.clone()),
        },
        false,
    );
    let source = SourceImage::new("crowd.jpg", "image/jpeg", vec![1u8; 2 * 1024 * 1024]);

    let report = app.upload("policy", &source, None).await.unwrap();

    let metadata = &report.record.photo_metadata;
    assert_eq!(calculate_size_savings(metadata), report.savings);
    assert_eq!(report.savings.original, format_file_size(2 * 1024 * 1024));
    assert_eq!(report.sources, responsive_sources(&report.record));
    assert_eq!(store.get_save_count(), 1);
}
