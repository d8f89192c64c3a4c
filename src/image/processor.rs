use super::decode::decode_image;
use super::resize::resize_variant;
use super::validate::validate_image_file;
use super::ImageService;
use crate::models::{
    ImageMetadata, ProcessedImageSet, ProcessedSizes, Profile, SizeConfig, SizeVariant,
    SourceImage,
};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use image::DynamicImage;
use std::sync::Arc;

pub struct ImageProcessor {
    max_dimension: u32,
}

impl ImageProcessor {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    async fn decode(&self, data: Arc<[u8]>) -> Result<DynamicImage> {
        let max_dimension = self.max_dimension;
        tokio::task::spawn_blocking(move || decode_image(&data, max_dimension))
            .await
            .map_err(|e| Error::Invariant(format!("Image decode task join error: {}", e)))?
    }

    async fn resize(
        image: Arc<DynamicImage>,
        config: SizeConfig,
        source_mime: String,
    ) -> Result<SizeVariant> {
        tokio::task::spawn_blocking(move || resize_variant(&image, config, &source_mime))
            .await
            .map_err(|e| Error::Invariant(format!("Image resize task join error: {}", e)))?
    }
}

#[async_trait]
impl ImageService for ImageProcessor {
    async fn process_image(
        &self,
        source: &SourceImage,
        profile: Profile,
    ) -> Result<ProcessedImageSet> {
        validate_image_file(&source.mime_type, source.byte_len())?;

        let config = profile.config();
        let image = Arc::new(self.decode(Arc::clone(&source.data)).await?);

        let (large, medium, small) = tokio::join!(
            Self::resize(Arc::clone(&image), config.large, source.mime_type.clone()),
            Self::resize(Arc::clone(&image), config.medium, source.mime_type.clone()),
            Self::resize(Arc::clone(&image), config.small, source.mime_type.clone())
        );
        let (large, medium, small) = (large?, medium?, small?);

        let metadata = ImageMetadata {
            original_name: source.name.clone(),
            original_size: source.byte_len(),
            processed_sizes: ProcessedSizes {
                large: large.dimensions(),
                medium: medium.dimensions(),
                small: small.dimensions(),
            },
            processed_at: Utc::now(),
        };

        Ok(ProcessedImageSet {
            large,
            medium,
            small,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Config, VariantName};
    use crate::ValidationError;
    use image::{ImageFormat, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();
        bytes
    }

    fn create_test_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 100]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn processor() -> ImageProcessor {
        ImageProcessor::new(Config::DEFAULT_MAX_SOURCE_DIMENSION)
    }

    #[tokio::test]
    async fn test_family_profile_end_to_end() {
        let source = SourceImage::new("family.jpg", "image/jpeg", create_test_jpeg(1600, 1200));
        let started = Utc::now();

        let set = processor()
            .process_image(&source, Profile::Family)
            .await
            .unwrap();

        assert_eq!((set.large.width, set.large.height), (1200, 900));
        assert_eq!((set.medium.width, set.medium.height), (600, 450));
        assert_eq!(set.small.width, 150);
        assert!(set.small.height == 112 || set.small.height == 113);

        assert_eq!(set.metadata.original_name, "family.jpg");
        assert_eq!(set.metadata.original_size, source.byte_len());
        assert!(set.metadata.processed_at >= started);
        for name in VariantName::ALL {
            let variant = set.variant(name);
            assert_eq!(variant.mime_type, "image/jpeg");
            assert_eq!(set.metadata.processed_sizes.get(name), variant.dimensions());
        }
    }

    #[tokio::test]
    async fn test_hero_profile_widths() {
        let source = SourceImage::new("hero.png", "image/png", create_test_png(1000, 500));

        let set = processor()
            .process_image(&source, Profile::Hero)
            .await
            .unwrap();

        assert_eq!((set.large.width, set.large.height), (800, 400));
        assert_eq!((set.medium.width, set.medium.height), (400, 200));
        assert_eq!((set.small.width, set.small.height), (150, 75));
        assert_eq!(set.large.mime_type, "image/png");
        assert_eq!(set.small.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_validation_runs_before_decode() {
        // Garbage bytes would fail decoding; the declared type fails first.
        let source = SourceImage::new("notes.txt", "text/plain", b"hello".to_vec());

        let err = processor()
            .process_image(&source, Profile::Hero)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::NotAnImage)
        ));
    }

    #[tokio::test]
    async fn test_corrupt_bytes_are_decode_error() {
        let mut data = create_test_png(64, 64);
        data.truncate(data.len() / 3);
        let source = SourceImage::new("broken.png", "image/png", data);

        let err = processor()
            .process_image(&source, Profile::Family)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_dimension_cap_rejects_source() {
        let source = SourceImage::new("wide.jpg", "image/jpeg", create_test_jpeg(300, 10));

        let err = ImageProcessor::new(200)
            .process_image(&source, Profile::Hero)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DimensionLimit { max: 200, .. }));
    }
}
