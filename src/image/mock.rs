use super::resize::{fit_dimensions, output_mime};
use super::ImageService;
use crate::models::{
    ImageMetadata, ProcessedImageSet, ProcessedSizes, Profile, SizeConfig, SizeVariant,
    SourceImage, VariantName,
};
use crate::{DecodeError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

/// Produces placeholder variants with the right dimensions without touching
/// any pixels.
#[derive(Clone)]
pub struct MockImageProcessor {
    process_count: Arc<Mutex<usize>>,
    source_dimensions: (u32, u32),
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageProcessor {
    pub fn new() -> Self {
        Self {
            process_count: Arc::new(Mutex::new(0)),
            source_dimensions: (1600, 1200),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_source_dimensions(mut self, width: u32, height: u32) -> Self {
        self.source_dimensions = (width, height);
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_process_count(&self) -> usize {
        *self.process_count.lock().unwrap()
    }

    fn fake_variant(&self, config: SizeConfig, source_mime: &str) -> SizeVariant {
        let (width, height) = fit_dimensions(self.source_dimensions, &config);
        let mime_type = output_mime(source_mime);
        SizeVariant {
            width,
            height,
            mime_type,
            quality: if mime_type == "image/png" { 1.0 } else { config.quality },
            data: vec![0u8; (width as usize * height as usize) / 10],
        }
    }
}

impl Default for MockImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageProcessor {
    async fn process_image(
        &self,
        source: &SourceImage,
        profile: Profile,
    ) -> Result<ProcessedImageSet> {
        if *self.should_fail.lock().unwrap() {
            return Err(DecodeError::Image(image::ImageError::IoError(std::io::Error::other(
                "Mock failure",
            )))
            .into());
        }

        let mut count = self.process_count.lock().unwrap();
        *count += 1;

        let config = profile.config();
        let [large, medium, small] =
            VariantName::ALL.map(|name| self.fake_variant(config.get(name), &source.mime_type));

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
