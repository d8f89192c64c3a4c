//! Application orchestration for processing and storing section photos.

use crate::image::{ImageProcessor, ImageService};
use crate::models::{Config, PhotoRecord, Profile, SourceImage};
use crate::report::{calculate_size_savings, responsive_sources, ResponsiveSources, SizeSavings};
use crate::store::{check_section, ContentStore, FileContentStore};
use crate::Result;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

/// Coordinates image processing and content storage for photo uploads.
pub struct App {
    image: Box<dyn ImageService>,
    store: Box<dyn ContentStore>,
    dry_run: bool,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub image: Box<dyn ImageService>,
    pub store: Box<dyn ContentStore>,
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub section: String,
    pub profile: Profile,
    pub record: PhotoRecord,
    pub savings: SizeSavings,
    pub sources: ResponsiveSources,
}

impl App {
    /// Build an app from concrete service dependencies. With `dry_run` the
    /// store is still read but never written.
    pub fn with_services(services: AppServices, dry_run: bool) -> Self {
        Self {
            image: services.image,
            store: services.store,
            dry_run,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let dir = Path::new(&config.content_dir);
        if config.dry_run {
            info!(
                "DRY_RUN enabled, reading content records from {} without writing",
                dir.display()
            );
        } else {
            info!("Storing content records in {}", dir.display());
        }

        Self::with_services(
            AppServices {
                image: Box::new(ImageProcessor::new(config.max_source_dimension)),
                store: Box::new(FileContentStore::new(dir)),
            },
            config.dry_run,
        )
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        Ok(Self::from_config(&Config::from_env()?))
    }

    /// Process an upload for `section` with the profile that section uses.
    pub async fn upload(
        &self,
        section: &str,
        source: &SourceImage,
        alt: Option<String>,
    ) -> Result<UploadReport> {
        self.upload_with_profile(section, source, Profile::for_section(section), alt)
            .await
    }

    pub async fn upload_with_profile(
        &self,
        section: &str,
        source: &SourceImage,
        profile: Profile,
        alt: Option<String>,
    ) -> Result<UploadReport> {
        check_section(section)?;

        info!(
            "[{}] Processing {} ({}, {} bytes) with {} profile",
            section,
            source.name,
            source.mime_type,
            source.byte_len(),
            profile
        );

        let processed = match self.image.process_image(source, profile).await {
            Ok(processed) => processed,
            Err(e) => {
                error!("[{}] Failed to process {}: {}", section, source.name, e);
                return Err(e);
            }
        };

        let record = processed.to_record(alt);
        let savings = calculate_size_savings(&record.photo_metadata);

        if self.dry_run {
            info!(
                "[{}] Would store photo: {} -> {} ({} saved)",
                section, savings.original, savings.processed, savings.savings_percent
            );
        } else {
            self.store.save_photo(section, &record).await?;
            info!(
                "[{}] Stored photo: {} -> {} ({} saved)",
                section, savings.original, savings.processed, savings.savings_percent
            );
        }

        Ok(UploadReport {
            section: section.to_string(),
            profile,
            sources: responsive_sources(&record),
            savings,
            record,
        })
    }

    /// The photo currently stored for `section`, if any.
    pub async fn current_photo(&self, section: &str) -> Result<Option<PhotoRecord>> {
        self.store.load_photo(section).await
    }
}
