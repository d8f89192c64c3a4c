//! Data models and structures
//!
//! Defines the upload input, the resize presets, the processed variant set
//! and the content-record shape the site stores for a section photo.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Content sections that carry a photo.
pub const PHOTO_SECTIONS: &[&str] = &["hero_intro", "bio", "policy"];

/// An uploaded file, as handed over by the admin form.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub mime_type: String,
    pub data: Arc<[u8]>,
}

impl SourceImage {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn byte_len(&self) -> u64 {
        self.data.len() as u64
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Hero,
    Family,
}

impl Profile {
    /// The hero banner gets the narrow preset; every other photo slot is
    /// rendered wider.
    pub fn for_section(section: &str) -> Self {
        if section == "hero_intro" {
            Profile::Hero
        } else {
            Profile::Family
        }
    }

    pub fn config(self) -> ProfileConfig {
        match self {
            Profile::Hero => ProfileConfig {
                large: SizeConfig::new(800, 0.85),
                medium: SizeConfig::new(400, 0.80),
                small: SizeConfig::new(150, 0.75),
            },
            Profile::Family => ProfileConfig {
                large: SizeConfig::new(1200, 0.85),
                medium: SizeConfig::new(600, 0.80),
                small: SizeConfig::new(150, 0.75),
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Hero => "hero",
            Profile::Family => "family",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hero" => Ok(Profile::Hero),
            "family" => Ok(Profile::Family),
            other => Err(format!(
                "Invalid profile '{}'. Expected 'hero' or 'family'",
                other
            )),
        }
    }
}

/// Target for a single rendition.
///
/// `quality` is on the 0.0-1.0 scale and only affects JPEG output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConfig {
    pub width: u32,
    pub height: Option<u32>,
    pub quality: f32,
}

impl SizeConfig {
    pub fn new(width: u32, quality: f32) -> Self {
        Self {
            width,
            height: None,
            quality,
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Quality mapped onto the 1-100 scale the JPEG encoder takes.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileConfig {
    pub large: SizeConfig,
    pub medium: SizeConfig,
    pub small: SizeConfig,
}

impl ProfileConfig {
    pub fn get(&self, name: VariantName) -> SizeConfig {
        match name {
            VariantName::Large => self.large,
            VariantName::Medium => self.medium,
            VariantName::Small => self.small,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VariantName {
    Large,
    Medium,
    Small,
}

impl VariantName {
    pub const ALL: [VariantName; 3] = [VariantName::Large, VariantName::Medium, VariantName::Small];

    pub fn as_str(self) -> &'static str {
        match self {
            VariantName::Large => "large",
            VariantName::Medium => "medium",
            VariantName::Small => "small",
        }
    }
}

/// One encoded rendition of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeVariant {
    pub width: u32,
    pub height: u32,
    pub mime_type: &'static str,
    pub quality: f32,
    pub data: Vec<u8>,
}

impl SizeVariant {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    pub fn dimensions(&self) -> VariantSize {
        VariantSize {
            width: self.width,
            height: self.height,
            size: self.size(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantSize {
    pub width: u32,
    pub height: u32,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedSizes {
    pub large: VariantSize,
    pub medium: VariantSize,
    pub small: VariantSize,
}

impl ProcessedSizes {
    pub fn get(&self, name: VariantName) -> VariantSize {
        match name {
            VariantName::Large => self.large,
            VariantName::Medium => self.medium,
            VariantName::Small => self.small,
        }
    }

    pub fn total(&self) -> u64 {
        self.large.size + self.medium.size + self.small.size
    }
}

/// Metadata stored next to a section photo. The default value stands for a
/// slot that never had an upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub original_name: String,
    pub original_size: u64,
    pub processed_sizes: ProcessedSizes,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImageSet {
    pub large: SizeVariant,
    pub medium: SizeVariant,
    pub small: SizeVariant,
    pub metadata: ImageMetadata,
}

impl ProcessedImageSet {
    pub fn variant(&self, name: VariantName) -> &SizeVariant {
        match name {
            VariantName::Large => &self.large,
            VariantName::Medium => &self.medium,
            VariantName::Small => &self.small,
        }
    }

    pub fn to_record(&self, alt: Option<String>) -> PhotoRecord {
        PhotoRecord {
            photo_large: self.large.to_data_url(),
            photo_medium: self.medium.to_data_url(),
            photo_small: self.small.to_data_url(),
            photo_alt: alt,
            photo_metadata: self.metadata.clone(),
        }
    }
}

/// Photo fields of a content record, each variant embedded as a data URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoRecord {
    pub photo_large: String,
    pub photo_medium: String,
    pub photo_small: String,
    #[serde(default)]
    pub photo_alt: Option<String>,
    #[serde(default)]
    pub photo_metadata: ImageMetadata,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub content_dir: String,
    pub max_source_dimension: u32,
    pub dry_run: bool,
}

impl Config {
    pub const DEFAULT_MAX_SOURCE_DIMENSION: u32 = 12_000;

    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let max_source_dimension = match std::env::var("MAX_SOURCE_DIMENSION") {
            Ok(value) => value.parse().map_err(|_| {
                crate::Error::Config(format!("MAX_SOURCE_DIMENSION is not a number: {}", value))
            })?,
            Err(_) => Self::DEFAULT_MAX_SOURCE_DIMENSION,
        };

        Ok(Self {
            content_dir: std::env::var("CONTENT_DIR").unwrap_or_else(|_| "content".to_string()),
            max_source_dimension,
            dry_run: std::env::var("DRY_RUN")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}
