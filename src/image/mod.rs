//! Image validation, decoding and multi-size resizing
//!
//! Turns an uploaded photo into the three web renditions (large, medium,
//! small) a content section displays.

pub mod decode;
pub mod mime;
pub mod mock;
pub mod processor;
pub mod resize;
pub mod validate;

pub use mock::MockImageProcessor;
pub use processor::ImageProcessor;
pub use validate::validate_image_file;

use crate::models::{ProcessedImageSet, Profile, SourceImage};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageService: Send + Sync {
    async fn process_image(&self, source: &SourceImage, profile: Profile)
        -> Result<ProcessedImageSet>;
}
