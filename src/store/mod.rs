//! Content storage for section photos
//!
//! Persists the processed photo of a content section as a JSON record.
//! The hosted content table sits behind the same trait in production.

pub mod file;
pub mod mock;

pub use file::FileContentStore;
pub use mock::MockContentStore;

use crate::models::{PhotoRecord, PHOTO_SECTIONS};
use crate::{Error, Result};
use async_trait::async_trait;

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn save_photo(&self, section: &str, record: &PhotoRecord) -> Result<()>;
    async fn load_photo(&self, section: &str) -> Result<Option<PhotoRecord>>;
}

/// Reject section keys that have no photo slot.
pub fn check_section(section: &str) -> Result<()> {
    if PHOTO_SECTIONS.contains(&section) {
        Ok(())
    } else {
        Err(Error::UnknownSection(section.to_string()))
    }
}
