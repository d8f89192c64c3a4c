use super::{check_section, ContentStore};
use crate::models::PhotoRecord;
use crate::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps one `<section>.json` file per content section. The directory is
/// created on the first save.
pub struct FileContentStore {
    dir: PathBuf,
}

impl FileContentStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn record_path(&self, section: &str) -> PathBuf {
        self.dir.join(format!("{}.json", section))
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn save_photo(&self, section: &str, record: &PhotoRecord) -> Result<()> {
        check_section(section)?;

        let path = self.record_path(section);
        let json = serde_json::to_vec_pretty(record)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, json).await?;
        tracing::debug!("Wrote {} photo record to {}", section, path.display());
        Ok(())
    }

    async fn load_photo(&self, section: &str) -> Result<Option<PhotoRecord>> {
        check_section(section)?;

        match tokio::fs::read(self.record_path(section)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
