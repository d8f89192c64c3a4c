use super::{check_section, ContentStore};
use crate::models::PhotoRecord;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockContentStore {
    records: Arc<Mutex<HashMap<String, PhotoRecord>>>,
    save_count: Arc<Mutex<usize>>,
    load_count: Arc<Mutex<usize>>,
}

impl MockContentStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            save_count: Arc::new(Mutex::new(0)),
            load_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_record(self, section: String, record: PhotoRecord) -> Self {
        self.records.lock().unwrap().insert(section, record);
        self
    }

    pub fn get_save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }

    pub fn get_load_count(&self) -> usize {
        *self.load_count.lock().unwrap()
    }

    pub fn get_records(&self) -> HashMap<String, PhotoRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MockContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn save_photo(&self, section: &str, record: &PhotoRecord) -> Result<()> {
        check_section(section)?;

        let mut count = self.save_count.lock().unwrap();
        *count += 1;

        self.records
            .lock()
            .unwrap()
            .insert(section.to_string(), record.clone());
        Ok(())
    }

    async fn load_photo(&self, section: &str) -> Result<Option<PhotoRecord>> {
        check_section(section)?;

        let mut count = self.load_count.lock().unwrap();
        *count += 1;

        Ok(self.records.lock().unwrap().get(section).cloned())
    }
}
