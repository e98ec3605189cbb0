// In-memory object store for tests

use super::{ObjectStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    bucket: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    content_types: Mutex<HashMap<String, String>>,
    credentials_missing: bool,
    fail_uploads: bool,
}

impl MemoryStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            ..Default::default()
        }
    }

    /// A store whose every transfer fails the way an unauthenticated client does.
    pub fn without_credentials(bucket: &str) -> Self {
        Self {
            credentials_missing: true,
            ..Self::new(bucket)
        }
    }

    pub fn failing_uploads(bucket: &str) -> Self {
        Self {
            fail_uploads: true,
            ..Self::new(bucket)
        }
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        self.objects.lock().unwrap().insert(key.to_string(), data.to_vec());
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.content_types.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<u64, StoreError> {
        if self.credentials_missing {
            return Err(StoreError::CredentialsMissing);
        }
        let data = self
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        tokio::fs::write(dest, &data).await?;
        Ok(data.len() as u64)
    }

    async fn upload(&self, src: &Path, key: &str, content_type: &str) -> Result<(), StoreError> {
        if self.credentials_missing {
            return Err(StoreError::CredentialsMissing);
        }
        if self.fail_uploads {
            return Err(StoreError::Status {
                status: 403,
                message: "Access Denied".to_string(),
            });
        }
        let data = tokio::fs::read(src).await?;
        self.insert(key, &data);
        self.content_types
            .lock()
            .unwrap()
            .insert(key.to_string(), content_type.to_string());
        Ok(())
    }
}
