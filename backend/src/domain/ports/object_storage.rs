//! Driven port for durable file storage with public URLs.

use async_trait::async_trait;

use crate::domain::ObjectName;

use super::define_port_error;

define_port_error! {
    /// Failures reported by storage adapters.
    pub enum ObjectStorageError {
        /// The collaborator refused the object (duplicate name, missing
        /// bucket, size limit).
        Rejected { message: String } => "{message}",
        /// The collaborator could not be reached.
        Transport { message: String } => "object storage unreachable: {message}",
    }
}

/// Port for storing uploaded files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `name`. Existing objects are never overwritten.
    async fn upload(
        &self,
        name: &ObjectName,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), ObjectStorageError>;

    /// Public URL at which a stored object can be fetched.
    fn public_url(&self, name: &ObjectName) -> String;
}

/// Storage used when no collaborator is configured. Uploads are discarded.
#[derive(Debug, Clone)]
pub struct FixtureObjectStorage {
    base_url: String,
}

impl FixtureObjectStorage {
    /// Build a fixture whose URLs are rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

impl Default for FixtureObjectStorage {
    fn default() -> Self {
        Self::new("http://localhost:54321/storage/v1/object/public/notes")
    }
}

#[async_trait]
impl ObjectStorage for FixtureObjectStorage {
    async fn upload(
        &self,
        _name: &ObjectName,
        _content_type: &str,
        _bytes: &[u8],
    ) -> Result<(), ObjectStorageError> {
        Ok(())
    }

    fn public_url(&self, name: &ObjectName) -> String {
        format!("{}/{name}", self.base_url)
    }
}
