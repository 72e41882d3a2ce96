//! Supabase Storage adapter.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

use crate::domain::ObjectName;
use crate::domain::ports::{ObjectStorage, ObjectStorageError};

use super::{Failure, SupabaseClient, send};

/// Uploads files into one bucket and derives their public URLs.
///
/// The bucket must be public for the URLs to resolve.
#[derive(Debug, Clone)]
pub struct SupabaseObjectStorage {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseObjectStorage {
    /// Store objects in `bucket`, which must be public for the URLs to resolve.
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseObjectStorage {
    async fn upload(
        &self,
        name: &ObjectName,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), ObjectStorageError> {
        let request = self
            .client
            .request(
                Method::POST,
                &["storage", "v1", "object", self.bucket.as_str(), name.as_ref()],
            )
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes.to_vec());
        send(request).await.map_err(|failure| match failure {
            Failure::Rejected(message) => ObjectStorageError::rejected(message),
            Failure::Unavailable(message) => ObjectStorageError::transport(message),
        })?;
        Ok(())
    }

    fn public_url(&self, name: &ObjectName) -> String {
        self.client
            .endpoint(&["storage", "v1", "object", "public", self.bucket.as_str(), name.as_ref()])
            .to_string()
    }
}
