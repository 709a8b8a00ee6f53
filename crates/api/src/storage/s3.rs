//! S3 storage backend via the AWS SDK.
//!
//! Credentials and region come from the standard AWS environment (env vars,
//! shared profile, or instance role). Returned URLs default to the bucket's
//! virtual-hosted form unless an explicit public base (e.g. a CloudFront
//! distribution) is configured.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use super::{validate_object_name, ObjectStore, StorageError, StoredObject};

pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    key_prefix: String,
    public_base: Option<String>,
}

impl S3Store {
    /// Build an S3 store from the ambient AWS configuration.
    pub async fn from_env(bucket: String, key_prefix: String, public_base: Option<String>) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_s3::Client::new(&sdk_config);
        Self {
            client,
            bucket,
            key_prefix,
            public_base,
        }
    }

    fn key_for(&self, name: &str) -> String {
        format!("{}{name}", self.key_prefix)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(
        &self,
        name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_object_name(name)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(self.key_for(name))
            .body(ByteStream::from(bytes.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(self.url_for(name))
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StorageError> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&self.key_prefix)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        let mut objects = Vec::new();
        for object in resp.contents() {
            let Some(key) = object.key() else { continue };
            let Some(name) = key.strip_prefix(self.key_prefix.as_str()) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            objects.push(StoredObject {
                name: name.to_string(),
                url: self.url_for(name),
                size_bytes: object.size().unwrap_or(0),
            });
        }
        Ok(objects)
    }

    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        validate_object_name(name)?;
        let key = self.key_for(name);

        // DeleteObject succeeds even for missing keys; probe first so the
        // handler can 404.
        if let Err(err) = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            let service_err = err.into_service_error();
            if service_err.is_not_found() {
                return Ok(false);
            }
            return Err(StorageError::S3(service_err.to_string()));
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(true)
    }

    fn url_for(&self, name: &str) -> String {
        let key = self.key_for(name);
        match &self.public_base {
            Some(base) => format!("{}/{key}", base.trim_end_matches('/')),
            None => format!("https://{}.s3.amazonaws.com/{key}", self.bucket),
        }
    }
}
