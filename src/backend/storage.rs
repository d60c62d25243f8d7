//! Object storage: upload-by-path with overwrite, and public-URL resolution.

use tracing::{info, instrument};

use super::{Backend, BackendError, error_for_response};

impl Backend {
    /// Uploads `bytes` to `bucket/path`. With `upsert` an existing object at
    /// the same path is overwritten instead of rejected.
    #[instrument(skip(self, token, bytes), fields(size = bytes.len()))]
    pub async fn upload_object(
        &self,
        token: &str,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
        upsert: bool,
    ) -> Result<(), BackendError> {
        info!(bucket, path, "Uploading object");
        let request = self
            .http
            .post(self.storage_url(&format!("object/{bucket}/{path}")))
            .header("Content-Type", content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);

        let response = self.authorize(request, token).send().await?;
        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        Ok(())
    }

    /// Public URL for an object in a public bucket. Purely syntactic; the
    /// object does not have to exist yet.
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        self.storage_url(&format!("object/public/{bucket}/{path}"))
    }
}
