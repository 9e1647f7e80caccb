use onecrm_core::{ApiClient, ApiClientError, RequestBody, RequestOptions, Response};
use serde::Deserialize;
use tracing::debug;

const FILENAME_HEADER: &str = "X-OneCRM-Filename";

/// Metadata of a Document, a DocumentRevision or a Note attachment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileMetadata {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, for instance `application/pdf`.
    pub mime_type: String,
    /// Last modification, as a UNIX timestamp.
    pub modified: i64,
}

#[derive(Debug, Deserialize)]
struct UploadResult {
    id: String,
}

/// File operations, obtained with [`EndpointsClient::files`](crate::EndpointsClient::files).
#[derive(Debug, Clone, Copy)]
pub struct Files<'a> {
    client: &'a ApiClient,
}

impl<'a> Files<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Downloads the file attached to the `model` record `id`.
    ///
    /// The body is left unread: consume it with [`Response::bytes`] or stream
    /// it through [`Response::into_inner`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not `2xx`.
    pub async fn download(
        &self,
        model: &str,
        id: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        self.client
            .get(&format!("files/download/{model}/{id}"), options)
            .await
    }

    /// Fetches the metadata of the file attached to the `model` record `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a [`FileMetadata`].
    pub async fn metadata(
        &self,
        model: &str,
        id: &str,
        options: RequestOptions,
    ) -> Result<FileMetadata, ApiClientError> {
        self.client
            .get(&format!("files/info/{model}/{id}"), options)
            .await?
            .json()
            .await
    }

    /// Uploads `content` as a file named `name` and returns the ID of the
    /// stored file.
    ///
    /// The file name header and the body override those set in `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no `id`.
    pub async fn upload(
        &self,
        name: &str,
        content: impl Into<RequestBody>,
        options: RequestOptions,
    ) -> Result<String, ApiClientError> {
        debug!(name, "uploading file");
        let options = options
            .set_header(FILENAME_HEADER, name)
            .with_body(content);
        let result = self
            .client
            .post("files/upload", options)
            .await?
            .json::<UploadResult>()
            .await?;
        Ok(result.id)
    }
}
