use std::future::Future;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ApiClientError;

/// A successful (`2xx`) response from the API.
///
/// The body is a single-use stream: every reader ([`text`](Self::text),
/// [`json`](Self::json), [`bytes`](Self::bytes), [`into_inner`](Self::into_inner))
/// takes the response by value, so it can only be read once. Reading fully
/// consumes and releases the underlying connection body; dropping an unread
/// response releases it as well.
///
/// Reads honor the cancellation token of the request that produced the
/// response.
///
/// Reading the body twice does not compile:
///
/// ```rust,compile_fail
/// use onecrm_core::{ApiClient, ApiClientError, RequestOptions};
///
/// # async fn example(client: ApiClient) -> Result<(), ApiClientError> {
/// let response = client.get("me", RequestOptions::new()).await?;
/// let first = response.text().await?;
/// let second = response.text().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
    cancellation: CancellationToken,
}

impl Response {
    pub(super) fn new(inner: reqwest::Response, cancellation: CancellationToken) -> Self {
        Self {
            inner,
            cancellation,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Reads the whole body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the body fails or the request is cancelled.
    pub async fn text(self) -> Result<String, ApiClientError> {
        let Self {
            inner,
            cancellation,
        } = self;
        let text = until_cancelled(&cancellation, inner.text()).await??;
        Ok(text)
    }

    /// Reads the whole body as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the body fails or the request is cancelled.
    pub async fn bytes(self) -> Result<Bytes, ApiClientError> {
        let Self {
            inner,
            cancellation,
        } = self;
        let bytes = until_cancelled(&cancellation, inner.bytes()).await??;
        Ok(bytes)
    }

    /// Reads the whole body and decodes it as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::JsonError`] with the failing JSON path and the
    /// raw body if the body does not match `T`.
    pub async fn json<T>(self) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let text = self.text().await?;
        parse_json(&text)
    }

    /// Gives up the wrapper and returns the underlying response, to stream the
    /// body (for instance with [`reqwest::Response::bytes_stream`]).
    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }
}

pub(super) async fn until_cancelled<F>(
    cancellation: &CancellationToken,
    future: F,
) -> Result<F::Output, ApiClientError>
where
    F: Future,
{
    tokio::select! {
        biased;
        () = cancellation.cancelled() => {
            debug!("request cancelled");
            Err(ApiClientError::Cancelled)
        }
        output = future => Ok(output),
    }
}

fn parse_json<T>(text: &str) -> Result<T, ApiClientError>
where
    T: DeserializeOwned,
{
    let deserializer = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(deserializer).map_err(|err| ApiClientError::JsonError {
        path: err.path().to_string(),
        error: err.into_inner(),
        body: text.to_string(),
    })
}
