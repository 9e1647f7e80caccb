use super::auth::AuthenticationError;

/// Errors that can occur when using the [`ApiClient`](super::ApiClient).
///
/// The variants fall into four families:
/// - **transport**: the exchange never produced a response (network, URL, cancellation)
/// - **API**: the server answered with a status outside `200..300`
/// - **encoding**: a request body or query could not be encoded, or a response body could not be decoded
/// - **authentication**: the configured [`Authentication`](super::Authentication) could not decorate the request
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when network requests fail, timeouts occur, or connection issues arise.
    ReqwestError(reqwest::Error),

    /// URL parsing error when constructing request URLs.
    UrlError(url::ParseError),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error of a request body.
    JsonValueError(serde_json::Error),

    /// Query parameter serialization error.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// The request was cancelled through its cancellation token.
    #[display("Request cancelled")]
    Cancelled,

    /// The configured authentication could not be applied to the request.
    Authentication(AuthenticationError),

    /// The API answered with a status code outside `200..300`.
    Api(ApiError),

    /// JSON response deserialization failure.
    ///
    /// Occurs when the response body cannot be parsed as the expected JSON structure.
    #[display("Failed to deserialize JSON at '{path}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// The JSON path where the error occurred.
        path: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },
}

impl ApiClientError {
    /// Returns the HTTP status code when the error comes from the API itself.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.code()),
            _ => None,
        }
    }

    /// Returns `true` if the request was aborted by its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// An error returned by the API: a well-formed HTTP exchange whose status
/// code is outside `200..300`.
///
/// The `Display` output is the raw response body.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("{body}")]
pub struct ApiError {
    status_code: u16,
    body: String,
}

impl ApiError {
    pub(crate) fn new(status_code: u16, body: String) -> Self {
        Self { status_code, body }
    }

    /// The HTTP status code of the response.
    pub fn code(&self) -> u16 {
        self.status_code
    }

    /// The raw response body text.
    pub fn message(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ApiClientError>();
        assert_sync::<ApiClientError>();
    }

    #[test]
    fn should_display_api_error_as_raw_body() {
        let error = ApiClientError::from(ApiError::new(404, r#"{"error":"not found"}"#.into()));

        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.to_string(), r#"{"error":"not found"}"#);
    }

    #[test]
    fn should_not_have_status_code_for_cancellation() {
        let error = ApiClientError::Cancelled;

        assert!(error.is_cancelled());
        assert_eq!(error.status_code(), None);
        assert_eq!(error.to_string(), "Request cancelled");
    }
}
