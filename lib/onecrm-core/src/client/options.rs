use serde::Serialize;
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;

use super::{ApiClientError, QueryValues, RequestBody};

/// Options of a single request: body, query, headers, content type and
/// cancellation token.
///
/// Options are applied in call order. Later calls override earlier ones for
/// singular fields (content type, body, a query key set with
/// [`with_query_value`](Self::with_query_value)) and accumulate for additive
/// ones (headers, [`append_query_value`](Self::append_query_value)).
///
/// A `RequestOptions` value is consumed by the request that uses it, so
/// per-call state is never shared between concurrent requests.
///
/// # Example
///
/// ```rust
/// use onecrm_core::RequestOptions;
/// # use serde::Serialize;
/// # #[derive(Serialize)]
/// # struct Contact { first_name: String }
///
/// # fn example() -> Result<(), onecrm_core::ApiClientError> {
/// let contact = Contact { first_name: "Ada".to_string() };
/// let options = RequestOptions::new()
///     .with_query_value("fields", "first_name")
///     .with_header("X-Request-Id", "42")
///     .json(&contact)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RequestOptions {
    pub(super) content_type: String,
    pub(super) body: Option<RequestBody>,
    pub(super) query: Option<QueryValues>,
    pub(super) headers: Vec<(String, String)>,
    pub(super) cancellation: Option<CancellationToken>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            content_type: mime::APPLICATION_JSON.to_string(),
            body: None,
            query: None,
            headers: Vec::new(),
            cancellation: None,
        }
    }
}

impl RequestOptions {
    /// Creates the default options: `application/json` content type, no body,
    /// no query, no extra header, the client's cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Content-Type` header of the request.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the request body, dropping any previously set body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.replace_body(body.into());
        self
    }

    /// Sets a streamed request body read from `reader`.
    #[must_use]
    pub fn with_reader<R>(self, reader: R) -> Self
    where
        R: AsyncRead + Send + Sync + Unpin + 'static,
    {
        self.with_body(RequestBody::reader(reader))
    }

    /// Serializes `value` as JSON and uses it as the request body.
    ///
    /// The content type is left untouched, it defaults to `application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::JsonValueError`] if the value cannot be
    /// serialized; the options are dropped and no request can be sent.
    pub fn json<T>(mut self, value: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(value)?;
        self.replace_body(RequestBody::from(data));
        Ok(self)
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryValues) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets a query parameter, replacing the existing values of `key`.
    #[must_use]
    pub fn with_query_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(QueryValues::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a value to a query parameter, keeping the existing values of `key`.
    #[must_use]
    pub fn append_query_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(QueryValues::new)
            .push(key.into(), value.into());
        self
    }

    /// Adds a header. Headers accumulate: setting the same name twice sends both values.
    ///
    /// Header names and values are validated when the request is built.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a header, dropping every value previously added under the same
    /// name (compared case-insensitively).
    #[must_use]
    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Overrides the client's cancellation token for this request only.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    /// Returns the content type that will be sent.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the query parameters, if any were set.
    pub fn query(&self) -> Option<&QueryValues> {
        self.query.as_ref()
    }

    /// Returns the headers added so far, in order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns `true` if a body has been set.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    fn replace_body(&mut self, body: RequestBody) {
        // the previous body, if any, is dropped here
        self.body = Some(body);
    }
}
