use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::Method;
use reqwest::Request;
use tracing::debug;
use url::Url;

use super::error::ApiError;
use super::response::until_cancelled;
use super::{ApiClient, ApiClientError, Authentication, QueryValues, RequestOptions, Response};

impl ApiClient {
    pub(super) async fn exchange(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        let RequestOptions {
            content_type,
            body,
            query,
            headers,
            cancellation,
        } = options;
        let cancellation = cancellation.unwrap_or_else(|| self.cancellation.clone());

        // Build URL and request
        let url = Self::build_url(&self.base_url, path, query.as_ref())?;
        let mut request = Self::build_request(
            method,
            url,
            &content_type,
            &headers,
            self.authentication.as_ref(),
        )?;
        if let Some(body) = body {
            *request.body_mut() = Some(body.into_reqwest());
        }

        // Execute HTTP request
        debug!(method = %request.method(), url = %request.url(), "sending...");
        let response = until_cancelled(&cancellation, self.client.execute(request)).await??;
        debug!(status = %response.status(), url = %response.url(), "...receiving");

        // Validate status code
        let status_code = response.status().as_u16();
        if !(200..300).contains(&status_code) {
            let body = until_cancelled(&cancellation, response.text()).await??;
            return Err(ApiError::new(status_code, body).into());
        }

        Ok(Response::new(response, cancellation))
    }

    pub(super) fn build_url(
        base_url: &str,
        path: &str,
        query: Option<&QueryValues>,
    ) -> Result<Url, ApiClientError> {
        let mut url = format!("{base_url}/{path}").parse::<Url>()?;

        if let Some(query) = query {
            let query_string = query.to_query_string()?;
            url.set_query(Some(&query_string));
        }

        Ok(url)
    }

    pub(super) fn build_request(
        method: Method,
        url: Url,
        content_type: &str,
        headers: &[(String, String)],
        authentication: Option<&Authentication>,
    ) -> Result<Request, ApiClientError> {
        let mut request = Request::new(method, url);
        let req_headers = request.headers_mut();

        // Add custom headers
        for (name, value) in headers {
            req_headers.append(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        req_headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);

        // Add authentication last, it must not be overridden by custom headers
        if let Some(auth) = authentication {
            auth.apply(&mut request)?;
        }

        Ok(request)
    }
}
