// src/core/service_client.rs
//! HTTP transport shared by every resource client.
//!
//! One `reqwest::Client` with a cookie jar: the session cookie configured at
//! startup, and any cookie the backend sets later, rides along on every call.
//! Resource operations live in `crate::api` as further `impl ServiceClient`
//! blocks and only go through the helpers below.

use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::client_config::ClientConfig;
use crate::core::fs_ops::UploadFile;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: Url,
    /// Per-request limit for JSON calls; multipart uploads run without one.
    timeout: Option<Duration>,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = config
            .session_cookie
            .as_deref()
            .filter(|c| !c.trim().is_empty())
        {
            jar.add_cookie_str(cookie, &base_url);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .cookie_provider(jar)
            .build()
            .map_err(ApiError::ClientBuild)?;

        info!("Backend client ready for {}", base_url);
        Ok(Self {
            client,
            base_url,
            timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL followed by the given path segments, each percent-encoded.
    /// A trailing `""` segment yields a trailing slash.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.upload_request(method, url);
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    /// Server-side document parsing can take longer than any fixed limit.
    fn upload_request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Send and turn any non-2xx status into `ApiError::Http`.
    pub(crate) async fn execute(
        &self,
        action: &'static str,
        request: RequestBuilder,
    ) -> ApiResult<Response> {
        let response = request.send().await.map_err(|source| {
            warn!("{} request failed: {}", action, source);
            ApiError::Transport { action, source }
        })?;

        let status = response.status();
        if status.is_success() {
            debug!("{} -> {}", action, status);
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| fallback_message(action, status.as_u16()));

        warn!("{} returned {}: {}", action, status, message);
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn read_json<R>(action: &'static str, response: Response) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { action, source })?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { action, source })
    }

    /// Like `read_json`, but the body must be a JSON array.
    pub(crate) async fn read_json_array<R>(
        action: &'static str,
        response: Response,
        shape_error: &'static str,
    ) -> ApiResult<Vec<R>>
    where
        R: DeserializeOwned,
    {
        let value: Value = Self::read_json(action, response).await?;
        if !value.is_array() {
            warn!("{}: expected an array, got {}", action, json_type_name(&value));
            return Err(ApiError::UnexpectedShape(shape_error));
        }
        serde_json::from_value(value).map_err(|source| ApiError::Decode { action, source })
    }

    /// Generic GET request
    pub(crate) async fn get_json<R>(
        &self,
        action: &'static str,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let response = self.get(action, segments, query).await?;
        Self::read_json(action, response).await
    }

    /// GET without decoding, for endpoints needing a shape check
    pub(crate) async fn get(
        &self,
        action: &'static str,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> ApiResult<Response> {
        let mut url = self.endpoint(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        self.execute(action, self.request(Method::GET, url)).await
    }

    /// Generic POST request with JSON
    pub(crate) async fn post_json<T, R>(
        &self,
        action: &'static str,
        segments: &[&str],
        payload: &T,
    ) -> ApiResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::POST, action, segments, payload).await
    }

    pub(crate) async fn patch_json<T, R>(
        &self,
        action: &'static str,
        segments: &[&str],
        payload: &T,
    ) -> ApiResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::PATCH, action, segments, payload).await
    }

    async fn send_json<T, R>(
        &self,
        method: Method,
        action: &'static str,
        segments: &[&str],
        payload: &T,
    ) -> ApiResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.request(method, self.endpoint(segments)).json(payload);
        let response = self.execute(action, request).await?;
        Self::read_json(action, response).await
    }

    /// POST with no body
    pub(crate) async fn post_empty<R>(&self, action: &'static str, segments: &[&str]) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let request = self.request(Method::POST, self.endpoint(segments));
        let response = self.execute(action, request).await?;
        Self::read_json(action, response).await
    }

    pub(crate) async fn post_multipart<R>(
        &self,
        action: &'static str,
        segments: &[&str],
        form: Form,
    ) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let request = self
            .upload_request(Method::POST, self.endpoint(segments))
            .multipart(form);
        let response = self.execute(action, request).await?;
        Self::read_json(action, response).await
    }

    /// DELETE; any 2xx (204 included) counts as success and the body is ignored.
    pub(crate) async fn delete(&self, action: &'static str, segments: &[&str]) -> ApiResult<()> {
        let request = self.request(Method::DELETE, self.endpoint(segments));
        self.execute(action, request).await?;
        Ok(())
    }

    /// Multipart part for an uploaded document
    pub(crate) fn file_part(file: UploadFile) -> ApiResult<Part> {
        let content_type = file.content_type();
        Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(content_type)
            .map_err(|e| ApiError::InvalidArgument(format!("Failed to create multipart: {}", e)))
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let invalid = |reason: &str| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("base URL is empty"));
    }

    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base"));
    }
    Ok(url)
}

/// Human-readable message from an error body.
///
/// Looks at `detail` (a string, an object with `message`, or a validation
/// list whose first entry has `msg`) and then at a top-level `message`.
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    let from_detail = match value.get("detail") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(detail)) => detail.get("message").and_then(Value::as_str),
        Some(Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(Value::as_str),
        _ => None,
    };

    from_detail
        .or_else(|| value.get("message").and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

pub fn fallback_message(action: &str, status: u16) -> String {
    format!("{} failed ({})", action, status)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
