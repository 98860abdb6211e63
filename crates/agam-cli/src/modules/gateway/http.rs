use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::modules::session::{load_auth_token, SessionStore};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Method, optional JSON body and extra headers of one gateway call.
#[derive(Debug, Clone)]
pub(crate) struct RequestOptions {
    method: Method,
    body: Option<serde_json::Value>,
    headers: HeaderMap,
}

impl RequestOptions {
    pub(crate) fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub(crate) fn get() -> Self {
        Self::new(Method::GET)
    }

    pub(crate) fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub(crate) fn post<T: Serialize>(payload: &T) -> Result<Self, ApiError> {
        Self::new(Method::POST).json(payload)
    }

    pub(crate) fn json<T: Serialize>(mut self, payload: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| ApiError::new(format!("failed to encode request body: {err}")))?;
        self.body = Some(body);
        Ok(self)
    }

    pub(crate) fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Single chokepoint for backend calls.
///
/// The bearer token is read from the session store on every call, so a
/// login or logout is picked up without rebuilding the client.
#[derive(Clone)]
pub(crate) struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            store,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let Some(token) = load_auth_token(self.store.as_ref()) else {
            return headers;
        };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(err) => warn!(event = "token_header_invalid", error = %err),
        }
        headers
    }

    /// JSON call. `Ok(None)` means a 2xx whose body is empty or not JSON.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, ApiError> {
        let url = self.url(endpoint);
        let RequestOptions {
            method,
            body,
            headers: extra,
        } = options;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.extend(extra);
        // The stored token replaces any caller-supplied Authorization.
        for (name, value) in &self.auth_headers() {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(&body)
                .map_err(|err| ApiError::new(format!("failed to encode request body: {err}")))?;
            builder = builder.body(bytes);
        }
        let response = dispatch(&method, &url, builder).await?;
        decode_optional(response).await
    }

    /// Multipart POST. Content-type is left to the transport so it can add
    /// the boundary.
    pub(crate) async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        let builder = self
            .http
            .post(&url)
            .headers(self.auth_headers())
            .multipart(form);
        let response = dispatch(&Method::POST, &url, builder).await?;
        decode_required(response).await
    }
}

async fn dispatch(
    method: &Method,
    url: &str,
    builder: reqwest::RequestBuilder,
) -> Result<Response, ApiError> {
    debug!(method = %method, url = %url, "http request");
    let start = Instant::now();
    let response = builder.send().await.map_err(|err| {
        debug!(method = %method, url = %url, error = %err, "http transport failure");
        ApiError::transport(err)
    })?;
    debug!(
        method = %method,
        url = %url,
        status = %response.status(),
        elapsed_ms = start.elapsed().as_millis(),
        "http response"
    );
    ensure_success(response).await
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains(JSON_CONTENT_TYPE))
}

async fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
    if !is_json(&response) {
        return Ok(None);
    }
    let status = response.status();
    let body = response.text().await.map_err(ApiError::transport)?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<T>(&body)
        .map(Some)
        .map_err(|err| ApiError::decode(status, &err, &body))
}

async fn decode_required<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::transport)?;
    serde_json::from_str::<T>(&body).map_err(|err| ApiError::decode(status, &err, &body))
}

pub(crate) fn build_params<const N: usize>(
    pairs: [Option<(&str, String)>; N],
) -> Vec<(&str, String)> {
    pairs.into_iter().flatten().collect()
}

pub(crate) fn append_params(endpoint: &mut String, params: Vec<(&str, String)>) {
    if params.is_empty() {
        return;
    }
    let query = params
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<String>>()
        .join("&");
    endpoint.push('?');
    endpoint.push_str(&query);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_encoded_in_order() {
        let mut endpoint = "/vaults/delete".to_string();
        let params = build_params([
            Some(("vault_id", "a b&c".to_string())),
            None,
            Some(("user_id", 7.to_string())),
        ]);
        append_params(&mut endpoint, params);
        assert_eq!(endpoint, "/vaults/delete?vault_id=a%20b%26c&user_id=7");
    }

    #[test]
    fn empty_params_leave_endpoint_alone() {
        let mut endpoint = "/vaults".to_string();
        append_params(&mut endpoint, Vec::new());
        assert_eq!(endpoint, "/vaults");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(
            reqwest::Client::new(),
            "http://localhost:8080/",
            Arc::new(crate::modules::session::MemorySessionStore::new()),
        );
        assert_eq!(client.url("/vaults"), "http://localhost:8080/vaults");
    }
}
