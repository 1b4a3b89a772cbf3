//! HTTP client for the marketplace API
//!
//! Wraps reqwest::Client with base URL handling, optional bearer auth and
//! envelope normalization.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::envelope::{normalize, ServiceResponse};
use super::error::ApiError;
use crate::config::Config;

/// Thin client shared by every service module. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` followed by `segment` percent-encoded as a single path segment.
    fn segment_url(&self, path: &str, segment: &str) -> Result<String, ApiError> {
        let base = self.url(path);
        let mut url = Url::parse(&base)
            .map_err(|e| ApiError::InvalidInput(format!("invalid API URL {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidInput(format!("API URL {} cannot take a path", base)))?
            .pop_if_empty()
            .push(segment);
        Ok(url.into())
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> (RequestBuilder, String) {
        self.request_url(method, self.url(path), token)
    }

    fn request_url(
        &self,
        method: Method,
        url: String,
        token: Option<&str>,
    ) -> (RequestBuilder, String) {
        tracing::debug!("{} {}", method, url);

        let mut req = self.http.request(method, &url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        (req, url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<ServiceResponse<T>, ApiError> {
        let (req, url) = self.request(Method::GET, path, token);
        send(req, url).await
    }

    /// GET `path/<segment>`, e.g. a resource by ID.
    pub async fn get_segment<T: DeserializeOwned>(
        &self,
        path: &str,
        segment: &str,
        token: Option<&str>,
    ) -> Result<ServiceResponse<T>, ApiError> {
        let url = self.segment_url(path, segment)?;
        let (req, url) = self.request_url(Method::GET, url, token);
        send(req, url).await
    }

    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> Result<ServiceResponse<T>, ApiError> {
        let (req, url) = self.request(Method::GET, path, token);
        send(req.query(query), url).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<ServiceResponse<T>, ApiError> {
        let (req, url) = self.request(Method::POST, path, token);
        send(req.json(body), url).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<ServiceResponse<T>, ApiError> {
        let (req, url) = self.request(Method::PUT, path, token);
        send(req.json(body), url).await
    }
}

/// Send and normalize. Non-2xx replies are not errors here: their
/// envelope still carries the server's message.
async fn send<T: DeserializeOwned>(
    req: RequestBuilder,
    url: String,
) -> Result<ServiceResponse<T>, ApiError> {
    let resp = match req.send().await {
        Ok(resp) => resp,
        Err(source) => return Err(ApiError::Transport { url, source }),
    };

    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        tracing::debug!("401 Unauthorized for {}", url);
    }

    let body = match resp.bytes().await {
        Ok(body) => body,
        Err(source) => return Err(ApiError::Transport { url, source }),
    };

    normalize(status.as_u16(), &body).map_err(|source| ApiError::Decode { url, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> Config {
        Config {
            api_base_url: base.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new(&config("https://api.example.com/v1/")).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/v1");
        assert_eq!(client.url("/vehicles"), "https://api.example.com/v1/vehicles");
    }

    #[test]
    fn test_segment_url_percent_encodes_path() {
        let client = ApiClient::new(&config("https://api.example.com/v1")).unwrap();
        assert_eq!(
            client.segment_url("/vehicles", "EV 42").unwrap(),
            "https://api.example.com/v1/vehicles/EV%2042"
        );
        assert_eq!(
            client.segment_url("/vehicles", "a/b?c#d").unwrap(),
            "https://api.example.com/v1/vehicles/a%2Fb%3Fc%23d"
        );

        let url = Url::parse(&client.segment_url("/batteries", "EV+42 x").unwrap()).unwrap();
        let last = url.path_segments().unwrap().last().unwrap();
        assert_eq!(last, "EV+42%20x");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 1 on loopback: connection refused
        let client = ApiClient::new(&config("http://127.0.0.1:1")).unwrap();
        let err = client
            .get::<serde_json::Value>("/wallet/balance", Some("token"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }
}
