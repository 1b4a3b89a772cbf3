//! Auth endpoints and the HTTP session backend

use serde::Serialize;

use super::client::ApiClient;
use super::envelope::ServiceResponse;
use super::error::ApiError;
use crate::auth::{AuthBackend, IssuedTokens};
use crate::models::{Registration, User};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<ServiceResponse<IssuedTokens>, ApiError> {
    client
        .post("/auth/login", &Credentials { email, password }, None)
        .await
}

pub async fn register(
    client: &ApiClient,
    registration: &Registration,
) -> Result<ServiceResponse<User>, ApiError> {
    if registration.password.len() < 8 {
        return Err(ApiError::InvalidInput(
            "password must be at least 8 characters".into(),
        ));
    }
    if !registration.email.contains('@') {
        return Err(ApiError::InvalidInput(format!(
            "'{}' is not an email address",
            registration.email
        )));
    }
    client.post("/auth/register", registration, None).await
}

pub async fn refresh(
    client: &ApiClient,
    refresh_token: &str,
) -> Result<ServiceResponse<IssuedTokens>, ApiError> {
    client
        .post("/auth/refresh-token", &RefreshRequest { refresh_token }, None)
        .await
}

pub async fn logout(
    client: &ApiClient,
    access_token: &str,
) -> Result<ServiceResponse<serde_json::Value>, ApiError> {
    client
        .post("/auth/logout", &serde_json::json!({}), Some(access_token))
        .await
}

/// [`AuthBackend`] over the marketplace auth endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: ApiClient,
}

impl HttpAuthBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AuthBackend for HttpAuthBackend {
    async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokens, ApiError> {
        refresh(&self.client, refresh_token).await?.into_data()
    }

    async fn invalidate(&self, access_token: &str) -> Result<(), ApiError> {
        logout(&self.client, access_token).await?.into_unit()
    }
}
