//! Response envelope normalization
//!
//! The API answers either `{message, data}` or `{success, data, error}`.
//! Both are folded into [`ServiceResponse`].

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;

/// Normalized reply from any service call.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ServiceResponse<T> {
    /// The payload of a successful reply, or the server's message as an error.
    pub fn into_data(self) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Rejected(if self.message.is_empty() {
                "response carried no data".to_string()
            } else {
                self.message
            })),
            (false, _) => Err(ApiError::Rejected(self.message)),
        }
    }

    /// For calls where only success matters.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(self.message))
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEnvelope<T> {
    success: Option<bool>,
    message: Option<String>,
    error: Option<serde_json::Value>,
    data: Option<T>,
}

fn error_text(error: &serde_json::Value) -> Option<String> {
    match error {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn default_message(http_ok: bool, status: u16) -> String {
    if http_ok {
        String::new()
    } else {
        format!("HTTP {}", status)
    }
}

/// Fold a raw HTTP body into a [`ServiceResponse`].
///
/// A body without `success` takes it from the HTTP status. Failed
/// replies that are not JSON keep their text as the message; successful
/// replies that are not JSON are a decode error.
pub fn normalize<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<ServiceResponse<T>, serde_json::Error> {
    let http_ok = (200..300).contains(&status);

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ServiceResponse {
            success: http_ok,
            message: default_message(http_ok, status),
            data: None,
        });
    }

    let raw: RawEnvelope<T> = match serde_json::from_slice(body) {
        Ok(raw) => raw,
        Err(_) if !http_ok => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            return Ok(ServiceResponse {
                success: false,
                message: format!("HTTP {}: {}", status, text),
                data: None,
            });
        }
        Err(e) => return Err(e),
    };

    let success = raw.success.unwrap_or(http_ok) && http_ok;
    let message = raw
        .message
        .filter(|m| !m.is_empty())
        .or_else(|| raw.error.as_ref().and_then(error_text))
        .unwrap_or_else(|| default_message(http_ok, status));

    Ok(ServiceResponse {
        success,
        message,
        data: raw.data,
    })
}
