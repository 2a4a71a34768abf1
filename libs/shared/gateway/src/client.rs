use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Errors surfaced by the remote appointment backend. These are never
/// retried automatically; callers report them and let the user re-invoke
/// the action.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut req = self.client.request(method, &url).headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);

            let message = extract_error_message(&error_text, status);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    GatewayError::Unauthorized(message)
                }
                StatusCode::NOT_FOUND => GatewayError::NotFound(message),
                _ => GatewayError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        Ok(response)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// For DELETE and other calls where the backend answers 204 or an empty
    /// body.
    pub async fn request_no_content(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), GatewayError> {
        self.send(method, path, body).await?;
        Ok(())
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

// The backend reports errors as {"message": ...} or {"error": ...}, with
// plain text as a fallback.
fn extract_error_message(error_text: &str, status: StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<Value>(error_text) {
        if let Some(message) = parsed
            .get("message")
            .or_else(|| parsed.get("error"))
            .and_then(|v| v.as_str())
        {
            return message.to_string();
        }
    }
    if error_text.is_empty() {
        format!("request failed with status {}", status)
    } else {
        error_text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_field_from_json_errors() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            extract_error_message(r#"{"message":"CPF inválido"}"#, status),
            "CPF inválido"
        );
        assert_eq!(
            extract_error_message(r#"{"error":"sem conexão"}"#, status),
            "sem conexão"
        );
    }

    #[test]
    fn falls_back_to_raw_text_or_status() {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(extract_error_message("boom", status), "boom");
        assert_eq!(
            extract_error_message("", status),
            "request failed with status 500 Internal Server Error"
        );
    }
}
