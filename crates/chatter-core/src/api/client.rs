//! HTTP client for the Chatter backend REST API.
//!
//! Authentication is the session cookie issued by the backend's auth routes;
//! this client only replays it.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};

use crate::config::{resolve_env_var, ApiConfig};
use crate::error::ApiError;
use crate::types::{Contact, DeliveredMessage, OutgoingMessage};

use super::sender::MessageSender;

/// Client for the `/api/messages` routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

/// Error body shape used by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

impl ApiClient {
    /// Build a client from config. The auth token, if resolvable, is sent as
    /// the `jwt` cookie on every request.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = resolve_env_var(&config.auth_token) {
            let cookie = HeaderValue::from_str(&format!("jwt={token}"))
                .map_err(|e| ApiError::Client(format!("Invalid auth token: {e}")))?;
            headers.insert(COOKIE, cookie);
        } else {
            tracing::debug!("No auth token configured; requests will be anonymous");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Bind this client to a single recipient.
    pub fn conversation(&self, receiver_id: impl Into<String>) -> Conversation {
        Conversation {
            api: self.clone(),
            receiver_id: receiver_id.into(),
        }
    }

    /// `GET /api/messages/users`: everyone the current user can message.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/messages/users"))
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        self.parse(resp).await
    }

    /// `POST /api/messages/send/{receiver_id}`.
    pub async fn send_message(
        &self,
        receiver_id: &str,
        message: &OutgoingMessage,
    ) -> Result<DeliveredMessage, ApiError> {
        let start = Instant::now();
        let resp = self
            .client
            .post(self.url(&format!("/api/messages/send/{receiver_id}")))
            .json(message)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let delivered = self.parse(resp).await?;
        tracing::debug!("Sent message to {} in {:?}", receiver_id, start.elapsed());
        Ok(delivered)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            ApiError::Transport(e.to_string())
        }
    }

    async fn parse<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let text = resp.text().await.map_err(|e| self.request_error(e))?;
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Pull `message` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// An [`ApiClient`] bound to one recipient; the composer's send collaborator.
#[derive(Debug, Clone)]
pub struct Conversation {
    api: ApiClient,
    receiver_id: String,
}

impl Conversation {
    pub fn receiver_id(&self) -> &str {
        &self.receiver_id
    }
}

#[async_trait]
impl MessageSender for Conversation {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveredMessage, ApiError> {
        self.api.send_message(&self.receiver_id, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        assert_eq!(error_message(r#"{"message":"Unauthorized - No Token"}"#), "Unauthorized - No Token");
        assert_eq!(error_message(r#"{"error":"Internal server error"}"#), "Internal server error");
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:5001/".to_string(),
            auth_token: String::new(),
            timeout_ms: 1000,
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/api/messages/users"), "http://localhost:5001/api/messages/users");
    }

    #[test]
    fn test_conversation_binds_receiver() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        let conversation = client.conversation("u42");
        assert_eq!(conversation.receiver_id(), "u42");
        assert_eq!(conversation.name(), "http");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let config = ApiConfig {
            // Port 9 (discard) on loopback; nothing listens there in CI
            base_url: "http://127.0.0.1:9".to_string(),
            auth_token: String::new(),
            timeout_ms: 2000,
        };
        let client = ApiClient::new(&config).unwrap();
        let message = OutgoingMessage {
            text: "hi".to_string(),
            image: None,
        };
        let err = client.send_message("u1", &message).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_) | ApiError::Timeout { .. }));
    }
}
