//! HTTP client for the backend that stores subscriptions and sends
//! notifications
pub mod models;
pub use models::*;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::PushConfig;
use crate::error::{PushError, Result};
use crate::notify::NotificationPayload;

#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    api_base_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    pub fn new(config: &PushConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn subscribe(&self, request: &SubscribeRequest) -> Result<SubscribeResponse> {
        self.post("subscribe", request).await
    }

    pub async fn unsubscribe(&self, device_ids: &[String]) -> Result<UnsubscribeResponse> {
        let request = UnsubscribeRequest {
            device_ids: device_ids.to_vec(),
        };
        self.post("unsubscribe", &request).await
    }

    /// The response body is passed through as is so callers can
    /// inspect per-device results.
    pub async fn notify(
        &self,
        device_ids: &[String],
        payload: &NotificationPayload,
    ) -> Result<Value> {
        self.post("notify", &NotifyRequest {
            device_ids,
            payload,
        })
        .await
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.api_base_url, endpoint);
        tracing::debug!("POST {}", url);

        let mut request = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-API-Key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("Unknown Status");
            tracing::warn!("{} responded with {}", url, status);
            return Err(PushError::Backend {
                status: status.as_u16(),
                status_text: status_text.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(url: &str, api_key: Option<&str>) -> BackendClient {
        let config = PushConfig::new("BKey", url).unwrap().with_api_key(api_key);
        BackendClient::new(&config)
    }

    #[tokio::test]
    async fn it_sends_api_key_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/unsubscribe")
            .match_header("x-api-key", "secret")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"device_ids": ["a"]})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status_code": 200,
                    "message": "Unsubscribed",
                    "data": {"device_ids": ["a"], "removed_count": 1, "removed_subscriptions": []}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("secret"));
        let response = client.unsubscribe(&["a".to_string()]).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.data.unwrap().removed_count, 1);
    }

    #[tokio::test]
    async fn it_omits_api_key_when_not_configured() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/notify")
            .match_header("x-api-key", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status_code": 200, "message": "sent"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let payload = NotificationPayload::new("Hi", "there", None, None, None);
        let response = client.notify(&["a".to_string()], &payload).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response["message"], "sent");
    }

    #[tokio::test]
    async fn it_returns_status_text_on_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/unsubscribe")
            .with_status(404)
            .with_body("nope")
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client.unsubscribe(&["a".to_string()]).await.unwrap_err();

        match err {
            PushError::Backend {
                status,
                status_text,
            } => {
                assert_eq!(status, 404);
                assert_eq!(status_text, "Not Found");
            }
            other => panic!("Unexpected error {:?}", other),
        }
    }
}
