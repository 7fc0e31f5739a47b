use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("{0}")]
    Send(String),
}

/// Title/body pair shown on the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// The exact payload shape the push gateway accepts: a notification
/// substructure plus the device-registration token to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub notification: Notification,
    pub token: String,
}

/// Trait abstracting the push-delivery gateway for testing.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, payload: &NotificationPayload) -> Result<(), PushError>;
}

/// Real FCM client posting the payload as JSON to the configured send
/// endpoint, authorized with the project's server key.
pub struct FcmClient {
    client: reqwest::Client,
    endpoint: String,
    server_key: String,
}

impl FcmClient {
    pub fn new(endpoint: &str, server_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            server_key: server_key.to_string(),
        }
    }
}

#[async_trait]
impl PushGateway for FcmClient {
    async fn send(&self, payload: &NotificationPayload) -> Result<(), PushError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", self.server_key))
            .json(payload)
            .send()
            .await
            .map_err(|e| PushError::Send(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(PushError::Send(format!("fcm send {}: {}", status, body)));
        }

        Ok(())
    }
}
