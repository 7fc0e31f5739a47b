use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::notify::{Notification, NotificationPayload, PushGateway};
use crate::store::TokenStore;

/// Shared dependencies for the dispatcher, built once by the host process
/// and injected. No client is ever constructed as hidden global state.
pub struct Deps {
    pub store: Arc<dyn TokenStore>,
    pub gateway: Arc<dyn PushGateway>,
}

/// Caller-supplied input. Absent fields deserialize to empty strings and
/// flow through verbatim; this service does not validate them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationRequest {
    pub user_id: String,
    pub message: String,
    pub title: String,
}

/// The result returned to the caller. Every dispatch path produces one of
/// these; no error ever escapes the dispatcher as a fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Look up the user's FCM token and forward the notification to their device.
///
/// A send is attempted iff a non-empty token resolved for `userId`. A store
/// error is coalesced with "no token" on purpose: the observed contract does
/// not distinguish an unreachable store from an absent record, so neither do
/// we. The condition is still logged so it stays visible operationally.
pub async fn dispatch(deps: &Deps, req: NotificationRequest) -> DispatchResult {
    let resolved = match deps.store.get_token_record(&req.user_id).await {
        Ok(record) => record.and_then(|r| r.fcm_token),
        Err(e) => {
            tracing::warn!(user_id = %req.user_id, "token lookup failed: {}", e);
            None
        }
    };

    let token = match resolved.filter(|t| !t.is_empty()) {
        Some(t) => t,
        None => return DispatchResult::failed("FCM token not found"),
    };

    let payload = NotificationPayload {
        notification: Notification {
            title: req.title,
            body: req.message,
        },
        token,
    };

    if let Err(e) = deps.gateway.send(&payload).await {
        tracing::error!("error sending message: {}", e);
        return DispatchResult::failed(e.to_string());
    }

    DispatchResult::ok()
}
