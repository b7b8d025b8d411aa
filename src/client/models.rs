//! Request and response bodies for the backend push API
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::notify::NotificationPayload;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubscriptionKeysRecord {
    pub p256dh: String,
    pub auth: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubscriptionMetadata {
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub endpoint: String,
    pub keys: SubscriptionKeysRecord,
    pub expiration_time: Option<i64>,
    pub metadata: SubscriptionMetadata,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubscribeRequest {
    pub subscription: SubscriptionRecord,
    pub device_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UnsubscribeRequest {
    pub device_ids: Vec<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NotifyRequest<'a> {
    pub device_ids: &'a [String],
    pub payload: &'a NotificationPayload,
}

/// Envelope every backend endpoint responds with. A `data` field of a
/// shape this client doesn't know is read as `None`, the request still
/// succeeded.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(bound(deserialize = "T: DeserializeOwned + Default"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_data")]
    pub data: Option<T>,
}

fn lenient_data<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SubscribeData {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub device_id: String,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct UnsubscribeData {
    #[serde(default)]
    pub device_ids: Vec<String>,
    #[serde(default)]
    pub removed_count: u64,
    #[serde(default)]
    pub removed_subscriptions: Vec<Value>,
}

pub type SubscribeResponse = ApiResponse<SubscribeData>;
pub type UnsubscribeResponse = ApiResponse<UnsubscribeData>;
