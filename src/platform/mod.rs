//! Push capabilities of the host runtime
pub mod headless;
pub use headless::HeadlessPlatform;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    // The user has not decided yet
    Default,
    Granted,
    Denied,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: Option<String>,
    pub auth: Option<String>,
}

/// Credentials issued by the platform's push service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
    // Milliseconds since the epoch
    pub expiration_time: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscribeOptions {
    pub user_visible_only: bool,
    pub application_server_key: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub script_url: String,
    pub scope: String,
    pub active: bool,
}

/// Everything the subscription manager needs from the runtime. State
/// lives behind this trait and is queried fresh on every call.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    fn supports_service_worker(&self) -> bool;

    fn supports_push_manager(&self) -> bool;

    fn user_agent(&self) -> String;

    fn permission(&self) -> Permission;

    /// Prompt the user. Only called when the permission is undecided.
    async fn request_permission(&self) -> Result<Permission>;

    async fn register_service_worker(&self, script_url: &str) -> Result<Registration>;

    /// Resolves once a background script is active.
    async fn service_worker_ready(&self) -> Result<Registration>;

    async fn subscribe(&self, options: SubscribeOptions) -> Result<PushSubscription>;

    async fn get_subscription(&self) -> Result<Option<PushSubscription>>;

    /// Returns whether a subscription was removed.
    async fn unsubscribe(&self, subscription: &PushSubscription) -> Result<bool>;
}
