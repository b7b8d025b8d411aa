//! Subscription lifecycle: capability checks, permission, background
//! script registration, subscribe/unsubscribe and the backend calls
//! that go with them.
//!
//! There is no state machine in here. Permission, registration and
//! subscription state all live in the platform and are queried on
//! every call, so callers are responsible for sequencing operations.
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{SecondsFormat, Utc};

use crate::client::{
    BackendClient, SubscribeRequest, SubscribeResponse, SubscriptionKeysRecord,
    SubscriptionMetadata, SubscriptionRecord, UnsubscribeResponse,
};
use crate::core::PushConfig;
use crate::device::{DEVICE_ID_KEY, DeviceStore, clear_device_id, get_or_create_device_id};
use crate::error::{PushError, Result};
use crate::notify::{NotificationPayload, NotifyResult};
use crate::platform::{Permission, PushPlatform, Registration, SubscribeOptions};

/// Decode a URL-safe base64 key (as VAPID public keys are usually
/// shared) into raw bytes.
pub fn url_base64_to_bytes(input: &str) -> Result<Vec<u8>> {
    let padding = "=".repeat((4 - input.len() % 4) % 4);
    let standard = format!("{}{}", input, padding)
        .replace('-', "+")
        .replace('_', "/");
    Ok(STANDARD.decode(standard)?)
}

pub struct SubscriptionManager<P, S> {
    config: PushConfig,
    platform: P,
    store: S,
    backend: BackendClient,
}

impl<P, S> SubscriptionManager<P, S>
where
    P: PushPlatform,
    S: DeviceStore,
{
    pub fn new(config: PushConfig, platform: P, store: S) -> Self {
        let backend = BackendClient::new(&config);
        Self {
            config,
            platform,
            store,
            backend,
        }
    }

    pub fn config(&self) -> &PushConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn device_id(&self) -> String {
        get_or_create_device_id(&self.store)
    }

    pub fn is_supported(&self) -> bool {
        self.platform.supports_service_worker() && self.platform.supports_push_manager()
    }

    /// Register the background script and ask for permission. Returns
    /// `false` when push is unsupported or permission isn't granted.
    pub async fn initialize(&self) -> Result<bool> {
        if !self.is_supported() {
            tracing::warn!("Push notifications are not supported on this platform");
            return Ok(false);
        }

        self.register_service_worker().await?;
        self.request_permission().await
    }

    pub async fn request_permission(&self) -> Result<bool> {
        match self.platform.permission() {
            Permission::Granted => Ok(true),
            Permission::Denied => {
                tracing::debug!("Notification permission was previously denied");
                Ok(false)
            }
            Permission::Default => {
                let permission = self.platform.request_permission().await?;
                tracing::debug!("Notification permission is now {:?}", permission);
                Ok(permission == Permission::Granted)
            }
        }
    }

    pub async fn register_service_worker(&self) -> Result<Registration> {
        let script_url = &self.config.service_worker_path;
        match self.platform.register_service_worker(script_url).await {
            Ok(registration) => {
                tracing::debug!(
                    "Service worker {} registered with scope {}",
                    script_url,
                    registration.scope
                );
                Ok(registration)
            }
            Err(e) => {
                tracing::error!("Service worker registration failed: {}", e);
                Err(e)
            }
        }
    }

    /// Create a push subscription and store it with the backend. The
    /// platform subscription is left in place if the backend rejects it.
    pub async fn subscribe(&self) -> Result<SubscribeResponse> {
        self.platform.service_worker_ready().await?;

        let application_server_key = url_base64_to_bytes(&self.config.public_key)?;
        let subscription = self
            .platform
            .subscribe(SubscribeOptions {
                user_visible_only: true,
                application_server_key,
            })
            .await?;

        let (p256dh, auth) = match (subscription.keys.p256dh, subscription.keys.auth) {
            (Some(p256dh), Some(auth)) => (p256dh, auth),
            (p256dh, _) => {
                let missing = if p256dh.is_none() { "p256dh" } else { "auth" };
                return Err(PushError::MissingKeys(format!(
                    "subscription for {} has no {} key",
                    subscription.endpoint, missing
                )));
            }
        };

        let request = SubscribeRequest {
            subscription: SubscriptionRecord {
                endpoint: subscription.endpoint,
                keys: SubscriptionKeysRecord { p256dh, auth },
                expiration_time: subscription.expiration_time,
                metadata: SubscriptionMetadata {
                    user_agent: self.platform.user_agent(),
                    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                },
            },
            device_id: self.device_id(),
        };

        let response = self.backend.subscribe(&request).await?;
        tracing::debug!("Subscribed device {}", request.device_id);
        Ok(response)
    }

    /// Remove subscriptions for `device_ids`, or for this device when
    /// `None`. Local state is only touched after the backend succeeds.
    pub async fn unsubscribe(
        &self,
        device_ids: Option<Vec<String>>,
    ) -> Result<UnsubscribeResponse> {
        // Only this device's own unsubscribe may create an id, explicit
        // targets just read whatever is stored
        let (device_ids, local_device_id) = match device_ids {
            Some(ids) => {
                let stored = match self.store.get(DEVICE_ID_KEY) {
                    Ok(id) => id,
                    Err(e) => {
                        tracing::warn!("Unable to read device id: {}", e);
                        None
                    }
                };
                (ids, stored)
            }
            None => {
                let id = self.device_id();
                (vec![id.clone()], Some(id))
            }
        };

        let response = self.backend.unsubscribe(&device_ids).await?;

        // Backend removal is not rolled back if this fails
        match self.platform.get_subscription().await {
            Ok(Some(subscription)) => {
                if let Err(e) = self.platform.unsubscribe(&subscription).await {
                    tracing::warn!("Unable to remove local push subscription: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Unable to look up local push subscription: {}", e),
        }

        if local_device_id.is_some_and(|id| device_ids.contains(&id)) {
            if let Err(e) = clear_device_id(&self.store) {
                tracing::warn!("Unable to clear device id: {}", e);
            }
        }

        Ok(response)
    }

    pub async fn is_subscribed(&self) -> bool {
        match self.platform.get_subscription().await {
            Ok(subscription) => subscription.is_some(),
            Err(e) => {
                tracing::warn!("Unable to check push subscription: {}", e);
                false
            }
        }
    }

    /// Ask the backend to deliver `payload` to `device_ids`. Never
    /// fails, errors are reported in the result.
    pub async fn notify(
        &self,
        device_ids: &[String],
        payload: &NotificationPayload,
    ) -> NotifyResult {
        if device_ids.is_empty() {
            return NotifyResult::failed(PushError::NoDeviceIds);
        }

        match self.backend.notify(device_ids, payload).await {
            Ok(data) => NotifyResult::ok(data),
            Err(e) => {
                tracing::warn!("Notify failed: {}", e);
                NotifyResult::failed(e)
            }
        }
    }
}
