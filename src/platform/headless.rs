use async_trait::async_trait;

use super::{Permission, PushPlatform, PushSubscription, Registration, SubscribeOptions};
use crate::error::{PushError, Result};

/// A runtime with no background scripts and no push service, such as
/// the command line. Only the backend endpoints are usable from here.
#[derive(Clone, Debug)]
pub struct HeadlessPlatform {
    user_agent: String,
}

impl HeadlessPlatform {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
    }
}

#[async_trait]
impl PushPlatform for HeadlessPlatform {
    fn supports_service_worker(&self) -> bool {
        false
    }

    fn supports_push_manager(&self) -> bool {
        false
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn permission(&self) -> Permission {
        Permission::Denied
    }

    async fn request_permission(&self) -> Result<Permission> {
        Ok(Permission::Denied)
    }

    async fn register_service_worker(&self, script_url: &str) -> Result<Registration> {
        Err(PushError::Registration(format!(
            "Service workers are not available, can't register {}",
            script_url
        )))
    }

    async fn service_worker_ready(&self) -> Result<Registration> {
        Err(PushError::Platform(
            "Service workers are not available".to_string(),
        ))
    }

    async fn subscribe(&self, _options: SubscribeOptions) -> Result<PushSubscription> {
        Err(PushError::Platform("Push manager is not available".to_string()))
    }

    async fn get_subscription(&self) -> Result<Option<PushSubscription>> {
        Ok(None)
    }

    async fn unsubscribe(&self, _subscription: &PushSubscription) -> Result<bool> {
        Ok(false)
    }
}
