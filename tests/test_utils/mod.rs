//! Test utilities for integration tests
#![allow(dead_code)]
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use push_helper::core::PushConfig;
use push_helper::device::MemoryStore;
use push_helper::manager::SubscriptionManager;
use push_helper::platform::{
    Permission, PushPlatform, PushSubscription, Registration, SubscribeOptions,
    SubscriptionKeys,
};
use push_helper::worker::{NotificationDescriptor, WorkerHost};
use push_helper::{PushError, Result};

pub const TEST_PUBLIC_KEY: &str =
    "BEl62iUYgUivxIkv69yViEuiBIa-Ib9-SkvMeAtA3LFgDzkrxZJjSgSnfckjBJuBkr3qBUYIHBQFLXYp5Nksh8U";
pub const TEST_ENDPOINT: &str = "https://push.example.com/send/abc123";
pub const TEST_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0";

/// A push platform whose state is fully controlled by the test.
pub struct FakePlatform {
    supported: bool,
    permission: Mutex<Permission>,
    prompt_answer: Permission,
    prompts: AtomicUsize,
    fail_registration: bool,
    fail_lookup: bool,
    fail_unsubscribe: bool,
    registered: Mutex<Vec<String>>,
    issued_keys: SubscriptionKeys,
    subscription: Mutex<Option<PushSubscription>>,
    subscribe_options: Mutex<Option<SubscribeOptions>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            supported: true,
            permission: Mutex::new(Permission::Default),
            prompt_answer: Permission::Granted,
            prompts: AtomicUsize::new(0),
            fail_registration: false,
            fail_lookup: false,
            fail_unsubscribe: false,
            registered: Mutex::new(Vec::new()),
            issued_keys: SubscriptionKeys {
                p256dh: Some("test-p256dh-key".to_string()),
                auth: Some("test-auth-key".to_string()),
            },
            subscription: Mutex::new(None),
            subscribe_options: Mutex::new(None),
        }
    }

    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    pub fn with_permission(self, permission: Permission) -> Self {
        *self.permission.lock().unwrap() = permission;
        self
    }

    pub fn with_prompt_answer(mut self, answer: Permission) -> Self {
        self.prompt_answer = answer;
        self
    }

    pub fn with_issued_keys(mut self, p256dh: Option<&str>, auth: Option<&str>) -> Self {
        self.issued_keys = SubscriptionKeys {
            p256dh: p256dh.map(|s| s.to_string()),
            auth: auth.map(|s| s.to_string()),
        };
        self
    }

    pub fn with_existing_subscription(self) -> Self {
        *self.subscription.lock().unwrap() = Some(self.issue());
        self
    }

    pub fn failing_registration(mut self) -> Self {
        self.fail_registration = true;
        self
    }

    pub fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    pub fn failing_unsubscribe(mut self) -> Self {
        self.fail_unsubscribe = true;
        self
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn registered_scripts(&self) -> Vec<String> {
        self.registered.lock().unwrap().clone()
    }

    pub fn current_subscription(&self) -> Option<PushSubscription> {
        self.subscription.lock().unwrap().clone()
    }

    pub fn last_subscribe_options(&self) -> Option<SubscribeOptions> {
        self.subscribe_options.lock().unwrap().clone()
    }

    fn issue(&self) -> PushSubscription {
        PushSubscription {
            endpoint: TEST_ENDPOINT.to_string(),
            keys: self.issued_keys.clone(),
            expiration_time: None,
        }
    }
}

#[async_trait]
impl PushPlatform for FakePlatform {
    fn supports_service_worker(&self) -> bool {
        self.supported
    }

    fn supports_push_manager(&self) -> bool {
        self.supported
    }

    fn user_agent(&self) -> String {
        TEST_USER_AGENT.to_string()
    }

    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> Result<Permission> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        *self.permission.lock().unwrap() = self.prompt_answer;
        Ok(self.prompt_answer)
    }

    async fn register_service_worker(&self, script_url: &str) -> Result<Registration> {
        if self.fail_registration {
            return Err(PushError::Registration(format!(
                "A bad HTTP response code (404) was received when fetching {}",
                script_url
            )));
        }
        self.registered.lock().unwrap().push(script_url.to_string());
        Ok(Registration {
            script_url: script_url.to_string(),
            scope: "/".to_string(),
            active: true,
        })
    }

    async fn service_worker_ready(&self) -> Result<Registration> {
        Ok(Registration {
            script_url: "/sw.js".to_string(),
            scope: "/".to_string(),
            active: true,
        })
    }

    async fn subscribe(&self, options: SubscribeOptions) -> Result<PushSubscription> {
        *self.subscribe_options.lock().unwrap() = Some(options);
        let subscription = self.issue();
        *self.subscription.lock().unwrap() = Some(subscription.clone());
        Ok(subscription)
    }

    async fn get_subscription(&self) -> Result<Option<PushSubscription>> {
        if self.fail_lookup {
            return Err(PushError::Platform("Push manager unavailable".to_string()));
        }
        Ok(self.subscription.lock().unwrap().clone())
    }

    async fn unsubscribe(&self, _subscription: &PushSubscription) -> Result<bool> {
        if self.fail_unsubscribe {
            return Err(PushError::Platform(
                "Subscription could not be removed".to_string(),
            ));
        }
        Ok(self.subscription.lock().unwrap().take().is_some())
    }
}

/// Creates a subscription manager pointed at `api_base_url`.
pub fn test_manager(
    api_base_url: &str,
    platform: FakePlatform,
) -> SubscriptionManager<FakePlatform, MemoryStore> {
    let config = PushConfig::new(TEST_PUBLIC_KEY, api_base_url)
        .unwrap()
        .with_api_key(Some("test-api-key"));
    SubscriptionManager::new(config, platform, MemoryStore::new())
}

/// Records every call the background receiver makes.
#[derive(Default)]
pub struct RecordingHost {
    pub calls: Mutex<Vec<String>>,
    pub fail_show: bool,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkerHost for RecordingHost {
    async fn show_notification(&self, notification: &NotificationDescriptor) -> Result<()> {
        if self.fail_show {
            return Err(PushError::Platform("Notifications blocked".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push(format!("show:{}", notification.title));
        Ok(())
    }

    async fn close_notification(&self, notification: &NotificationDescriptor) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("close:{}", notification.title));
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("open:{}", url));
        Ok(())
    }
}
