use anyhow::{Result, anyhow};

use crate::device::DeviceStore;
use crate::manager::SubscriptionManager;
use crate::notify::NotificationPayload;
use crate::platform::PushPlatform;

pub async fn run<P: PushPlatform, S: DeviceStore>(
    manager: &SubscriptionManager<P, S>,
    device_ids: Vec<String>,
    title: String,
    body: String,
    url: Option<String>,
    tag: Option<String>,
) -> Result<()> {
    let payload = NotificationPayload::new(&title, &body, url.as_deref(), None, tag.as_deref());
    let result = manager.notify(&device_ids, &payload).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.success {
        Ok(())
    } else {
        Err(anyhow!(
            "Notify failed: {}",
            result.error.unwrap_or_default()
        ))
    }
}
