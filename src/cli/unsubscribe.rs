use anyhow::Result;

use crate::device::DeviceStore;
use crate::manager::SubscriptionManager;
use crate::platform::PushPlatform;

pub async fn run<P: PushPlatform, S: DeviceStore>(
    manager: &SubscriptionManager<P, S>,
    device_ids: Vec<String>,
) -> Result<()> {
    // No ids means this device
    let device_ids = if device_ids.is_empty() {
        None
    } else {
        Some(device_ids)
    };
    let response = manager.unsubscribe(device_ids).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
