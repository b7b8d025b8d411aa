use async_trait::async_trait;

use super::NotificationDescriptor;
use crate::error::Result;

/// Calls the background receiver makes into its runtime.
#[async_trait]
pub trait WorkerHost: Send + Sync {
    /// Resolves once the notification is on screen.
    async fn show_notification(&self, notification: &NotificationDescriptor) -> Result<()>;

    async fn close_notification(&self, notification: &NotificationDescriptor) -> Result<()>;

    /// Focus an existing window at `url` or open a new one.
    async fn open_window(&self, url: &str) -> Result<()>;
}

/// Prints what would be displayed instead of displaying it.
#[derive(Clone, Debug, Default)]
pub struct ConsoleHost;

#[async_trait]
impl WorkerHost for ConsoleHost {
    async fn show_notification(&self, notification: &NotificationDescriptor) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(notification)?);
        Ok(())
    }

    async fn close_notification(&self, notification: &NotificationDescriptor) -> Result<()> {
        println!("Closed notification: {}", notification.title);
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<()> {
        println!("Open window: {}", url);
        Ok(())
    }
}
