//! Background receiver for push and notification click events.
//!
//! Runs outside of any page so it has no way to hand results back.
//! Each handler awaits its host calls in order and only returns once
//! the host has finished, which is what keeps the receiver alive.
pub mod host;
pub use host::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

pub const DEFAULT_TITLE: &str = "New Notification";
pub const DEFAULT_BODY: &str = "You have a new notification";
pub const DEFAULT_ICON: &str = "/icon-192x192.png";
pub const DEFAULT_BADGE: &str = "/badge-72x72.png";
pub const DEFAULT_LANG: &str = "en-US";
pub const DEFAULT_CLICK_URL: &str = "/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Auto,
    Ltr,
    Rtl,
}

/// A notification ready to be displayed, with every default applied.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDescriptor {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub data: Value,
    // Passed to the host untouched, entries may be partial
    pub actions: Vec<Value>,
    // A single duration or a pattern of durations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrate: Option<Value>,
    pub require_interaction: bool,
    pub silent: bool,
    pub renotify: bool,
    // Milliseconds since the epoch
    pub timestamp: i64,
    pub lang: String,
    pub dir: Direction,
}

#[derive(Clone, Debug)]
pub struct PushEvent {
    pub data: Option<Vec<u8>>,
    pub received_at: DateTime<Utc>,
}

impl PushEvent {
    pub fn new(data: Option<Vec<u8>>) -> Self {
        Self {
            data,
            received_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NotificationClickEvent {
    pub notification: NotificationDescriptor,
    // Set when one of the notification's action buttons was clicked
    pub action: Option<String>,
}

fn string_field(message: &Map<String, Value>, key: &str) -> Option<String> {
    message.get(key).and_then(Value::as_str).map(|s| s.to_string())
}

fn bool_field(message: &Map<String, Value>, key: &str) -> bool {
    message.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Apply render-time defaults to a push message body. Fields that are
/// missing or of the wrong type get their default, a body that isn't a
/// JSON object renders as an empty message.
pub fn build_notification(
    data: Option<&[u8]>,
    received_at: DateTime<Utc>,
) -> Result<NotificationDescriptor> {
    let message = match data {
        Some(bytes) if !bytes.is_empty() => match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(message) => message,
            other => {
                tracing::debug!("Push message is not an object, rendering defaults: {}", other);
                Map::new()
            }
        },
        _ => Map::new(),
    };

    let vibrate = message
        .get("vibrate")
        .filter(|v| v.is_number() || v.is_array())
        .cloned();
    let dir = message
        .get("dir")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    Ok(NotificationDescriptor {
        title: string_field(&message, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        body: string_field(&message, "body").unwrap_or_else(|| DEFAULT_BODY.to_string()),
        icon: string_field(&message, "icon").unwrap_or_else(|| DEFAULT_ICON.to_string()),
        badge: string_field(&message, "badge").unwrap_or_else(|| DEFAULT_BADGE.to_string()),
        image: string_field(&message, "image"),
        tag: string_field(&message, "tag"),
        data: message
            .get("data")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
        actions: message
            .get("actions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        vibrate,
        require_interaction: bool_field(&message, "requireInteraction"),
        silent: bool_field(&message, "silent"),
        renotify: bool_field(&message, "renotify"),
        timestamp: message
            .get("timestamp")
            .and_then(Value::as_i64)
            .unwrap_or_else(|| received_at.timestamp_millis()),
        lang: string_field(&message, "lang").unwrap_or_else(|| DEFAULT_LANG.to_string()),
        dir,
    })
}

/// URL a click on this notification should open.
pub fn click_url(notification: &NotificationDescriptor) -> String {
    notification
        .data
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_CLICK_URL)
        .to_string()
}

pub async fn on_push<H>(host: &H, event: &PushEvent) -> Result<NotificationDescriptor>
where
    H: WorkerHost + ?Sized,
{
    let notification = build_notification(event.data.as_deref(), event.received_at)?;
    tracing::debug!("Showing notification '{}'", notification.title);
    host.show_notification(&notification).await?;
    Ok(notification)
}

/// Returns the URL that was opened.
pub async fn on_notification_click<H>(host: &H, event: &NotificationClickEvent) -> Result<String>
where
    H: WorkerHost + ?Sized,
{
    host.close_notification(&event.notification).await?;
    let url = click_url(&event.notification);
    tracing::debug!("Notification clicked, opening {}", url);
    host.open_window(&url).await?;
    Ok(url)
}
