use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub action: String,
    #[serde(default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NotificationAction {
    pub fn new(action: &str, title: &str, icon: Option<&str>) -> Self {
        Self {
            action: action.to_string(),
            title: title.to_string(),
            icon: icon.map(|s| s.to_string()),
        }
    }
}

/// Content of a push message. Everything except the title is optional
/// and the background receiver fills in defaults when rendering.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    // When a tag is set, sending new notifications with the same tag
    // will update the user's notification if they have not interacted
    // with it yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    // Application specific data, `url` is opened when the notification
    // is clicked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrate: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_interaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renotify: Option<bool>,
}

impl NotificationPayload {
    pub fn new(
        title: &str,
        body: &str,
        url: Option<&str>,
        actions: Option<Vec<NotificationAction>>,
        tag: Option<&str>,
    ) -> Self {
        let data = url.map(|u| {
            let mut data = Map::new();
            data.insert("url".to_string(), Value::String(u.to_string()));
            Value::Object(data)
        });
        Self {
            title: title.to_string(),
            body: Some(body.to_string()),
            icon: None,
            badge: None,
            image: None,
            tag: tag.map(|s| s.to_string()),
            data,
            actions: actions.unwrap_or_default(),
            vibrate: None,
            require_interaction: None,
            silent: None,
            renotify: None,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_vibrate(mut self, pattern: Vec<u32>) -> Self {
        self.vibrate = Some(pattern);
        self
    }

    pub fn with_require_interaction(mut self, require_interaction: bool) -> Self {
        self.require_interaction = Some(require_interaction);
        self
    }
}

/// Outcome of a best-effort notify call. Failures are captured here
/// rather than returned as errors.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NotifyResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotifyResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}
