use anyhow::Result;

use crate::worker::{ConsoleHost, NotificationClickEvent, PushEvent, on_notification_click, on_push};

pub async fn run(payload: Option<String>, click: bool) -> Result<()> {
    let host = ConsoleHost;
    let event = PushEvent::new(payload.map(String::into_bytes));
    let notification = on_push(&host, &event).await?;

    if click {
        let click_event = NotificationClickEvent {
            notification,
            action: None,
        };
        on_notification_click(&host, &click_event).await?;
    }

    Ok(())
}
