use std::error::Error;
use std::fmt;
use std::io::{self, IsTerminal, Write};

use serde::{Deserialize, Serialize};

pub const DEFAULT_REMOTE_TITLE: &str = "Leafy";
pub const DEFAULT_REMOTE_BODY: &str = "You have a new notification";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Updates,
    Reminders,
}

impl Channel {
    pub fn id(self) -> &'static str {
        match self {
            Channel::Updates => "leafy_channel",
            Channel::Reminders => "leafy_reminders",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Updates => "Leafy Updates",
            Channel::Reminders => "Leafy Reminders",
        }
    }

    pub fn priority(self) -> Priority {
        match self {
            Channel::Updates => Priority::Default,
            Channel::Reminders => Priority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Default,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DeepLink {
    Plant(i64),
    History(i64),
    Notifications,
}

impl DeepLink {
    pub fn uri(&self) -> String {
        match self {
            DeepLink::Plant(id) => format!("leafy://plant/{id}"),
            DeepLink::History(id) => format!("leafy://history/{id}"),
            DeepLink::Notifications => "leafy://notifications".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformNotification {
    pub channel: Channel,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub deep_link: DeepLink,
}

impl PlatformNotification {
    pub fn new(channel: Channel, title: &str, body: &str, deep_link: DeepLink) -> Self {
        Self {
            channel,
            title: title.to_string(),
            body: body.to_string(),
            priority: channel.priority(),
            deep_link,
        }
    }
}

/// Where posted notifications are surfaced to the user.
pub trait NotificationSink {
    fn post(&self, notification: &PlatformNotification) -> Result<(), SinkError>;
}

/// Writes a one-line banner per notification to stderr.
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn post(&self, notification: &PlatformNotification) -> Result<(), SinkError> {
        let stderr = io::stderr();
        let color = std::env::var_os("NO_COLOR").is_none() && stderr.is_terminal();
        let marker = match notification.priority {
            Priority::High => "!",
            Priority::Default => "*",
        };
        let mut handle = stderr.lock();
        if color {
            writeln!(
                handle,
                "\x1b[1;32m{marker} [{}]\x1b[0m {}: {} \x1b[2m{}\x1b[0m",
                notification.channel.name(),
                notification.title,
                notification.body,
                notification.deep_link.uri()
            )?;
        } else {
            writeln!(
                handle,
                "{marker} [{}] {}: {} {}",
                notification.channel.name(),
                notification.title,
                notification.body,
                notification.deep_link.uri()
            )?;
        }
        Ok(())
    }
}

/// Persists records without surfacing anything.
pub struct SilentSink;

impl NotificationSink for SilentSink {
    fn post(&self, _notification: &PlatformNotification) -> Result<(), SinkError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteMessage {
    #[serde(default)]
    pub notification: Option<RemotePayload>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemotePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl RemoteMessage {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// The local notification this message maps to, if it carries a
    /// notification payload at all.
    pub fn to_local(&self) -> Option<PlatformNotification> {
        let payload = self.notification.as_ref()?;
        let title = non_blank(payload.title.as_deref()).unwrap_or(DEFAULT_REMOTE_TITLE);
        let body = non_blank(payload.body.as_deref()).unwrap_or(DEFAULT_REMOTE_BODY);
        let deep_link = self
            .plant_id()
            .map(DeepLink::Plant)
            .unwrap_or(DeepLink::Notifications);
        Some(PlatformNotification::new(
            Channel::Updates,
            title,
            body,
            deep_link,
        ))
    }

    fn plant_id(&self) -> Option<i64> {
        match self.data.get("plant_id")? {
            serde_json::Value::Number(number) => number.as_i64(),
            serde_json::Value::String(raw) => raw.trim().parse().ok(),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum SinkError {
    Io(io::Error),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(err) => write!(f, "failed to post notification: {}", err),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SinkError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(value: io::Error) -> Self {
        SinkError::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_carry_ids_and_priorities() {
        assert_eq!(Channel::Updates.id(), "leafy_channel");
        assert_eq!(Channel::Updates.priority(), Priority::Default);
        assert_eq!(Channel::Reminders.id(), "leafy_reminders");
        assert_eq!(Channel::Reminders.priority(), Priority::High);
    }

    #[test]
    fn deep_links_render_as_app_uris() {
        assert_eq!(DeepLink::Plant(7).uri(), "leafy://plant/7");
        assert_eq!(DeepLink::History(7).uri(), "leafy://history/7");
        assert_eq!(DeepLink::Notifications.uri(), "leafy://notifications");
    }

    #[test]
    fn remote_message_maps_one_to_one_with_defaults() {
        let message = RemoteMessage::parse(r#"{"notification": {"title": "  ", "body": null}}"#)
            .expect("message should parse");
        let local = message.to_local().expect("payload present");
        assert_eq!(local.title, DEFAULT_REMOTE_TITLE);
        assert_eq!(local.body, DEFAULT_REMOTE_BODY);
        assert_eq!(local.channel, Channel::Updates);
        assert_eq!(local.deep_link, DeepLink::Notifications);

        let message = RemoteMessage::parse(
            r#"{"notification": {"title": "Hujan", "body": "Skip watering today"},
                "data": {"plant_id": "12"}}"#,
        )
        .expect("message should parse");
        let local = message.to_local().expect("payload present");
        assert_eq!(local.title, "Hujan");
        assert_eq!(local.body, "Skip watering today");
        assert_eq!(local.deep_link, DeepLink::Plant(12));
    }

    #[test]
    fn data_only_message_is_not_translated() {
        let message =
            RemoteMessage::parse(r#"{"data": {"plant_id": 3}}"#).expect("message should parse");
        assert!(message.to_local().is_none());
    }
}
