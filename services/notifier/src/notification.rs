//! Notification payloads and the defaulting rules applied to push data
//!
//! A push message may carry nothing, garbage, or any subset of the
//! notification fields. [`build_notification`] turns whatever arrived into a
//! complete [`Notification`]:
//!
//! | field                | taken from the payload when          | default                         |
//! |----------------------|--------------------------------------|---------------------------------|
//! | `title`, `body`      | present and not blank                | reminder title and body         |
//! | `icon`, `badge`      | present and not blank                | app icon and badge              |
//! | `tag`                | present and not blank                | `medication-reminder`           |
//! | `requireInteraction` | present                              | `true`                          |
//! | `timestamp`          | present                              | time of the push                |
//! | `vibrate`            | present                              | `[200, 100, 200]`               |
//! | `actions`            | present, even if empty               | take and snooze buttons         |
//!
//! Every other field of the payload is passed through in `data`.

use common::DeepLink;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Action id of the "mark as taken" button
pub const ACTION_TAKE: &str = "take";

/// Action id of the "snooze" button
pub const ACTION_SNOOZE: &str = "snooze";

/// Key of the reminder identifier in pass-through data
pub const REMINDER_ID_KEY: &str = "reminderId";

pub const DEFAULT_TITLE: &str = "Medication Reminder";
pub const DEFAULT_BODY: &str = "Time to take your medication!";
pub const DEFAULT_ICON: &str = "/icons/icon-192x192.png";
pub const DEFAULT_BADGE: &str = "/icons/badge-72x72.png";
pub const DEFAULT_TAG: &str = "medication-reminder";
pub const DEFAULT_VIBRATE: [u32; 3] = [200, 100, 200];

/// Button shown on a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NotificationAction {
    fn new(action: &str, title: &str) -> Self {
        Self {
            action: action.to_string(),
            title: title.to_string(),
            icon: None,
        }
    }
}

/// Notification fields as received in a push message; all optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub tag: Option<String>,
    pub require_interaction: Option<bool>,
    /// Epoch milliseconds; fractional values are truncated
    #[serde(default, deserialize_with = "lenient_millis")]
    pub timestamp: Option<i64>,
    pub vibrate: Option<Vec<u32>>,
    pub actions: Option<Vec<NotificationAction>>,
    /// Everything else, e.g. `reminderId`
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

/// A complete notification, ready to display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub require_interaction: bool,
    pub timestamp: i64,
    pub vibrate: Vec<u32>,
    pub actions: Vec<NotificationAction>,
    pub data: Map<String, Value>,
}

impl Notification {
    /// The notification shown when a push carries no usable payload
    pub fn default_at(timestamp: i64) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_BADGE.to_string(),
            tag: DEFAULT_TAG.to_string(),
            require_interaction: true,
            timestamp,
            vibrate: DEFAULT_VIBRATE.to_vec(),
            actions: vec![
                NotificationAction::new(ACTION_TAKE, "Mark as Taken"),
                NotificationAction::new(ACTION_SNOOZE, "Snooze 10 min"),
            ],
            data: Map::new(),
        }
    }

    /// Reminder this notification is about, from `data.reminderId`
    ///
    /// Numbers are accepted as well as strings.
    pub fn reminder_id(&self) -> Option<String> {
        match self.data.get(REMINDER_ID_KEY)? {
            Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// Accept integer or float milliseconds; any other value is dropped
fn lenient_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let millis = value.as_ref().and_then(|value| {
        value
            .as_i64()
            .or_else(|| value.as_f64().filter(|ms| ms.is_finite()).map(|ms| ms as i64))
    });
    if millis.is_none() && value.is_some_and(|value| !value.is_null()) {
        warn!("Ignoring unreadable push timestamp");
    }
    Ok(millis)
}

/// Decode push message data
///
/// Returns `None` for an absent or empty payload, and for a payload that is
/// not a JSON object of the expected shape (logged).
pub fn parse_push_payload(data: Option<&[u8]>) -> Option<PushPayload> {
    let data = data.filter(|data| !data.iter().all(u8::is_ascii_whitespace))?;

    match serde_json::from_slice::<PushPayload>(data) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!("Ignoring malformed push payload: {}", e);
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Merge a push payload onto the default notification, field by field
pub fn build_notification(payload: Option<PushPayload>, now: i64) -> Notification {
    let defaults = Notification::default_at(now);
    let Some(payload) = payload else {
        return defaults;
    };

    Notification {
        title: non_blank(payload.title).unwrap_or(defaults.title),
        body: non_blank(payload.body).unwrap_or(defaults.body),
        icon: non_blank(payload.icon).unwrap_or(defaults.icon),
        badge: non_blank(payload.badge).unwrap_or(defaults.badge),
        tag: non_blank(payload.tag).unwrap_or(defaults.tag),
        require_interaction: payload
            .require_interaction
            .unwrap_or(defaults.require_interaction),
        timestamp: payload.timestamp.unwrap_or(defaults.timestamp),
        vibrate: payload.vibrate.unwrap_or(defaults.vibrate),
        actions: payload.actions.unwrap_or(defaults.actions),
        data: payload.data,
    }
}

/// Where to navigate when a notification is clicked
///
/// `take` and `snooze` need a reminder id; without one the reminder list is
/// opened instead.
pub fn click_target(notification: &Notification, action: Option<&str>) -> DeepLink {
    let action = action.filter(|action| !action.is_empty());

    match (action, notification.reminder_id()) {
        (Some(ACTION_TAKE), Some(id)) => DeepLink::MarkTaken(id),
        (Some(ACTION_SNOOZE), Some(id)) => DeepLink::Snooze(id),
        (Some(action @ (ACTION_TAKE | ACTION_SNOOZE)), None) => {
            warn!(
                "Notification {} has no reminder id for action {}",
                notification.tag, action
            );
            DeepLink::ReminderList
        }
        _ => DeepLink::ReminderList,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_717_000_000_000;

    fn build(raw: &[u8]) -> Notification {
        build_notification(parse_push_payload(Some(raw)), NOW)
    }

    #[test]
    fn test_absent_payload_gives_defaults() {
        assert_eq!(build_notification(parse_push_payload(None), NOW), Notification::default_at(NOW));
        assert_eq!(build(b""), Notification::default_at(NOW));
        assert_eq!(build(b"  \n"), Notification::default_at(NOW));
    }

    #[test]
    fn test_malformed_payload_gives_defaults() {
        for raw in [
            &b"not json"[..],
            b"{\"title\": ",
            b"\"just a string\"",
            b"[1, 2, 3]",
            b"{\"title\": 42}",
            b"{\"requireInteraction\": \"yes\"}",
        ] {
            assert_eq!(build(raw), Notification::default_at(NOW), "payload {:?}", raw);
        }
    }

    #[test]
    fn test_defaults_satisfy_display_requirements() {
        let notification = Notification::default_at(NOW);
        assert!(!notification.title.is_empty());
        assert!(!notification.body.is_empty());
        assert!(notification.require_interaction);
        let actions: Vec<&str> = notification
            .actions
            .iter()
            .map(|a| a.action.as_str())
            .collect();
        assert_eq!(actions, vec![ACTION_TAKE, ACTION_SNOOZE]);
    }

    #[test]
    fn test_partial_payload_overrides_only_given_fields() {
        let notification = build(br#"{"body": "Take 500mg Metformin"}"#);

        let expected = Notification {
            body: "Take 500mg Metformin".to_string(),
            ..Notification::default_at(NOW)
        };
        assert_eq!(notification, expected);
    }

    #[test]
    fn test_full_payload_overrides_everything() {
        let notification = build(
            br#"{
                "title": "Lisinopril",
                "body": "10mg now",
                "icon": "/i.png",
                "badge": "/b.png",
                "tag": "reminder-7",
                "requireInteraction": false,
                "timestamp": 5,
                "vibrate": [50],
                "actions": [{"action": "take", "title": "Done"}],
                "reminderId": "7"
            }"#,
        );

        assert_eq!(notification.title, "Lisinopril");
        assert_eq!(notification.body, "10mg now");
        assert_eq!(notification.icon, "/i.png");
        assert_eq!(notification.badge, "/b.png");
        assert_eq!(notification.tag, "reminder-7");
        assert!(!notification.require_interaction);
        assert_eq!(notification.timestamp, 5);
        assert_eq!(notification.vibrate, vec![50]);
        assert_eq!(notification.actions.len(), 1);
        assert_eq!(notification.reminder_id(), Some("7".to_string()));
    }

    #[test]
    fn test_nulls_and_blanks_fall_back() {
        let notification = build(br#"{"title": null, "body": "   ", "requireInteraction": null}"#);
        assert_eq!(notification, Notification::default_at(NOW));
    }

    #[test]
    fn test_float_timestamp_is_truncated() {
        let notification = build(br#"{"title": "Metformin", "timestamp": 1.7e12}"#);
        assert_eq!(notification.title, "Metformin");
        assert_eq!(notification.timestamp, 1_700_000_000_000);

        let notification = build(br#"{"timestamp": 1717000000123.9}"#);
        assert_eq!(notification.timestamp, 1_717_000_000_123);
    }

    #[test]
    fn test_unreadable_timestamp_keeps_other_fields() {
        let notification = build(br#"{"title": "Metformin", "timestamp": "soon"}"#);
        assert_eq!(notification.title, "Metformin");
        assert_eq!(notification.timestamp, NOW);

        let notification = build(br#"{"timestamp": null}"#);
        assert_eq!(notification.timestamp, NOW);
    }

    #[test]
    fn test_click_link_carries_reminder_id_verbatim() {
        for id in ["r1&action=mark-taken", "a b#c", "k=v", "50%"] {
            let notification = with_reminder(json!(id));

            let snooze = click_target(&notification, Some(ACTION_SNOOZE));
            assert_eq!(
                DeepLink::parse(&snooze.to_string()),
                Some(DeepLink::Snooze(id.to_string()))
            );

            let take = click_target(&notification, Some(ACTION_TAKE));
            assert_eq!(
                DeepLink::parse(&take.to_string()),
                Some(DeepLink::MarkTaken(id.to_string()))
            );
        }
    }

    #[test]
    fn test_empty_actions_override_defaults() {
        let notification = build(br#"{"actions": []}"#);
        assert!(notification.actions.is_empty());
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let notification = build(br#"{"reminderId": 12, "medicationName": "Metformin"}"#);
        assert_eq!(notification.data.get("medicationName"), Some(&json!("Metformin")));
        assert_eq!(notification.reminder_id(), Some("12".to_string()));
    }

    fn with_reminder(id: Value) -> Notification {
        let mut notification = Notification::default_at(NOW);
        notification.data.insert(REMINDER_ID_KEY.to_string(), id);
        notification
    }

    #[test]
    fn test_click_target_by_action() {
        let notification = with_reminder(json!("r-1"));

        assert_eq!(
            click_target(&notification, Some(ACTION_TAKE)),
            DeepLink::MarkTaken("r-1".to_string())
        );
        assert_eq!(
            click_target(&notification, Some(ACTION_SNOOZE)),
            DeepLink::Snooze("r-1".to_string())
        );
        assert_eq!(click_target(&notification, None), DeepLink::ReminderList);
        assert_eq!(click_target(&notification, Some("")), DeepLink::ReminderList);
        assert_eq!(click_target(&notification, Some("dismiss")), DeepLink::ReminderList);
    }

    #[test]
    fn test_click_target_without_reminder_id() {
        let notification = Notification::default_at(NOW);
        assert_eq!(click_target(&notification, Some(ACTION_TAKE)), DeepLink::ReminderList);

        let notification = with_reminder(json!(""));
        assert_eq!(click_target(&notification, Some(ACTION_SNOOZE)), DeepLink::ReminderList);

        let notification = with_reminder(json!({"nested": true}));
        assert_eq!(click_target(&notification, Some(ACTION_TAKE)), DeepLink::ReminderList);
    }
}
