//! Deep links opened when the user interacts with a reminder notification

use std::fmt;

use tracing::warn;
use url::form_urlencoded;

use crate::{
    error::StorageResult,
    storage::{KeyValueStore, PENDING_DEEP_LINK_KEY},
};

/// Route of the reminder list view
pub const REMINDERS_ROUTE: &str = "/reminders";

const MARK_TAKEN_ACTION: &str = "mark-taken";
const SNOOZE_ACTION: &str = "snooze";

/// Navigation target inside the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    /// Open the reminder view and mark the reminder as taken
    MarkTaken(String),
    /// Open the reminder view and snooze the reminder
    Snooze(String),
    /// Open the reminder list
    ReminderList,
}

impl DeepLink {
    /// Parse a link produced by [`DeepLink`]'s `Display` impl
    pub fn parse(link: &str) -> Option<Self> {
        let (path, query) = match link.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (link, None),
        };
        if path != REMINDERS_ROUTE {
            return None;
        }
        let Some(query) = query else {
            return Some(DeepLink::ReminderList);
        };

        let mut action = None;
        let mut id = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "action" => &mut action,
                "id" => &mut id,
                _ => continue,
            };
            // A repeated parameter makes the link ambiguous
            if slot.replace(value.into_owned()).is_some() {
                return None;
            }
        }

        match (action.as_deref(), id) {
            (Some(MARK_TAKEN_ACTION), Some(id)) => Some(DeepLink::MarkTaken(id)),
            (Some(SNOOZE_ACTION), Some(id)) => Some(DeepLink::Snooze(id)),
            (None, None) => Some(DeepLink::ReminderList),
            _ => None,
        }
    }
}

/// Take the deep link the notification worker left for the application
///
/// The link is removed from the store. Unparseable links are dropped.
pub async fn take_pending<S: KeyValueStore + ?Sized>(store: &S) -> StorageResult<Option<DeepLink>> {
    let Some(link) = store.get(PENDING_DEEP_LINK_KEY).await? else {
        return Ok(None);
    };
    store.delete(PENDING_DEEP_LINK_KEY).await?;

    let parsed = DeepLink::parse(&link);
    if parsed.is_none() {
        warn!("Dropping unrecognized deep link: {}", link);
    }
    Ok(parsed)
}

fn write_action(f: &mut fmt::Formatter<'_>, action: &str, id: &str) -> fmt::Result {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("action", action)
        .append_pair("id", id)
        .finish();
    write!(f, "{}?{}", REMINDERS_ROUTE, query)
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeepLink::MarkTaken(id) => write_action(f, MARK_TAKEN_ACTION, id),
            DeepLink::Snooze(id) => write_action(f, SNOOZE_ACTION, id),
            DeepLink::ReminderList => f.write_str(REMINDERS_ROUTE),
        }
    }
}
