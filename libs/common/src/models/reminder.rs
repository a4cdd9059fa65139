//! Reminder models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reminder status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    #[default]
    Pending,
    Taken,
    Snoozed,
    Skipped,
    Missed,
}

/// Reminder model: one scheduled dose of a medication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub medication_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub status: ReminderStatus,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub snoozed_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for reminder creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub medication_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
}

/// Reminder update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReminderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snoozed_until: Option<DateTime<Utc>>,
}

/// Request body for acknowledging a reminder
///
/// Without a status the reminder is marked as taken.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcknowledgeReminderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReminderStatus>,
}

impl Reminder {
    /// Apply an update payload in place
    pub fn apply(&mut self, update: UpdateReminderRequest, now: DateTime<Utc>) {
        if let Some(scheduled_time) = update.scheduled_time {
            self.scheduled_time = scheduled_time;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if update.snoozed_until.is_some() {
            self.snoozed_until = update.snoozed_until;
        }
        self.updated_at = now;
    }

    /// Record the user's response to this reminder
    pub fn acknowledge(&mut self, status: ReminderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.acknowledged_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledge_request_defaults_to_empty() {
        let request: AcknowledgeReminderRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.status, None);
        assert_eq!(serde_json::to_string(&request).unwrap(), "{}");
    }

    #[test]
    fn test_acknowledge_sets_timestamp() {
        let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let t1 = DateTime::from_timestamp(1_700_000_500, 0).unwrap();
        let mut reminder = Reminder {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            medication_id: Uuid::nil(),
            scheduled_time: t0,
            status: ReminderStatus::Pending,
            acknowledged_at: None,
            snoozed_until: None,
            created_at: t0,
            updated_at: t0,
        };

        reminder.acknowledge(ReminderStatus::Taken, t1);

        assert_eq!(reminder.status, ReminderStatus::Taken);
        assert_eq!(reminder.acknowledged_at, Some(t1));
        assert_eq!(reminder.updated_at, t1);
    }
}
