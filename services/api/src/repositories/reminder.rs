//! Mock reminder repository

use chrono::Utc;
use uuid::Uuid;

use common::models::{
    CreateReminderRequest, Reminder, ReminderStatus, UpdateReminderRequest,
};

use super::{
    ATORVASTATIN_ID, EVENING_METFORMIN_ID, LISINOPRIL_ID, METFORMIN_ID, MORNING_LISINOPRIL_ID,
    MORNING_METFORMIN_ID, NIGHT_ATORVASTATIN_ID, seed_time,
};

/// Reminder repository backed by static mock data
#[derive(Clone, Default)]
pub struct ReminderRepository;

impl ReminderRepository {
    /// Create a new reminder repository
    pub fn new() -> Self {
        Self
    }

    /// Get all reminders of a user
    pub fn get_all(&self, user_id: Uuid) -> Vec<Reminder> {
        let reminder = |id, medication_id, hour, status, acknowledged: bool| Reminder {
            id,
            user_id,
            medication_id,
            scheduled_time: seed_time(hour),
            status,
            acknowledged_at: acknowledged.then(|| seed_time(hour)),
            snoozed_until: None,
            created_at: seed_time(0),
            updated_at: seed_time(hour),
        };

        vec![
            reminder(MORNING_METFORMIN_ID, METFORMIN_ID, 8, ReminderStatus::Taken, true),
            reminder(MORNING_LISINOPRIL_ID, LISINOPRIL_ID, 8, ReminderStatus::Taken, true),
            reminder(EVENING_METFORMIN_ID, METFORMIN_ID, 20, ReminderStatus::Pending, false),
            reminder(NIGHT_ATORVASTATIN_ID, ATORVASTATIN_ID, 22, ReminderStatus::Missed, false),
        ]
    }

    /// Find a reminder by ID
    pub fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Option<Reminder> {
        self.get_all(user_id).into_iter().find(|r| r.id == id)
    }

    /// Reminders updated strictly after the given epoch milliseconds
    pub fn updated_since(&self, user_id: Uuid, since_millis: i64) -> Vec<Reminder> {
        self.get_all(user_id)
            .into_iter()
            .filter(|r| r.updated_at.timestamp_millis() > since_millis)
            .collect()
    }

    /// Create a new reminder
    pub fn create(&self, user_id: Uuid, payload: CreateReminderRequest) -> Reminder {
        let now = Utc::now();
        Reminder {
            id: Uuid::new_v4(),
            user_id,
            medication_id: payload.medication_id,
            scheduled_time: payload.scheduled_time,
            status: ReminderStatus::Pending,
            acknowledged_at: None,
            snoozed_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update a reminder, returning the updated item
    pub fn update(&self, user_id: Uuid, id: Uuid, payload: UpdateReminderRequest) -> Option<Reminder> {
        let mut reminder = self.find_by_id(user_id, id)?;
        reminder.apply(payload, Utc::now());
        Some(reminder)
    }

    /// Acknowledge a reminder with the given status
    pub fn acknowledge(&self, user_id: Uuid, id: Uuid, status: ReminderStatus) -> Option<Reminder> {
        let mut reminder = self.find_by_id(user_id, id)?;
        reminder.acknowledge(status, Utc::now());
        Some(reminder)
    }

    /// Delete a reminder; false if it does not exist
    pub fn delete(&self, user_id: Uuid, id: Uuid) -> bool {
        self.find_by_id(user_id, id).is_some()
    }
}
