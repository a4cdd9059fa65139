//! Endpoint registry
//!
//! One place for every REST path. Clients call [`Endpoint::path`] to build
//! concrete URLs; the backend mounts handlers on [`Endpoint::route`].

use uuid::Uuid;

/// A REST resource, with its identifier when it names a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    Logout,
    CurrentUser,
    Medications,
    Medication(Uuid),
    Reminders,
    Reminder(Uuid),
    AcknowledgeReminder(Uuid),
    SyncReminders,
    Health,
}

impl Endpoint {
    /// Concrete path, relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Endpoint::Medication(id) => format!("/medications/{}", id),
            Endpoint::Reminder(id) => format!("/reminders/{}", id),
            Endpoint::AcknowledgeReminder(id) => format!("/reminders/{}/acknowledge", id),
            other => other.route().to_string(),
        }
    }

    /// Router path template
    pub fn route(&self) -> &'static str {
        match self {
            Endpoint::Login => "/auth/login",
            Endpoint::Register => "/auth/register",
            Endpoint::Logout => "/auth/logout",
            Endpoint::CurrentUser => "/auth/me",
            Endpoint::Medications => "/medications",
            Endpoint::Medication(_) => "/medications/:id",
            Endpoint::Reminders => "/reminders",
            Endpoint::Reminder(_) => "/reminders/:id",
            Endpoint::AcknowledgeReminder(_) => "/reminders/:id/acknowledge",
            Endpoint::SyncReminders => "/api/reminders/sync",
            Endpoint::Health => "/health",
        }
    }
}
