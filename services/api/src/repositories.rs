//! Mock repositories
//!
//! The backend does not persist anything. Every user sees the same
//! deterministic seed data; writes are validated and echoed back but not
//! stored.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod medication;
pub mod reminder;
pub mod user;

pub use medication::MedicationRepository;
pub use reminder::ReminderRepository;
pub use user::UserRepository;

/// Seed data timestamp: 2024-01-01T00:00:00Z
const SEED_EPOCH_SECS: i64 = 1_704_067_200;

/// Time the seed data was created, offset by whole hours
pub(crate) fn seed_time(hours: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(SEED_EPOCH_SECS + hours * 3600, 0).unwrap_or_default()
}

/// The single account every login resolves to
pub const MOCK_USER_ID: Uuid = Uuid::from_u128(0x7573_6572_0000_0000_0000_0000_0000_0001);

/// Seed medication ids
pub const METFORMIN_ID: Uuid = Uuid::from_u128(0x6d65_6400_0000_0000_0000_0000_0000_0001);
pub const LISINOPRIL_ID: Uuid = Uuid::from_u128(0x6d65_6400_0000_0000_0000_0000_0000_0002);
pub const ATORVASTATIN_ID: Uuid = Uuid::from_u128(0x6d65_6400_0000_0000_0000_0000_0000_0003);

/// Seed reminder ids
pub const MORNING_METFORMIN_ID: Uuid = Uuid::from_u128(0x7265_6d00_0000_0000_0000_0000_0000_0001);
pub const MORNING_LISINOPRIL_ID: Uuid = Uuid::from_u128(0x7265_6d00_0000_0000_0000_0000_0000_0002);
pub const EVENING_METFORMIN_ID: Uuid = Uuid::from_u128(0x7265_6d00_0000_0000_0000_0000_0000_0003);
pub const NIGHT_ATORVASTATIN_ID: Uuid = Uuid::from_u128(0x7265_6d00_0000_0000_0000_0000_0000_0004);
