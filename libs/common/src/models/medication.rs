//! Medication models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a medication is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    TwiceDaily,
    ThreeTimesDaily,
    Weekly,
    AsNeeded,
}

/// Medication lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicationStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

/// Medication model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: Frequency,
    /// Times of day a dose is due
    pub times: Vec<NaiveTime>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub instructions: Option<String>,
    pub status: MedicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for medication creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicationRequest {
    pub name: String,
    pub dosage: String,
    pub frequency: Frequency,
    pub times: Vec<NaiveTime>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Medication update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedicationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<NaiveTime>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MedicationStatus>,
}

impl Medication {
    /// Apply an update payload in place
    pub fn apply(&mut self, update: UpdateMedicationRequest, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(dosage) = update.dosage {
            self.dosage = dosage;
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency;
        }
        if let Some(times) = update.times {
            self.times = times;
        }
        if update.end_date.is_some() {
            self.end_date = update.end_date;
        }
        if update.instructions.is_some() {
            self.instructions = update.instructions;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_wire_format() {
        let json = serde_json::to_string(&Frequency::TwiceDaily).unwrap();
        assert_eq!(json, "\"twice_daily\"");
    }

    #[test]
    fn test_apply_leaves_absent_fields() {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut medication = Medication {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            name: "Metformin".to_string(),
            dosage: "500mg".to_string(),
            frequency: Frequency::TwiceDaily,
            times: vec![NaiveTime::from_hms_opt(8, 0, 0).unwrap()],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            instructions: None,
            status: MedicationStatus::Active,
            created_at: created,
            updated_at: created,
        };

        let later = DateTime::from_timestamp(1_700_000_100, 0).unwrap();
        medication.apply(
            UpdateMedicationRequest {
                dosage: Some("850mg".to_string()),
                ..Default::default()
            },
            later,
        );

        assert_eq!(medication.name, "Metformin");
        assert_eq!(medication.dosage, "850mg");
        assert_eq!(medication.updated_at, later);
    }
}
