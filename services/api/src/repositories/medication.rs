//! Mock medication repository

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use common::models::{
    CreateMedicationRequest, Frequency, Medication, MedicationStatus, UpdateMedicationRequest,
};

use super::{ATORVASTATIN_ID, LISINOPRIL_ID, METFORMIN_ID, seed_time};

/// Medication repository backed by static mock data
#[derive(Clone, Default)]
pub struct MedicationRepository;

impl MedicationRepository {
    /// Create a new medication repository
    pub fn new() -> Self {
        Self
    }

    /// Get all medications of a user
    pub fn get_all(&self, user_id: Uuid) -> Vec<Medication> {
        let time = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

        vec![
            Medication {
                id: METFORMIN_ID,
                user_id,
                name: "Metformin".to_string(),
                dosage: "500mg".to_string(),
                frequency: Frequency::TwiceDaily,
                times: vec![time(8, 0), time(20, 0)],
                start_date: start,
                end_date: None,
                instructions: Some("Take with food".to_string()),
                status: MedicationStatus::Active,
                created_at: seed_time(0),
                updated_at: seed_time(0),
            },
            Medication {
                id: LISINOPRIL_ID,
                user_id,
                name: "Lisinopril".to_string(),
                dosage: "10mg".to_string(),
                frequency: Frequency::Daily,
                times: vec![time(8, 0)],
                start_date: start,
                end_date: None,
                instructions: None,
                status: MedicationStatus::Active,
                created_at: seed_time(1),
                updated_at: seed_time(1),
            },
            Medication {
                id: ATORVASTATIN_ID,
                user_id,
                name: "Atorvastatin".to_string(),
                dosage: "20mg".to_string(),
                frequency: Frequency::Daily,
                times: vec![time(22, 0)],
                start_date: start,
                end_date: None,
                instructions: Some("Take at bedtime".to_string()),
                status: MedicationStatus::Paused,
                created_at: seed_time(2),
                updated_at: seed_time(2),
            },
        ]
    }

    /// Find a medication by ID
    pub fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Option<Medication> {
        self.get_all(user_id).into_iter().find(|m| m.id == id)
    }

    /// Create a new medication
    pub fn create(&self, user_id: Uuid, payload: CreateMedicationRequest) -> Medication {
        let now = Utc::now();
        Medication {
            id: Uuid::new_v4(),
            user_id,
            name: payload.name,
            dosage: payload.dosage,
            frequency: payload.frequency,
            times: payload.times,
            start_date: payload.start_date,
            end_date: payload.end_date,
            instructions: payload.instructions,
            status: MedicationStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update a medication, returning the updated item
    pub fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: UpdateMedicationRequest,
    ) -> Option<Medication> {
        let mut medication = self.find_by_id(user_id, id)?;
        medication.apply(payload, Utc::now());
        Some(medication)
    }

    /// Delete a medication; false if it does not exist
    pub fn delete(&self, user_id: Uuid, id: Uuid) -> bool {
        self.find_by_id(user_id, id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_belongs_to_caller() {
        let user_id = Uuid::new_v4();
        let medications = MedicationRepository::new().get_all(user_id);
        assert_eq!(medications.len(), 3);
        assert!(medications.iter().all(|m| m.user_id == user_id));
    }

    #[test]
    fn test_update_unknown_is_none() {
        let repository = MedicationRepository::new();
        assert!(
            repository
                .update(Uuid::nil(), Uuid::new_v4(), UpdateMedicationRequest::default())
                .is_none()
        );
    }

    #[test]
    fn test_update_applies_fields() {
        let repository = MedicationRepository::new();
        let updated = repository
            .update(
                Uuid::nil(),
                METFORMIN_ID,
                UpdateMedicationRequest {
                    status: Some(MedicationStatus::Completed),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, MedicationStatus::Completed);
        assert_eq!(updated.name, "Metformin");
        assert!(updated.updated_at > updated.created_at);
    }
}
