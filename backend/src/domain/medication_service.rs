//! Medication record store.
//!
//! Owns the in-memory medication collection and its persistence. Every
//! mutation (add, update, delete) rewrites the whole collection through the
//! storage layer before it commits to memory and returns, so callers always
//! observe either the old or the new state. Reminder scheduling runs after a
//! successful mutation; its failures are logged and never fail the mutation.

use crate::domain::models::{DayOfWeek, Frequency, Medication, MedicationValidationError};
use crate::domain::reminder::ReminderService;
use crate::domain::schedule::ScheduleService;
use crate::storage::MedicationStorage;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use shared::{
    AddMedicationRequest, DeleteMedicationResponse, MedicationListResponse, MedicationResponse,
    UpdateMedicationRequest,
};
use std::sync::{Arc, Mutex};

/// Service for managing the medication collection
#[derive(Clone)]
pub struct MedicationService {
    medications: Arc<Mutex<Vec<Medication>>>,
    storage: Arc<dyn MedicationStorage>,
    reminder_service: ReminderService,
    schedule_service: ScheduleService,
}

impl MedicationService {
    /// Create a new MedicationService, loading the persisted collection.
    ///
    /// An unreadable or undecodable blob degrades to an empty collection
    /// with a warning; it never fails construction.
    pub fn new(storage: Arc<dyn MedicationStorage>, reminder_service: ReminderService) -> Self {
        let medications = match storage.load_medications() {
            Ok(medications) => {
                info!("Loaded {} medications", medications.len());
                medications
            }
            Err(e) => {
                warn!("Failed to load medication collection, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            medications: Arc::new(Mutex::new(medications)),
            storage,
            reminder_service,
            schedule_service: ScheduleService::new(),
        }
    }

    /// Create a new medication and schedule its reminders
    pub fn add_medication(&self, request: AddMedicationRequest) -> Result<MedicationResponse> {
        info!("Adding medication: name={}", request.name);

        let name = validated_name(&request.name)?;
        let dosage = validated_dosage(&request.dosage)?;
        let time_of_day = parse_time_of_day(&request.time_of_day)?;
        let frequency = Frequency::from_str_value(&request.frequency)?;
        let days_of_week = parse_days_of_week(&request.days_of_week)?;

        let now = Utc::now();

        let medication = {
            let mut medications = self.medications.lock().unwrap();

            let medication = Medication {
                id: next_medication_id(&medications, now.timestamp_millis() as u64),
                name,
                dosage,
                time_of_day,
                frequency,
                days_of_week,
                created_at: now,
                updated_at: now,
            };

            let mut next = medications.clone();
            next.push(medication.clone());
            self.storage.save_medications(&next)?;
            *medications = next;

            medication
        };

        self.reminder_service.schedule_reminders(&medication);

        info!("Added medication: {} with ID: {}", medication.name, medication.id);

        Ok(MedicationResponse {
            medication: to_dto(&medication),
            success_message: "Medication added successfully".to_string(),
        })
    }

    /// Update an existing medication in place, preserving its identity,
    /// and replace its scheduled reminders
    pub fn update_medication(
        &self,
        medication_id: &str,
        request: UpdateMedicationRequest,
    ) -> Result<MedicationResponse> {
        info!("Updating medication: {}", medication_id);

        let medication = {
            let mut medications = self.medications.lock().unwrap();

            let index = medications
                .iter()
                .position(|m| m.id == medication_id)
                .ok_or_else(|| anyhow::anyhow!("Medication not found: {}", medication_id))?;

            let mut updated = medications[index].clone();
            if let Some(name) = request.name {
                updated.name = validated_name(&name)?;
            }
            if let Some(dosage) = request.dosage {
                updated.dosage = validated_dosage(&dosage)?;
            }
            if let Some(time_of_day) = request.time_of_day {
                updated.time_of_day = parse_time_of_day(&time_of_day)?;
            }
            if let Some(frequency) = request.frequency {
                updated.frequency = Frequency::from_str_value(&frequency)?;
            }
            if let Some(days_of_week) = request.days_of_week {
                updated.days_of_week = parse_days_of_week(&days_of_week)?;
            }
            updated.updated_at = Utc::now();

            let mut next = medications.clone();
            next[index] = updated.clone();
            self.storage.save_medications(&next)?;
            *medications = next;

            updated
        };

        self.reminder_service.schedule_reminders(&medication);

        info!("Updated medication: {} with ID: {}", medication.name, medication.id);

        Ok(MedicationResponse {
            medication: to_dto(&medication),
            success_message: "Medication updated successfully".to_string(),
        })
    }

    /// Delete a medication and cancel its scheduled reminders
    pub fn delete_medication(&self, medication_id: &str) -> Result<DeleteMedicationResponse> {
        info!("Deleting medication: {}", medication_id);

        let removed = {
            let mut medications = self.medications.lock().unwrap();

            let index = medications
                .iter()
                .position(|m| m.id == medication_id)
                .ok_or_else(|| anyhow::anyhow!("Medication not found: {}", medication_id))?;

            let mut next = medications.clone();
            let removed = next.remove(index);
            self.storage.save_medications(&next)?;
            *medications = next;

            removed
        };

        self.reminder_service.cancel_reminders(&removed);

        info!("Deleted medication: {} with ID: {}", removed.name, removed.id);

        Ok(DeleteMedicationResponse {
            medication_id: removed.id,
            success_message: "Medication deleted successfully".to_string(),
        })
    }

    /// List the full medication collection
    pub fn list_medications(&self) -> MedicationListResponse {
        let medications = self.medications.lock().unwrap();
        MedicationListResponse {
            medications: medications.iter().map(to_dto).collect(),
        }
    }

    /// Get a single medication by ID
    pub fn get_medication(&self, medication_id: &str) -> Option<shared::Medication> {
        let medications = self.medications.lock().unwrap();
        medications
            .iter()
            .find(|m| m.id == medication_id)
            .map(to_dto)
    }

    /// List the medications active on the given date
    pub fn medications_on(&self, date: NaiveDate) -> MedicationListResponse {
        let medications = self.medications.lock().unwrap();
        MedicationListResponse {
            medications: self
                .schedule_service
                .medications_on(&medications, date)
                .into_iter()
                .map(to_dto)
                .collect(),
        }
    }
}

/// Map a domain medication to its DTO form
fn to_dto(medication: &Medication) -> shared::Medication {
    shared::Medication {
        id: medication.id.clone(),
        name: medication.name.clone(),
        dosage: medication.dosage.clone(),
        time_of_day: medication.time_of_day.to_rfc3339(),
        frequency: medication.frequency.as_str().to_string(),
        days_of_week: medication
            .days_of_week
            .iter()
            .map(|day| day.ordinal())
            .collect(),
        created_at: medication.created_at.to_rfc3339(),
        updated_at: medication.updated_at.to_rfc3339(),
    }
}

fn validated_name(name: &str) -> Result<String, MedicationValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MedicationValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn validated_dosage(dosage: &str) -> Result<String, MedicationValidationError> {
    let trimmed = dosage.trim();
    if trimmed.is_empty() {
        return Err(MedicationValidationError::EmptyDosage);
    }
    Ok(trimmed.to_string())
}

fn parse_time_of_day(value: &str) -> Result<DateTime<Utc>, MedicationValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| MedicationValidationError::InvalidTimeOfDay(value.to_string()))
}

fn parse_days_of_week(ordinals: &[u8]) -> Result<Vec<DayOfWeek>, MedicationValidationError> {
    ordinals
        .iter()
        .map(|&ordinal| DayOfWeek::from_ordinal(ordinal))
        .collect()
}

/// Surrogate ID for a new medication, unique within the collection even
/// when two additions land on the same millisecond
fn next_medication_id(medications: &[Medication], epoch_millis: u64) -> String {
    let mut millis = epoch_millis;
    loop {
        let candidate = shared::Medication::generate_id(millis);
        if !medications.iter().any(|m| m.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
