//! JSON-blob medication repository.
//!
//! The whole collection persists as a single JSON array under a fixed key,
//! matching the app's original on-device storage:
//!
//! ```json
//! [
//!   {
//!     "id": "medication::1702516122000",
//!     "name": "Aspirin",
//!     "dosage": "100mg",
//!     "timeOfDay": "2025-06-13T09:00:00Z",
//!     "frequency": "daily",
//!     "selectedDaysOfWeek": [2, 6],
//!     "createdAt": "2025-06-13T08:59:00Z",
//!     "updatedAt": "2025-06-13T08:59:00Z"
//!   }
//! ]
//! ```

use crate::domain::models::{DayOfWeek, Frequency, Medication};
use crate::storage::json::connection::JsonConnection;
use crate::storage::traits::{MedicationStorage, PersistenceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fixed key the collection is stored under
const MEDICATIONS_KEY: &str = "medications";

/// Intermediate struct pinning the stored JSON field names and value shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonMedication {
    id: String,
    name: String,
    dosage: String,
    #[serde(rename = "timeOfDay")]
    time_of_day: String,
    frequency: String,
    #[serde(rename = "selectedDaysOfWeek")]
    selected_days_of_week: Vec<u8>,
    #[serde(rename = "createdAt")]
    created_at: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
}

impl JsonMedication {
    fn from_domain(medication: &Medication) -> Self {
        Self {
            id: medication.id.clone(),
            name: medication.name.clone(),
            dosage: medication.dosage.clone(),
            time_of_day: medication.time_of_day.to_rfc3339(),
            frequency: medication.frequency.as_str().to_string(),
            selected_days_of_week: medication
                .days_of_week
                .iter()
                .map(|day| day.ordinal())
                .collect(),
            created_at: medication.created_at.to_rfc3339(),
            updated_at: medication.updated_at.to_rfc3339(),
        }
    }

    fn into_domain(self) -> Result<Medication, PersistenceError> {
        let time_of_day = parse_timestamp(&self.time_of_day)?;
        let created_at = parse_timestamp(&self.created_at)?;
        let updated_at = parse_timestamp(&self.updated_at)?;

        let frequency = Frequency::from_str_value(&self.frequency)
            .map_err(|e| PersistenceError::InvalidRecord(e.to_string()))?;

        let days_of_week = self
            .selected_days_of_week
            .into_iter()
            .map(|ordinal| {
                DayOfWeek::from_ordinal(ordinal)
                    .map_err(|e| PersistenceError::InvalidRecord(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Medication {
            id: self.id,
            name: self.name,
            dosage: self.dosage,
            time_of_day,
            frequency,
            days_of_week,
            created_at,
            updated_at,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PersistenceError::InvalidRecord(format!("bad timestamp {value:?}: {e}")))
}

/// JSON-blob repository for the medication collection
#[derive(Clone)]
pub struct MedicationRepository {
    connection: Arc<JsonConnection>,
}

impl MedicationRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }
}

impl MedicationStorage for MedicationRepository {
    fn load_medications(&self) -> Result<Vec<Medication>, PersistenceError> {
        let blob = match self.connection.read_value(MEDICATIONS_KEY)? {
            Some(blob) => blob,
            None => return Ok(Vec::new()),
        };

        let records: Vec<JsonMedication> =
            serde_json::from_str(&blob).map_err(PersistenceError::Deserialize)?;

        records
            .into_iter()
            .map(JsonMedication::into_domain)
            .collect()
    }

    fn save_medications(&self, medications: &[Medication]) -> Result<(), PersistenceError> {
        let records: Vec<JsonMedication> = medications
            .iter()
            .map(JsonMedication::from_domain)
            .collect();

        let blob =
            serde_json::to_string_pretty(&records).map_err(PersistenceError::Serialize)?;

        self.connection.write_value(MEDICATIONS_KEY, &blob)
    }
}
