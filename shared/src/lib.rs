use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::Datelike;

/// Medication ID in format: "medication::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    /// Dosage text exactly as entered, e.g. "100mg"
    pub dosage: String,
    /// Time the reminder fires each day (RFC 3339; only hour/minute matter
    /// for recurrence)
    pub time_of_day: String,
    /// Frequency as stored: "daily", "weekly" or "justOnce"
    pub frequency: String,
    /// 1-based weekday ordinals (1 = Sunday .. 7 = Saturday), may be empty
    pub days_of_week: Vec<u8>,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// Request for creating a new medication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddMedicationRequest {
    pub name: String,
    pub dosage: String,
    /// RFC 3339 timestamp carrying the reminder hour/minute
    pub time_of_day: String,
    /// "daily", "weekly" or "justOnce"
    pub frequency: String,
    /// 1-based weekday ordinals (1 = Sunday .. 7 = Saturday)
    pub days_of_week: Vec<u8>,
}

/// Request for updating an existing medication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateMedicationRequest {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub time_of_day: Option<String>,
    pub frequency: Option<String>,
    pub days_of_week: Option<Vec<u8>>,
}

/// Response after creating or updating a medication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationResponse {
    pub medication: Medication,
    pub success_message: String,
}

/// Response containing a list of medications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationListResponse {
    pub medications: Vec<Medication>,
}

/// Response after deleting a medication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteMedicationResponse {
    pub medication_id: String,
    pub success_message: String,
}

/// Request for the medications active on a specific calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayMedicationsRequest {
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CalendarDayType {
    /// Empty padding day before the start of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Empty padding day after the end of the month (for grid alignment)
    PaddingAfter,
}

/// Represents a calendar month as a 7-column grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: u32,
    pub days: Vec<CalendarDay>,
    /// First column of the grid (1 = Sunday .. 7 = Saturday)
    pub first_day_of_week: u8,
}

/// Represents a single cell in the calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    /// Day of month, 0 for padding cells
    pub day: u32,
    /// ISO 8601 date (YYYY-MM-DD), None for padding cells
    pub date: Option<String>,
    /// Whether a dot indicator should render on this cell
    pub has_event: bool,
    pub day_type: CalendarDayType,
}

/// Request for calendar month data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonthRequest {
    pub month: u32,
    pub year: u32,
}

/// Represents the current focus date for calendar navigation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarFocusDate {
    pub month: u32,
    pub year: u32,
}

impl Default for CalendarFocusDate {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year() as u32,
        }
    }
}

/// Request to update the calendar focus date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusRequest {
    pub month: u32,
    pub year: u32,
}

/// Response after updating calendar focus date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusResponse {
    pub focus_date: CalendarFocusDate,
    pub success_message: String,
}

/// Current date information from the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: u32,
    pub day: u32,
    pub formatted_date: String, // e.g., "June 19, 2025"
    pub iso_date: String,       // e.g., "2025-06-19"
}

/// A concrete recurring trigger handed to the notification scheduler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriggerSpec {
    /// 1-based weekday ordinal (1 = Sunday .. 7 = Saturday); None matches
    /// every day
    pub weekday: Option<u8>,
    pub hour: u32,
    pub minute: u32,
    pub repeats: bool,
}

/// A reminder submission for the notification scheduler boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderRequest {
    /// Identifier the scheduler keys the reminder by; resubmitting the same
    /// identifier replaces the prior reminder
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub trigger: TriggerSpec,
}

impl Medication {
    /// Generate a medication ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("medication::{}", epoch_millis)
    }

    /// Parse a medication ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, MedicationIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "medication" {
            return Err(MedicationIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| MedicationIdError::InvalidTimestamp)
    }

    /// Extract timestamp from medication ID
    pub fn extract_timestamp(&self) -> Result<u64, MedicationIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MedicationIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for MedicationIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedicationIdError::InvalidFormat => write!(f, "Invalid medication ID format"),
            MedicationIdError::InvalidTimestamp => write!(f, "Invalid timestamp in medication ID"),
        }
    }
}

impl std::error::Error for MedicationIdError {}

impl TriggerSpec {
    /// Trigger that fires every day at the given time
    pub fn daily(hour: u32, minute: u32) -> Self {
        Self {
            weekday: None,
            hour,
            minute,
            repeats: true,
        }
    }

    /// Trigger that fires every week on the given weekday ordinal
    pub fn weekly(weekday: u8, hour: u32, minute: u32) -> Self {
        Self {
            weekday: Some(weekday),
            hour,
            minute,
            repeats: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_medication_id() {
        let id = Medication::generate_id(1702516122000);
        assert_eq!(id, "medication::1702516122000");
    }

    #[test]
    fn test_parse_medication_id() {
        // Test valid ID
        let timestamp = Medication::parse_id("medication::1702516122000").unwrap();
        assert_eq!(timestamp, 1702516122000);

        // Test invalid format
        assert!(Medication::parse_id("invalid::format").is_err());
        assert!(Medication::parse_id("medication").is_err());
        assert!(Medication::parse_id("not_medication::123").is_err());

        // Test invalid timestamp
        assert!(Medication::parse_id("medication::not_a_number").is_err());
    }

    #[test]
    fn test_extract_timestamp() {
        let medication = Medication {
            id: "medication::1702516122000".to_string(),
            name: "Aspirin".to_string(),
            dosage: "100mg".to_string(),
            time_of_day: "2023-12-14T09:00:00Z".to_string(),
            frequency: "daily".to_string(),
            days_of_week: vec![2, 6],
            created_at: "2023-12-14T01:02:02.000Z".to_string(),
            updated_at: "2023-12-14T01:02:02.000Z".to_string(),
        };

        assert_eq!(medication.extract_timestamp().unwrap(), 1702516122000);
    }

    #[test]
    fn test_medication_serde_round_trip() {
        let medication = Medication {
            id: "medication::1702516122000".to_string(),
            name: "Aspirin".to_string(),
            dosage: "100mg".to_string(),
            time_of_day: "2023-12-14T09:00:00Z".to_string(),
            frequency: "daily".to_string(),
            days_of_week: vec![2, 6],
            created_at: "2023-12-14T01:02:02.000Z".to_string(),
            updated_at: "2023-12-14T01:02:02.000Z".to_string(),
        };

        let json = serde_json::to_string(&medication).unwrap();
        let parsed: Medication = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, medication);
    }

    #[test]
    fn test_trigger_spec_constructors() {
        let daily = TriggerSpec::daily(9, 30);
        assert_eq!(daily.weekday, None);
        assert_eq!(daily.hour, 9);
        assert_eq!(daily.minute, 30);
        assert!(daily.repeats);

        let weekly = TriggerSpec::weekly(2, 8, 0);
        assert_eq!(weekly.weekday, Some(2));
        assert!(weekly.repeats);
    }
}
