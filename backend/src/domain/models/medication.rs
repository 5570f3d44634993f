use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Day of the week with the standard calendar's 1-based weekday numbering
/// (Sunday = 1 .. Saturday = 7), used both for list filtering and for
/// reminder trigger generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayOfWeek {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// The 1-based calendar ordinal (Sunday = 1 .. Saturday = 7)
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Parse a 1-based calendar ordinal
    pub fn from_ordinal(ordinal: u8) -> Result<Self, MedicationValidationError> {
        match ordinal {
            1 => Ok(DayOfWeek::Sunday),
            2 => Ok(DayOfWeek::Monday),
            3 => Ok(DayOfWeek::Tuesday),
            4 => Ok(DayOfWeek::Wednesday),
            5 => Ok(DayOfWeek::Thursday),
            6 => Ok(DayOfWeek::Friday),
            7 => Ok(DayOfWeek::Saturday),
            _ => Err(MedicationValidationError::InvalidDayOfWeek(ordinal)),
        }
    }

    /// Convert from chrono's weekday (Monday-first) to calendar numbering
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }

    /// Get the human-readable name for this day
    pub fn day_name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = MedicationValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayOfWeek::from_ordinal(value)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> u8 {
        day.ordinal()
    }
}

/// How often a medication is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Frequency {
    Daily,
    Weekly,
    JustOnce,
}

impl Frequency {
    /// Convert to the stored string form
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::JustOnce => "justOnce",
        }
    }

    /// Parse from the stored string form
    pub fn from_str_value(s: &str) -> Result<Self, MedicationValidationError> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "justOnce" => Ok(Frequency::JustOnce),
            _ => Err(MedicationValidationError::InvalidFrequency(s.to_string())),
        }
    }
}

/// Domain model representing a medication and its recurrence rule.
///
/// `id` is a surrogate identifier generated at creation time and preserved
/// across edits; reminder scheduling is keyed by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    /// Only the hour/minute components drive recurrence; the date part is
    /// carried as entered
    pub time_of_day: DateTime<Utc>,
    pub frequency: Frequency,
    /// Selected weekdays; empty means no explicit weekday selection
    pub days_of_week: Vec<DayOfWeek>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum MedicationValidationError {
    #[error("Medication name cannot be empty")]
    EmptyName,
    #[error("Dosage cannot be empty")]
    EmptyDosage,
    #[error("Invalid day of week ordinal: {0} (expected 1-7)")]
    InvalidDayOfWeek(u8),
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),
}
