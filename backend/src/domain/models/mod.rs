pub mod medication;

pub use medication::{DayOfWeek, Frequency, Medication, MedicationValidationError};
