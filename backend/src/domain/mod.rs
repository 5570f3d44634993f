pub mod calendar;
pub mod event_index;
pub mod medication_service;
pub mod models;
pub mod reminder;
pub mod schedule;

pub use calendar::CalendarService;
pub use event_index::EventIndex;
pub use medication_service::MedicationService;
pub use reminder::ReminderService;
pub use schedule::ScheduleService;
