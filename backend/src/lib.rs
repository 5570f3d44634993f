//! # Medication Tracker Backend
//!
//! This backend provides the domain services behind the medication tracker
//! UI: the medication record store, weekday schedule resolution, reminder
//! trigger planning, and the calendar month grid. The UI layer only handles
//! presentation; everything here is synchronous and exposed as plain method
//! calls.
//!
//! Persistence is a single JSON blob in the data directory; reminders are
//! handed off best-effort to an injected notification scheduler.

use anyhow::Result;
use chrono::NaiveDate;
use shared::{
    CalendarMonth, CalendarMonthRequest, DayMedicationsRequest, MedicationListResponse,
    UpdateCalendarFocusRequest, UpdateCalendarFocusResponse,
};
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod notifications;
pub mod storage;

pub use notifications::{NullScheduler, ReminderScheduler};
pub use storage::JsonConnection;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub medication_service: domain::MedicationService,
    pub calendar_service: domain::CalendarService,
    pub schedule_service: domain::ScheduleService,
    pub reminder_service: domain::ReminderService,
    pub event_index: domain::EventIndex,
}

impl Backend {
    /// Create a backend over the given data directory and scheduler
    pub fn new<P: AsRef<Path>>(
        data_directory: P,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new(data_directory)?);
        Ok(Self::with_connection(connection, scheduler))
    }

    /// Create a backend over the default data directory
    pub fn new_default(scheduler: Arc<dyn ReminderScheduler>) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new_default()?);
        Ok(Self::with_connection(connection, scheduler))
    }

    fn with_connection(
        connection: Arc<JsonConnection>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> Self {
        let repository = Arc::new(storage::MedicationRepository::new(connection));

        let reminder_service = domain::ReminderService::new(scheduler);
        let medication_service =
            domain::MedicationService::new(repository, reminder_service.clone());
        let calendar_service = domain::CalendarService::new();
        let schedule_service = domain::ScheduleService::new();
        let event_index = domain::EventIndex::new();

        Backend {
            medication_service,
            calendar_service,
            schedule_service,
            reminder_service,
            event_index,
        }
    }

    /// Calendar month grid for a UI request, rendered with the event index.
    /// The grid is Sunday-first; call the calendar service directly for a
    /// different first weekday.
    pub fn calendar_month(&self, request: CalendarMonthRequest) -> CalendarMonth {
        self.calendar_service.generate_calendar_month(
            request.month,
            request.year,
            domain::models::DayOfWeek::Sunday,
            &self.event_index,
        )
    }

    /// Update the calendar focus date from a UI request
    pub fn update_calendar_focus(
        &self,
        request: UpdateCalendarFocusRequest,
    ) -> Result<UpdateCalendarFocusResponse> {
        let focus_date = self
            .calendar_service
            .set_focus_date(request.month, request.year)
            .map_err(|e| anyhow::anyhow!(e))?;

        Ok(UpdateCalendarFocusResponse {
            focus_date,
            success_message: "Calendar focus updated".to_string(),
        })
    }

    /// Medications active on the requested day
    pub fn medications_on_day(
        &self,
        request: DayMedicationsRequest,
    ) -> Result<MedicationListResponse> {
        let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date {}: {}", request.date, e))?;

        Ok(self.medication_service.medications_on(date))
    }
}
