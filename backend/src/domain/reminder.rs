//! Reminder trigger planning and scheduler hand-off.
//!
//! Planning is pure: a medication's recurrence rule expands to one repeating
//! trigger per selected weekday, or a single every-day trigger when no
//! weekdays are selected. Hand-off to the external scheduler is best-effort
//! and keyed by the medication's identifier; replacing a medication's
//! schedule cancels the old trigger set before resubmitting.

use crate::domain::models::Medication;
use crate::notifications::ReminderScheduler;
use chrono::Timelike;
use log::{error, info};
use shared::{ReminderRequest, TriggerSpec};
use std::sync::Arc;

/// Service that plans reminder triggers and hands them to the scheduler
#[derive(Clone)]
pub struct ReminderService {
    scheduler: Arc<dyn ReminderScheduler>,
}

impl ReminderService {
    pub fn new(scheduler: Arc<dyn ReminderScheduler>) -> Self {
        Self { scheduler }
    }

    /// Expand a medication's recurrence rule into concrete trigger specs.
    ///
    /// One repeating trigger per selected weekday, each at the medication's
    /// hour/minute; with no selected weekdays, a single trigger that matches
    /// every day.
    pub fn plan(&self, medication: &Medication) -> Vec<TriggerSpec> {
        let hour = medication.time_of_day.hour();
        let minute = medication.time_of_day.minute();

        if medication.days_of_week.is_empty() {
            return vec![TriggerSpec::daily(hour, minute)];
        }

        medication
            .days_of_week
            .iter()
            .map(|day| TriggerSpec::weekly(day.ordinal(), hour, minute))
            .collect()
    }

    /// Replace the medication's scheduled reminders with a fresh trigger set.
    ///
    /// Cancels anything previously scheduled under the medication's
    /// identifier first, then submits one request per planned trigger.
    /// Scheduler failures are logged and never propagate.
    pub fn schedule_reminders(&self, medication: &Medication) {
        self.cancel_reminders(medication);

        for trigger in self.plan(medication) {
            let name = medication.name.clone();
            let identifier = medication.id.clone();

            let request = ReminderRequest {
                identifier: medication.id.clone(),
                title: "Medication Reminder".to_string(),
                body: format!("It's time to take {}.", medication.name),
                trigger,
            };

            self.scheduler.submit(
                request,
                Box::new(move |result| match result {
                    Ok(()) => info!("Reminder scheduled for {} ({})", name, identifier),
                    Err(e) => error!("Error scheduling reminder for {}: {}", name, e),
                }),
            );
        }
    }

    /// Drop every reminder scheduled under the medication's identifier
    pub fn cancel_reminders(&self, medication: &Medication) {
        self.scheduler.cancel(std::slice::from_ref(&medication.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DayOfWeek, Frequency};
    use crate::notifications::CompletionCallback;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    /// Test double that records every submission and cancellation in order
    #[derive(Default)]
    struct RecordingScheduler {
        submitted: Mutex<Vec<ReminderRequest>>,
        cancelled: Mutex<Vec<String>>,
    }

    impl ReminderScheduler for RecordingScheduler {
        fn submit(&self, request: ReminderRequest, on_complete: CompletionCallback) {
            self.submitted.lock().unwrap().push(request);
            on_complete(Ok(()));
        }

        fn cancel(&self, identifiers: &[String]) {
            self.cancelled.lock().unwrap().extend_from_slice(identifiers);
        }
    }

    fn test_medication(days: Vec<DayOfWeek>) -> Medication {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        Medication {
            id: "medication::1".to_string(),
            name: "Aspirin".to_string(),
            dosage: "100mg".to_string(),
            time_of_day: now,
            frequency: Frequency::Daily,
            days_of_week: days,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_plan_one_trigger_per_selected_weekday() {
        let service = ReminderService::new(Arc::new(RecordingScheduler::default()));
        let medication = test_medication(vec![
            DayOfWeek::Monday,
            DayOfWeek::Wednesday,
            DayOfWeek::Friday,
        ]);

        let triggers = service.plan(&medication);
        assert_eq!(triggers.len(), 3);

        let weekdays: Vec<Option<u8>> = triggers.iter().map(|t| t.weekday).collect();
        assert_eq!(weekdays, vec![Some(2), Some(4), Some(6)]);

        for trigger in &triggers {
            assert_eq!(trigger.hour, 9);
            assert_eq!(trigger.minute, 0);
            assert!(trigger.repeats);
        }
    }

    #[test]
    fn test_plan_empty_weekday_set_yields_single_daily_trigger() {
        let service = ReminderService::new(Arc::new(RecordingScheduler::default()));
        let medication = test_medication(vec![]);

        let triggers = service.plan(&medication);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].weekday, None);
        assert_eq!(triggers[0].hour, 9);
        assert_eq!(triggers[0].minute, 0);
        assert!(triggers[0].repeats);
    }

    #[test]
    fn test_schedule_reminders_supersedes_by_identifier() {
        let scheduler = Arc::new(RecordingScheduler::default());
        let service = ReminderService::new(scheduler.clone());
        let medication = test_medication(vec![DayOfWeek::Monday, DayOfWeek::Friday]);

        service.schedule_reminders(&medication);

        // The old trigger set is cancelled before anything is submitted
        assert_eq!(
            *scheduler.cancelled.lock().unwrap(),
            vec!["medication::1".to_string()]
        );

        let submitted = scheduler.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 2);
        for request in submitted.iter() {
            assert_eq!(request.identifier, "medication::1");
            assert_eq!(request.title, "Medication Reminder");
            assert_eq!(request.body, "It's time to take Aspirin.");
        }
    }

    #[test]
    fn test_cancel_reminders() {
        let scheduler = Arc::new(RecordingScheduler::default());
        let service = ReminderService::new(scheduler.clone());
        let medication = test_medication(vec![DayOfWeek::Monday]);

        service.cancel_reminders(&medication);

        assert_eq!(
            *scheduler.cancelled.lock().unwrap(),
            vec!["medication::1".to_string()]
        );
        assert!(scheduler.submitted.lock().unwrap().is_empty());
    }
}
