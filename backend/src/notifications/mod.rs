//! # Notification Scheduler Boundary
//!
//! The tracker never delivers notifications itself; it hands trigger
//! specifications to an external scheduler (the OS notification service in
//! the shipped app). The boundary is best-effort: submissions return
//! immediately, the outcome arrives later through a completion callback, and
//! failures are logged rather than retried.

use log::debug;
use shared::ReminderRequest;

/// Error reported by the external scheduler for a single submission
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("Scheduler rejected reminder {identifier}: {reason}")]
    Rejected { identifier: String, reason: String },
    #[error("Notification scheduler is unavailable")]
    Unavailable,
}

/// Callback invoked once the scheduler has accepted or rejected a submission
pub type CompletionCallback = Box<dyn FnOnce(Result<(), SchedulingError>) + Send>;

/// External notification scheduler.
///
/// `submit` must return immediately; callers never block on the hand-off.
/// Resubmitting an identifier replaces any reminder previously scheduled
/// under it, and `cancel` drops all reminders for the given identifiers.
pub trait ReminderScheduler: Send + Sync {
    fn submit(&self, request: ReminderRequest, on_complete: CompletionCallback);

    fn cancel(&self, identifiers: &[String]);
}

/// Scheduler stand-in used when no OS notification service is wired up.
/// Accepts every submission and reports success.
#[derive(Clone, Default)]
pub struct NullScheduler;

impl NullScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl ReminderScheduler for NullScheduler {
    fn submit(&self, request: ReminderRequest, on_complete: CompletionCallback) {
        debug!(
            "No scheduler configured; dropping reminder {} ({} at {:02}:{:02})",
            request.identifier, request.title, request.trigger.hour, request.trigger.minute
        );
        on_complete(Ok(()));
    }

    fn cancel(&self, identifiers: &[String]) {
        debug!("No scheduler configured; nothing to cancel for {:?}", identifiers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TriggerSpec;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_null_scheduler_reports_success() {
        let scheduler = NullScheduler::new();
        let completed = Arc::new(AtomicBool::new(false));
        let completed_clone = completed.clone();

        scheduler.submit(
            ReminderRequest {
                identifier: "medication::1".to_string(),
                title: "Medication Reminder".to_string(),
                body: "It's time to take Aspirin.".to_string(),
                trigger: TriggerSpec::daily(9, 0),
            },
            Box::new(move |result| {
                assert!(result.is_ok());
                completed_clone.store(true, Ordering::SeqCst);
            }),
        );

        assert!(completed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_scheduling_error_messages() {
        let rejected = SchedulingError::Rejected {
            identifier: "medication::1".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(rejected.to_string().contains("medication::1"));
        assert!(rejected.to_string().contains("permission denied"));

        assert!(SchedulingError::Unavailable.to_string().contains("unavailable"));
    }
}
