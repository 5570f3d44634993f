//! Weekday-based schedule resolution.
//!
//! Determines whether a medication's recurrence rule makes it active on a
//! given calendar date. A medication with no selected weekdays never matches
//! the filter; this mirrors the list-view behavior the rest of the system is
//! built around (see DESIGN.md).

use crate::domain::models::{DayOfWeek, Medication};
use chrono::{Datelike, NaiveDate};

/// Service answering "is this medication active on this date?"
#[derive(Clone)]
pub struct ScheduleService;

impl ScheduleService {
    pub fn new() -> Self {
        Self
    }

    /// Whether the medication is active on the given date.
    ///
    /// Membership is decided purely by weekday ordinal; `frequency` plays no
    /// part in the decision. An empty weekday set matches no date.
    pub fn is_active_on(&self, medication: &Medication, date: NaiveDate) -> bool {
        if medication.days_of_week.is_empty() {
            return false;
        }

        let weekday = DayOfWeek::from_weekday(date.weekday());
        medication.days_of_week.contains(&weekday)
    }

    /// Filter a collection down to the medications active on the given date
    pub fn medications_on<'a>(
        &self,
        medications: &'a [Medication],
        date: NaiveDate,
    ) -> Vec<&'a Medication> {
        medications
            .iter()
            .filter(|medication| self.is_active_on(medication, date))
            .collect()
    }
}

impl Default for ScheduleService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Frequency;
    use chrono::{TimeZone, Utc};

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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_active_only_on_selected_weekdays() {
        let service = ScheduleService::new();
        let medication = test_medication(vec![DayOfWeek::Monday, DayOfWeek::Wednesday]);

        // June 2025: 2nd is a Monday, 4th a Wednesday
        assert!(service.is_active_on(&medication, date(2025, 6, 2)));
        assert!(service.is_active_on(&medication, date(2025, 6, 4)));
        assert!(service.is_active_on(&medication, date(2025, 6, 9)));
        assert!(service.is_active_on(&medication, date(2025, 6, 11)));

        // Every other weekday of that week is inactive
        assert!(!service.is_active_on(&medication, date(2025, 6, 1))); // Sunday
        assert!(!service.is_active_on(&medication, date(2025, 6, 3))); // Tuesday
        assert!(!service.is_active_on(&medication, date(2025, 6, 5))); // Thursday
        assert!(!service.is_active_on(&medication, date(2025, 6, 6))); // Friday
        assert!(!service.is_active_on(&medication, date(2025, 6, 7))); // Saturday
    }

    #[test]
    fn test_empty_weekday_set_never_matches() {
        let service = ScheduleService::new();
        let medication = test_medication(vec![]);

        // A full week of dates, none active
        for day in 1..=7 {
            assert!(!service.is_active_on(&medication, date(2025, 6, day)));
        }
    }

    #[test]
    fn test_full_weekday_set_matches_every_day() {
        let service = ScheduleService::new();
        let medication = test_medication(DayOfWeek::ALL.to_vec());

        for day in 1..=7 {
            assert!(service.is_active_on(&medication, date(2025, 6, day)));
        }
    }

    #[test]
    fn test_medications_on_filters_collection() {
        let service = ScheduleService::new();
        let monday_med = test_medication(vec![DayOfWeek::Monday]);
        let friday_med = test_medication(vec![DayOfWeek::Friday]);
        let unscheduled = test_medication(vec![]);
        let medications = vec![monday_med, friday_med, unscheduled];

        // June 2, 2025 is a Monday
        let active = service.medications_on(&medications, date(2025, 6, 2));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].days_of_week, vec![DayOfWeek::Monday]);

        // June 6, 2025 is a Friday
        let active = service.medications_on(&medications, date(2025, 6, 6));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].days_of_week, vec![DayOfWeek::Friday]);

        // June 7, 2025 is a Saturday
        assert!(service.medications_on(&medications, date(2025, 6, 7)).is_empty());
    }
}
