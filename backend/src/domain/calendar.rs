//! Calendar domain logic for the medication tracker.
//!
//! This module contains all business logic related to calendar operations:
//! month-grid generation (including leading/trailing padding cells), date
//! calculations, and month navigation. The UI should only handle
//! presentation concerns, while all calendar computations are handled here.

use crate::domain::event_index::EventIndex;
use crate::domain::models::DayOfWeek;
use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use shared::{CalendarDay, CalendarDayType, CalendarFocusDate, CalendarMonth, CurrentDateResponse};
use std::sync::{Arc, Mutex};

/// Calendar service that handles all calendar-related business logic
#[derive(Clone)]
pub struct CalendarService {
    /// Current focus date for calendar navigation (month/year only).
    /// Kept in memory and never persisted.
    current_focus_date: Arc<Mutex<CalendarFocusDate>>,
}

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new() -> Self {
        Self {
            current_focus_date: Arc::new(Mutex::new(CalendarFocusDate::default())),
        }
    }

    /// Generate a calendar month grid with event markers.
    ///
    /// The grid starts on `first_weekday` and its length is always a
    /// multiple of 7: padding cells fill the positions before the 1st and
    /// after the last day of the month. Padding cells carry no date and no
    /// dot.
    pub fn generate_calendar_month(
        &self,
        month: u32,
        year: u32,
        first_weekday: DayOfWeek,
        events: &EventIndex,
    ) -> CalendarMonth {
        if month < 1 || month > 12 {
            debug!("🗓️ CALENDAR: invalid month {} requested, returning empty grid", month);
            return CalendarMonth {
                month,
                year,
                days: Vec::new(),
                first_day_of_week: first_weekday.ordinal(),
            };
        }

        let days_in_month = self.days_in_month(month, year);
        let first_of_month = self.first_weekday_of_month(month, year);

        let leading =
            (u32::from(first_of_month.ordinal()) + 7 - u32::from(first_weekday.ordinal())) % 7;
        let trailing = (7 - (days_in_month + leading) % 7) % 7;

        debug!(
            "🗓️ CALENDAR: {}/{} has {} days, {} leading and {} trailing padding cells",
            month, year, days_in_month, leading, trailing
        );

        let mut calendar_days =
            Vec::with_capacity((leading + days_in_month + trailing) as usize);

        for _ in 0..leading {
            calendar_days.push(CalendarDay {
                day: 0,
                date: None,
                has_event: false,
                day_type: CalendarDayType::PaddingBefore,
            });
        }

        for day in 1..=days_in_month {
            // Month is validated above and day never exceeds the month's
            // day count, so this cannot fail
            let date = NaiveDate::from_ymd_opt(year as i32, month, day)
                .expect("valid day of month");
            calendar_days.push(CalendarDay {
                day,
                date: Some(date.format("%Y-%m-%d").to_string()),
                has_event: events.has_event_on(date),
                day_type: CalendarDayType::MonthDay,
            });
        }

        for _ in 0..trailing {
            calendar_days.push(CalendarDay {
                day: 0,
                date: None,
                has_event: false,
                day_type: CalendarDayType::PaddingAfter,
            });
        }

        CalendarMonth {
            month,
            year,
            days: calendar_days,
            first_day_of_week: first_weekday.ordinal(),
        }
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the weekday of the first day of a month
    pub fn first_weekday_of_month(&self, month: u32, year: u32) -> DayOfWeek {
        match NaiveDate::from_ymd_opt(year as i32, month, 1) {
            Some(date) => DayOfWeek::from_weekday(date.weekday()),
            // Invalid month, fall back to Sunday
            None => DayOfWeek::Sunday,
        }
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Navigate to the previous month
    pub fn previous_month(&self, current_month: u32, current_year: u32) -> (u32, u32) {
        if current_month == 1 {
            (12, current_year - 1)
        } else {
            (current_month - 1, current_year)
        }
    }

    /// Navigate to the next month
    pub fn next_month(&self, current_month: u32, current_year: u32) -> (u32, u32) {
        if current_month == 12 {
            (1, current_year + 1)
        } else {
            (current_month + 1, current_year)
        }
    }

    /// Get current date information
    pub fn get_current_date(&self) -> CurrentDateResponse {
        let now = Local::now();
        let month = now.month();
        let year = now.year() as u32;
        let day = now.day();

        let month_name = self.month_name(month);
        let formatted_date = format!("{} {}, {}", month_name, day, year);
        let iso_date = format!("{:04}-{:02}-{:02}", year, month, day);

        CurrentDateResponse {
            month,
            year,
            day,
            formatted_date,
            iso_date,
        }
    }

    /// Get the current focus date for calendar navigation
    pub fn get_focus_date(&self) -> CalendarFocusDate {
        self.current_focus_date.lock().unwrap().clone()
    }

    /// Set the focus date for calendar navigation
    pub fn set_focus_date(&self, month: u32, year: u32) -> Result<CalendarFocusDate, String> {
        if month < 1 || month > 12 {
            return Err(format!("Invalid month: {}. Must be between 1 and 12", month));
        }

        let new_focus_date = CalendarFocusDate { month, year };

        {
            let mut focus_date = self.current_focus_date.lock().unwrap();
            *focus_date = new_focus_date.clone();
        }

        Ok(new_focus_date)
    }

    /// Navigate the focus date to the previous month
    pub fn navigate_previous_month(&self) -> CalendarFocusDate {
        let current_focus = self.get_focus_date();
        let (prev_month, prev_year) = self.previous_month(current_focus.month, current_focus.year);

        // This should never fail since previous_month returns valid values
        self.set_focus_date(prev_month, prev_year).unwrap()
    }

    /// Navigate the focus date to the next month
    pub fn navigate_next_month(&self) -> CalendarFocusDate {
        let current_focus = self.get_focus_date();
        let (next_month, next_year) = self.next_month(current_focus.month, current_focus.year);

        // This should never fail since next_month returns valid values
        self.set_focus_date(next_month, next_year).unwrap()
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
