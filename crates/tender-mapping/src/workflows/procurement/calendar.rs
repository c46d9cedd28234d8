use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("weekend covers every day of the week; no working days remain")]
    NoWorkingDays,
    #[error("adding {days} days to {from} leaves the supported date range")]
    OutOfRange { from: NaiveDate, days: i64 },
}

/// Calendar arithmetic with a configurable weekend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCalendar {
    weekend: Vec<Weekday>,
}

impl WorkingCalendar {
    pub fn new(weekend: impl IntoIterator<Item = Weekday>) -> Result<Self, CalendarError> {
        let mut days: Vec<Weekday> = Vec::new();
        for day in weekend {
            if !days.contains(&day) {
                days.push(day);
            }
        }
        if days.len() >= 7 {
            return Err(CalendarError::NoWorkingDays);
        }
        Ok(Self { weekend: days })
    }

    pub fn weekend(&self) -> &[Weekday] {
        &self.weekend
    }

    pub fn is_working_day(&self, date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
        !self.weekend.contains(&date.weekday()) && !holidays.contains(&date)
    }

    pub fn add_calendar_days(&self, date: NaiveDate, days: i64) -> Result<NaiveDate, CalendarError> {
        date.checked_add_signed(Duration::days(days))
            .ok_or(CalendarError::OutOfRange { from: date, days })
    }

    /// Steps forward one day at a time, counting only days outside the weekend and `holidays`.
    /// Zero returns `date` unchanged.
    pub fn add_working_days(
        &self,
        date: NaiveDate,
        days: u32,
        holidays: &BTreeSet<NaiveDate>,
    ) -> Result<NaiveDate, CalendarError> {
        let mut current = date;
        let mut counted = 0;

        while counted < days {
            current = current.succ_opt().ok_or(CalendarError::OutOfRange {
                from: date,
                days: i64::from(days),
            })?;
            if self.is_working_day(current, holidays) {
                counted += 1;
            }
        }

        Ok(current)
    }
}
