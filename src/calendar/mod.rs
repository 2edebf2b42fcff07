//! Gregorian calendar data for one year: month lengths, weekdays and weekend flags.

use chrono::{Datelike, NaiveDate};

use crate::cell::request::CellRequest;
use crate::config::LabelConfig;
use crate::foundation::error::{CalError, CalResult};

fn date(year: i32, month: u32, day: u32) -> CalResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CalError::validation(format!("{year:04}-{month:02}-{day:02} is not a date")))
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> CalResult<u32> {
    let first = date(year, month, 1)?;
    let next = if month == 12 {
        date(year + 1, 1, 1)?
    } else {
        date(year, month + 1, 1)?
    };
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Monday-first weekday index (`0 = Monday .. 6 = Sunday`).
pub fn weekday_index(year: i32, month: u32, day: u32) -> CalResult<u32> {
    Ok(date(year, month, day)?.weekday().num_days_from_monday())
}

/// Saturday and Sunday.
pub fn is_weekend_index(weekday_index: u32) -> bool {
    weekday_index >= 5
}

/// One existing day of the year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayInfo {
    /// Month, `1..=12`.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Monday-first weekday index.
    pub weekday_index: u32,
    /// Display label for the weekday.
    pub weekday_label: String,
    /// Saturday or Sunday.
    pub is_weekend: bool,
}

impl DayInfo {
    /// Render request for this day at the given cell size.
    pub fn cell_request(&self, cell_width_px: u32, cell_height_px: u32) -> CalResult<CellRequest> {
        CellRequest::new(
            self.month,
            self.day,
            self.weekday_label.clone(),
            cell_width_px,
            cell_height_px,
            self.is_weekend,
        )
    }
}

/// All days of one month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthData {
    /// Month, `1..=12`.
    pub month: u32,
    /// Day count.
    pub days: u32,
    /// `days` entries, in day order.
    pub cells: Vec<DayInfo>,
}

/// Twelve months of day data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearCalendar {
    /// Calendar year.
    pub year: i32,
    /// January through December.
    pub months: Vec<MonthData>,
}

impl YearCalendar {
    /// Build the calendar for `year`, labelling weekdays from `labels`.
    pub fn generate(year: i32, labels: &LabelConfig) -> CalResult<Self> {
        let mut months = Vec::with_capacity(12);
        for month in 1..=12 {
            let days = days_in_month(year, month)?;
            let mut cells = Vec::with_capacity(days as usize);
            for day in 1..=days {
                let weekday_index = weekday_index(year, month, day)?;
                cells.push(DayInfo {
                    month,
                    day,
                    weekday_index,
                    weekday_label: labels.weekday(weekday_index).to_string(),
                    is_weekend: is_weekend_index(weekday_index),
                });
            }
            months.push(MonthData { month, days, cells });
        }
        Ok(Self { year, months })
    }

    /// Number of existing days (365 or 366).
    pub fn total_cells(&self) -> usize {
        self.months.iter().map(|m| m.cells.len()).sum()
    }

    /// Day lookup; `None` for non-existent dates such as February 30.
    pub fn day(&self, month: u32, day: u32) -> Option<&DayInfo> {
        let m = self.months.get(month.checked_sub(1)? as usize)?;
        m.cells.get(day.checked_sub(1)? as usize)
    }

    /// Iterate over every existing day in month/day order.
    pub fn days(&self) -> impl Iterator<Item = &DayInfo> {
        self.months.iter().flat_map(|m| m.cells.iter())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/calendar.rs"]
mod tests;
