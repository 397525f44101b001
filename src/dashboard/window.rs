//! The fixed trailing window of days the dashboard summarises.

use std::fmt::Display;

use serde::Serialize;
use time::{Date, Duration};

/// The number of calendar days in the dashboard window, including today.
pub(super) const WINDOW_DAYS: i64 = 7;

/// An inclusive range of calendar days ending on "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    /// The first day in the window.
    pub start: Date,
    /// The last day in the window.
    pub end: Date,
}

impl DateWindow {
    /// The seven days ending on, and including, `today`.
    pub fn trailing_week(today: Date) -> Self {
        Self {
            start: today - Duration::days(WINDOW_DAYS - 1),
            end: today,
        }
    }

    /// Every day in the window in ascending order, starting with [DateWindow::start].
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let start = self.start;
        let day_count = (self.end - self.start).whole_days() + 1;

        (0..day_count).map(move |offset| start + Duration::days(offset))
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
