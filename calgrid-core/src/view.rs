//! View mode, anchor date and navigation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::expansion::DayExpansion;

/// Weeks start on Monday.
pub const WEEK_START: Weekday = Weekday::Mon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        };
        f.write_str(name)
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            other => Err(format!(
                "Unknown view '{}'. Expected day, week or month",
                other
            )),
        }
    }
}

/// What the calendar is showing.
///
/// `expansion` is kept independently of `mode` so switching away from month
/// view and back remembers the expanded day. It is only reported while in
/// month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
    pub expansion: DayExpansion,
}

impl ViewState {
    pub fn new(mode: ViewMode, anchor: NaiveDate) -> Self {
        ViewState {
            mode,
            anchor,
            expansion: DayExpansion::Collapsed,
        }
    }

    /// Start with the anchor day already expanded.
    pub fn expanded_on_anchor(mode: ViewMode, anchor: NaiveDate) -> Self {
        ViewState {
            mode,
            anchor,
            expansion: DayExpansion::ExpandedOn(anchor),
        }
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// The expanded day, if any and if in month view.
    pub fn expanded_day(&self) -> Option<NaiveDate> {
        match self.mode {
            ViewMode::Month => self.expansion.expanded_day(),
            ViewMode::Day | ViewMode::Week => None,
        }
    }

    /// Apply a month-view day click.
    pub fn click_day(&mut self, clicked: NaiveDate, events_in_cell: usize) {
        let click = self.expansion.click(clicked, events_in_cell, self.anchor);
        self.expansion = click.expansion;
        self.anchor = click.anchor;
    }

    pub fn collapse(&mut self) {
        self.expansion = DayExpansion::Collapsed;
    }

    /// Move back one period (day, week or month).
    pub fn previous(&mut self) {
        let anchor = match self.mode {
            ViewMode::Day => self.anchor.checked_sub_days(Days::new(1)),
            ViewMode::Week => self.anchor.checked_sub_days(Days::new(7)),
            ViewMode::Month => self.anchor.checked_sub_months(Months::new(1)),
        };
        self.navigate(anchor);
    }

    /// Move forward one period (day, week or month).
    pub fn next(&mut self) {
        let anchor = match self.mode {
            ViewMode::Day => self.anchor.checked_add_days(Days::new(1)),
            ViewMode::Week => self.anchor.checked_add_days(Days::new(7)),
            ViewMode::Month => self.anchor.checked_add_months(Months::new(1)),
        };
        self.navigate(anchor);
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.navigate(Some(date));
    }

    fn navigate(&mut self, anchor: Option<NaiveDate>) {
        if let Some(anchor) = anchor {
            self.anchor = anchor;
            self.collapse();
        }
    }

    /// First and last day (inclusive) visible in the current mode.
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        match self.mode {
            ViewMode::Day => (self.anchor, self.anchor),
            ViewMode::Week => {
                let week = self.anchor.week(WEEK_START);
                (week.first_day(), week.last_day())
            }
            ViewMode::Month => {
                let first = self.anchor.with_day(1).unwrap_or(self.anchor);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(self.anchor);
                (first, last)
            }
        }
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
