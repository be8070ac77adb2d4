//! Which day cell is expanded in month view.

use chrono::{Datelike, NaiveDate};

/// At most one day can be expanded at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayExpansion {
    #[default]
    Collapsed,
    ExpandedOn(NaiveDate),
}

/// Result of a day-cell click: the new expansion and the new anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClick {
    pub expansion: DayExpansion,
    pub anchor: NaiveDate,
}

impl DayExpansion {
    pub fn expanded_day(&self) -> Option<NaiveDate> {
        match self {
            DayExpansion::Collapsed => None,
            DayExpansion::ExpandedOn(date) => Some(*date),
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, DayExpansion::ExpandedOn(_))
    }

    /// Apply a click on `clicked`, which holds `events_in_cell` events.
    ///
    /// Clicks outside the anchor's month change nothing. Otherwise the anchor
    /// moves to the clicked day; the day collapses if it was the expanded one
    /// or has no events, and expands otherwise.
    pub fn click(self, clicked: NaiveDate, events_in_cell: usize, anchor: NaiveDate) -> DayClick {
        if !same_month(clicked, anchor) {
            return DayClick {
                expansion: self,
                anchor,
            };
        }

        let expansion = if self == DayExpansion::ExpandedOn(clicked) || events_in_cell == 0 {
            DayExpansion::Collapsed
        } else {
            DayExpansion::ExpandedOn(clicked)
        };

        DayClick {
            expansion,
            anchor: clicked,
        }
    }
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn empty_day_stays_collapsed() {
        let click = DayExpansion::Collapsed.click(day(3, 5), 0, day(3, 1));
        assert_eq!(click.expansion, DayExpansion::Collapsed);
        assert_eq!(click.anchor, day(3, 5));
    }

    #[test]
    fn day_with_events_expands() {
        let click = DayExpansion::Collapsed.click(day(3, 5), 2, day(3, 1));
        assert_eq!(click.expansion, DayExpansion::ExpandedOn(day(3, 5)));
    }

    #[test]
    fn clicking_expanded_day_again_collapses() {
        let click = DayExpansion::ExpandedOn(day(3, 5)).click(day(3, 5), 2, day(3, 5));
        assert_eq!(click.expansion, DayExpansion::Collapsed);
    }

    #[test]
    fn clicking_another_day_moves_expansion() {
        let click = DayExpansion::ExpandedOn(day(3, 5)).click(day(3, 9), 1, day(3, 5));
        assert_eq!(click.expansion, DayExpansion::ExpandedOn(day(3, 9)));
        assert_eq!(click.anchor, day(3, 9));
    }

    #[test]
    fn clicking_empty_day_collapses_expanded_one() {
        let click = DayExpansion::ExpandedOn(day(3, 5)).click(day(3, 6), 0, day(3, 5));
        assert_eq!(click.expansion, DayExpansion::Collapsed);
    }

    #[test]
    fn other_month_is_ignored() {
        let before = DayExpansion::ExpandedOn(day(3, 5));
        let click = before.click(day(4, 1), 3, day(3, 5));
        assert_eq!(click.expansion, before);
        assert_eq!(click.anchor, day(3, 5));

        // Same month number, different year
        let click = DayExpansion::Collapsed.click(
            NaiveDate::from_ymd_opt(2023, 3, 5).unwrap(),
            1,
            day(3, 5),
        );
        assert_eq!(click.expansion, DayExpansion::Collapsed);
    }
}
