//! Date grid builder -- assembles the always-7-wide week matrix for a month.
//!
//! The grid is a pure function of `(anchor, facts, today, week_start)`. It is
//! rebuilt whenever any input changes; nothing here holds mutable state.

use chrono::{Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::blocked::{is_blocked, BlockedFacts};
use crate::calendar::{days_in_month, weekday_index, AnchorMonth};
use crate::error::{GridError, Result};

/// One rendered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub disabled: bool,
    pub in_current_month: bool,
}

/// Exactly seven consecutive cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    /// 1-based position of the row within the grid.
    pub week: usize,
    pub days: [DayCell; 7],
}

/// A month padded with filler days from its neighbours into whole weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub anchor: AnchorMonth,
    pub week_start: Weekday,
    pub weeks: Vec<WeekRow>,
}

/// Build the grid for `anchor`.
///
/// Leading filler covers `weekday_index(first)` days before the 1st and
/// trailing filler covers `6 - weekday_index(last)` days after the last day,
/// both in chronological order and always disabled. In-month days are disabled
/// by [`is_blocked`], so a grid built without facts is complete but inert.
pub fn build_grid(
    anchor: AnchorMonth,
    facts: Option<&BlockedFacts>,
    today: NaiveDate,
    week_start: Weekday,
) -> CalendarGrid {
    let first = anchor.first_day();
    let last = anchor.last_day();
    let lead = u64::from(weekday_index(first, week_start));
    let trail = u64::from(6 - weekday_index(last, week_start));
    let total = lead + u64::from(days_in_month(anchor)) + trail;
    debug_assert_eq!(total % 7, 0, "grid for {} has {} cells", anchor, total);

    // Cannot overflow: `AnchorMonth` keeps a year of margin to chrono's range.
    let start = first - Days::new(lead);
    let cell = |offset: u64| {
        let date = start + Days::new(offset);
        let in_current_month = anchor.contains(date);
        DayCell {
            date,
            disabled: !in_current_month || is_blocked(date, facts, today),
            in_current_month,
        }
    };

    let weeks = (0..total / 7)
        .map(|row| WeekRow {
            week: row as usize + 1,
            days: std::array::from_fn(|col| cell(row * 7 + col as u64)),
        })
        .collect();

    let grid = CalendarGrid {
        anchor,
        week_start,
        weeks,
    };
    debug_assert!(
        grid.check_structure().is_ok(),
        "{:?}",
        grid.check_structure()
    );
    grid
}

impl CalendarGrid {
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn cell_count(&self) -> usize {
        self.weeks.len() * 7
    }

    /// Filler cells before the 1st.
    pub fn lead_filler(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.cells().take_while(|c| !c.in_current_month)
    }

    /// Filler cells after the last day of the month.
    pub fn trail_filler(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.cells()
            .skip_while(|c| !c.in_current_month)
            .skip_while(|c| c.in_current_month)
    }

    pub fn in_month(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.cells().filter(|c| c.in_current_month)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|c| c.date == date)
    }

    /// Dates a visitor can pick in this grid.
    pub fn selectable_dates(&self) -> Vec<NaiveDate> {
        self.in_month()
            .filter(|c| !c.disabled)
            .map(|c| c.date)
            .collect()
    }

    /// Activate the cell for `date`, yielding the date to report as selected.
    ///
    /// Disabled cells, filler cells and dates outside the grid yield `None`.
    pub fn activate(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.in_month()
            .find(|c| c.date == date && !c.disabled)
            .map(|c| c.date)
    }

    /// Verify the grid tiles into whole weeks of consecutive days, that the
    /// month appears exactly once in order, and that filler is inert.
    pub fn check_structure(&self) -> Result<()> {
        let violation = |msg: String| Err(GridError::StructuralViolation(msg));

        for (i, row) in self.weeks.iter().enumerate() {
            if row.week != i + 1 {
                return violation(format!("row {} is numbered {}", i + 1, row.week));
            }
        }

        let cells: Vec<&DayCell> = self.cells().collect();
        if cells.windows(2).any(|w| w[0].date.succ_opt() != Some(w[1].date)) {
            return violation(format!("{}: cells are not consecutive days", self.anchor));
        }

        let month: Vec<NaiveDate> = self.in_month().map(|c| c.date).collect();
        if month.len() != days_in_month(self.anchor) as usize
            || month.first() != Some(&self.anchor.first_day())
            || month.last() != Some(&self.anchor.last_day())
        {
            return violation(format!("{}: in-month days incomplete", self.anchor));
        }

        let lead = self.lead_filler().count();
        let trail = self.trail_filler().count();
        if lead + month.len() + trail != cells.len() {
            return violation(format!("{}: in-month days not contiguous", self.anchor));
        }
        if lead > 6 || trail > 6 {
            return violation(format!("{}: a whole week of filler", self.anchor));
        }

        if let Some(bad) = cells
            .iter()
            .find(|c| !c.in_current_month && (!c.disabled || self.anchor.contains(c.date)))
        {
            return violation(format!("filler cell {} is not inert", bad.date));
        }
        Ok(())
    }
}
