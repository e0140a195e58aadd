//! Blocked-date overlay: the per-month blocking facts and the predicate that
//! decides whether an in-month day may be selected.
//!
//! Facts are supplied by an external provider. Missing facts (`None`) always
//! block, so an unverified day is never offered.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::provider_weekday;
use crate::error::{GridError, Result};

/// Blocking facts for one month of one host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedFacts {
    /// Recurring weekdays that are never bookable, Sunday = 0.
    #[serde(rename = "blockedWeekDays", alias = "blockedWeekdays", default)]
    pub blocked_weekdays: BTreeSet<u8>,
    /// Days of month (`1..=31`) that are fully booked or otherwise closed.
    #[serde(default)]
    pub blocked_dates: BTreeSet<u32>,
}

impl BlockedFacts {
    pub fn new(
        blocked_weekdays: impl IntoIterator<Item = u8>,
        blocked_dates: impl IntoIterator<Item = u32>,
    ) -> Result<Self> {
        let facts = Self {
            blocked_weekdays: blocked_weekdays.into_iter().collect(),
            blocked_dates: blocked_dates.into_iter().collect(),
        };
        facts.validate()?;
        Ok(facts)
    }

    /// Parse the provider's JSON payload and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let facts: Self =
            serde_json::from_str(json).map_err(|e| GridError::InvalidFacts(e.to_string()))?;
        facts.validate()?;
        Ok(facts)
    }

    /// Reject weekday numbers outside `0..=6` and day numbers outside `1..=31`.
    pub fn validate(&self) -> Result<()> {
        if let Some(day) = self.blocked_weekdays.iter().find(|&&d| d > 6) {
            return Err(GridError::InvalidFacts(format!(
                "weekday {} is outside 0..=6",
                day
            )));
        }
        if let Some(day) = self.blocked_dates.iter().find(|&&d| !(1..=31).contains(&d)) {
            return Err(GridError::InvalidFacts(format!(
                "day of month {} is outside 1..=31",
                day
            )));
        }
        Ok(())
    }
}

/// Whether `date` must be shown as unselectable.
///
/// A day is blocked when facts are not loaded, when it lies before `today`,
/// when its weekday is blocked, or when its day of month is blocked.
pub fn is_blocked(date: NaiveDate, facts: Option<&BlockedFacts>, today: NaiveDate) -> bool {
    let Some(facts) = facts else {
        return true;
    };
    date < today
        || facts.blocked_weekdays.contains(&provider_weekday(date))
        || facts.blocked_dates.contains(&date.day())
}
