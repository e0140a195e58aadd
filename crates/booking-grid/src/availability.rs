//! Availability resolver: turns a day's time catalogue into ordered,
//! bookable-flagged slots, keyed per selected date.
//!
//! Until the catalogue for the currently selected date arrives the resolver
//! reports no slots at all. It never invents placeholder availability, and a
//! catalogue arriving for a date that is no longer selected is dropped.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::KeyedLatest;
use crate::error::{FetchError, GridError, Result};
use crate::provider::{SlotKey, TimeSlotProvider};

/// Hours that could exist on a day and the subset still free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotCatalogue {
    /// Ascending hour numbers.
    pub possible_times: Vec<u8>,
    pub available_times: BTreeSet<u8>,
}

impl TimeSlotCatalogue {
    pub fn new(
        possible_times: impl IntoIterator<Item = u8>,
        available_times: impl IntoIterator<Item = u8>,
    ) -> Result<Self> {
        let catalogue = Self {
            possible_times: possible_times.into_iter().collect(),
            available_times: available_times.into_iter().collect(),
        };
        catalogue.validate()?;
        Ok(catalogue)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalogue: Self =
            serde_json::from_str(json).map_err(|e| GridError::InvalidCatalogue(e.to_string()))?;
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// Possible times must be strictly ascending hours of the day, and every
    /// available time must be one of them.
    pub fn validate(&self) -> Result<()> {
        if let Some(hour) = self.possible_times.iter().find(|&&h| h > 23) {
            return Err(GridError::InvalidCatalogue(format!(
                "hour {} is outside 0..=23",
                hour
            )));
        }
        if self.possible_times.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GridError::InvalidCatalogue(
                "possible times are not strictly ascending".to_string(),
            ));
        }
        if let Some(hour) = self
            .available_times
            .iter()
            .find(|&&h| !self.possible_times.contains(&h))
        {
            return Err(GridError::InvalidCatalogue(format!(
                "available hour {} is not a possible time",
                hour
            )));
        }
        Ok(())
    }
}

/// One hour of a day and whether it can still be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub hour: u8,
    pub bookable: bool,
}

/// Flag every possible time, keeping the catalogue's order.
pub fn resolve_slots(catalogue: &TimeSlotCatalogue) -> Vec<TimeSlot> {
    catalogue
        .possible_times
        .iter()
        .map(|&hour| TimeSlot {
            hour,
            bookable: catalogue.available_times.contains(&hour),
        })
        .collect()
}

/// Slot list for the one date currently selected.
#[derive(Debug, Clone)]
pub struct SlotResolver {
    username: String,
    cache: KeyedLatest<SlotKey, Vec<TimeSlot>>,
}

impl SlotResolver {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            cache: KeyedLatest::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Select `date`. Returns the key to fetch, or `None` when `date` is
    /// already the selected date.
    pub fn select(&mut self, date: NaiveDate) -> Option<SlotKey> {
        let key = SlotKey::new(&self.username, date);
        if !self.cache.request(key.clone()) {
            return None;
        }
        debug!(key = %key, "requesting time slots");
        Some(key)
    }

    /// Deselect; any slots shown are discarded.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.cache.current_key().map(|k| k.date)
    }

    /// Complete the fetch for `key`. Returns `true` if the slots were applied.
    ///
    /// Stale keys are discarded. A failed fetch, or an invalid catalogue,
    /// leaves the date with no slots.
    pub fn receive(
        &mut self,
        key: &SlotKey,
        result: std::result::Result<TimeSlotCatalogue, FetchError>,
    ) -> bool {
        if !self.cache.is_current(key) {
            debug!(key = %key, "discarding stale time slots");
            return false;
        }
        let catalogue = match result {
            Ok(catalogue) => catalogue,
            Err(e) => {
                warn!(key = %key, error = %e, "time slot fetch failed");
                return false;
            }
        };
        if let Err(e) = catalogue.validate() {
            warn!(key = %key, error = %e, "rejecting time slot catalogue");
            return false;
        }
        self.cache.accept(key, resolve_slots(&catalogue))
    }

    /// Fetch the selected date's catalogue from `provider` and apply it.
    pub fn refresh(&mut self, provider: &impl TimeSlotProvider) -> bool {
        let Some(key) = self.cache.current_key().cloned() else {
            return false;
        };
        let result = provider.time_slots(&key.username, key.date);
        self.receive(&key, result)
    }

    /// Slots for the selected date, or `None` while they are not available.
    pub fn slots(&self) -> Option<&[TimeSlot]> {
        self.cache.get().map(Vec::as_slice)
    }

    /// Pick `hour` on the selected date. Only a bookable slot can be chosen.
    pub fn choose(&self, hour: u8) -> Option<TimeSlot> {
        self.slots()?
            .iter()
            .find(|s| s.hour == hour && s.bookable)
            .copied()
    }
}
