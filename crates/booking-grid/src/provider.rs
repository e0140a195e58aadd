//! Read-only fetch contracts for the data the core consumes, and the keys
//! that identify each fetch.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::TimeSlotCatalogue;
use crate::blocked::BlockedFacts;
use crate::calendar::AnchorMonth;
use crate::error::FetchError;

/// Identifies a blocked-facts fetch: one host, one month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactsKey {
    pub username: String,
    pub year: i32,
    /// 1-based.
    pub month: u32,
}

impl FactsKey {
    pub fn new(username: &str, anchor: AnchorMonth) -> Self {
        Self {
            username: username.to_string(),
            year: anchor.year(),
            month: anchor.month(),
        }
    }
}

impl fmt::Display for FactsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:04}-{:02}", self.username, self.year, self.month)
    }
}

/// Identifies a slot-catalogue fetch: one host, one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub username: String,
    pub date: NaiveDate,
}

impl SlotKey {
    pub fn new(username: &str, date: NaiveDate) -> Self {
        Self {
            username: username.to_string(),
            date,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.username, self.date)
    }
}

/// Source of per-month blocking facts.
pub trait BlockedFactsProvider {
    /// `month` is 1-based.
    fn blocked_facts(
        &self,
        username: &str,
        year: i32,
        month: u32,
    ) -> Result<BlockedFacts, FetchError>;
}

/// Source of per-day time catalogues.
pub trait TimeSlotProvider {
    fn time_slots(&self, username: &str, date: NaiveDate) -> Result<TimeSlotCatalogue, FetchError>;
}

/// Fixed data held in memory. Keys without data answer `FetchError::NotFound`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryProvider {
    #[serde(default)]
    facts: HashMap<String, BlockedFacts>,
    #[serde(default)]
    slots: HashMap<String, TimeSlotCatalogue>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_facts(mut self, username: &str, anchor: AnchorMonth, facts: BlockedFacts) -> Self {
        self.facts
            .insert(FactsKey::new(username, anchor).to_string(), facts);
        self
    }

    pub fn with_slots(
        mut self,
        username: &str,
        date: NaiveDate,
        catalogue: TimeSlotCatalogue,
    ) -> Self {
        self.slots
            .insert(SlotKey::new(username, date).to_string(), catalogue);
        self
    }

    /// Load from JSON of the form
    /// `{"facts": {"host/2024-02": {...}}, "slots": {"host/2024-02-12": {...}}}`.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl BlockedFactsProvider for InMemoryProvider {
    fn blocked_facts(
        &self,
        username: &str,
        year: i32,
        month: u32,
    ) -> Result<BlockedFacts, FetchError> {
        let key = FactsKey {
            username: username.to_string(),
            year,
            month,
        };
        self.facts
            .get(&key.to_string())
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}

impl TimeSlotProvider for InMemoryProvider {
    fn time_slots(&self, username: &str, date: NaiveDate) -> Result<TimeSlotCatalogue, FetchError> {
        self.slots
            .get(&SlotKey::new(username, date).to_string())
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}
