//! Month navigation controller. Owns the displayed month and the blocking
//! facts fetched for it.

use chrono::{NaiveDate, Weekday};
use tracing::{debug, warn};

use crate::blocked::BlockedFacts;
use crate::cache::KeyedLatest;
use crate::calendar::{shift_month, AnchorMonth};
use crate::error::FetchError;
use crate::grid::{build_grid, CalendarGrid};
use crate::provider::{BlockedFactsProvider, FactsKey};

#[derive(Debug, Clone)]
pub struct MonthNavigator {
    username: String,
    anchor: AnchorMonth,
    facts: KeyedLatest<FactsKey, BlockedFacts>,
}

impl MonthNavigator {
    /// Start at `anchor`. The facts for it still have to be fetched: see
    /// [`MonthNavigator::facts_key`].
    pub fn new(username: &str, anchor: AnchorMonth) -> Self {
        let mut facts = KeyedLatest::new();
        facts.request(FactsKey::new(username, anchor));
        Self {
            username: username.to_string(),
            anchor,
            facts,
        }
    }

    pub fn anchor(&self) -> AnchorMonth {
        self.anchor
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Key of the fetch the current month needs.
    pub fn facts_key(&self) -> FactsKey {
        FactsKey::new(&self.username, self.anchor)
    }

    pub fn previous(&mut self) -> FactsKey {
        self.jump_to(shift_month(self.anchor, -1))
    }

    pub fn next(&mut self) -> FactsKey {
        self.jump_to(shift_month(self.anchor, 1))
    }

    /// Display `anchor`, dropping the facts loaded for any other month.
    pub fn jump_to(&mut self, anchor: AnchorMonth) -> FactsKey {
        self.anchor = anchor;
        let key = self.facts_key();
        if self.facts.request(key.clone()) {
            debug!(key = %key, "requesting blocked facts");
        }
        key
    }

    /// Complete the fetch for `key`. Returns `true` if the facts were applied.
    ///
    /// Results for a month no longer displayed are discarded. Failures and
    /// invalid facts leave the month not loaded, so every day stays disabled.
    pub fn receive(&mut self, key: &FactsKey, result: Result<BlockedFacts, FetchError>) -> bool {
        if !self.facts.is_current(key) {
            debug!(key = %key, "discarding stale blocked facts");
            return false;
        }
        let facts = match result {
            Ok(facts) => facts,
            Err(e) => {
                warn!(key = %key, error = %e, "blocked facts fetch failed");
                return false;
            }
        };
        if let Err(e) = facts.validate() {
            warn!(key = %key, error = %e, "rejecting blocked facts");
            return false;
        }
        self.facts.accept(key, facts)
    }

    /// Fetch the current month's facts from `provider` and apply them.
    pub fn refresh(&mut self, provider: &impl BlockedFactsProvider) -> bool {
        let key = self.facts_key();
        let result = provider.blocked_facts(&key.username, key.year, key.month);
        self.receive(&key, result)
    }

    /// Facts for the displayed month, `None` until they have been received.
    pub fn facts(&self) -> Option<&BlockedFacts> {
        self.facts.get()
    }

    pub fn grid(&self, today: NaiveDate, week_start: Weekday) -> CalendarGrid {
        build_grid(self.anchor, self.facts(), today, week_start)
    }
}
