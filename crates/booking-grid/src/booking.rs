//! Booking calendar: the month grid and the time picker of one host's
//! scheduling page, wired together.

use chrono::NaiveDate;
use tracing::debug;

use crate::availability::{SlotResolver, TimeSlot, TimeSlotCatalogue};
use crate::blocked::BlockedFacts;
use crate::calendar::AnchorMonth;
use crate::config::CalendarConfig;
use crate::error::{FetchError, Result};
use crate::grid::CalendarGrid;
use crate::labels;
use crate::navigation::MonthNavigator;
use crate::provider::{BlockedFactsProvider, FactsKey, SlotKey, TimeSlotProvider};

#[derive(Debug, Clone)]
pub struct BookingCalendar {
    config: CalendarConfig,
    today: NaiveDate,
    navigator: MonthNavigator,
    resolver: SlotResolver,
}

impl BookingCalendar {
    /// Open on the month containing `today`, with nothing selected.
    pub fn new(username: &str, config: CalendarConfig, today: NaiveDate) -> Result<Self> {
        let anchor = AnchorMonth::containing(today)?;
        Ok(Self {
            config,
            today,
            navigator: MonthNavigator::new(username, anchor),
            resolver: SlotResolver::new(username),
        })
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn anchor(&self) -> AnchorMonth {
        self.navigator.anchor()
    }

    /// Advance the notion of "today", e.g. after midnight.
    ///
    /// A selected date that is now in the past is deselected along with its
    /// slots. The selection may belong to a month other than the displayed one,
    /// so only the date itself is checked.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        if let Some(selected) = self.selected_date().filter(|&d| d < today) {
            debug!(%selected, %today, "selected date has passed, clearing selection");
            self.resolver.clear();
        }
    }

    pub fn facts_key(&self) -> FactsKey {
        self.navigator.facts_key()
    }

    pub fn previous_month(&mut self) -> FactsKey {
        self.navigator.previous()
    }

    pub fn next_month(&mut self) -> FactsKey {
        self.navigator.next()
    }

    pub fn receive_facts(
        &mut self,
        key: &FactsKey,
        result: std::result::Result<BlockedFacts, FetchError>,
    ) -> bool {
        self.navigator.receive(key, result)
    }

    pub fn grid(&self) -> CalendarGrid {
        self.navigator.grid(self.today, self.config.week_start)
    }

    /// Header line: `February 2024`.
    pub fn title(&self) -> String {
        labels::month_title(self.anchor(), self.config.locale)
    }

    pub fn weekday_labels(&self) -> Vec<String> {
        labels::weekday_labels(self.config.week_start, self.config.locale, true)
    }

    /// A visitor activates the cell for `date`.
    ///
    /// Only a selectable in-month cell of the displayed grid changes the
    /// selection; the returned key is the slot fetch to issue.
    pub fn select_date(&mut self, date: NaiveDate) -> Option<SlotKey> {
        let Some(date) = self.grid().activate(date) else {
            debug!(%date, "ignoring activation of a disabled cell");
            return None;
        };
        self.resolver.select(date)
    }

    pub fn clear_selection(&mut self) {
        self.resolver.clear();
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.resolver.selected_date()
    }

    /// Time picker heading for the selected date.
    pub fn selected_label(&self) -> Option<String> {
        self.selected_date()
            .map(|d| labels::describe_date(d, self.config.locale))
    }

    pub fn receive_slots(
        &mut self,
        key: &SlotKey,
        result: std::result::Result<TimeSlotCatalogue, FetchError>,
    ) -> bool {
        self.resolver.receive(key, result)
    }

    pub fn slots(&self) -> Option<&[TimeSlot]> {
        self.resolver.slots()
    }

    pub fn choose_slot(&self, hour: u8) -> Option<TimeSlot> {
        self.resolver.choose(hour)
    }

    /// Drive both outstanding fetches through `provider`.
    pub fn refresh<P>(&mut self, provider: &P)
    where
        P: BlockedFactsProvider + TimeSlotProvider,
    {
        self.navigator.refresh(provider);
        self.resolver.refresh(provider);
    }
}
