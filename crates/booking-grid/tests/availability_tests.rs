//! Tests for slot resolution and the per-date keyed resolver.

use booking_grid::{resolve_slots, FetchError, GridError, SlotResolver, TimeSlot, TimeSlotCatalogue};
use chrono::NaiveDate;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn catalogue(possible: &[u8], available: &[u8]) -> TimeSlotCatalogue {
    TimeSlotCatalogue::new(possible.iter().copied(), available.iter().copied()).unwrap()
}

fn slot(hour: u8, bookable: bool) -> TimeSlot {
    TimeSlot { hour, bookable }
}

// ── Scenario D: flags follow availableTimes, order follows possibleTimes ────

#[test]
fn scenario_d_slots_are_flagged_in_catalogue_order() {
    let slots = resolve_slots(&catalogue(&[8, 9, 10, 11], &[9, 11]));
    assert_eq!(
        slots,
        vec![slot(8, false), slot(9, true), slot(10, false), slot(11, true)]
    );
}

#[test]
fn empty_catalogue_yields_no_slots() {
    assert!(resolve_slots(&TimeSlotCatalogue::default()).is_empty());
}

#[test]
fn fully_booked_day_lists_every_slot_unbookable() {
    let slots = resolve_slots(&catalogue(&[13, 14, 15], &[]));
    assert_eq!(slots.len(), 3);
    assert!(slots.iter().all(|s| !s.bookable));
}

// ── Catalogue validation ────────────────────────────────────────────────────

#[test]
fn catalogue_parses_provider_json() {
    let parsed =
        TimeSlotCatalogue::from_json(r#"{"possibleTimes":[8,9,10],"availableTimes":[10]}"#)
            .unwrap();
    assert_eq!(parsed, catalogue(&[8, 9, 10], &[10]));
}

#[test]
fn catalogue_rejects_unordered_possible_times() {
    let err = TimeSlotCatalogue::new([10, 9], []).unwrap_err();
    assert!(matches!(err, GridError::InvalidCatalogue(_)));
}

#[test]
fn catalogue_rejects_available_time_outside_possible_times() {
    assert!(TimeSlotCatalogue::new([8, 9], [12]).is_err());
}

#[test]
fn catalogue_rejects_hours_past_midnight() {
    assert!(TimeSlotCatalogue::new([22, 24], []).is_err());
}

// ── SlotResolver ────────────────────────────────────────────────────────────

#[test]
fn no_slots_until_catalogue_arrives() {
    let mut resolver = SlotResolver::new("host");
    assert!(resolver.slots().is_none());

    let key = resolver.select(date(2024, 2, 12)).expect("new date needs a fetch");
    assert_eq!(key.username, "host");
    assert_eq!(key.date, date(2024, 2, 12));
    assert!(resolver.slots().is_none(), "no placeholder slots while pending");

    assert!(resolver.receive(&key, Ok(catalogue(&[8, 9], &[9]))));
    assert_eq!(resolver.slots(), Some(&[slot(8, false), slot(9, true)][..]));
}

#[test]
fn scenario_e_stale_response_does_not_replace_newer_selection() {
    let mut resolver = SlotResolver::new("host");
    let d1 = resolver.select(date(2024, 2, 12)).unwrap();
    let d2 = resolver.select(date(2024, 2, 13)).unwrap();

    assert!(!resolver.receive(&d1, Ok(catalogue(&[8], &[8]))), "D1 is stale");
    assert!(resolver.slots().is_none());
    assert_eq!(resolver.selected_date(), Some(date(2024, 2, 13)));

    assert!(resolver.receive(&d2, Ok(catalogue(&[14, 15], &[15]))));
    assert_eq!(resolver.slots(), Some(&[slot(14, false), slot(15, true)][..]));

    // A very late D1 response still cannot overwrite D2.
    assert!(!resolver.receive(&d1, Ok(catalogue(&[8], &[8]))));
    assert_eq!(resolver.slots().unwrap()[0].hour, 14);
}

#[test]
fn reselecting_the_same_date_keeps_loaded_slots() {
    let mut resolver = SlotResolver::new("host");
    let key = resolver.select(date(2024, 2, 12)).unwrap();
    resolver.receive(&key, Ok(catalogue(&[9], &[9])));

    assert!(resolver.select(date(2024, 2, 12)).is_none());
    assert!(resolver.slots().is_some());
}

#[test]
fn selecting_another_date_discards_previous_slots() {
    let mut resolver = SlotResolver::new("host");
    let key = resolver.select(date(2024, 2, 12)).unwrap();
    resolver.receive(&key, Ok(catalogue(&[9], &[9])));

    resolver.select(date(2024, 2, 14));
    assert!(resolver.slots().is_none());
}

#[test]
fn clearing_selection_discards_slots_and_later_results() {
    let mut resolver = SlotResolver::new("host");
    let key = resolver.select(date(2024, 2, 12)).unwrap();
    resolver.clear();

    assert_eq!(resolver.selected_date(), None);
    assert!(!resolver.receive(&key, Ok(catalogue(&[9], &[9]))));
    assert!(resolver.slots().is_none());
}

#[test]
fn failed_fetch_reports_no_slots() {
    let mut resolver = SlotResolver::new("host");
    let key = resolver.select(date(2024, 2, 12)).unwrap();
    let applied = resolver.receive(&key, Err(FetchError::Unavailable("timeout".into())));
    assert!(!applied);
    assert!(resolver.slots().is_none());
}

#[test]
fn invalid_catalogue_is_rejected_at_receive() {
    let mut resolver = SlotResolver::new("host");
    let key = resolver.select(date(2024, 2, 12)).unwrap();
    let bad = TimeSlotCatalogue {
        possible_times: vec![9],
        available_times: [10].into_iter().collect(),
    };
    assert!(!resolver.receive(&key, Ok(bad)));
    assert!(resolver.slots().is_none());
}

#[test]
fn only_bookable_slots_can_be_chosen() {
    let mut resolver = SlotResolver::new("host");
    let key = resolver.select(date(2024, 2, 12)).unwrap();
    resolver.receive(&key, Ok(catalogue(&[8, 9, 10, 11], &[9, 11])));

    assert_eq!(resolver.choose(9), Some(slot(9, true)));
    assert_eq!(resolver.choose(8), None, "taken hour");
    assert_eq!(resolver.choose(17), None, "hour not offered");
}
