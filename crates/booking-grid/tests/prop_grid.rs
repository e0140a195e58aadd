//! Property-based tests for grid construction and slot resolution using proptest.
//!
//! These verify invariants that hold for *any* month, week start, set of
//! blocking facts and time catalogue.

use std::collections::BTreeSet;

use booking_grid::{
    build_grid, days_in_month, resolve_slots, shift_month, weekday_index, AnchorMonth,
    BlockedFacts, TimeSlotCatalogue,
};
use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_anchor() -> impl Strategy<Value = AnchorMonth> {
    (1600i32..=2400, 1u32..=12).prop_map(|(y, m)| AnchorMonth::new(y, m).unwrap())
}

fn arb_week_start() -> impl Strategy<Value = Weekday> {
    prop_oneof![
        Just(Weekday::Sun),
        Just(Weekday::Mon),
        Just(Weekday::Tue),
        Just(Weekday::Wed),
        Just(Weekday::Thu),
        Just(Weekday::Fri),
        Just(Weekday::Sat),
    ]
}

fn arb_facts() -> impl Strategy<Value = BlockedFacts> {
    (
        prop::collection::btree_set(0u8..=6, 0..=5),
        prop::collection::btree_set(1u32..=31, 0..=10),
    )
        .prop_map(|(weekdays, dates)| BlockedFacts {
            blocked_weekdays: weekdays,
            blocked_dates: dates,
        })
}

fn arb_today() -> impl Strategy<Value = NaiveDate> {
    (1600i32..=2400, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_catalogue() -> impl Strategy<Value = TimeSlotCatalogue> {
    prop::collection::btree_map(0u8..=23, any::<bool>(), 0..=16).prop_map(|hours| {
        TimeSlotCatalogue {
            possible_times: hours.keys().copied().collect(),
            available_times: hours
                .iter()
                .filter(|(_, free)| **free)
                .map(|(h, _)| *h)
                .collect::<BTreeSet<u8>>(),
        }
    })
}

// ---------------------------------------------------------------------------
// Grid structure
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn cell_count_is_a_multiple_of_seven(
        anchor in arb_anchor(),
        week_start in arb_week_start(),
        today in arb_today(),
    ) {
        let grid = build_grid(anchor, None, today, week_start);
        let lead = grid.lead_filler().count();
        let trail = grid.trail_filler().count();
        let n = days_in_month(anchor) as usize;

        prop_assert_eq!(lead, weekday_index(anchor.first_day(), week_start) as usize);
        prop_assert_eq!(trail, 6 - weekday_index(anchor.last_day(), week_start) as usize);
        prop_assert_eq!((lead + n + trail) % 7, 0);
        prop_assert_eq!(grid.cell_count(), lead + n + trail);
        prop_assert!(grid.check_structure().is_ok());
    }

    #[test]
    fn in_month_days_appear_once_contiguously_in_order(
        anchor in arb_anchor(),
        week_start in arb_week_start(),
    ) {
        let grid = build_grid(anchor, None, anchor.first_day(), week_start);
        let cells: Vec<_> = grid.cells().collect();
        let first = cells.iter().position(|c| c.in_current_month).unwrap();
        let n = days_in_month(anchor) as usize;

        for (offset, cell) in cells[first..first + n].iter().enumerate() {
            prop_assert!(cell.in_current_month);
            prop_assert_eq!(cell.date.day() as usize, offset + 1);
            prop_assert_eq!(cell.date.month(), anchor.month());
        }
        prop_assert!(cells[first + n..].iter().all(|c| !c.in_current_month));
    }

    #[test]
    fn filler_is_always_disabled_and_outside_the_month(
        anchor in arb_anchor(),
        week_start in arb_week_start(),
        facts in arb_facts(),
        today in arb_today(),
    ) {
        let grid = build_grid(anchor, Some(&facts), today, week_start);
        for cell in grid.cells().filter(|c| !c.in_current_month) {
            prop_assert!(cell.disabled);
            prop_assert!(!anchor.contains(cell.date));
        }
    }

    #[test]
    fn in_month_disabled_iff_a_blocking_rule_holds(
        anchor in arb_anchor(),
        week_start in arb_week_start(),
        facts in arb_facts(),
        today in arb_today(),
    ) {
        let grid = build_grid(anchor, Some(&facts), today, week_start);
        for cell in grid.in_month() {
            let expected = cell.date < today
                || facts.blocked_weekdays.contains(&(cell.date.weekday().num_days_from_sunday() as u8))
                || facts.blocked_dates.contains(&cell.date.day());
            prop_assert_eq!(cell.disabled, expected, "{}", cell.date);
        }
    }

    #[test]
    fn shift_month_round_trips(anchor in arb_anchor(), delta in -120i32..=120) {
        prop_assert_eq!(shift_month(shift_month(anchor, 1), -1), anchor);
        prop_assert_eq!(shift_month(shift_month(anchor, delta), -delta), anchor);
        prop_assert_eq!(shift_month(anchor, delta).first_day().day(), 1);
    }
}

// ---------------------------------------------------------------------------
// Slot resolution
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn slots_follow_catalogue_order_and_membership(catalogue in arb_catalogue()) {
        prop_assert!(catalogue.validate().is_ok());
        let slots = resolve_slots(&catalogue);

        let hours: Vec<u8> = slots.iter().map(|s| s.hour).collect();
        prop_assert_eq!(&hours, &catalogue.possible_times);
        for slot in &slots {
            prop_assert_eq!(slot.bookable, catalogue.available_times.contains(&slot.hour));
        }
    }
}
