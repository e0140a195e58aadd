//! WASM bindings for booking-grid.
//!
//! Exposes grid construction, slot resolution and month shifting to
//! JavaScript via `wasm-bindgen`. Complex values cross the boundary as JSON
//! strings in the same shapes the booking API uses (`blockedWeekDays`,
//! `possibleTimes`, ...).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-grid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/booking_grid_wasm.wasm
//! ```

use booking_grid::config::parse_weekday;
use booking_grid::{AnchorMonth, BlockedFacts, CalendarGrid, TimeSlotCatalogue};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayCellDto {
    date: String,
    day: u32,
    disabled: bool,
    in_current_month: bool,
}

#[derive(Serialize)]
struct WeekDto {
    week: usize,
    days: Vec<DayCellDto>,
}

#[derive(Serialize)]
struct MonthDto {
    year: i32,
    month: u32,
}

fn week_dtos(grid: &CalendarGrid) -> Vec<WeekDto> {
    grid.weeks
        .iter()
        .map(|row| WeekDto {
            week: row.week,
            days: row
                .days
                .iter()
                .map(|c| DayCellDto {
                    date: c.date.format("%Y-%m-%d").to_string(),
                    day: c.date.day(),
                    disabled: c.disabled,
                    in_current_month: c.in_current_month,
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build the week matrix for a month.
///
/// # Arguments
/// - `year`, `month` -- the displayed month (month 1-based)
/// - `facts_json` -- `{"blockedWeekDays": [...], "blockedDates": [...]}`, or
///   `None` while the facts have not loaded (every day is then disabled)
/// - `today` -- `YYYY-MM-DD`
/// - `week_start` -- weekday name such as `"sunday"`
///
/// Returns a JSON array of `{week, days: [{date, day, disabled, inCurrentMonth}]}`.
#[wasm_bindgen(js_name = "buildGrid")]
pub fn build_grid(
    year: i32,
    month: u32,
    facts_json: Option<String>,
    today: &str,
    week_start: &str,
) -> Result<String, JsValue> {
    let anchor = AnchorMonth::new(year, month).map_err(js_err)?;
    let facts = facts_json
        .as_deref()
        .map(BlockedFacts::from_json)
        .transpose()
        .map_err(js_err)?;
    let today = parse_date(today)?;
    let week_start = parse_weekday(week_start).map_err(js_err)?;

    let grid = booking_grid::build_grid(anchor, facts.as_ref(), today, week_start);
    to_json(&week_dtos(&grid))
}

/// Flag each possible hour of a day as bookable or not.
///
/// `catalogue_json` is `{"possibleTimes": [...], "availableTimes": [...]}`.
/// Returns a JSON array of `{hour, bookable}` in catalogue order.
#[wasm_bindgen(js_name = "resolveSlots")]
pub fn resolve_slots(catalogue_json: &str) -> Result<String, JsValue> {
    let catalogue = TimeSlotCatalogue::from_json(catalogue_json).map_err(js_err)?;
    to_json(&booking_grid::resolve_slots(&catalogue))
}

/// Shift a month by `delta` months. Returns `{"year", "month"}`.
#[wasm_bindgen(js_name = "shiftMonth")]
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<String, JsValue> {
    let anchor = AnchorMonth::new(year, month).map_err(js_err)?;
    let shifted = booking_grid::shift_month(anchor, delta);
    to_json(&MonthDto {
        year: shifted.year(),
        month: shifted.month(),
    })
}
