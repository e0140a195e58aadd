//! # booking-grid
//!
//! Month calendar grids and hour-slot availability for meeting booking pages.
//!
//! A visitor browses a host's month, sees which days can be booked, and picks
//! a free hour on one of them. Blocking facts and time catalogues come from
//! external providers; this crate only merges them into renderable views and
//! makes sure late responses for a superseded month or date are never shown.
//!
//! ## Modules
//!
//! - [`calendar`] — month lengths, weekday numbering, month shifting
//! - [`blocked`] — per-month blocking facts and the fail-safe blocking predicate
//! - [`grid`] — the 7-wide week matrix with filler days
//! - [`availability`] — time catalogue → ordered bookable slots, keyed per date
//! - [`navigation`] — the displayed month and its facts
//! - [`booking`] — grid and time picker wired together
//! - [`cache`] — latest-key result cache used for stale-result discarding
//! - [`provider`] — fetch contracts and an in-memory provider
//! - [`labels`] — weekday, month and hour labels
//! - [`config`] — TOML configuration
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```rust
//! use booking_grid::{build_grid, AnchorMonth, BlockedFacts};
//! use chrono::{NaiveDate, Weekday};
//!
//! let feb = AnchorMonth::new(2024, 2).unwrap();
//! let facts = BlockedFacts::new([0, 6], []).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
//!
//! let grid = build_grid(feb, Some(&facts), today, Weekday::Sun);
//! assert_eq!(grid.weeks.len(), 5);
//! assert!(grid.activate(NaiveDate::from_ymd_opt(2024, 2, 12).unwrap()).is_some());
//! assert!(grid.activate(NaiveDate::from_ymd_opt(2024, 2, 11).unwrap()).is_none());
//! ```

pub mod availability;
pub mod blocked;
pub mod booking;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod error;
pub mod grid;
pub mod labels;
pub mod navigation;
pub mod provider;

pub use availability::{resolve_slots, SlotResolver, TimeSlot, TimeSlotCatalogue};
pub use blocked::{is_blocked, BlockedFacts};
pub use booking::BookingCalendar;
pub use calendar::{days_in_month, shift_month, weekday_index, AnchorMonth};
pub use config::{CalendarConfig, Locale};
pub use error::{FetchError, GridError};
pub use grid::{build_grid, CalendarGrid, DayCell, WeekRow};
pub use navigation::MonthNavigator;
pub use provider::{BlockedFactsProvider, FactsKey, InMemoryProvider, SlotKey, TimeSlotProvider};
