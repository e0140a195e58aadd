//! `bookgrid` CLI — render a host's booking month grid and a day's hour slots.
//!
//! ## Usage
//!
//! ```sh
//! # Month grid with blocking facts (JSON as returned by the blocked-dates API)
//! bookgrid grid --year 2024 --month 2 --facts blocked.json --today 2024-02-10
//!
//! # Without facts every day is shown disabled
//! bookgrid grid --year 2024 --month 2
//!
//! # Grid as JSON, Monday-first, using a config file
//! bookgrid grid --year 2024 --month 2 --config bookgrid.toml --json
//!
//! # Hour slots for a day (JSON as returned by the availability API)
//! bookgrid slots --catalogue availability.json --date 2024-02-12
//!
//! # Whole booking flow against a provider data file: open the month of
//! # --today, select a day and list its slots
//! bookgrid book --provider host.json --user host --today 2024-02-10 --date 2024-02-12
//!
//! # Month arithmetic
//! bookgrid navigate --year 2024 --month 12 --delta 1
//! ```

use anyhow::{bail, Context, Result};
use booking_grid::labels::{describe_date, hour_label, month_title, weekday_labels};
use booking_grid::{
    build_grid, resolve_slots, shift_month, AnchorMonth, BlockedFacts, BookingCalendar,
    CalendarConfig, CalendarGrid, DayCell, InMemoryProvider, TimeSlot, TimeSlotCatalogue,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bookgrid",
    version,
    about = "Booking calendar grid and time slot CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (defaults to ./bookgrid.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the month grid
    Grid {
        #[arg(long)]
        year: i32,
        /// 1-based month
        #[arg(long)]
        month: u32,
        /// Blocked facts JSON file; omit to render the month as not loaded
        #[arg(long)]
        facts: Option<String>,
        /// Date treated as today (YYYY-MM-DD); defaults to today in the configured timezone
        #[arg(long)]
        today: Option<String>,
        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the hour slots of a day
    Slots {
        /// Time slot catalogue JSON file (reads from stdin if omitted)
        #[arg(long)]
        catalogue: Option<String>,
        /// Date the catalogue belongs to, for the heading
        #[arg(long)]
        date: Option<String>,
        /// Print the slots as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open a host's calendar on a provider data file and optionally select a day
    Book {
        /// Provider data JSON: {"facts": {"user/YYYY-MM": ...}, "slots": {"user/YYYY-MM-DD": ...}}
        #[arg(long)]
        provider: String,
        /// Host whose calendar is shown
        #[arg(long)]
        user: String,
        /// Date treated as today (YYYY-MM-DD); defaults to today in the configured timezone
        #[arg(long)]
        today: Option<String>,
        /// Day to select (YYYY-MM-DD); its slots are listed below the grid
        #[arg(long)]
        date: Option<String>,
    },
    /// Shift a month by a number of months
    Navigate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, allow_hyphen_values = true)]
        delta: i32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => CalendarConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => CalendarConfig::load_default().context("Failed to load default config")?,
    };
    debug!(?config, "loaded config");

    match cli.command {
        Commands::Grid {
            year,
            month,
            facts,
            today,
            json,
        } => {
            let anchor = AnchorMonth::new(year, month)?;
            let facts = facts
                .as_deref()
                .map(|path| {
                    let raw = read_input(Some(path))?;
                    BlockedFacts::from_json(&raw)
                        .with_context(|| format!("Invalid blocked facts in {}", path))
                })
                .transpose()?;
            let today = match today.as_deref() {
                Some(raw) => parse_date(raw)?,
                None => config.today()?,
            };

            let grid = build_grid(anchor, facts.as_ref(), today, config.week_start);
            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render_grid(&grid, &config));
            }
        }
        Commands::Slots {
            catalogue,
            date,
            json,
        } => {
            let raw = read_input(catalogue.as_deref())?;
            let catalogue =
                TimeSlotCatalogue::from_json(&raw).context("Invalid time slot catalogue")?;
            let slots = resolve_slots(&catalogue);

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                if let Some(raw) = date.as_deref() {
                    println!("{}", describe_date(parse_date(raw)?, config.locale));
                }
                print!("{}", render_slots(&slots));
            }
        }
        Commands::Book {
            provider,
            user,
            today,
            date,
        } => {
            let raw = read_input(Some(provider.as_str()))?;
            let provider = InMemoryProvider::from_json(&raw)
                .with_context(|| format!("Invalid provider data in {}", provider))?;
            let today = match today.as_deref() {
                Some(raw) => parse_date(raw)?,
                None => config.today()?,
            };

            let mut calendar = BookingCalendar::new(&user, config, today)?;
            calendar.refresh(&provider);
            print!("{}", render_grid(&calendar.grid(), calendar.config()));

            if let Some(raw) = date.as_deref() {
                let date = parse_date(raw)?;
                if calendar.select_date(date).is_none() {
                    bail!("{} is not selectable", date);
                }
                calendar.refresh(&provider);

                println!();
                if let Some(label) = calendar.selected_label() {
                    println!("{}", label);
                }
                match calendar.slots() {
                    Some(slots) => print!("{}", render_slots(slots)),
                    None => println!("no slots yet"),
                }
            }
        }
        Commands::Navigate { year, month, delta } => {
            let shifted = shift_month(AnchorMonth::new(year, month)?, delta);
            println!("{}  {}", shifted, month_title(shifted, config.locale));
        }
    }

    Ok(())
}

/// Text rendering: selectable days plain, disabled days in parentheses,
/// filler from neighbouring months as `·`.
fn render_grid(grid: &CalendarGrid, config: &CalendarConfig) -> String {
    let mut out = String::new();
    out.push_str(&month_title(grid.anchor, config.locale));
    out.push('\n');

    let header: Vec<String> = weekday_labels(grid.week_start, config.locale, true)
        .iter()
        .map(|label| format!("{:>4}", label))
        .collect();
    out.push_str(header.concat().trim_end());
    out.push('\n');

    for row in &grid.weeks {
        let line: Vec<String> = row.days.iter().map(render_cell).collect();
        out.push_str(line.concat().trim_end());
        out.push('\n');
    }
    out
}

fn render_slots(slots: &[TimeSlot]) -> String {
    slots
        .iter()
        .map(|slot| {
            let state = if slot.bookable { "available" } else { "unavailable" };
            format!("{}  {}\n", hour_label(slot.hour), state)
        })
        .collect()
}

fn render_cell(cell: &DayCell) -> String {
    use chrono::Datelike;

    if !cell.in_current_month {
        "   ·".to_string()
    } else if cell.disabled {
        format!("({:>2})", cell.date.day())
    } else {
        format!("{:>4}", cell.date.day())
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
