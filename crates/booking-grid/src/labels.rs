//! Human-readable labels for the calendar header and the time picker.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar::AnchorMonth;
use crate::config::Locale;

const WEEKDAYS_EN: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const WEEKDAYS_PT: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_PT: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

fn weekday_name(day: Weekday, locale: Locale) -> &'static str {
    let i = day.num_days_from_sunday() as usize;
    match locale {
        Locale::En => WEEKDAYS_EN[i],
        Locale::PtBr => WEEKDAYS_PT[i],
    }
}

fn month_name(month: u32, locale: Locale) -> &'static str {
    let i = (month.clamp(1, 12) - 1) as usize;
    match locale {
        Locale::En => MONTHS_EN[i],
        Locale::PtBr => MONTHS_PT[i],
    }
}

/// Column headers starting at `week_start`. Short labels are the first three
/// letters (`Sun`, `Dom`).
pub fn weekday_labels(week_start: Weekday, locale: Locale, short: bool) -> Vec<String> {
    let mut day = week_start;
    (0..7)
        .map(|_| {
            let name = weekday_name(day, locale);
            day = day.succ();
            if short {
                name.chars().take(3).collect()
            } else {
                name.to_string()
            }
        })
        .collect()
}

/// `February 2024`.
pub fn month_title(anchor: AnchorMonth, locale: Locale) -> String {
    format!("{} {}", month_name(anchor.month(), locale), anchor.year())
}

/// `08:00h`.
pub fn hour_label(hour: u8) -> String {
    format!("{:02}:00h", hour)
}

/// Time picker heading: `Thursday, 15 February` or `Quinta-feira, 15 de fevereiro`.
pub fn describe_date(date: NaiveDate, locale: Locale) -> String {
    let weekday = weekday_name(date.weekday(), locale);
    let month = month_name(date.month(), locale);
    match locale {
        Locale::En => format!("{}, {:02} {}", weekday, date.day(), month),
        Locale::PtBr => format!("{}, {:02} de {}", weekday, date.day(), month.to_lowercase()),
    }
}
