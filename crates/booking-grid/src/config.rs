//! Calendar configuration, read from TOML.
//!
//! ```toml
//! week_start = "monday"
//! timezone = "America/Sao_Paulo"
//! locale = "pt-BR"
//! ```

use std::path::Path;

use chrono::{NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Language of generated labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// First column of the grid.
    pub week_start: Weekday,
    /// IANA zone whose date counts as "today".
    pub timezone: String,
    pub locale: Locale,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            timezone: "UTC".to_string(),
            locale: Locale::En,
        }
    }
}

impl CalendarConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.tz()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load the first config file found in the working directory, or the
    /// defaults when there is none.
    pub fn load_default() -> Result<Self> {
        let paths = ["bookgrid.toml", "config/bookgrid.toml"];

        for path in &paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| GridError::InvalidTimezone(self.timezone.clone()))
    }

    /// Current date in the configured zone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }
}

/// Parse a weekday name such as `"sunday"` or `"Mon"`.
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    name.trim()
        .parse()
        .map_err(|_| GridError::InvalidWeekday(name.to_string()))
}
