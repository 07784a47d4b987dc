use anyhow::Result;
use chrono::{Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};
use remind_core::models::{DATE_DISPLAY_FORMAT, DATE_STORE_FORMAT};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parses a date given as `dd-mm-yyyy`, `yyyymmdd`, `yyyy-mm-dd`, or in
/// English ("tomorrow", "next friday", "3 days").
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    let trimmed = date_str.trim();
    for format in [DATE_DISPLAY_FORMAT, DATE_STORE_FORMAT, ISO_FORMAT] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    parse_date_string(trimmed, Local::now(), Dialect::Uk)
        .map(|datetime| datetime.date_naive())
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}
