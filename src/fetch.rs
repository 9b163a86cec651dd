//! Fetching the holiday-observances page.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Where the observance tables live.
pub const HOLIDAY_URL: &str = "https://hr.caltech.edu/resources/holiday-observances";

const USER_AGENT: &str = "caltech_holidays";

/// Fetched page body plus the raw Last-Modified header, when the server sent
/// one.
pub struct HolidayPage {
    pub body: String,
    pub last_modified: Option<String>,
}

/// Download the holiday page. A non-success status is an error; there is no
/// retry here, that is the caller's business.
pub async fn fetch_holiday_page(url: &str) -> Result<HolidayPage> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .context("holiday page request failed")?
        .error_for_status()
        .context("holiday page returned an error status")?;

    let last_modified = response
        .headers()
        .get(reqwest::header::LAST_MODIFIED)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let body = response
        .text()
        .await
        .context("reading holiday page body")?;

    Ok(HolidayPage {
        body,
        last_modified,
    })
}

/// Parse an HTTP Last-Modified header (RFC 1123 date) into the stamp applied
/// to every event built this run.
pub fn parse_last_modified(value: &str) -> chrono::ParseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value).map(|stamp| stamp.with_timezone(&Utc))
}
