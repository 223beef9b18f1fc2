use chrono::NaiveDate;
use reqwest::Response;

use crate::error::{ApiError, Result};

pub const POST_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Turns a non-success response into [`ApiError::Upstream`], keeping the
/// upstream status and body.
pub async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Upstream { status, body })
}

/// A slug is a non-empty run of lowercase ASCII letters, digits and `-`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

pub fn validate_slug(slug: &str) -> Result<&str> {
    if is_valid_slug(slug) {
        Ok(slug)
    } else {
        Err(ApiError::InvalidSlug(slug.to_string()))
    }
}

pub fn parse_post_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), POST_DATE_FORMAT).ok()
}

/// Formats a `yyyy-MM-dd` post date as `MMMM d, yyyy`.
///
/// Dates that do not parse are returned unchanged.
pub fn format_post_date(date: &str) -> String {
    match parse_post_date(date) {
        Some(d) => d.format(DISPLAY_DATE_FORMAT).to_string(),
        None => date.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
