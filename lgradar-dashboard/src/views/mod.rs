//! Server-rendered HTML views
//!
//! Views are plain functions returning `String`s. All dynamic text passes
//! through [`escape_html`]; protected views take a [`Viewer`](crate::auth::Viewer)
//! by reference and never look at anything but its session.

pub mod layout;
pub mod pages;
pub mod public;

use chrono::NaiveDate;

pub use crate::forms::escape_html;

/// `2025-01-07` → `Jan 7, 2025`; anything unparseable is shown as-is
#[must_use]
pub fn format_date(iso: &str) -> String {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map_or_else(|_| iso.to_string(), |date| date.format("%b %-d, %Y").to_string())
}

/// `9900` → `$99.00`
#[must_use]
pub fn format_amount(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Badge markup for a status word
#[must_use]
pub fn badge(status: &str) -> String {
    let tone = match status {
        "new" | "active" | "verified" | "paid" | "completed" => "badge-success",
        "pending" | "paused" => "badge-warning",
        "archived" => "badge-outline",
        _ => "badge-secondary",
    };
    format!(r#"<span class="badge {tone}">{}</span>"#, escape_html(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-01-07"), "Jan 7, 2025");
        assert_eq!(format_date("Never"), "Never");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(9900), "$99.00");
        assert_eq!(format_amount(5), "$0.05");
    }

    #[test]
    fn test_badge_tone() {
        assert!(badge("paid").contains("badge-success"));
        assert!(badge("paused").contains("badge-warning"));
        assert!(badge("<x>").contains("&lt;x&gt;"));
    }
}
