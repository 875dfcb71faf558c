use chrono::{Duration, NaiveDate};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Twelve monthly category labels, January first.
pub fn month_labels() -> Vec<String> {
    MONTH_LABELS.iter().map(|m| m.to_string()).collect()
}

/// `days` short date labels ("Oct 19") ending at `today`, oldest first.
pub fn daily_labels(today: NaiveDate, days: usize) -> Vec<String> {
    (0..days)
        .rev()
        .map(|back| short_date(today - Duration::days(back as i64)))
        .collect()
}

/// Abbreviated month and day without padding, e.g. "Mar 5".
pub fn short_date(d: NaiveDate) -> String {
    d.format("%b %-d").to_string()
}
