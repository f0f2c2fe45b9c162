//! Display formatting helpers for counters, currency, and date ranges.
//! Pure functions consumed by the presentation layer.

use chrono::NaiveDate;

/// Compact counter formatting: 1_234_567 -> "1.2M", 5_400 -> "5.4K".
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// US-dollar currency formatting with thousands separators.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

/// Header date range, e.g. "Apr 1 - Apr 30, 2023".
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{} - {}",
        start.format("%b %-d"),
        end.format("%b %-d, %Y")
    )
}
