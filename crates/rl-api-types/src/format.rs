//! Display helpers for addresses, sizes, amounts and deadlines.

use chrono::{DateTime, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// `0x742d…d8b6` style shortening. Empty input stays empty.
pub fn shorten_address(address: &str, chars: usize) -> String {
    if address.is_empty() {
        return String::new();
    }
    let count = address.chars().count();
    if count <= chars * 2 + 2 {
        return address.to_owned();
    }
    let head: String = address.chars().take(chars + 2).collect();
    let tail: String = address.chars().skip(count - chars).collect();
    format!("{head}...{tail}")
}

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(digits) => digits.len() == 40 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

pub fn is_valid_amount(amount: &str) -> bool {
    amount
        .trim()
        .parse::<f64>()
        .map(|value| value.is_finite() && value > 0.0)
        .unwrap_or(false)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut index = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && index < UNITS.len() - 1 {
        value /= 1024.0;
        index += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[index])
}

/// "Just now", "5m ago", "3h ago", "2d ago", then a calendar date.
pub fn relative_time(timestamp_ms: u64, now_ms: u64) -> String {
    let diff_seconds = (now_ms as i64 - timestamp_ms as i64) / 1000;
    if diff_seconds < 60 {
        return "Just now".to_owned();
    }
    if diff_seconds < 3_600 {
        return format!("{}m ago", diff_seconds / 60);
    }
    if diff_seconds < 86_400 {
        return format!("{}h ago", diff_seconds / 3_600);
    }
    if diff_seconds < 2_592_000 {
        return format!("{}d ago", diff_seconds / 86_400);
    }
    calendar_date(timestamp_ms)
}

pub fn deadline_label(deadline_ms: u64, now_ms: u64) -> String {
    let days = days_until(deadline_ms, now_ms);
    match days {
        d if d < 0 => "Overdue".to_owned(),
        0 => "Due today".to_owned(),
        1 => "Due tomorrow".to_owned(),
        d if d <= 7 => format!("Due in {d} days"),
        _ => calendar_date(deadline_ms),
    }
}

pub fn is_urgent(deadline_ms: u64, now_ms: u64, threshold_days: i64) -> bool {
    let days = days_until(deadline_ms, now_ms);
    (0..=threshold_days).contains(&days)
}

fn days_until(deadline_ms: u64, now_ms: u64) -> i64 {
    let diff = deadline_ms as i64 - now_ms as i64;
    // ceil division toward +inf, matching whole-day rounding up
    if diff > 0 {
        (diff + DAY_MS - 1) / DAY_MS
    } else {
        diff / DAY_MS
    }
}

fn calendar_date(timestamp_ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}
