use chrono::{TimeZone, Utc};

/// Digit-group a counter with '.' separators regardless of locale
/// ("1234567" -> "1.234.567").
pub(super) fn format_grouped_count(count: i64) -> String {
    let digits = count.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if count < 0 { format!("-{grouped}") } else { grouped }
}

/// Long-form en-US date string for a post timestamp, with any literal "1970"
/// removed afterwards.
///
/// The input is interpreted as milliseconds even though the upstream sends
/// seconds, so real posts format into early 1970 before the strip. Consumers
/// rely on the resulting string verbatim, so both quirks are kept.
pub(super) fn format_taken_at(create_time: i64) -> String {
    let Some(date) = Utc.timestamp_millis_opt(create_time).single() else {
        return String::new();
    };
    date.format("%A, %B %-d, %Y at %-I:%M:%S %p")
        .to_string()
        .replace("1970", "")
}
