use chrono::{NaiveDateTime, Timelike};

/// Averages are rounded to two decimals, exact halves to even, and keep at
/// least one fractional digit (`4.0`, `3.67`). A missing average is `0`.
pub fn average(mean: Option<f64>) -> String {
    match mean {
        Some(mean) => {
            let fixed = format!("{:.2}", mean);
            let trimmed = fixed.trim_end_matches('0');
            if trimmed.ends_with('.') {
                format!("{}0", trimmed)
            } else {
                trimmed.to_string()
            }
        }
        None => "0".into(),
    }
}

pub fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

pub fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Naive date-time with microseconds only when there are any
pub fn timestamp(value: Option<&NaiveDateTime>) -> String {
    match value {
        Some(value) if value.nanosecond() != 0 => {
            value.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
        }
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

/// Keep at most `width` characters
pub fn truncate(cell: &str, width: usize) -> &str {
    match cell.char_indices().nth(width) {
        Some((end, _)) => &cell[..end],
        None => cell,
    }
}
