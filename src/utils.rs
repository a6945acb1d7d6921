//! Utility helpers shared across the WASM frontend.

/// Format a service distance in meters the way the list panel shows it:
/// kilometers with one decimal, trailing zeros trimmed ("0.4 km", "2 km").
pub fn format_distance_km(distance_m: f64) -> String {
    let km = (distance_m / 1000.0 * 10.0).round() / 10.0;
    if (km - km.trunc()).abs() < f64::EPSILON {
        format!("{} km", km.trunc() as i64)
    } else {
        format!("{km:.1} km")
    }
}

/// Truncate to user-perceived grapheme clusters so we never slice through
/// multi-byte characters or emoji sequences in place names.
pub fn truncate_label(text: &str, max_graphemes: usize) -> String {
    use unicode_segmentation::UnicodeSegmentation;

    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        text.to_string()
    } else {
        let truncated: String = graphemes[..max_graphemes].concat();
        format!("{}...", truncated)
    }
}

/// Render a millisecond epoch timestamp as the popup footer shows it.
pub fn format_retrieved_at(epoch_ms: i64) -> String {
    use chrono::{DateTime, Utc};

    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => String::new(),
    }
}

/// Capitalise the first letter of a &str.
pub fn capitalise_first(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Current timestamp in milliseconds since UNIX epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
