//! Human-friendly rendering of backend timestamps for the history panel.
//!
//! In the browser the user's locale decides the format; elsewhere (SSR,
//! native tests) a fixed `DD/MM/YYYY, HH:MM:SS` rendering is used. Anything
//! unparseable is shown verbatim.

#[cfg(test)]
#[path = "timestamp_test.rs"]
mod timestamp_test;

/// Format an `updated_at` value for display.
pub fn format_timestamp(raw: &str) -> String {
    #[cfg(feature = "hydrate")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(raw));
        if !date.get_time().is_nan() {
            return String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED));
        }
    }
    format_fixed(raw).unwrap_or_else(|| raw.to_owned())
}

/// Locale-independent rendering of an RFC 3339-like timestamp.
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space and
/// `HH:MM:SS`; fractional seconds and offsets are ignored.
pub fn format_fixed(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (date, time) = match raw.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (raw, None),
    };

    let mut parts = date.split('-');
    let year = parse_fixed_width(parts.next()?, 4)?;
    let month = parse_fixed_width(parts.next()?, 2)?;
    let day = parse_fixed_width(parts.next()?, 2)?;
    if parts.next().is_some() || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    let date_text = format!("{day:02}/{month:02}/{year:04}");

    let Some(time) = time else {
        return Some(date_text);
    };
    let mut parts = time.get(..8)?.split(':');
    let hour = parse_fixed_width(parts.next()?, 2)?;
    let minute = parse_fixed_width(parts.next()?, 2)?;
    let second = parse_fixed_width(parts.next()?, 2)?;
    if hour > 23 || minute > 59 || second > 60 {
        return None;
    }
    Some(format!("{date_text}, {hour:02}:{minute:02}:{second:02}"))
}

fn parse_fixed_width(part: &str, width: usize) -> Option<u32> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
