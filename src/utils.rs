use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Current unix time in seconds.
pub fn now_timestamp() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Case-insensitive substring match; an empty needle always matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
