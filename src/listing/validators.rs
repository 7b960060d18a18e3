//! Pure field predicates
//!
//! Every validator takes the raw text of a field and answers whether it is
//! acceptable. They never look at other fields; cross-field relevance is
//! handled by the rule layer.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ().-]+$").expect("valid phone regex"));
static HOST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+(?::[0-9]{1,5})?$")
        .expect("valid host regex")
});
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").expect("valid time regex"));

/// Time format used for opening hours
pub const TIME_FORMAT: &str = "%H:%M";

pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Character count (not bytes) of the trimmed value lies in `min..=max`
pub fn is_length_in_range(value: &str, min: usize, max: usize) -> bool {
    let len = value.trim().chars().count();
    (min..=max).contains(&len)
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Loose phone shape: digits with optional `+` prefix and common separators,
/// 7 to 15 digits in total.
pub fn is_phone(value: &str) -> bool {
    let value = value.trim();
    if !PHONE_RE.is_match(value) {
        return false;
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

/// Scheme + host shape. A bare host (`example.com`) is accepted because the
/// payload transformer prepends `https://` before submission.
pub fn is_url(value: &str) -> bool {
    let value = value.trim();
    let rest = match value.split_once("://") {
        Some((scheme, rest)) => {
            if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
                return false;
            }
            rest
        }
        None => value,
    };
    if rest.chars().any(char::is_whitespace) {
        return false;
    }
    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    HOST_RE.is_match(host)
}

/// Non-negative integer no larger than `max`
pub fn is_whole_number(value: &str, max: u32) -> bool {
    value.trim().parse::<u32>().is_ok_and(|n| n <= max)
}

/// 24 hour `HH:MM`
pub fn is_time_of_day(value: &str) -> bool {
    parse_time(value).is_some()
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if !TIME_RE.is_match(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}
