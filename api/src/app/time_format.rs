//! Relative time formatting
//!
//! One bucketing rule, phrased two ways: "3h ago" for creation times and
//! "3h left" for story expiry countdowns.

use chrono::{DateTime, Duration, Utc};

/// A time span rounded down to its most significant unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    UnderAMinute,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    OverAWeek,
}

fn bucket(span: Duration) -> Span {
    if span < Duration::minutes(1) {
        Span::UnderAMinute
    } else if span < Duration::hours(1) {
        Span::Minutes(span.num_minutes())
    } else if span < Duration::days(1) {
        Span::Hours(span.num_hours())
    } else if span < Duration::days(7) {
        Span::Days(span.num_days())
    } else {
        Span::OverAWeek
    }
}

/// "Just now", "5m ago", "3h ago", "2d ago", or a short date after a week
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match bucket(now - at) {
        Span::UnderAMinute => "Just now".to_string(),
        Span::Minutes(m) => format!("{}m ago", m),
        Span::Hours(h) => format!("{}h ago", h),
        Span::Days(d) => format!("{}d ago", d),
        Span::OverAWeek => at.format("%b %d").to_string(),
    }
}

/// "Expiring soon", "10m left", "3h left", "2d left"
pub fn time_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let span = expires_at - now;
    match bucket(span) {
        Span::UnderAMinute => "Expiring soon".to_string(),
        Span::Minutes(m) => format!("{}m left", m),
        Span::Hours(h) => format!("{}h left", h),
        Span::Days(d) => format!("{}d left", d),
        Span::OverAWeek => format!("{}d left", span.num_days()),
    }
}
