use chrono::{DateTime, Utc};

/// Human-readable age of `date` relative to `now`, e.g. "3 hours ago".
///
/// Dates in the future (clock skew between us and upstream) read as "just now".
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - date).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }

    let (value, unit) = match secs {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 2_592_000 => (s / 86_400, "day"),
        s if s < 31_536_000 => (s / 2_592_000, "month"),
        s => (s / 31_536_000, "year"),
    };

    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_just_now() {
        assert_eq!(time_ago(now() - Duration::seconds(30), now()), "just now");
        assert_eq!(time_ago(now() + Duration::seconds(90), now()), "just now");
    }

    #[test]
    fn test_singular_and_plural() {
        assert_eq!(time_ago(now() - Duration::minutes(1), now()), "1 minute ago");
        assert_eq!(time_ago(now() - Duration::minutes(5), now()), "5 minutes ago");
        assert_eq!(time_ago(now() - Duration::hours(1), now()), "1 hour ago");
        assert_eq!(time_ago(now() - Duration::hours(23), now()), "23 hours ago");
        assert_eq!(time_ago(now() - Duration::days(2), now()), "2 days ago");
    }

    #[test]
    fn test_long_spans() {
        assert_eq!(time_ago(now() - Duration::days(65), now()), "2 months ago");
        assert_eq!(time_ago(now() - Duration::days(400), now()), "1 year ago");
    }
}
