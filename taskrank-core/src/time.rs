//! Time utilities: due-date parsing and "today" in a given timezone.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%MZ",
];

/// Offset forms RFC 3339 leaves out (no seconds, or a space separator).
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// Parse a due date.
///
/// Accepts `YYYY-MM-DD`, then falls back to ISO-8601 date-times (with or
/// without offset). A date-time contributes its own calendar date, no
/// timezone conversion. Returns `None` for anything else.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ndt| ndt.date())
        .or_else(|| parse_hour_only(s))
}

// chrono wants at least minutes, so `YYYY-MM-DDTHH` is split by hand.
fn parse_hour_only(s: &str) -> Option<NaiveDate> {
    let (date, hour) = s.split_once(['T', ' '])?;
    let valid_hour = hour.len() == 2 && hour.parse::<u32>().is_ok_and(|h| h < 24);
    if !valid_hour {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Today's date in an IANA timezone like "America/Chicago".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// Today's date on the host clock.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_due_date("2026-02-20"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date(" 2026-02-20 "), Some(ymd(2026, 2, 20)));
    }

    #[test]
    fn test_parse_date_time_fallbacks() {
        assert_eq!(parse_due_date("2026-02-20T23:59:00"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date("2026-02-20T08:15"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date("2026-02-20 23:59:00.250"), Some(ymd(2026, 2, 20)));
        // Offset is kept, not converted to UTC.
        assert_eq!(parse_due_date("2026-02-20T23:30:00-06:00"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date("2026-02-20T01:00:00Z"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date("2026-02-20T10:00+02:00"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date("2026-02-20 23:30-06:00"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date("2026-02-20T10:00Z"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date("2026-02-20T10"), Some(ymd(2026, 2, 20)));
        assert_eq!(parse_due_date("2026-02-20 07"), Some(ymd(2026, 2, 20)));
    }

    #[test]
    fn test_hour_only_rejects_bad_hours() {
        assert_eq!(parse_due_date("2026-02-20T24"), None);
        assert_eq!(parse_due_date("2026-02-20T1"), None);
        assert_eq!(parse_due_date("2026-02-20Tab"), None);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_due_date("next friday"), None);
        assert_eq!(parse_due_date("2026-13-01"), None);
        assert_eq!(parse_due_date(""), None);
    }

    #[test]
    fn test_today_in_rejects_unknown_timezone() {
        assert!(today_in("Mars/Olympus_Mons").is_err());
        assert!(today_in("America/Chicago").is_ok());
    }
}
