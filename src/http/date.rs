//! HTTP date handling
//!
//! `Last-Modified` values and `If-Modified-Since` comparison.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::time::SystemTime;

/// Format a timestamp as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Obsolete date forms recipients still have to accept: RFC 850 and asctime
const OBSOLETE_FORMATS: [&str; 2] = ["%A, %d-%b-%y %H:%M:%S GMT", "%a %b %e %H:%M:%S %Y"];

/// Parse an HTTP date header, returning `None` for anything unparseable
///
/// Accepts IMF-fixdate (any RFC 2822 date) plus the RFC 850 and asctime
/// forms, e.g. `Sunday, 06-Nov-94 08:49:37 GMT` and `Sun Nov  6 08:49:37 1994`.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }

    // asctime pads single-digit days with a space
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    OBSOLETE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&collapsed, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Whether a resource modified at `modified` is unchanged since `if_modified_since`.
///
/// Header dates have one-second resolution, so sub-second parts of the
/// modification time are dropped before comparing.
pub fn not_modified_since(modified: SystemTime, if_modified_since: &str) -> bool {
    let Some(since) = parse_http_date(if_modified_since) else {
        return false;
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    const NOV_1994: u64 = 784_111_777;

    #[test]
    fn test_format_http_date() {
        let time = UNIX_EPOCH + Duration::from_secs(NOV_1994);
        assert_eq!(format_http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 784_111_777);
        assert!(parse_http_date("yesterday").is_none());
        assert!(parse_http_date("").is_none());
    }

    #[test]
    fn test_parse_obsolete_date_forms() {
        let asctime = parse_http_date("Sun Nov  6 08:49:37 1994").unwrap();
        assert_eq!(asctime.timestamp(), 784_111_777);
        let rfc850 = parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT").unwrap();
        assert_eq!(rfc850.timestamp(), 784_111_777);

        let modified = UNIX_EPOCH + Duration::from_secs(NOV_1994);
        assert!(not_modified_since(modified, "Sun Nov  6 08:49:37 1994"));
        assert!(!not_modified_since(modified, "Sat Nov  5 08:49:37 1994"));
    }

    #[test]
    fn test_not_modified_since() {
        let modified = UNIX_EPOCH + Duration::from_millis(NOV_1994 * 1000 + 400);
        let header = "Sun, 06 Nov 1994 08:49:37 GMT";
        assert!(not_modified_since(modified, header));
        assert!(not_modified_since(modified, "Mon, 07 Nov 1994 08:49:37 GMT"));
        assert!(!not_modified_since(modified, "Sat, 05 Nov 1994 08:49:37 GMT"));
        assert!(!not_modified_since(modified, "garbage"));
    }
}
