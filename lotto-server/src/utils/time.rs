//! 时间工具函数 (门店时区转换)
//!
//! Business dates are always resolved in the store's IANA timezone; the
//! repository layer only sees `YYYY-MM-DD` strings and `i64` Unix millis.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult, ErrorCode};

/// Storage format of `business_day.business_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析 IANA 时区名
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>().map_err(|_| {
        AppError::with_message(
            ErrorCode::StoreInvalidTimezone,
            format!("Unknown timezone: {name}"),
        )
    })
}

/// Calendar date of `now` in the store timezone
pub fn business_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Unix millis → calendar date in the store timezone
pub fn millis_to_date(millis: i64, tz: Tz) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| business_date(dt, tz))
        .unwrap_or_default()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_business_date_uses_store_timezone() {
        // 2024-03-10 03:30 UTC is still 2024-03-09 in New York
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 3, 30, 0).unwrap();
        let ny: Tz = "America/New_York".parse().unwrap();
        assert_eq!(format_date(business_date(now, ny)), "2024-03-09");
        assert_eq!(format_date(business_date(now, Tz::UTC)), "2024-03-10");
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("America/Chicago").is_ok());
        let err = parse_timezone("Mars/Olympus").unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreInvalidTimezone);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29").unwrap().to_string(), "2024-02-29");
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("03/10/2024").is_err());
    }

    #[test]
    fn test_millis_to_date() {
        let ms = Utc.with_ymd_and_hms(2024, 7, 1, 2, 0, 0).unwrap().timestamp_millis();
        let la: Tz = "America/Los_Angeles".parse().unwrap();
        assert_eq!(format_date(millis_to_date(ms, la)), "2024-06-30");
    }
}
