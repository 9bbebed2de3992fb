//! 营业期间 (Business Period)
//!
//! The open period runs from the last day close to now. It is derived from
//! the business-day ledger on every read and never stored.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::db::repository::{business_day, pack};
use crate::utils::{AppResult, time};
use shared::models::{ActivatedPack, BusinessDay, BusinessPeriod, PeriodLabel, Store};

/// Derive the open period.
///
/// `first_started_at` is used only when no day has been closed yet.
pub fn derive_period(
    last_closed: Option<&BusinessDay>,
    first_started_at: i64,
    now: DateTime<Utc>,
    tz: Tz,
) -> BusinessPeriod {
    let today = time::business_date(now, tz);

    match last_closed {
        Some(day) => {
            let days_since = time::parse_date(&day.business_date)
                .map(|last| (today - last).num_days())
                .ok();
            let label = match days_since {
                Some(d) if d <= 1 => PeriodLabel::Today,
                _ => PeriodLabel::CurrentPeriod,
            };
            BusinessPeriod {
                started_at: day.closed_at.unwrap_or(day.created_at),
                last_closed_date: Some(day.business_date.clone()),
                is_first_period: false,
                days_since_last_close: days_since,
                label,
            }
        }
        None => {
            let label = if time::millis_to_date(first_started_at, tz) == today {
                PeriodLabel::Today
            } else {
                PeriodLabel::CurrentPeriod
            };
            BusinessPeriod {
                started_at: first_started_at,
                last_closed_date: None,
                is_first_period: true,
                days_since_last_close: None,
                label,
            }
        }
    }
}

/// The store's open period as of `now`
pub async fn current_period(
    pool: &SqlitePool,
    store: &Store,
    tz: Tz,
    now: DateTime<Utc>,
) -> AppResult<BusinessPeriod> {
    let last_closed = business_day::find_last_closed(pool, store.id).await?;
    let first_started_at = match &last_closed {
        Some(_) => store.created_at,
        None => pack::earliest_activation(pool, store.id)
            .await?
            .unwrap_or(store.created_at),
    };
    Ok(derive_period(last_closed.as_ref(), first_started_at, now, tz))
}

/// Packs activated since the open period started
pub async fn activated_packs(
    pool: &SqlitePool,
    store: &Store,
    tz: Tz,
    now: DateTime<Utc>,
) -> AppResult<Vec<ActivatedPack>> {
    let period = current_period(pool, store, tz, now).await?;
    let packs = pack::find_activated_since(pool, store.id, period.started_at).await?;
    Ok(packs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::BusinessDayStatus;

    fn ny() -> Tz {
        "America/New_York".parse().unwrap()
    }

    fn closed(date: &str, closed_at: i64) -> BusinessDay {
        BusinessDay {
            id: 1,
            store_id: 1,
            business_date: date.into(),
            status: BusinessDayStatus::Closed,
            closed_by: Some(7),
            closed_at: Some(closed_at),
            created_at: closed_at - 1000,
        }
    }

    #[test]
    fn test_first_period_today() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 18, 0, 0).unwrap();
        let started = Utc.with_ymd_and_hms(2024, 5, 2, 13, 0, 0).unwrap().timestamp_millis();

        let period = derive_period(None, started, now, ny());
        assert!(period.is_first_period);
        assert_eq!(period.started_at, started);
        assert_eq!(period.label, PeriodLabel::Today);
        assert_eq!(period.days_since_last_close, None);
        assert_eq!(period.last_closed_date, None);
    }

    #[test]
    fn test_first_period_spanning_days() {
        let now = Utc.with_ymd_and_hms(2024, 5, 4, 18, 0, 0).unwrap();
        let started = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap().timestamp_millis();
        let period = derive_period(None, started, now, ny());
        assert_eq!(period.label, PeriodLabel::CurrentPeriod);
    }

    #[test]
    fn test_closed_yesterday_is_today() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 18, 0, 0).unwrap();
        let closed_at = Utc.with_ymd_and_hms(2024, 5, 2, 2, 0, 0).unwrap().timestamp_millis();
        // 02:00 UTC on May 2 is still May 1 in New York
        let day = closed("2024-05-01", closed_at);

        let period = derive_period(Some(&day), 0, now, ny());
        assert!(!period.is_first_period);
        assert_eq!(period.started_at, closed_at);
        assert_eq!(period.days_since_last_close, Some(1));
        assert_eq!(period.label, PeriodLabel::Today);
        assert_eq!(period.last_closed_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_multi_day_gap_is_current_period() {
        let now = Utc.with_ymd_and_hms(2024, 5, 5, 18, 0, 0).unwrap();
        let day = closed("2024-05-01", 1_714_600_000_000);
        let period = derive_period(Some(&day), 0, now, ny());
        assert_eq!(period.days_since_last_close, Some(4));
        assert_eq!(period.label, PeriodLabel::CurrentPeriod);
    }
}
