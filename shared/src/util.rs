/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: per-process sequence, randomly seeded (4096 ids per ms)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    use std::sync::LazyLock;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    static SEQUENCE: LazyLock<AtomicI64> =
        LazyLock::new(|| AtomicI64::new(rand::thread_rng().gen_range(0..0x1000)));

    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xFFF; // 12 bits
    (ts << 12) | seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_fits_js_safe_integer() {
        const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;
        let id = snowflake_id();
        assert!(id > 0);
        assert!(id <= MAX_SAFE_INTEGER);
    }

    #[test]
    fn test_snowflake_unique_within_a_burst() {
        let ids: std::collections::HashSet<i64> = (0..1000).map(|_| snowflake_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_snowflake_is_time_ordered_across_millis() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = snowflake_id();
        assert!(b > a);
    }
}
