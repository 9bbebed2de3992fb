//! Serial arithmetic for ticket packs
//!
//! Serials are fixed-width (3 digit) zero-padded numerals. Counting between
//! a pack's first and last serial is inclusive: a pack `"000"..="014"` holds
//! 15 tickets.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of every serial in this domain
pub const SERIAL_WIDTH: usize = 3;

/// Largest representable serial (`"999"`)
pub const MAX_SERIAL: u32 = 999;

/// Serial arithmetic failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerialError {
    #[error("Serial '{0}' must be exactly 3 digits")]
    Format(String),

    #[error("Serial {0} is out of range (max 999)")]
    Overflow(u32),

    #[error("Ending serial {ending} is before starting serial {starting}")]
    Range { starting: String, ending: String },

    #[error("Ticket price {0} is not a finite amount")]
    Price(String),
}

/// Parse a 3-digit serial into its numeric value.
///
/// Rejects anything that is not exactly three ASCII digits, so `"1"`,
/// `"0001"` and `"-01"` all fail.
pub fn to_int(serial: &str) -> Result<u32, SerialError> {
    if serial.len() != SERIAL_WIDTH || !serial.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SerialError::Format(serial.to_string()));
    }
    serial
        .parse::<u32>()
        .map_err(|_| SerialError::Format(serial.to_string()))
}

/// Zero-pad a numeric serial. Values above [`MAX_SERIAL`] come out wider
/// than [`SERIAL_WIDTH`]; use [`Serial::new`] when validation matters.
pub fn format_serial(value: u32) -> String {
    format!("{:0width$}", value, width = SERIAL_WIDTH)
}

/// Inclusive ticket count between two serials: `ending + 1 - starting`.
///
/// `("000", "000")` is one ticket. `ending == starting - 1` yields 0; any
/// lower ending is a [`SerialError::Range`].
pub fn tickets_sold(starting: &str, ending: &str) -> Result<u32, SerialError> {
    let start = to_int(starting)?;
    let end = to_int(ending)?;
    (end + 1).checked_sub(start).ok_or_else(|| SerialError::Range {
        starting: starting.to_string(),
        ending: ending.to_string(),
    })
}

/// Tickets sold between a recorded start and a closing reading.
///
/// A scanned or typed closing is the next unsold ticket, so the count is
/// `closing - starting` and an unchanged pack sold nothing. A sold-out
/// closing is the pack's last serial, which was itself sold, so the
/// inclusive count applies.
pub fn closing_tickets(starting: &str, closing: &str, sold_out: bool) -> Result<u32, SerialError> {
    if sold_out {
        return tickets_sold(starting, closing);
    }
    let start = to_int(starting)?;
    let end = to_int(closing)?;
    end.checked_sub(start).ok_or_else(|| SerialError::Range {
        starting: starting.to_string(),
        ending: closing.to_string(),
    })
}

/// Sales amount for a ticket count at a unit price, in exact decimal.
pub fn sales_amount(tickets_sold: u32, unit_price: Decimal) -> Decimal {
    Decimal::from(tickets_sold) * unit_price
}

/// A validated serial, ordered by numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Serial(u16);

impl Serial {
    pub fn new(value: u32) -> Result<Self, SerialError> {
        if value > MAX_SERIAL {
            return Err(SerialError::Overflow(value));
        }
        Ok(Self(value as u16))
    }

    pub fn value(&self) -> u32 {
        u32::from(self.0)
    }
}

impl FromStr for Serial {
    type Err = SerialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Serial::new(to_int(s)?)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_serial(self.value()))
    }
}

impl Serialize for Serial {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Serial {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_to_int_accepts_three_digits() {
        assert_eq!(to_int("000").unwrap(), 0);
        assert_eq!(to_int("014").unwrap(), 14);
        assert_eq!(to_int("999").unwrap(), 999);
    }

    #[test]
    fn test_to_int_rejects_wrong_width_and_non_digits() {
        for bad in ["1", "01", "0001", "-01", "a12", "", " 12", "1.0"] {
            assert!(
                matches!(to_int(bad), Err(SerialError::Format(_))),
                "expected format error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_tickets_sold_is_inclusive() {
        assert_eq!(tickets_sold("000", "014").unwrap(), 15);
        assert_eq!(tickets_sold("005", "054").unwrap(), 50);
        assert_eq!(tickets_sold("000", "000").unwrap(), 1);
    }

    #[test]
    fn test_tickets_sold_boundary_below_start() {
        assert_eq!(tickets_sold("010", "009").unwrap(), 0);
        assert!(matches!(
            tickets_sold("010", "008"),
            Err(SerialError::Range { .. })
        ));
    }

    #[test]
    fn test_tickets_sold_matches_formula_over_range() {
        for s in (0..=999u32).step_by(37) {
            for e in (s..=999).step_by(53) {
                let got = tickets_sold(&format_serial(s), &format_serial(e)).unwrap();
                assert_eq!(got, e - s + 1);
            }
        }
    }

    #[test]
    fn test_closing_tickets_regular_is_net_delta() {
        assert_eq!(closing_tickets("010", "010", false).unwrap(), 0);
        assert_eq!(closing_tickets("010", "035", false).unwrap(), 25);
        assert!(closing_tickets("010", "009", false).is_err());
    }

    #[test]
    fn test_closing_tickets_sold_out_is_inclusive() {
        assert_eq!(closing_tickets("000", "014", true).unwrap(), 15);
    }

    #[test]
    fn test_sales_amount_exact() {
        assert_eq!(sales_amount(15, dec("5.00")), dec("75.00"));
        assert_eq!(sales_amount(50, dec("10.00")), dec("500.00"));
        assert_eq!(sales_amount(3, dec("0.10")), dec("0.30"));
        assert_eq!(sales_amount(0, dec("20")), Decimal::ZERO);
    }

    #[test]
    fn test_serial_newtype_orders_numerically() {
        let a: Serial = "009".parse().unwrap();
        let b: Serial = "010".parse().unwrap();
        assert!(a < b);
        assert_eq!(b.to_string(), "010");
        assert!(Serial::new(1000).is_err());
    }

    #[test]
    fn test_serial_serde_as_string() {
        let s: Serial = serde_json::from_str("\"042\"").unwrap();
        assert_eq!(s.value(), 42);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"042\"");
        assert!(serde_json::from_str::<Serial>("\"42\"").is_err());
    }
}
