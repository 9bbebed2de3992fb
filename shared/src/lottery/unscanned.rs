//! Unscanned-bin resolution
//!
//! When a day-close is attempted with some active bins left unscanned, the
//! operator decides per bin whether the pack sold out. Sold-out decisions
//! become synthetic closings merged into the submission; undecided bins stay
//! out and the close fails with `MISSING_PACKS` until they are resolved.

use std::collections::{HashMap, HashSet};

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::serial::{self, SerialError};
use crate::models::{CurrentBin, DayCloseItem, EntryMethod};

/// An active bin that has no closing scan yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnscannedBinInfo {
    pub bin_id: i64,
    pub bin_number: i64,
    pub pack_id: i64,
    pub pack_number: String,
    pub game_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub game_price: Decimal,
    pub starting_serial: String,
    pub serial_end: String,
}

/// Operator decision for one bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinDecision {
    /// Go back and scan it
    #[default]
    Undecided,
    SoldOut,
}

/// Aggregate state of the "select all" toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectAll {
    None,
    /// Some but not all bins marked sold out
    Some,
    All,
}

/// A resolved sold-out bin with its computed totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldOutDecision {
    pub bin_id: i64,
    pub pack_id: i64,
    pub starting_serial: String,
    pub ending_serial: String,
    pub tickets_sold: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub sales_amount: Decimal,
}

/// Collects per-bin decisions for one resolution session.
#[derive(Debug, Clone, Default)]
pub struct UnscannedBinResolver {
    bins: Vec<UnscannedBinInfo>,
    decisions: HashMap<i64, BinDecision>,
}

impl UnscannedBinResolver {
    pub fn new(bins: Vec<UnscannedBinInfo>) -> Self {
        let mut resolver = Self::default();
        resolver.open(bins);
        resolver
    }

    /// Start a new session. Every previous decision is dropped.
    pub fn open(&mut self, bins: Vec<UnscannedBinInfo>) {
        self.decisions.clear();
        self.bins = bins;
    }

    pub fn bins(&self) -> &[UnscannedBinInfo] {
        &self.bins
    }

    pub fn decision(&self, bin_id: i64) -> BinDecision {
        self.decisions.get(&bin_id).copied().unwrap_or_default()
    }

    /// Set a decision. Returns `false` for a bin not in this session.
    pub fn set_decision(&mut self, bin_id: i64, decision: BinDecision) -> bool {
        if !self.bins.iter().any(|b| b.bin_id == bin_id) {
            return false;
        }
        match decision {
            BinDecision::Undecided => self.decisions.remove(&bin_id),
            BinDecision::SoldOut => self.decisions.insert(bin_id, decision),
        };
        true
    }

    /// Flip one bin between undecided and sold out
    pub fn toggle(&mut self, bin_id: i64) -> bool {
        let next = match self.decision(bin_id) {
            BinDecision::Undecided => BinDecision::SoldOut,
            BinDecision::SoldOut => BinDecision::Undecided,
        };
        self.set_decision(bin_id, next)
    }

    pub fn select_all_state(&self) -> SelectAll {
        let sold_out = self.sold_out_count();
        if sold_out == 0 {
            SelectAll::None
        } else if sold_out == self.bins.len() {
            SelectAll::All
        } else {
            SelectAll::Some
        }
    }

    /// Click the aggregate toggle. Only a fully selected set clears; an
    /// indeterminate set moves to fully selected.
    pub fn toggle_all(&mut self) {
        match self.select_all_state() {
            SelectAll::All => self.decisions.clear(),
            SelectAll::None | SelectAll::Some => {
                for bin in &self.bins {
                    self.decisions.insert(bin.bin_id, BinDecision::SoldOut);
                }
            }
        }
    }

    /// Bins still waiting for a decision
    pub fn undecided(&self) -> Vec<&UnscannedBinInfo> {
        self.bins
            .iter()
            .filter(|b| self.decision(b.bin_id) == BinDecision::Undecided)
            .collect()
    }

    pub fn is_resolved(&self) -> bool {
        self.sold_out_count() == self.bins.len()
    }

    /// Totals for every sold-out bin, in bin order
    pub fn sold_out_decisions(&self) -> Result<Vec<SoldOutDecision>, SerialError> {
        self.sold_out_bins()
            .map(|bin| {
                let tickets_sold = serial::tickets_sold(&bin.starting_serial, &bin.serial_end)?;
                Ok(SoldOutDecision {
                    bin_id: bin.bin_id,
                    pack_id: bin.pack_id,
                    starting_serial: bin.starting_serial.clone(),
                    ending_serial: bin.serial_end.clone(),
                    tickets_sold,
                    sales_amount: serial::sales_amount(tickets_sold, bin.game_price),
                })
            })
            .collect()
    }

    /// Synthetic closings to merge into the day-close submission
    pub fn closings(&self) -> Vec<DayCloseItem> {
        self.sold_out_bins()
            .map(|bin| DayCloseItem {
                pack_id: bin.pack_id,
                closing_serial: bin.serial_end.clone(),
                entry_method: Some(EntryMethod::Manual),
                is_sold_out: true,
            })
            .collect()
    }

    fn sold_out_bins(&self) -> impl Iterator<Item = &UnscannedBinInfo> {
        self.bins
            .iter()
            .filter(|b| self.decision(b.bin_id) == BinDecision::SoldOut)
    }

    fn sold_out_count(&self) -> usize {
        self.sold_out_bins().count()
    }
}

/// Active bins whose pack is not in `scanned_pack_ids`.
///
/// Fails on a price that has no decimal value (NaN, infinite) rather than
/// pricing the bin at zero.
pub fn find_unscanned(
    bins: &[CurrentBin],
    scanned_pack_ids: &HashSet<i64>,
) -> Result<Vec<UnscannedBinInfo>, SerialError> {
    bins.iter()
        .filter_map(|bin| {
            let pack = bin.pack.as_ref()?;
            if scanned_pack_ids.contains(&pack.pack_id) {
                return None;
            }
            let game_price = match Decimal::from_f64(pack.game_price) {
                Some(price) => price,
                None => return Some(Err(SerialError::Price(pack.game_price.to_string()))),
            };
            Some(Ok(UnscannedBinInfo {
                bin_id: bin.bin_id,
                bin_number: bin.bin_number,
                pack_id: pack.pack_id,
                pack_number: pack.pack_number.clone(),
                game_name: pack.game_name.clone(),
                game_price,
                starting_serial: pack.starting_serial.clone(),
                serial_end: pack.serial_end.clone(),
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrentBinPack;

    fn info(bin_id: i64, pack_id: i64, start: &str, end: &str, price: &str) -> UnscannedBinInfo {
        UnscannedBinInfo {
            bin_id,
            bin_number: bin_id + 1,
            pack_id,
            pack_number: format!("P{pack_id}"),
            game_name: "Lucky 7s".to_string(),
            game_price: Decimal::from_str(price).unwrap(),
            starting_serial: start.to_string(),
            serial_end: end.to_string(),
        }
    }

    fn three_bins() -> UnscannedBinResolver {
        UnscannedBinResolver::new(vec![
            info(1, 11, "000", "014", "5.00"),
            info(2, 12, "010", "049", "2.00"),
            info(3, 13, "000", "029", "10.00"),
        ])
    }

    #[test]
    fn test_default_is_undecided() {
        let r = three_bins();
        assert_eq!(r.decision(1), BinDecision::Undecided);
        assert_eq!(r.select_all_state(), SelectAll::None);
        assert!(r.closings().is_empty());
        assert_eq!(r.undecided().len(), 3);
        assert!(!r.is_resolved());
    }

    #[test]
    fn test_sold_out_round_trip() {
        let mut r = UnscannedBinResolver::new(vec![info(1, 11, "000", "014", "5.00")]);
        assert!(r.set_decision(1, BinDecision::SoldOut));

        let decisions = r.sold_out_decisions().unwrap();
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].tickets_sold, 15);
        assert_eq!(decisions[0].sales_amount, Decimal::from(75));
        assert_eq!(decisions[0].ending_serial, "014");

        let closings = r.closings();
        assert_eq!(closings.len(), 1);
        assert_eq!(closings[0].pack_id, 11);
        assert_eq!(closings[0].closing_serial, "014");
        assert_eq!(closings[0].entry_method, Some(EntryMethod::Manual));
        assert!(closings[0].is_sold_out);
    }

    #[test]
    fn test_unknown_bin_is_ignored() {
        let mut r = three_bins();
        assert!(!r.set_decision(99, BinDecision::SoldOut));
        assert!(!r.toggle(99));
        assert_eq!(r.select_all_state(), SelectAll::None);
    }

    #[test]
    fn test_select_all_tri_state() {
        let mut r = three_bins();
        r.toggle(2);
        assert_eq!(r.select_all_state(), SelectAll::Some);

        // Indeterminate moves to all, never to none
        r.toggle_all();
        assert_eq!(r.select_all_state(), SelectAll::All);
        assert!(r.is_resolved());

        r.toggle_all();
        assert_eq!(r.select_all_state(), SelectAll::None);

        r.toggle_all();
        assert_eq!(r.select_all_state(), SelectAll::All);
        assert_eq!(r.closings().len(), 3);
    }

    #[test]
    fn test_toggle_back_to_undecided() {
        let mut r = three_bins();
        r.toggle(1);
        r.toggle(1);
        assert_eq!(r.decision(1), BinDecision::Undecided);
        assert_eq!(r.select_all_state(), SelectAll::None);
    }

    #[test]
    fn test_reopen_resets_decisions() {
        let mut r = three_bins();
        r.toggle_all();
        assert_eq!(r.closings().len(), 3);

        r.open(vec![info(1, 11, "000", "014", "5.00")]);
        assert_eq!(r.decision(1), BinDecision::Undecided);
        assert!(r.closings().is_empty());
    }

    #[test]
    fn test_empty_session_select_all() {
        let mut r = UnscannedBinResolver::new(Vec::new());
        assert_eq!(r.select_all_state(), SelectAll::None);
        r.toggle_all();
        assert_eq!(r.select_all_state(), SelectAll::None);
        assert!(r.is_resolved());
    }

    #[test]
    fn test_find_unscanned_skips_scanned_and_empty_bins() {
        let pack = |pack_id: i64| CurrentBinPack {
            pack_id,
            pack_number: format!("P{pack_id}"),
            game_name: "Cash Blast".to_string(),
            game_price: 5.0,
            serial_start: "000".to_string(),
            serial_end: "029".to_string(),
            starting_serial: "010".to_string(),
            ending_serial: None,
        };
        let bins = vec![
            CurrentBin { bin_id: 1, bin_number: 1, bin_name: "A".into(), pack: Some(pack(11)) },
            CurrentBin { bin_id: 2, bin_number: 2, bin_name: "B".into(), pack: Some(pack(12)) },
            CurrentBin { bin_id: 3, bin_number: 3, bin_name: "C".into(), pack: None },
        ];
        let scanned: HashSet<i64> = [11].into_iter().collect();

        let unscanned = find_unscanned(&bins, &scanned).unwrap();
        assert_eq!(unscanned.len(), 1);
        assert_eq!(unscanned[0].pack_id, 12);
        assert_eq!(unscanned[0].starting_serial, "010");
        assert_eq!(unscanned[0].game_price, Decimal::from(5));
    }

    #[test]
    fn test_find_unscanned_rejects_non_finite_price() {
        let bins = vec![CurrentBin {
            bin_id: 1,
            bin_number: 1,
            bin_name: "A".into(),
            pack: Some(CurrentBinPack {
                pack_id: 11,
                pack_number: "P11".to_string(),
                game_name: "Cash Blast".to_string(),
                game_price: f64::NAN,
                serial_start: "000".to_string(),
                serial_end: "029".to_string(),
                starting_serial: "000".to_string(),
                ending_serial: None,
            }),
        }];

        let err = find_unscanned(&bins, &HashSet::new()).unwrap_err();
        assert!(matches!(err, SerialError::Price(_)));

        // 已扫描的票包不参与定价
        let scanned: HashSet<i64> = [11].into_iter().collect();
        assert!(find_unscanned(&bins, &scanned).unwrap().is_empty());
    }
}
