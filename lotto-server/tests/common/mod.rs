//! Test fixtures: an in-memory store with bins, packs and shifts

#![allow(dead_code)]

use lotto_server::db::DbService;
use lotto_server::db::repository::{bin, game, shift, store};
use lotto_server::inventory;
use lotto_server::DayCloseContext;
use shared::models::{
    Bin, BinCreate, DayCloseItem, EntryMethod, Game, GameCreate, Pack, PackReceive, Shift,
    ShiftClose, ShiftCreate, Store, StoreCreate,
};
use sqlx::SqlitePool;

pub const COMPANY_ID: i64 = 1;
pub const ACTOR_ID: i64 = 700;

pub struct Fixture {
    pub pool: SqlitePool,
    pub store: Store,
    /// $5 game
    pub game: Game,
}

impl Fixture {
    pub async fn new() -> Self {
        let pool = DbService::in_memory().await.unwrap().pool;
        Self::with_pool(pool, COMPANY_ID, "Main St").await
    }

    /// Another store on the same database
    pub async fn sibling(&self, company_id: i64, name: &str) -> Self {
        Self::with_pool(self.pool.clone(), company_id, name).await
    }

    pub async fn with_pool(pool: SqlitePool, company_id: i64, name: &str) -> Self {
        let store = store::create(
            &pool,
            company_id,
            StoreCreate {
                name: name.into(),
                state_code: Some("NY".into()),
                timezone: "America/New_York".into(),
            },
        )
        .await
        .unwrap();
        let game = game::create(
            &pool,
            store.id,
            GameCreate {
                game_code: "G500".into(),
                name: "Lucky 7s".into(),
                price: 5.0,
                tickets_per_pack: 60,
                state_code: None,
            },
        )
        .await
        .unwrap();
        Self { pool, store, game }
    }

    pub async fn bin(&self, display_order: i64) -> Bin {
        bin::create(
            &self.pool,
            self.store.id,
            BinCreate {
                name: format!("Bin {}", display_order + 1),
                display_order,
            },
        )
        .await
        .unwrap()
    }

    pub async fn received_pack(&self, number: &str, start: &str, end: &str) -> Pack {
        inventory::receive_pack(
            &self.pool,
            &self.store,
            PackReceive {
                game_id: self.game.id,
                pack_number: number.into(),
                serial_start: start.into(),
                serial_end: end.into(),
            },
        )
        .await
        .unwrap()
    }

    /// Receive a pack and put it in `bin`
    pub async fn active_pack(&self, number: &str, bin: &Bin, start: &str, end: &str) -> Pack {
        let pack = self.received_pack(number, start, end).await;
        inventory::activate_pack(&self.pool, self.store.id, pack.id, bin.id)
            .await
            .unwrap()
    }

    /// A bin holding a fresh `000`-`059` pack
    pub async fn stocked_bin(&self, display_order: i64) -> (Bin, Pack) {
        let b = self.bin(display_order).await;
        let p = self
            .active_pack(&format!("P{:03}", display_order), &b, "000", "059")
            .await;
        (b, p)
    }

    pub async fn open_shift(&self, terminal: &str, cashier: &str) -> Shift {
        shift::create(
            &self.pool,
            self.store.id,
            ACTOR_ID,
            ShiftCreate {
                terminal_name: terminal.into(),
                cashier_id: 42,
                cashier_name: cashier.into(),
                deferred: false,
            },
        )
        .await
        .unwrap()
    }

    pub async fn close_shift(&self, s: &Shift) -> Shift {
        shift::close(&self.pool, s.id, ShiftClose { closing_cash: Some(120.0) })
            .await
            .unwrap()
    }

    /// Context for a close submitted from `s`
    pub fn ctx(&self, s: &Shift) -> DayCloseContext {
        DayCloseContext {
            store_id: self.store.id,
            actor_id: ACTOR_ID,
            current_shift_id: Some(s.id),
        }
    }

    pub fn ctx_without_shift(&self) -> DayCloseContext {
        DayCloseContext {
            store_id: self.store.id,
            actor_id: ACTOR_ID,
            current_shift_id: None,
        }
    }
}

pub fn scan(pack_id: i64, serial: &str) -> DayCloseItem {
    DayCloseItem {
        pack_id,
        closing_serial: serial.into(),
        entry_method: Some(EntryMethod::Scan),
        is_sold_out: false,
    }
}
