//! 日结 (Day Close)
//!
//! Validates a full-store closing submission and, in one transaction,
//! records the shift closings and day-pack rows and closes the business day.
//!
//! Validation runs in a fixed order and the first failure wins:
//!
//! 1. no other shift is still OPEN/ACTIVE
//! 2. the submitting shift belongs to the store and every submitted pack
//!    exists in it
//! 3. each pack once, every occupied active bin covered, no pack outside an
//!    active bin, nothing already closed for the shift or the day
//! 4. each closing serial lies in `[starting_serial, serial_end]`
//!
//! Nothing is written unless every check passes.

mod error;

pub use error::{DayCloseError, InvalidPackReason};

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::bin::OccupiedBin;
use crate::db::repository::{RepoError, bin, business_day, day_pack, pack, shift, shift_closing, store};
use crate::inventory::resolve_starting_serial;
use crate::utils::{money, time};
use shared::lottery::serial;
use shared::models::{
    BinClosed, BusinessDayStatus, DayCloseItem, DayCloseResult, DayPack, EntryMethod, MissingPack,
    Pack,
};

/// Who is closing which store
#[derive(Debug, Clone, Copy)]
pub struct DayCloseContext {
    pub store_id: i64,
    /// User recorded as `closed_by`
    pub actor_id: i64,
    /// The submitting terminal's shift: exempt from the open-shift guard and
    /// the shift the closings are filed under
    pub current_shift_id: Option<i64>,
}

/// A validated closing ready to be written
struct PlannedClosing {
    item: DayCloseItem,
    bin: OccupiedBin,
    starting_serial: String,
    tickets_sold: u32,
    sales_amount: Decimal,
    depletes: bool,
}

/// Close today's business day for the store
pub async fn close_day(
    pool: &SqlitePool,
    ctx: DayCloseContext,
    closings: Vec<DayCloseItem>,
) -> Result<DayCloseResult, DayCloseError> {
    close_day_at(pool, ctx, closings, Utc::now()).await
}

/// [`close_day`] with an explicit clock
pub async fn close_day_at(
    pool: &SqlitePool,
    ctx: DayCloseContext,
    closings: Vec<DayCloseItem>,
    now: DateTime<Utc>,
) -> Result<DayCloseResult, DayCloseError> {
    let result = run(pool, ctx, closings, now).await;
    match &result {
        Ok(r) => tracing::info!(
            store_id = ctx.store_id,
            business_date = %r.business_day.business_date,
            closings = r.closings_created,
            "Business day closed"
        ),
        Err(DayCloseError::Repo(e)) => {
            tracing::error!(store_id = ctx.store_id, error = %e, "Day close failed")
        }
        Err(e) => tracing::warn!(store_id = ctx.store_id, error = %e, "Day close rejected"),
    }
    result
}

async fn run(
    pool: &SqlitePool,
    ctx: DayCloseContext,
    closings: Vec<DayCloseItem>,
    now: DateTime<Utc>,
) -> Result<DayCloseResult, DayCloseError> {
    let now_ms = now.timestamp_millis();
    // 立即取写锁: 并发日结排队, 后到者看到先到者已写入的结果
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let store = store::find_by_id(&mut *tx, ctx.store_id)
        .await?
        .ok_or(DayCloseError::StoreNotFound(ctx.store_id))?;
    let tz = time::parse_timezone(&store.timezone)
        .map_err(|_| DayCloseError::InvalidTimezone(store.timezone.clone()))?;
    let business_date = time::format_date(time::business_date(now, tz));

    // 1. 未关闭的班次
    let blocking = shift::find_blocking(&mut *tx, ctx.store_id, ctx.current_shift_id).await?;
    if !blocking.is_empty() {
        return Err(DayCloseError::ShiftsStillOpen(blocking));
    }

    let current_shift = match ctx.current_shift_id {
        Some(id) => Some(
            shift::find_by_id(&mut *tx, id)
                .await?
                .filter(|s| s.store_id == ctx.store_id)
                .ok_or(DayCloseError::ForeignShift(id))?,
        ),
        None => None,
    };

    // 2. 票包存在且属于本店
    let mut seen = HashSet::new();
    let mut submitted = Vec::with_capacity(closings.len());
    let mut duplicates = Vec::new();
    for item in &closings {
        if seen.insert(item.pack_id) {
            submitted.push(item.pack_id);
        } else if !duplicates.contains(&item.pack_id) {
            duplicates.push(item.pack_id);
        }
    }

    let packs: HashMap<i64, Pack> = pack::find_by_ids(&mut tx, &submitted)
        .await?
        .into_iter()
        .filter(|p| p.store_id == ctx.store_id)
        .map(|p| (p.id, p))
        .collect();
    let unknown: Vec<i64> = submitted
        .iter()
        .copied()
        .filter(|id| !packs.contains_key(id))
        .collect();
    if !unknown.is_empty() {
        return Err(DayCloseError::InvalidPacks {
            pack_ids: unknown,
            reason: InvalidPackReason::NotInStore,
        });
    }

    // 3. 重复 / 完整性
    if !duplicates.is_empty() {
        return Err(DayCloseError::DuplicateInBatch(duplicates));
    }

    let occupied = bin::find_occupied(&mut *tx, ctx.store_id).await?;
    let missing: Vec<MissingPack> = occupied
        .iter()
        .filter(|b| !seen.contains(&b.pack_id))
        .map(|b| MissingPack {
            bin_id: b.bin_id,
            bin_number: b.bin_number(),
            pack_id: b.pack_id,
            pack_number: b.pack_number.clone(),
        })
        .collect();
    if !missing.is_empty() {
        return Err(DayCloseError::MissingPacks(missing));
    }

    let binned: HashSet<i64> = occupied.iter().map(|b| b.pack_id).collect();
    let outside: Vec<i64> = submitted
        .iter()
        .copied()
        .filter(|id| !binned.contains(id))
        .collect();
    if !outside.is_empty() {
        return Err(DayCloseError::InvalidPacks {
            pack_ids: outside,
            reason: InvalidPackReason::NotInActiveBin,
        });
    }

    let explicit_shift = current_shift.is_some();
    let resolving_shift = match current_shift {
        Some(s) => Some(s),
        None => shift::find_latest(&mut *tx, ctx.store_id).await?,
    };
    let resolving_shift = match resolving_shift {
        Some(s) => Some(s),
        None if closings.is_empty() => None,
        None => return Err(DayCloseError::NoShift),
    };

    if let Some(s) = &resolving_shift {
        let already = shift_closing::find_closed_packs(&mut tx, s.id, &submitted).await?;
        if !already.is_empty() {
            // 默认班次已关闭且已对过账: 需要调用方指明班次
            if !explicit_shift && s.status.is_closed() {
                return Err(DayCloseError::StaleShift {
                    shift_id: s.id,
                    pack_ids: already,
                });
            }
            return Err(DayCloseError::ClosingsAlreadyExist {
                shift_id: s.id,
                pack_ids: already,
            });
        }
    }

    if let Some(day) = business_day::find_by_date(&mut *tx, ctx.store_id, &business_date).await?
        && day.status == BusinessDayStatus::Closed
    {
        return Err(DayCloseError::DayAlreadyClosed(business_date));
    }

    // 4. 序号范围
    let mut planned = Vec::with_capacity(closings.len());
    for item in closings {
        let Some(p) = packs.get(&item.pack_id) else {
            continue;
        };
        let Some(slot) = occupied.iter().find(|b| b.pack_id == item.pack_id) else {
            continue;
        };
        let starting_serial =
            resolve_starting_serial(&mut tx, resolving_shift.as_ref().map(|s| s.id), p).await?;
        planned.push(plan_closing(item, slot.clone(), starting_serial)?);
    }

    // 写入
    let day = business_day::get_or_create(&mut tx, ctx.store_id, &business_date, now_ms).await?;

    let mut bins_closed = Vec::with_capacity(planned.len());
    for plan in &planned {
        if let Some(s) = &resolving_shift {
            shift_closing::insert(
                &mut *tx,
                s.id,
                plan.item.pack_id,
                &plan.item.closing_serial,
                plan.item.entry_method.unwrap_or(EntryMethod::Scan),
                s.cashier_id,
                now_ms,
            )
            .await?;
        }

        day_pack::insert(
            &mut *tx,
            &DayPack {
                id: shared::util::snowflake_id(),
                business_day_id: day.id,
                pack_id: plan.item.pack_id,
                bin_id: Some(plan.bin.bin_id),
                starting_serial: plan.starting_serial.clone(),
                ending_serial: plan.item.closing_serial.clone(),
                tickets_sold: i64::from(plan.tickets_sold),
                sales_amount: money::to_f64(plan.sales_amount),
                created_at: now_ms,
            },
        )
        .await?;

        if plan.depletes {
            pack::mark_depleted(&mut *tx, plan.item.pack_id, now_ms).await?;
        }

        bins_closed.push(BinClosed {
            bin_number: plan.bin.bin_number(),
            pack_number: plan.bin.pack_number.clone(),
            game_name: plan.bin.game_name.clone(),
            closing_serial: plan.item.closing_serial.clone(),
        });
    }

    business_day::mark_closed(&mut *tx, day.id, ctx.actor_id, now_ms).await?;
    let day = business_day::find_by_id(&mut *tx, day.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Business day {}", day.id)))?;

    tx.commit().await?;

    bins_closed.sort_by_key(|b| b.bin_number);
    Ok(DayCloseResult {
        closings_created: planned.len(),
        business_day: day,
        bins_closed,
        day_closed: true,
    })
}

/// Range-check one closing and compute its sales.
///
/// A scanned closing is the next unsold ticket, so it counts
/// `closing - starting`. Reaching `serial_end` (or flagging sold out) means
/// the last ticket sold too: counted inclusively and the pack is depleted.
fn plan_closing(
    item: DayCloseItem,
    bin: OccupiedBin,
    starting_serial: String,
) -> Result<PlannedClosing, DayCloseError> {
    let malformed = |source| DayCloseError::MalformedSerial {
        pack_id: item.pack_id,
        source,
    };
    let start = serial::to_int(&starting_serial).map_err(malformed)?;
    let end = serial::to_int(&bin.serial_end).map_err(malformed)?;
    let closing = serial::to_int(&item.closing_serial).map_err(malformed)?;

    if closing < start || closing > end {
        return Err(DayCloseError::SerialOutOfRange {
            pack_id: item.pack_id,
            starting_serial,
            serial_end: bin.serial_end,
            closing_serial: item.closing_serial,
        });
    }
    if item.is_sold_out && closing != end {
        return Err(DayCloseError::SoldOutNotAtEnd {
            pack_id: item.pack_id,
            serial_end: bin.serial_end,
            closing_serial: item.closing_serial,
        });
    }

    let depletes = closing == end;
    let tickets_sold = serial::closing_tickets(&starting_serial, &item.closing_serial, depletes)
        .map_err(malformed)?;
    let sales_amount = serial::sales_amount(tickets_sold, money::to_decimal(bin.game_price));

    Ok(PlannedClosing {
        item,
        bin,
        starting_serial,
        tickets_sold,
        sales_amount,
        depletes,
    })
}
