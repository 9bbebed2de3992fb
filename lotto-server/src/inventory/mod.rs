//! 库存服务 - 票包入库、上架、退回，班次开班序号，当前格位视图
//!
//! Handlers stay thin; the state-machine checks for packs, bins and shift
//! openings live here so the day-close tests can drive them directly.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::repository::{RepoError, bin, day_pack, game, pack, shift, shift_opening};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text, validate_serial};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    CurrentBin, CurrentBinPack, Game, GameStatus, Pack, PackReceive, PackStatus, Shift,
    ShiftOpening, ShiftOpeningCreate, ShiftStatus, Store,
};

fn pack_not_found(pack_id: i64) -> AppError {
    AppError::with_message(ErrorCode::PackNotFound, format!("Pack {pack_id} not found"))
        .with_detail("pack_id", pack_id)
}

/// Store games and state games of the store's state
fn game_visible(game: &Game, store: &Store) -> bool {
    match game.store_id {
        Some(id) => id == store.id,
        None => game.state_code.is_some() && game.state_code == store.state_code,
    }
}

/// Load a pack that belongs to `store_id`
pub async fn store_pack(pool: &SqlitePool, store_id: i64, pack_id: i64) -> AppResult<Pack> {
    pack::find_by_id(pool, pack_id)
        .await?
        .filter(|p| p.store_id == store_id)
        .ok_or_else(|| pack_not_found(pack_id))
}

/// Load a shift that belongs to `store_id`
pub async fn store_shift(pool: &SqlitePool, store_id: i64, shift_id: i64) -> AppResult<Shift> {
    shift::find_by_id(pool, shift_id)
        .await?
        .filter(|s| s.store_id == store_id)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ShiftNotFound, format!("Shift {shift_id} not found"))
        })
}

/// Receive a pack into store inventory (RECEIVED)
pub async fn receive_pack(pool: &SqlitePool, store: &Store, data: PackReceive) -> AppResult<Pack> {
    validate_required_text(&data.pack_number, "pack_number", MAX_SHORT_TEXT_LEN)?;
    let start = validate_serial(&data.serial_start, "serial_start")?;
    let end = validate_serial(&data.serial_end, "serial_end")?;
    if end < start {
        return Err(AppError::with_message(
            ErrorCode::InvalidSerialRange,
            format!(
                "serial_end {} is before serial_start {}",
                data.serial_end, data.serial_start
            ),
        ));
    }

    let game = game::find_by_id(pool, data.game_id)
        .await?
        .filter(|g| game_visible(g, store))
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::GameNotFound,
                format!("Game {} not found", data.game_id),
            )
        })?;
    if game.status == GameStatus::Inactive {
        return Err(AppError::with_message(
            ErrorCode::GameInactive,
            format!("Game {} is inactive", game.game_code),
        ));
    }

    let received = pack::insert(pool, store.id, &data).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::with_message(
            ErrorCode::PackNumberExists,
            format!("Pack {} already received for game {}", data.pack_number, game.game_code),
        ),
        other => other.into(),
    })?;

    tracing::info!(
        store_id = store.id,
        pack_id = received.id,
        pack_number = %received.pack_number,
        "Pack received"
    );
    Ok(received)
}

/// Place a RECEIVED pack into an empty active bin (ACTIVE)
pub async fn activate_pack(
    pool: &SqlitePool,
    store_id: i64,
    pack_id: i64,
    bin_id: i64,
) -> AppResult<Pack> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let target = pack::find_by_id(&mut *tx, pack_id)
        .await?
        .filter(|p| p.store_id == store_id)
        .ok_or_else(|| pack_not_found(pack_id))?;
    if target.status != PackStatus::Received {
        return Err(AppError::with_message(
            ErrorCode::PackInvalidStatus,
            format!("Pack {} is {:?}, expected RECEIVED", target.pack_number, target.status),
        ));
    }

    let slot = bin::find_by_id(&mut *tx, bin_id)
        .await?
        .filter(|b| b.store_id == store_id)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::BinNotFound, format!("Bin {bin_id} not found"))
        })?;
    if !slot.is_active {
        return Err(AppError::with_message(
            ErrorCode::BinInactive,
            format!("Bin {} is inactive", slot.bin_number()),
        ));
    }
    if let Some(occupant) = pack::find_in_bin(&mut *tx, bin_id).await? {
        return Err(AppError::with_message(
            ErrorCode::BinOccupied,
            format!("Bin {} already holds pack {}", slot.bin_number(), occupant.pack_number),
        )
        .with_detail("pack_id", occupant.id));
    }

    let now = shared::util::now_millis();
    pack::activate(&mut *tx, pack_id, bin_id, now)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::with_message(
                ErrorCode::BinOccupied,
                format!("Bin {} already holds a pack", slot.bin_number()),
            ),
            other => other.into(),
        })?;
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(store_id, pack_id, bin_id, "Pack activated");
    store_pack(pool, store_id, pack_id).await
}

/// Return a RECEIVED or ACTIVE pack (RETURNED), releasing its bin
pub async fn return_pack(pool: &SqlitePool, store_id: i64, pack_id: i64) -> AppResult<Pack> {
    let target = store_pack(pool, store_id, pack_id).await?;
    if !target.status.is_returnable() {
        return Err(AppError::with_message(
            ErrorCode::PackInvalidStatus,
            format!("Pack {} is already {:?}", target.pack_number, target.status),
        ));
    }

    pack::mark_returned(pool, pack_id, shared::util::now_millis()).await?;
    tracing::info!(store_id, pack_id, "Pack returned");
    store_pack(pool, store_id, pack_id).await
}

/// Record the serial a shift starts counting a pack from
pub async fn record_opening(
    pool: &SqlitePool,
    store_id: i64,
    shift_id: i64,
    data: ShiftOpeningCreate,
) -> AppResult<ShiftOpening> {
    record_opening_at(pool, store_id, shift_id, data, Utc::now()).await
}

/// [`record_opening`] with an explicit clock.
///
/// Openings and day-close rows are ordered by `created_at`, so both must
/// come from the same clock.
pub async fn record_opening_at(
    pool: &SqlitePool,
    store_id: i64,
    shift_id: i64,
    data: ShiftOpeningCreate,
    now: DateTime<Utc>,
) -> AppResult<ShiftOpening> {
    let serial = validate_serial(&data.opening_serial, "opening_serial")?;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let target_shift = shift::find_by_id(&mut *tx, shift_id)
        .await?
        .filter(|s| s.store_id == store_id)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ShiftNotFound, format!("Shift {shift_id} not found"))
        })?;
    if !matches!(target_shift.status, ShiftStatus::Open | ShiftStatus::Active) {
        return Err(AppError::with_message(
            ErrorCode::ShiftNotOpen,
            format!("Shift {shift_id} is {:?}", target_shift.status),
        ));
    }

    let target = pack::find_by_id(&mut *tx, data.pack_id)
        .await?
        .filter(|p| p.store_id == store_id)
        .ok_or_else(|| pack_not_found(data.pack_id))?;
    if target.status != PackStatus::Active {
        return Err(AppError::with_message(
            ErrorCode::PackInvalidStatus,
            format!("Pack {} is not ACTIVE", target.pack_number),
        ));
    }

    let lo = validate_serial(&target.serial_start, "serial_start")?;
    let hi = validate_serial(&target.serial_end, "serial_end")?;
    if serial < lo || serial > hi {
        return Err(AppError::with_message(
            ErrorCode::InvalidSerialRange,
            format!(
                "opening_serial {} outside pack range {}-{}",
                data.opening_serial, target.serial_start, target.serial_end
            ),
        )
        .with_detail("pack_id", target.id));
    }

    let opening = shift_opening::insert(
        &mut *tx,
        shift_id,
        data.pack_id,
        &data.opening_serial,
        now.timestamp_millis(),
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::OpeningAlreadyRecorded, msg),
        other => other.into(),
    })?;
    shift::mark_active(&mut *tx, shift_id).await?;
    tx.commit().await.map_err(RepoError::from)?;

    Ok(opening)
}

/// Serial the open period counts `pack` from.
///
/// The newer of the shift's opening record and the pack's last day-close
/// row wins; the day-close row wins a tie. Falls back to `serial_start`.
pub async fn resolve_starting_serial(
    conn: &mut SqliteConnection,
    shift_id: Option<i64>,
    target: &Pack,
) -> Result<String, RepoError> {
    let opening = match shift_id {
        Some(id) => shift_opening::find(&mut *conn, id, target.id).await?,
        None => None,
    };
    let last_close = day_pack::find_last_for_pack(&mut *conn, target.id).await?;

    let serial = match (opening, last_close) {
        (Some(o), Some(d)) if o.created_at > d.created_at => o.opening_serial,
        (_, Some(d)) => d.ending_serial,
        (Some(o), None) => o.opening_serial,
        (None, None) => target.serial_start.clone(),
    };
    Ok(serial)
}

/// Current-period view of every active bin
pub async fn current_bins(pool: &SqlitePool, store_id: i64) -> AppResult<Vec<CurrentBin>> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;

    let bins = bin::find_active(&mut *conn, store_id).await?;
    let occupied = bin::find_occupied(&mut *conn, store_id).await?;
    let latest_shift = shift::find_latest(&mut *conn, store_id).await?.map(|s| s.id);

    let mut view = Vec::with_capacity(bins.len());
    for b in bins {
        let pack = match occupied.iter().find(|o| o.bin_id == b.id) {
            Some(o) => {
                let held = pack::find_by_id(&mut *conn, o.pack_id)
                    .await?
                    .ok_or_else(|| pack_not_found(o.pack_id))?;
                let starting_serial =
                    resolve_starting_serial(&mut conn, latest_shift, &held).await?;
                Some(CurrentBinPack {
                    pack_id: o.pack_id,
                    pack_number: o.pack_number.clone(),
                    game_name: o.game_name.clone(),
                    game_price: o.game_price,
                    serial_start: o.serial_start.clone(),
                    serial_end: o.serial_end.clone(),
                    starting_serial,
                    ending_serial: None,
                })
            }
            None => None,
        };
        view.push(CurrentBin {
            bin_id: b.id,
            bin_number: b.bin_number(),
            bin_name: b.name,
            pack,
        });
    }

    Ok(view)
}
