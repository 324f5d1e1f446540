//! usage_counters row load, roll, conditional increment, delete.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tiergate_core::errors::StorageError;
use tiergate_core::types::{ActionCategory, Period, UsageCounters};

use crate::to_storage_err;

/// Column holding the counter for `action`.
pub fn column_for(action: ActionCategory) -> &'static str {
    match action {
        ActionCategory::Search => "searches",
        ActionCategory::Vin => "vin_searches",
        ActionCategory::Export => "exports",
        ActionCategory::Ai => "ai_analyses",
    }
}

fn to_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn corrupt(account: &str, details: impl Into<String>) -> StorageError {
    StorageError::CounterCorrupt {
        account: account.to_string(),
        details: details.into(),
    }
}

/// Load the `period` row for `account`, if any.
pub fn load(
    conn: &Connection,
    account: &str,
    period: Period,
) -> Result<Option<UsageCounters>, StorageError> {
    let raw: Option<(i64, i64, i64, i64, i64, i64)> = conn
        .query_row(
            "SELECT period_start_ms, COALESCE(cycle_anchor_ms, period_start_ms),
                    searches, ai_analyses, vin_searches, exports
             FROM usage_counters WHERE account_id = ?1 AND period = ?2",
            params![account, period.as_str()],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            },
        )
        .optional()
        .map_err(to_storage_err)?;

    let Some((start_ms, anchor_ms, searches, ai, vin, exports)) = raw else {
        return Ok(None);
    };

    let count = |v: i64, name: &str| {
        u64::try_from(v).map_err(|_| corrupt(account, format!("negative {name} counter: {v}")))
    };
    let last_reset = DateTime::<Utc>::from_timestamp_millis(start_ms)
        .ok_or_else(|| corrupt(account, format!("period_start_ms out of range: {start_ms}")))?;
    let cycle_anchor = DateTime::<Utc>::from_timestamp_millis(anchor_ms)
        .ok_or_else(|| corrupt(account, format!("cycle_anchor_ms out of range: {anchor_ms}")))?;

    Ok(Some(UsageCounters {
        period,
        searches: count(searches, "searches")?,
        ai_analyses: count(ai, "ai_analyses")?,
        vin_searches: count(vin, "vin_searches")?,
        exports: count(exports, "exports")?,
        last_reset,
        cycle_anchor,
    }))
}

/// Insert or overwrite the row for `counters.period`.
pub fn upsert(conn: &Connection, account: &str, counters: &UsageCounters) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO usage_counters
            (account_id, period, period_start_ms, cycle_anchor_ms,
             searches, ai_analyses, vin_searches, exports)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT (account_id, period) DO UPDATE SET
            period_start_ms = excluded.period_start_ms,
            cycle_anchor_ms = excluded.cycle_anchor_ms,
            searches        = excluded.searches,
            ai_analyses     = excluded.ai_analyses,
            vin_searches    = excluded.vin_searches,
            exports         = excluded.exports",
        params![
            account,
            counters.period.as_str(),
            counters.last_reset.timestamp_millis(),
            counters.cycle_anchor.timestamp_millis(),
            to_i64(counters.searches),
            to_i64(counters.ai_analyses),
            to_i64(counters.vin_searches),
            to_i64(counters.exports),
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Conditional increment: `+1` only while the counter is below `cap`.
/// `cap = None` increments unconditionally. Returns whether a row changed.
pub fn increment_if_below(
    conn: &Connection,
    account: &str,
    period: Period,
    action: ActionCategory,
    cap: Option<u64>,
) -> Result<bool, StorageError> {
    let column = column_for(action);
    let sql = format!(
        "UPDATE usage_counters SET {column} = {column} + 1
         WHERE account_id = ?1 AND period = ?2 AND (?3 IS NULL OR {column} < ?3)"
    );
    let changed = conn
        .execute(&sql, params![account, period.as_str(), cap.map(to_i64)])
        .map_err(to_storage_err)?;
    Ok(changed == 1)
}

/// Delete every row for `account`. Returns the number of rows removed.
pub fn delete_account(conn: &Connection, account: &str) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM usage_counters WHERE account_id = ?1", params![account])
        .map_err(to_storage_err)
}

/// Number of distinct accounts with stored counters.
pub fn count_accounts(conn: &Connection) -> Result<u64, StorageError> {
    let n: i64 = conn
        .query_row("SELECT COUNT(DISTINCT account_id) FROM usage_counters", [], |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(n.max(0) as u64)
}

/// Timestamp helper kept next to the schema: counters store millisecond starts.
pub fn truncate_to_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(t.timestamp_millis()).unwrap_or(t)
}
