//! `SqliteUsageStore`: durable `IUsageStore` with atomic conditional increments.
//!
//! All access goes through one write connection behind a `Mutex`. Each
//! `try_consume` runs in a `BEGIN IMMEDIATE` transaction: roll both period
//! rows, evaluate every enforced limit, then apply guarded `UPDATE`s. Other
//! processes sharing the file serialize on SQLite's write lock.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info};

use tiergate_core::config::StorageConfig;
use tiergate_core::errors::{GateError, StorageError};
use tiergate_core::period::{initial_period_start, roll_forward, ResetPolicy};
use tiergate_core::traits::usage_store::{evaluate_consume, IUsageStore};
use tiergate_core::types::{
    ActionCategory, CapabilityRecord, ConsumeOutcome, Period, UsageCounters,
};

use crate::connection::open_connection;
use crate::queries::usage;
use crate::to_storage_err;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct SqliteUsageStore {
    conn: Mutex<Connection>,
    policy: ResetPolicy,
    path: Option<PathBuf>,
}

impl SqliteUsageStore {
    /// Open a file-backed store. Runs migrations and applies pragmas.
    pub fn open(path: &Path, policy: ResetPolicy) -> Result<Self, StorageError> {
        let conn = open_connection(Some(path), DEFAULT_BUSY_TIMEOUT_MS)?;
        Ok(Self::from_connection(conn, policy, Some(path.to_path_buf())))
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(policy: ResetPolicy) -> Result<Self, StorageError> {
        let conn = open_connection(None, DEFAULT_BUSY_TIMEOUT_MS)?;
        Ok(Self::from_connection(conn, policy, None))
    }

    /// Open from `[storage]` config. Fails if `reset_policy` is unset.
    pub fn from_config(config: &StorageConfig) -> Result<Self, GateError> {
        let policy = config.effective_reset_policy()?;
        let conn = open_connection(config.db_path.as_deref(), config.effective_busy_timeout_ms())?;
        info!(
            path = ?config.db_path,
            policy = policy.as_str(),
            "usage store opened"
        );
        Ok(Self::from_connection(conn, policy, config.db_path.clone()))
    }

    fn from_connection(conn: Connection, policy: ResetPolicy, path: Option<PathBuf>) -> Self {
        Self {
            conn: Mutex::new(conn),
            policy,
            path,
        }
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of accounts with stored counters.
    pub fn account_count(&self) -> Result<u64, StorageError> {
        let conn = self.lock()?;
        usage::count_accounts(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Load the `period` row rolled to `now`, creating or resetting it as needed.
    fn rolled(
        &self,
        conn: &Connection,
        account: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<UsageCounters, StorageError> {
        match usage::load(conn, account, period)? {
            None => {
                let fresh = UsageCounters::fresh(
                    period,
                    usage::truncate_to_millis(initial_period_start(self.policy, period, now)),
                );
                usage::upsert(conn, account, &fresh)?;
                Ok(fresh)
            }
            Some(stored) => {
                let current = roll_forward(self.policy, &stored, now);
                if current != stored {
                    debug!(account, period = period.as_str(), "period rolled over");
                    usage::upsert(conn, account, &current)?;
                }
                Ok(current)
            }
        }
    }
}

impl IUsageStore for SqliteUsageStore {
    fn current_counters(
        &self,
        account: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<UsageCounters, StorageError> {
        let conn = self.lock()?;
        match usage::load(&conn, account, period)? {
            None => Ok(UsageCounters::fresh(
                period,
                usage::truncate_to_millis(initial_period_start(self.policy, period, now)),
            )),
            Some(stored) => Ok(roll_forward(self.policy, &stored, now)),
        }
    }

    fn try_consume(
        &self,
        account: &str,
        action: ActionCategory,
        capability: &CapabilityRecord,
        now: DateTime<Utc>,
    ) -> Result<ConsumeOutcome, StorageError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(to_storage_err)?;

        let daily = self.rolled(&tx, account, Period::Daily, now)?;
        let monthly = self.rolled(&tx, account, Period::Monthly, now)?;

        if let Some(refused) = evaluate_consume(action, capability, &daily, &monthly) {
            tx.commit().map_err(to_storage_err)?;
            info!(account, action = action.as_str(), ?refused, "consume refused");
            return Ok(refused);
        }

        for period in Period::ALL {
            let enforced = action
                .enforced_fields()
                .iter()
                .find(|f| f.period() == period)
                .and_then(|f| capability.limit(*f).finite().map(|max| (*f, max)));

            let changed =
                usage::increment_if_below(&tx, account, period, action, enforced.map(|(_, max)| max))?;
            if !changed {
                // The guarded UPDATE is the final word even if the reads above disagreed.
                tx.rollback().map_err(to_storage_err)?;
                let Some((field, limit)) = enforced else {
                    return Err(StorageError::CounterCorrupt {
                        account: account.to_string(),
                        details: format!("missing {} row", period.as_str()),
                    });
                };
                return Ok(ConsumeOutcome::LimitReached { field, limit });
            }
        }

        let used_after = usage::load(&tx, account, action.limit_field().period())?
            .map(|c| c.used(action))
            .unwrap_or(0);
        tx.commit().map_err(to_storage_err)?;

        debug!(account, action = action.as_str(), used_after, "consumed");
        Ok(ConsumeOutcome::Consumed { used_after })
    }

    fn reset_account(&self, account: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let removed = usage::delete_account(&conn, account)?;
        info!(account, removed, "usage counters reset");
        Ok(())
    }

    fn reset_policy(&self) -> ResetPolicy {
        self.policy
    }
}
