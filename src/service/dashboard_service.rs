use std::backtrace::Backtrace;

use rusqlite::{Connection, TransactionBehavior};

use crate::ledger;
use crate::model::error::account_errors::DashboardError;
use crate::model::service::{DashboardSummary, StorageSummary};
use crate::repository::{
    close_connection, file_repository, folder_repository, open_connection, user_repository,
};

/// how many files the dashboard shows
pub const RECENT_FILE_LIMIT: u32 = 10;

/// reconciles the user's storage usage, then returns their totals and most recent files
pub fn get_dashboard(user_id: &str) -> Result<DashboardSummary, DashboardError> {
    let mut con = open_connection();
    let result = get_dashboard_with_connection(user_id, &mut con);
    close_connection(con);
    result
}

/// account-wide totals as they currently are in the database, without reconciling
pub fn get_storage_summary(user_id: &str) -> Result<StorageSummary, DashboardError> {
    let con = open_connection();
    let summary = storage_summary(user_id, &con);
    close_connection(con);
    summary
}

/// recomputes the user's storage usage from their files, correcting the stored value if it drifted
pub fn reconcile_storage(user_id: &str) -> Result<StorageSummary, DashboardError> {
    let mut con = open_connection();
    let result = reconcile_with_connection(user_id, &mut con)
        .and_then(|_| storage_summary(user_id, &con));
    close_connection(con);
    result
}

fn get_dashboard_with_connection(
    user_id: &str,
    con: &mut Connection,
) -> Result<DashboardSummary, DashboardError> {
    reconcile_with_connection(user_id, con)?;
    let storage = storage_summary(user_id, con)?;
    let recent_files = file_repository::get_recent_files(user_id, RECENT_FILE_LIMIT, con)
        .map_err(|e| map_db_error(user_id, e))?;
    Ok(DashboardSummary {
        storage,
        recent_files,
    })
}

fn reconcile_with_connection(user_id: &str, con: &mut Connection) -> Result<u64, DashboardError> {
    let tx = con
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| map_db_error(user_id, e))?;
    let corrected = ledger::reconcile(user_id, &tx).map_err(|e| map_db_error(user_id, e))?;
    tx.commit().map_err(|e| map_db_error(user_id, e))?;
    Ok(corrected)
}

fn storage_summary(user_id: &str, con: &Connection) -> Result<StorageSummary, DashboardError> {
    let account = user_repository::get_user(user_id, con).map_err(|e| map_db_error(user_id, e))?;
    let total_files =
        file_repository::count_files(user_id, con).map_err(|e| map_db_error(user_id, e))?;
    let total_folders =
        folder_repository::count_folders(user_id, con).map_err(|e| map_db_error(user_id, e))?;
    Ok(StorageSummary {
        total_files,
        total_folders,
        storage_used: account.storage_used,
        storage_limit: account.storage_limit,
        usage_percentage: account.usage_percentage(),
    })
}

fn map_db_error(user_id: &str, e: rusqlite::Error) -> DashboardError {
    if e == rusqlite::Error::QueryReturnedNoRows {
        return DashboardError::AccountNotFound;
    }
    log::error!(
        "Failed to build storage summary for account {user_id}: {e:?}\n{}",
        Backtrace::force_capture()
    );
    DashboardError::DbFailure
}
