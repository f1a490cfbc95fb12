//! Keeps `Users.storageUsed` equal to the sum of the user's non-deleted file sizes.
//!
//! Every function here takes the connection (usually a transaction) of the operation it belongs to,
//! so the ledger update commits or rolls back together with the file/folder change that caused it.
//! Callers that mutate the ledger are expected to hold an immediate transaction so concurrent
//! requests for the same account are serialized by sqlite's write lock.

use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::repository::{file_repository, user_repository};

/// recomputes the user's usage from their non-deleted files and overwrites the stored value if it drifted.
/// Only writes when the two disagree, so calling it twice in a row is the same as calling it once.
///
/// # Returns
/// - `Ok(u64)`: the corrected usage in bytes
/// - `Err(rusqlite::Error)`: if the account doesn't exist (`QueryReturnedNoRows`) or the database failed
pub fn reconcile(user_id: &str, con: &Connection) -> Result<u64, rusqlite::Error> {
    let account = user_repository::get_user(user_id, con)?;
    let actual = file_repository::sum_file_sizes(user_id, con)?;
    if account.storage_used != actual {
        log::info!(
            "Storage used for account {user_id} drifted (stored {}, actual {actual}), correcting",
            account.storage_used
        );
        user_repository::set_storage_used(user_id, actual, con).map_err(|e| {
            log::error!(
                "Failed to correct storage used for account {user_id}: {e:?}\n{}",
                Backtrace::force_capture()
            );
            e
        })?;
    }
    Ok(actual)
}

/// adds a freshly written file to the user's usage. Only call this after the bytes are durably stored
pub fn apply_upload(user_id: &str, bytes_written: u64, con: &Connection) -> Result<(), rusqlite::Error> {
    user_repository::add_storage_used(user_id, bytes_written, con)
}

/// removes deleted bytes from the user's usage, clamping at 0
pub fn apply_delete(user_id: &str, size: u64, con: &Connection) -> Result<(), rusqlite::Error> {
    user_repository::subtract_storage_used(user_id, size, con)
}
