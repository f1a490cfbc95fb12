use std::backtrace::Backtrace;

use rusqlite::{Connection, TransactionBehavior};

use crate::ledger;
use crate::model::error::folder_errors::{CreateFolderError, DeleteFolderError};
use crate::model::repository::Folder;
use crate::model::service::DeletedFolderSummary;
use crate::repository::{close_connection, file_repository, folder_repository, open_connection};

/// creates a folder for the user. The name is trimmed, and sibling folders may share a name
///
/// # Returns
/// - `Err(CreateFolderError::BlankName)`: the name was empty after trimming
/// - `Err(CreateFolderError::ParentNotFound)`: the parent isn't a live folder owned by the user
pub fn create_folder(
    user_id: &str,
    name: &str,
    parent_id: Option<u32>,
) -> Result<Folder, CreateFolderError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CreateFolderError::BlankName);
    }
    let con = open_connection();
    let created = create_folder_internal(&Folder::new(user_id, name, parent_id), &con);
    close_connection(con);
    created
}

/// soft deletes the folder, every folder beneath it, and every file inside any of them.
/// The total size of those files comes off the owner's usage in the same transaction
pub fn delete_folder(user_id: &str, id: u32) -> Result<DeletedFolderSummary, DeleteFolderError> {
    let mut con = open_connection();
    let deleted = delete_folder_recursively(user_id, id, &mut con);
    close_connection(con);
    deleted
}

// private functions
fn create_folder_internal(folder: &Folder, con: &Connection) -> Result<Folder, CreateFolderError> {
    if let Some(parent_id) = folder.parent_id {
        match folder_repository::get_by_id(parent_id, &folder.user_id, con) {
            Ok(_) => { /* parent is live and ours */ }
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(CreateFolderError::ParentNotFound)
            }
            Err(e) => {
                log::error!(
                    "Failed to check parent folder {parent_id}: {e:?}\n{}",
                    Backtrace::force_capture()
                );
                return Err(CreateFolderError::DbFailure);
            }
        }
    }
    folder_repository::create_folder(folder, con).map_err(|e| {
        log::error!(
            "Error trying to save folder {}! Exception is {e:?}\n{}",
            folder.name,
            Backtrace::force_capture()
        );
        CreateFolderError::DbFailure
    })
}

/// the main body of `delete_folder`
fn delete_folder_recursively(
    user_id: &str,
    id: u32,
    con: &mut Connection,
) -> Result<DeletedFolderSummary, DeleteFolderError> {
    let log_db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to recursively delete folder {id}. Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        DeleteFolderError::DbFailure
    };
    let tx = con
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(log_db_error)?;
    // includes the folder itself, and is empty if it isn't a live folder of ours
    let folder_ids =
        folder_repository::get_subtree_folder_ids(id, user_id, &tx).map_err(log_db_error)?;
    if folder_ids.is_empty() {
        return Err(DeleteFolderError::FolderNotFound);
    }
    let now = chrono::offset::Local::now().naive_local();
    let bytes_freed = file_repository::sum_file_sizes_in_folders(&folder_ids, user_id, &tx)
        .map_err(log_db_error)?;
    let files_deleted =
        file_repository::soft_delete_files_in_folders(&folder_ids, user_id, now, &tx)
            .map_err(log_db_error)?;
    let folders_deleted = folder_repository::soft_delete_folders(&folder_ids, user_id, now, &tx)
        .map_err(log_db_error)?;
    ledger::apply_delete(user_id, bytes_freed, &tx).map_err(log_db_error)?;
    tx.commit().map_err(log_db_error)?;
    log::info!(
        "Deleted folder {id} for account {user_id}: {folders_deleted} folders, {files_deleted} files, {bytes_freed} bytes"
    );
    Ok(DeletedFolderSummary {
        folders_deleted,
        files_deleted,
        bytes_freed,
    })
}
