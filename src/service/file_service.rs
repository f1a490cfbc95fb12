use std::backtrace::Backtrace;
use std::io::{Cursor, ErrorKind};

use rusqlite::{Connection, TransactionBehavior};

use crate::ledger;
use crate::model::error::file_errors::{
    DeleteFileError, DownloadFileError, ListFilesError, UploadFileError,
};
use crate::model::repository::FileRecord;
use crate::model::request::file_requests::UploadedFile;
use crate::model::service::{FailedUpload, UploadOutcome};
use crate::repository::{
    close_connection, file_repository, folder_repository, open_connection, user_repository,
};
use crate::storage::{self, StorageBackend};

/// how many files a folder listing returns when the caller doesn't ask for fewer
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// stores every file in `files` for the user, one at a time and in order.
///
/// Each file is written to the storage backend first, then its record and the ledger update are
/// committed together. Empty files are skipped. The first failing file stops the batch: files before
/// it stay committed, and neither it nor anything after it is recorded.
///
/// # Parameters
/// - `user_id`: the account that will own the files
/// - `parent_id`: the folder to put the files in, `None` for root
/// - `files`: the files to store
/// - `storage`: where the bytes go
/// - `enforce_quota`: if true, a file that would put the account over its limit fails the batch
///
/// # Returns
/// - `Ok(UploadOutcome)`: what was stored, skipped, and which file (if any) failed
/// - `Err(UploadFileError::ParentFolderNotFound)`: the folder isn't a live folder owned by the user. Nothing was written
/// - `Err(UploadFileError::DbFailure)`: the folder couldn't be checked. Nothing was written
pub fn upload_files(
    user_id: &str,
    parent_id: Option<u32>,
    files: Vec<UploadedFile>,
    storage: &dyn StorageBackend,
    enforce_quota: bool,
) -> Result<UploadOutcome, UploadFileError> {
    let mut con = open_connection();
    if let Some(folder_id) = parent_id {
        if let Err(e) = check_parent_folder(folder_id, user_id, &con) {
            close_connection(con);
            return Err(e);
        }
    }
    let mut outcome = UploadOutcome::default();
    for file in files {
        if file.contents.is_empty() {
            outcome.skipped.push(file.name);
            continue;
        }
        match upload_single_file(user_id, parent_id, &file, storage, enforce_quota, &mut con) {
            Ok(record) => outcome.uploaded.push(record),
            Err(reason) => {
                log::warn!(
                    "Upload batch for account {user_id} stopped at {} because of {reason:?}",
                    file.name
                );
                outcome.failed = Some(FailedUpload {
                    name: file.name,
                    reason,
                });
                break;
            }
        }
    }
    close_connection(con);
    Ok(outcome)
}

/// returns the newest-first files directly inside the passed folder. `None` is root, and only matches root
pub fn list_files(
    user_id: &str,
    parent_id: Option<u32>,
    limit: u32,
) -> Result<Vec<FileRecord>, ListFilesError> {
    let con = open_connection();
    let files = file_repository::get_child_files(user_id, parent_id, limit, &con).map_err(|e| {
        log::error!(
            "Failed to list files in folder {parent_id:?} for account {user_id}: {e:?}\n{}",
            Backtrace::force_capture()
        );
        ListFilesError::DbFailure
    });
    close_connection(con);
    files
}

/// retrieves the record and bytes of a file the user owns
pub fn download_file(
    user_id: &str,
    file_id: u32,
    storage: &dyn StorageBackend,
) -> Result<(FileRecord, Vec<u8>), DownloadFileError> {
    let con = open_connection();
    let record = file_repository::get_file(file_id, user_id, &con);
    close_connection(con);
    let record = match record {
        Ok(r) => r,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(DownloadFileError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to retrieve file {file_id} for download: {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(DownloadFileError::DbFailure);
        }
    };
    match storage.read(&record.storage_key) {
        Ok(contents) => Ok((record, contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!(
                "File {file_id} has a record but no bytes under {}",
                record.storage_key
            );
            Err(DownloadFileError::NotFound)
        }
        Err(e) => {
            log::error!(
                "Failed to read bytes for file {file_id}: {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(DownloadFileError::StorageIo)
        }
    }
}

/// soft deletes the file and removes its size from the owner's usage, in one transaction.
/// The bytes are left in the storage backend
pub fn delete_file(user_id: &str, file_id: u32) -> Result<(), DeleteFileError> {
    let mut con = open_connection();
    let result = delete_file_with_connection(user_id, file_id, &mut con);
    close_connection(con);
    result
}

fn delete_file_with_connection(
    user_id: &str,
    file_id: u32,
    con: &mut Connection,
) -> Result<(), DeleteFileError> {
    let log_db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to delete file {file_id} for account {user_id}: {e:?}\n{}",
            Backtrace::force_capture()
        );
        DeleteFileError::DbError
    };
    let tx = con
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(log_db_error)?;
    let file = match file_repository::get_file(file_id, user_id, &tx) {
        Ok(f) => f,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(DeleteFileError::NotFound),
        Err(e) => return Err(log_db_error(e)),
    };
    let now = chrono::offset::Local::now().naive_local();
    if !file_repository::soft_delete_file(file_id, user_id, now, &tx).map_err(log_db_error)? {
        return Err(DeleteFileError::NotFound);
    }
    ledger::apply_delete(user_id, file.size, &tx).map_err(log_db_error)?;
    tx.commit().map_err(log_db_error)
}

/// makes sure the folder exists, isn't deleted, and belongs to the user
fn check_parent_folder(
    folder_id: u32,
    user_id: &str,
    con: &Connection,
) -> Result<(), UploadFileError> {
    match folder_repository::get_by_id(folder_id, user_id, con) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(UploadFileError::ParentFolderNotFound),
        Err(e) => {
            log::error!(
                "Failed to check parent folder {folder_id}: {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(UploadFileError::DbFailure)
        }
    }
}

fn upload_single_file(
    user_id: &str,
    parent_id: Option<u32>,
    file: &UploadedFile,
    storage: &dyn StorageBackend,
    enforce_quota: bool,
    con: &mut Connection,
) -> Result<FileRecord, UploadFileError> {
    let name = file.file_name().ok_or(UploadFileError::InvalidName)?;
    if enforce_quota {
        check_quota(user_id, file.contents.len() as u64, con)?;
    }
    let key = storage::storage_key(user_id, &name);
    let written = storage
        .write(&key, &mut Cursor::new(&file.contents))
        .map_err(|e| {
            log::error!(
                "Failed to write {name} to storage under {key}: {e:?}\n{}",
                Backtrace::force_capture()
            );
            UploadFileError::StorageIo
        })?;
    let mut record = FileRecord::new_upload(user_id, &name, &key, written, parent_id);
    match record_upload(user_id, &record, enforce_quota, con) {
        Ok(id) => {
            record.id = Some(id);
            Ok(record)
        }
        Err(e) => {
            // the record never made it, so the bytes would be unreachable
            if let Err(remove_err) = storage.remove(&key) {
                log::error!("Failed to clean up orphaned upload {key}: {remove_err:?}");
            }
            Err(e)
        }
    }
}

/// saves the file record and adds its size to the ledger in one transaction
fn record_upload(
    user_id: &str,
    record: &FileRecord,
    enforce_quota: bool,
    con: &mut Connection,
) -> Result<u32, UploadFileError> {
    let log_db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to save file record for {}: {e:?}\n{}",
            record.name,
            Backtrace::force_capture()
        );
        UploadFileError::DbFailure
    };
    let tx = con
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(log_db_error)?;
    // the folder could have been deleted since the batch started
    if let Some(folder_id) = record.parent_id {
        check_parent_folder(folder_id, user_id, &tx)?;
    }
    // another upload may have committed while the bytes were being written
    if enforce_quota {
        check_quota(user_id, record.size, &tx)?;
    }
    let id = file_repository::create_file(record, &tx).map_err(log_db_error)?;
    ledger::apply_upload(user_id, record.size, &tx).map_err(log_db_error)?;
    tx.commit().map_err(log_db_error)?;
    Ok(id)
}

fn check_quota(user_id: &str, incoming: u64, con: &Connection) -> Result<(), UploadFileError> {
    let account = user_repository::get_user(user_id, con).map_err(|e| {
        log::error!(
            "Failed to retrieve account {user_id} for quota check: {e:?}\n{}",
            Backtrace::force_capture()
        );
        UploadFileError::DbFailure
    })?;
    if account.would_exceed(incoming) {
        return Err(UploadFileError::QuotaExceeded);
    }
    Ok(())
}
