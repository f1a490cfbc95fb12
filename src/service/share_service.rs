use std::backtrace::Backtrace;
use std::io::ErrorKind;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::model::error::share_errors::{ShareFileError, SharedDownloadError};
use crate::model::repository::{FileRecord, Share};
use crate::model::request::share_requests::CreateShareRequest;
use crate::repository::{close_connection, file_repository, open_connection, share_repository};
use crate::storage::StorageBackend;

/// creates a public link to a file the user owns
pub fn create_share(user_id: &str, request: &CreateShareRequest) -> Result<Share, ShareFileError> {
    let con = open_connection();
    let result = match file_repository::get_file(request.file_id, user_id, &con) {
        Ok(_) => {
            let now = chrono::offset::Local::now().naive_local();
            let token = Uuid::new_v4().simple().to_string();
            let password_hash = request
                .password
                .as_deref()
                .map(str::trim)
                .filter(|password| !password.is_empty())
                .map(|password| hash_password(&token, password));
            let share = Share {
                id: None,
                file_id: request.file_id,
                expires_on: request
                    .expires_in_hours
                    .map(|hours| now + chrono::Duration::hours(i64::from(hours))),
                token,
                password_hash,
                created_on: now,
                download_count: 0,
            };
            share_repository::create_share(&share, &con).map_err(|e| {
                log::error!(
                    "Failed to create share for file {}! Error is {e:?}\n{}",
                    request.file_id,
                    Backtrace::force_capture()
                );
                ShareFileError::DbFailure
            })
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(ShareFileError::FileNotFound),
        Err(e) => {
            log::error!(
                "Failed to retrieve file {} to share! Error is {e:?}\n{}",
                request.file_id,
                Backtrace::force_capture()
            );
            Err(ShareFileError::DbFailure)
        }
    };
    close_connection(con);
    result
}

/// returns every share on a file the user owns, newest first
pub fn list_shares(user_id: &str, file_id: u32) -> Result<Vec<Share>, ShareFileError> {
    let con = open_connection();
    let result = match file_repository::get_file(file_id, user_id, &con) {
        Ok(_) => share_repository::get_shares_for_file(file_id, &con).map_err(|e| {
            log::error!(
                "Failed to list shares for file {file_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            ShareFileError::DbFailure
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(ShareFileError::FileNotFound),
        Err(e) => {
            log::error!(
                "Failed to retrieve file {file_id} to list shares! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(ShareFileError::DbFailure)
        }
    };
    close_connection(con);
    result
}

/// retrieves the shared file's record and bytes. No account is needed, only the token
/// (and the password, if the share has one). Every successful download is counted
pub fn download_shared(
    token: &str,
    password: Option<&str>,
    storage: &dyn StorageBackend,
) -> Result<(FileRecord, Vec<u8>), SharedDownloadError> {
    let con = open_connection();
    let result = download_shared_with_connection(token, password, storage, &con);
    close_connection(con);
    result
}

fn download_shared_with_connection(
    token: &str,
    password: Option<&str>,
    storage: &dyn StorageBackend,
    con: &rusqlite::Connection,
) -> Result<(FileRecord, Vec<u8>), SharedDownloadError> {
    let log_db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to process shared download: {e:?}\n{}",
            Backtrace::force_capture()
        );
        SharedDownloadError::DbFailure
    };
    let share = share_repository::get_share_by_token(token, con)
        .map_err(log_db_error)?
        .ok_or(SharedDownloadError::NotFound)?;
    if share.is_expired(chrono::offset::Local::now().naive_local()) {
        return Err(SharedDownloadError::NotFound);
    }
    if let Some(expected) = &share.password_hash {
        let given = password.map(|p| hash_password(&share.token, p.trim()));
        if given.as_ref() != Some(expected) {
            return Err(SharedDownloadError::BadPassword);
        }
    }
    let file = match file_repository::get_file_any_owner(share.file_id, con) {
        Ok(f) => f,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(SharedDownloadError::NotFound),
        Err(e) => return Err(log_db_error(e)),
    };
    let contents = match storage.read(&file.storage_key) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(SharedDownloadError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to read bytes for shared file {}: {e:?}\n{}",
                share.file_id,
                Backtrace::force_capture()
            );
            return Err(SharedDownloadError::StorageIo);
        }
    };
    // the share id is always present when it comes from the database
    if let Some(share_id) = share.id {
        share_repository::increment_download_count(share_id, con).map_err(log_db_error)?;
    }
    Ok((file, contents))
}

fn hash_password(token: &str, password: &str) -> String {
    let combined = format!("{token}:{password}");
    format!("{:x}", Sha256::digest(combined.as_bytes()))
}
