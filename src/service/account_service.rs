use std::backtrace::Backtrace;

use crate::model::error::account_errors::{CreateAccountError, GetAccountError};
use crate::model::repository::UserAccount;
use crate::repository::{close_connection, open_connection, user_repository};

/// creates an account for a newly registered user with nothing stored yet
pub fn create_account(id: &str, storage_limit: u64) -> Result<UserAccount, CreateAccountError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CreateAccountError::MissingId);
    }
    let con = open_connection();
    let result = match user_repository::get_user(id, &con) {
        Ok(_) => Err(CreateAccountError::AlreadyExists),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            user_repository::create_user(id, storage_limit, &con).map_err(|e| {
                log::error!(
                    "Failed to create account {id}! Error is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                CreateAccountError::DbFailure
            })
        }
        Err(e) => {
            log::error!(
                "Failed to check if account {id} already exists! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateAccountError::DbFailure)
        }
    };
    close_connection(con);
    if result.is_ok() {
        log::info!("Created account {id} with a limit of {storage_limit} bytes");
    }
    result
}

pub fn get_account(id: &str) -> Result<UserAccount, GetAccountError> {
    let con = open_connection();
    let account = match user_repository::get_user(id, &con) {
        Ok(account) => Ok(account),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(GetAccountError::NotFound),
        Err(e) => {
            log::error!(
                "Could not retrieve account {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetAccountError::DbFailure)
        }
    };
    close_connection(con);
    account
}
