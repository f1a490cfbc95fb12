use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::UserAccount;
use crate::model::response::{BasicMessage, DATE_FORMAT};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct AccountResponse {
    pub id: String,
    #[serde(rename = "storageLimit")]
    pub storage_limit: u64,
    #[serde(rename = "storageUsed")]
    pub storage_used: u64,
    #[serde(rename = "createdOn")]
    pub created_on: String,
}

impl From<&UserAccount> for AccountResponse {
    fn from(account: &UserAccount) -> Self {
        AccountResponse {
            id: account.id.clone(),
            storage_limit: account.storage_limit,
            storage_used: account.storage_used,
            created_on: account.created_on.format(DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Responder)]
pub enum CreateAccountResponse {
    #[response(status = 201, content_type = "json")]
    Created(Json<AccountResponse>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 409, content_type = "json")]
    AlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}
