use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::Share;
use crate::model::response::file_responses::FileContents;
use crate::model::response::{BasicMessage, DATE_FORMAT};

/// a share as its owner sees it. The password hash never leaves the server
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ShareResponse {
    pub token: String,
    #[serde(rename = "fileId")]
    pub file_id: u32,
    #[serde(rename = "hasPassword")]
    pub has_password: bool,
    #[serde(rename = "expiresOn")]
    pub expires_on: Option<String>,
    #[serde(rename = "createdOn")]
    pub created_on: String,
    #[serde(rename = "downloadCount")]
    pub download_count: u32,
}

impl From<&Share> for ShareResponse {
    fn from(share: &Share) -> Self {
        ShareResponse {
            token: share.token.clone(),
            file_id: share.file_id,
            has_password: share.password_hash.is_some(),
            expires_on: share
                .expires_on
                .map(|date| date.format(DATE_FORMAT).to_string()),
            created_on: share.created_on.format(DATE_FORMAT).to_string(),
            download_count: share.download_count,
        }
    }
}

#[derive(Responder)]
pub enum CreateShareResponse {
    #[response(status = 201, content_type = "json")]
    Success(Json<ShareResponse>),
    #[response(status = 404, content_type = "json")]
    FileNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ShareDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum ListSharesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<ShareResponse>>),
    #[response(status = 404, content_type = "json")]
    FileNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ShareDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum SharedDownloadResponse {
    Success(FileContents),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    BadPassword(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}
