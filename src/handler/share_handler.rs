use rocket::serde::json::Json;
use rocket::State;

use crate::guard::{
    CallerIdentity, ResolveResult, SharePassword, MISSING_IDENTITY_MESSAGE, UNKNOWN_ACCOUNT_MESSAGE,
};
use crate::model::error::share_errors::{ShareFileError, SharedDownloadError};
use crate::model::request::share_requests::CreateShareRequest;
use crate::model::response::file_responses::FileContents;
use crate::model::response::share_responses::{
    CreateShareResponse, ListSharesResponse, ShareResponse, SharedDownloadResponse,
};
use crate::model::response::BasicMessage;
use crate::service::share_service;
use crate::storage::DiskStorage;

#[post("/", data = "<request>")]
pub fn create_share(request: Json<CreateShareRequest>, identity: CallerIdentity) -> CreateShareResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return CreateShareResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return CreateShareResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    match share_service::create_share(&user_id, &request) {
        Ok(share) => CreateShareResponse::Success(Json::from(ShareResponse::from(&share))),
        Err(ShareFileError::FileNotFound) => CreateShareResponse::FileNotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
        Err(ShareFileError::DbFailure) => CreateShareResponse::ShareDbError(BasicMessage::new(
            "Failed to share the file. Check server logs for details",
        )),
    }
}

#[get("/file/<file_id>")]
pub fn list_shares(file_id: u32, identity: CallerIdentity) -> ListSharesResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return ListSharesResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return ListSharesResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    match share_service::list_shares(&user_id, file_id) {
        Ok(shares) => ListSharesResponse::Success(Json::from(
            shares.iter().map(ShareResponse::from).collect::<Vec<ShareResponse>>(),
        )),
        Err(ShareFileError::FileNotFound) => ListSharesResponse::FileNotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
        Err(ShareFileError::DbFailure) => ListSharesResponse::ShareDbError(BasicMessage::new(
            "Failed to retrieve shares. Check server logs for details",
        )),
    }
}

/// public download through a share link. No caller identity is needed, and the password (if any) comes in a header
#[get("/<token>")]
pub fn download_shared(
    token: &str,
    password: SharePassword,
    storage: &State<DiskStorage>,
) -> SharedDownloadResponse {
    match share_service::download_shared(token, password.0.as_deref(), storage.inner()) {
        Ok((record, contents)) => {
            SharedDownloadResponse::Success(FileContents::new(&record.name, contents))
        }
        Err(SharedDownloadError::NotFound) => SharedDownloadResponse::NotFound(BasicMessage::new(
            "The shared file could not be found or the link has expired.",
        )),
        Err(SharedDownloadError::BadPassword) => {
            SharedDownloadResponse::BadPassword(BasicMessage::new("Incorrect password."))
        }
        Err(_) => SharedDownloadResponse::Failure(BasicMessage::new(
            "Failed to retrieve the shared file. Check server logs for details",
        )),
    }
}
