use std::backtrace::Backtrace;

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;

use crate::config::DRIVE_CONFIG;
use crate::guard::{CallerIdentity, ResolveResult, MISSING_IDENTITY_MESSAGE, UNKNOWN_ACCOUNT_MESSAGE};
use crate::model::error::file_errors::{DeleteFileError, DownloadFileError, UploadFileError};
use crate::model::request::file_requests::UploadFilesRequest;
use crate::model::response::file_responses::{
    DeleteFileResponse, DownloadFileResponse, FileContents, FileSummaryResponse,
    ListFilesResponse, UploadFilesBody, UploadFilesResponse,
};
use crate::model::response::{BasicMessage, DeleteResult};
use crate::service::file_service::DEFAULT_LIST_LIMIT;
use crate::service::{dashboard_service, file_service};
use crate::storage::DiskStorage;

/// accepts a batch of files via multipart form and stores them, in order, in the requested folder
#[post("/", data = "<request>")]
pub async fn upload_files(
    request: Form<UploadFilesRequest<'_>>,
    identity: CallerIdentity,
    storage: &State<DiskStorage>,
) -> UploadFilesResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return UploadFilesResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return UploadFilesResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    let folder_id = match request.folder_id() {
        Ok(id) => id,
        Err(message) => return UploadFilesResponse::BadRequest(BasicMessage::new(&message)),
    };
    let files = match request.read_files().await {
        Ok(files) => files,
        Err(e) => {
            log::error!(
                "Failed to read uploaded files from the request: {e:?}\n{}",
                Backtrace::force_capture()
            );
            return UploadFilesResponse::Failure(BasicMessage::new(
                "Failed to read the uploaded files. Check server logs for details",
            ));
        }
    };
    if files.is_empty() {
        return UploadFilesResponse::BadRequest(BasicMessage::new("No files were provided."));
    }
    let outcome = match file_service::upload_files(
        &user_id,
        folder_id,
        files,
        storage.inner(),
        DRIVE_CONFIG.quota.enforce,
    ) {
        Ok(outcome) => outcome,
        Err(UploadFileError::ParentFolderNotFound) => {
            return UploadFilesResponse::ParentNotFound(BasicMessage::new(
                "The folder with the passed id could not be found.",
            ))
        }
        Err(_) => {
            return UploadFilesResponse::Failure(BasicMessage::new(
                "Failed to upload files. Check server logs for details",
            ))
        }
    };
    let summary = match dashboard_service::get_storage_summary(&user_id) {
        Ok(summary) => summary,
        Err(_) => {
            return UploadFilesResponse::Failure(BasicMessage::new(
                "Files were processed but the storage summary could not be retrieved. Check server logs for details",
            ))
        }
    };
    let failure_message = outcome
        .failed
        .as_ref()
        .map(|failed| upload_failure_message(&failed.reason));
    let body = UploadFilesBody::new(&outcome, &summary, failure_message);
    if outcome.failed.is_some() {
        UploadFilesResponse::PartialFailure(Json::from(body))
    } else {
        UploadFilesResponse::Success(Json::from(body))
    }
}

/// lists the newest files directly inside a folder. Leave out `folderId` (or pass 0) for the top level
#[allow(non_snake_case)] // query parameter names come from the function arguments
#[get("/?<folderId>&<limit>")]
pub fn list_files(folderId: Option<u32>, limit: Option<u32>, identity: CallerIdentity) -> ListFilesResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return ListFilesResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return ListFilesResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    let folder_id = folderId.filter(|id| *id != 0);
    let limit = limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, DEFAULT_LIST_LIMIT);
    match file_service::list_files(&user_id, folder_id, limit) {
        Ok(files) => ListFilesResponse::Success(Json::from(
            files
                .iter()
                .map(FileSummaryResponse::from)
                .collect::<Vec<FileSummaryResponse>>(),
        )),
        Err(_) => ListFilesResponse::FileDbError(BasicMessage::new(
            "Failed to pull file info from database. Check server logs for details",
        )),
    }
}

#[get("/<id>/contents")]
pub fn download_file(
    id: u32,
    identity: CallerIdentity,
    storage: &State<DiskStorage>,
) -> DownloadFileResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return DownloadFileResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return DownloadFileResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    match file_service::download_file(&user_id, id, storage.inner()) {
        Ok((record, contents)) => {
            DownloadFileResponse::Success(FileContents::new(&record.name, contents))
        }
        Err(DownloadFileError::NotFound) => DownloadFileResponse::FileNotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
        Err(_) => DownloadFileResponse::FileDbError(BasicMessage::new(
            "Failed to retrieve the file. Check server logs for details",
        )),
    }
}

#[delete("/<id>")]
pub fn delete_file(id: u32, identity: CallerIdentity) -> DeleteFileResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return DeleteFileResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return DeleteFileResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    match file_service::delete_file(&user_id, id) {
        Ok(()) => DeleteFileResponse::Deleted(DeleteResult::success()),
        Err(DeleteFileError::NotFound) => {
            DeleteFileResponse::NotFound(DeleteResult::failure("File not found"))
        }
        Err(DeleteFileError::DbError) => DeleteFileResponse::Failure(DeleteResult::failure(
            "Failed to delete file. Check server logs for details",
        )),
    }
}

fn upload_failure_message(reason: &UploadFileError) -> &'static str {
    match reason {
        UploadFileError::QuotaExceeded => "The file would put the account over its storage limit",
        UploadFileError::InvalidName => "The file name is not valid",
        UploadFileError::ParentFolderNotFound => "The folder was deleted during the upload",
        UploadFileError::StorageIo | UploadFileError::DbFailure => {
            "Failed to store the file. Check server logs for details"
        }
    }
}
