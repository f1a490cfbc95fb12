use rocket::serde::json::Json;

use crate::guard::{CallerIdentity, ResolveResult, MISSING_IDENTITY_MESSAGE, UNKNOWN_ACCOUNT_MESSAGE};
use crate::model::error::folder_errors::{CreateFolderError, DeleteFolderError};
use crate::model::request::folder_requests::CreateFolderRequest;
use crate::model::response::folder_responses::{
    CreateFolderResponse, DeleteFolderResponse, DeletedFolderResponse, FolderResponse,
};
use crate::model::response::{BasicMessage, DeleteResult};
use crate::service::folder_service;

#[post("/", data = "<folder>")]
pub fn create_folder(folder: Json<CreateFolderRequest>, identity: CallerIdentity) -> CreateFolderResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return CreateFolderResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return CreateFolderResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    match folder_service::create_folder(&user_id, &folder.name, folder.parent_id()) {
        Ok(created) => CreateFolderResponse::Success(Json::from(FolderResponse::from(&created))),
        Err(CreateFolderError::BlankName) => {
            CreateFolderResponse::BadRequest(BasicMessage::new("Folder name cannot be blank."))
        }
        Err(CreateFolderError::ParentNotFound) => CreateFolderResponse::ParentNotFound(
            BasicMessage::new("The parent folder with the passed id could not be found."),
        ),
        Err(CreateFolderError::DbFailure) => CreateFolderResponse::FolderDbError(BasicMessage::new(
            "Failed to create folder. Check server logs for details",
        )),
    }
}

/// deletes the folder along with every folder and file beneath it
#[delete("/<id>")]
pub fn delete_folder(id: u32, identity: CallerIdentity) -> DeleteFolderResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return DeleteFolderResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return DeleteFolderResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    match folder_service::delete_folder(&user_id, id) {
        Ok(summary) => DeleteFolderResponse::Success(Json::from(DeletedFolderResponse::from(summary))),
        Err(DeleteFolderError::FolderNotFound) => {
            DeleteFolderResponse::FolderNotFound(DeleteResult::failure("Folder not found"))
        }
        Err(DeleteFolderError::DbFailure) => DeleteFolderResponse::FolderDbError(DeleteResult::failure(
            "Failed to delete folder. Check server logs for details",
        )),
    }
}
