use rocket::serde::{json::Json, Deserialize, Serialize};

use crate::model::repository::Folder;
use crate::model::response::{BasicMessage, DeleteResult, DATE_FORMAT};
use crate::model::service::DeletedFolderSummary;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct FolderResponse {
    pub id: u32,
    pub name: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<u32>,
    #[serde(rename = "createdOn")]
    pub created_on: String,
}

impl From<&Folder> for FolderResponse {
    fn from(base: &Folder) -> FolderResponse {
        FolderResponse {
            // should always have an id when coming from the database
            id: base.id.unwrap_or_default(),
            name: base.name.clone(),
            parent_id: base.parent_id,
            created_on: base.created_on.format(DATE_FORMAT).to_string(),
        }
    }
}

/// a delete result plus how much went with the folder
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct DeletedFolderResponse {
    pub success: bool,
    #[serde(rename = "foldersDeleted")]
    pub folders_deleted: usize,
    #[serde(rename = "filesDeleted")]
    pub files_deleted: usize,
    #[serde(rename = "bytesFreed")]
    pub bytes_freed: u64,
}

impl From<DeletedFolderSummary> for DeletedFolderResponse {
    fn from(summary: DeletedFolderSummary) -> Self {
        DeletedFolderResponse {
            success: true,
            folders_deleted: summary.folders_deleted,
            files_deleted: summary.files_deleted,
            bytes_freed: summary.bytes_freed,
        }
    }
}

#[derive(Responder)]
pub enum CreateFolderResponse {
    #[response(status = 201, content_type = "json")]
    Success(Json<FolderResponse>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    ParentNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DeleteFolderResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<DeletedFolderResponse>),
    #[response(status = 200, content_type = "json")]
    FolderNotFound(Json<DeleteResult>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<DeleteResult>),
    #[response(status = 401)]
    Unauthorized(String),
}
