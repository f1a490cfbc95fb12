use rocket::http::Header;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::FileRecord;
use crate::model::response::{BasicMessage, DeleteResult, DATE_FORMAT};
use crate::model::service::{StorageSummary, UploadOutcome};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FileSummaryResponse {
    pub id: u32,
    pub name: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
    pub size: u64,
    #[serde(rename = "uploadedOn")]
    pub uploaded_on: String,
    #[serde(rename = "folderId")]
    pub folder_id: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct FailedUploadResponse {
    pub name: String,
    pub message: String,
}

/// sent back after every upload batch, whether or not all of it went through
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct UploadFilesBody {
    pub success: bool,
    pub uploaded: Vec<FileSummaryResponse>,
    pub skipped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<FailedUploadResponse>,
    #[serde(rename = "totalFiles")]
    pub total_files: u64,
    #[serde(rename = "totalFolders")]
    pub total_folders: u64,
    #[serde(rename = "storageUsed")]
    pub storage_used: u64,
    #[serde(rename = "storageLimit")]
    pub storage_limit: u64,
    #[serde(rename = "storageUsedPercentage")]
    pub storage_used_percentage: f64,
}

impl From<&FileRecord> for FileSummaryResponse {
    fn from(f: &FileRecord) -> Self {
        FileSummaryResponse {
            // should always have an id when coming from the database
            id: f.id.unwrap_or_default(),
            name: f.name.clone(),
            file_type: f.file_type.clone(),
            size: f.size,
            uploaded_on: f.uploaded_on.format(DATE_FORMAT).to_string(),
            folder_id: f.parent_id,
        }
    }
}

impl UploadFilesBody {
    pub fn new(outcome: &UploadOutcome, summary: &StorageSummary, failure_message: Option<&str>) -> Self {
        UploadFilesBody {
            success: outcome.failed.is_none(),
            uploaded: outcome.uploaded.iter().map(FileSummaryResponse::from).collect(),
            skipped: outcome.skipped.clone(),
            failed: outcome.failed.as_ref().map(|failed| FailedUploadResponse {
                name: failed.name.clone(),
                message: failure_message.unwrap_or("Failed to upload file").to_string(),
            }),
            total_files: summary.total_files,
            total_folders: summary.total_folders,
            storage_used: summary.storage_used,
            storage_limit: summary.storage_limit,
            storage_used_percentage: summary.usage_percentage,
        }
    }
}

#[derive(Responder)]
pub enum UploadFilesResponse {
    #[response(status = 201, content_type = "json")]
    Success(Json<UploadFilesBody>),
    /// some files may have been stored, the body says which
    #[response(status = 500, content_type = "json")]
    PartialFailure(Json<UploadFilesBody>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 404, content_type = "json")]
    ParentNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ListFilesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<FileSummaryResponse>>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    FileDbError(Json<BasicMessage>),
}

/// the raw bytes of a file, sent as an attachment with its original name
#[derive(Responder)]
#[response(status = 200, content_type = "application/octet-stream")]
pub struct FileContents {
    pub contents: Vec<u8>,
    pub disposition: Header<'static>,
}

impl FileContents {
    pub fn new(name: &str, contents: Vec<u8>) -> FileContents {
        let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
        FileContents {
            contents,
            disposition: Header::new(
                "Content-Disposition",
                format!("attachment; filename=\"{escaped}\""),
            ),
        }
    }
}

#[derive(Responder)]
pub enum DownloadFileResponse {
    Success(FileContents),
    #[response(status = 404, content_type = "json")]
    FileNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FileDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DeleteFileResponse {
    #[response(status = 200, content_type = "json")]
    Deleted(Json<DeleteResult>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    Failure(Json<DeleteResult>),
    /// nothing to delete is not an error
    #[response(status = 200, content_type = "json")]
    NotFound(Json<DeleteResult>),
}
