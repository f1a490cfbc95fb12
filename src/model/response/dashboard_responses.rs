use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::response::file_responses::FileSummaryResponse;
use crate::model::response::BasicMessage;
use crate::model::service::{DashboardSummary, StorageSummary};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct StorageSummaryResponse {
    #[serde(rename = "totalFiles")]
    pub total_files: u64,
    #[serde(rename = "totalFolders")]
    pub total_folders: u64,
    #[serde(rename = "storageUsed")]
    pub storage_used: u64,
    #[serde(rename = "storageLimit")]
    pub storage_limit: u64,
    /// rounded to 2 decimal places
    #[serde(rename = "storageUsedPercentage")]
    pub storage_used_percentage: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub storage: StorageSummaryResponse,
    #[serde(rename = "recentFiles")]
    pub recent_files: Vec<FileSummaryResponse>,
}

impl From<&StorageSummary> for StorageSummaryResponse {
    fn from(summary: &StorageSummary) -> Self {
        StorageSummaryResponse {
            total_files: summary.total_files,
            total_folders: summary.total_folders,
            storage_used: summary.storage_used,
            storage_limit: summary.storage_limit,
            storage_used_percentage: (summary.usage_percentage * 100.0).round() / 100.0,
        }
    }
}

impl From<&DashboardSummary> for DashboardResponse {
    fn from(summary: &DashboardSummary) -> Self {
        DashboardResponse {
            storage: StorageSummaryResponse::from(&summary.storage),
            recent_files: summary
                .recent_files
                .iter()
                .map(FileSummaryResponse::from)
                .collect(),
        }
    }
}

#[derive(Responder)]
pub enum DashboardPageResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<DashboardResponse>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ReconcileResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<StorageSummaryResponse>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}
