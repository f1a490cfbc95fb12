use crate::model::error::file_errors::UploadFileError;
use crate::model::repository::FileRecord;

/// what happened to each item of an upload batch. Items are processed in order and the batch stops
/// at the first failure, so everything in `uploaded` is committed and nothing after `failed` was attempted
#[derive(Debug, PartialEq, Default)]
pub struct UploadOutcome {
    pub uploaded: Vec<FileRecord>,
    /// names of empty files, which are ignored instead of failing the batch
    pub skipped: Vec<String>,
    pub failed: Option<FailedUpload>,
}

#[derive(Debug, PartialEq)]
pub struct FailedUpload {
    /// the name as the client sent it
    pub name: String,
    pub reason: UploadFileError,
}

/// how much a folder delete took with it
#[derive(Debug, PartialEq, Eq)]
pub struct DeletedFolderSummary {
    /// includes the requested folder itself
    pub folders_deleted: usize,
    pub files_deleted: usize,
    pub bytes_freed: u64,
}

/// account-wide totals, shown after uploads and on the dashboard
#[derive(Debug, PartialEq)]
pub struct StorageSummary {
    pub total_files: u64,
    pub total_folders: u64,
    pub storage_used: u64,
    pub storage_limit: u64,
    pub usage_percentage: f64,
}

#[derive(Debug, PartialEq)]
pub struct DashboardSummary {
    pub storage: StorageSummary,
    /// newest first
    pub recent_files: Vec<FileRecord>,
}
