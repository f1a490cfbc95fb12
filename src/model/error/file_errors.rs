#[derive(PartialEq, Debug)]
pub enum UploadFileError {
    /// the requested parent folder does not exist, is deleted, or belongs to someone else
    ParentFolderNotFound,
    /// the storage backend failed to write the bytes
    StorageIo,
    /// the bytes were written but the file record could not be saved
    DbFailure,
    /// quota enforcement is on and the file would put the account over its limit
    QuotaExceeded,
    /// nothing usable was left of the file name after sanitizing it
    InvalidName,
}

#[derive(PartialEq, Debug)]
pub enum DownloadFileError {
    /// no record, a deleted record, someone else's record, or no bytes in the backend
    NotFound,
    DbFailure,
    /// the backend has the bytes but failed to read them
    StorageIo,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFileError {
    // file reference not found in repository
    NotFound,
    // couldn't mark the file deleted or update the ledger
    DbError,
}

#[derive(PartialEq, Debug)]
pub enum ListFilesError {
    DbFailure,
}
