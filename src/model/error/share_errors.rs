#[derive(PartialEq, Debug)]
pub enum ShareFileError {
    /// the file doesn't exist, is deleted, or isn't owned by the caller
    FileNotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum SharedDownloadError {
    /// unknown token, expired share, deleted file, or missing bytes
    NotFound,
    /// the share has a password and it was missing or didn't match
    BadPassword,
    DbFailure,
    StorageIo,
}
