#[derive(PartialEq, Debug)]
pub enum CreateFolderError {
    /// the name was empty after trimming
    BlankName,
    /// the database failed to save the folder
    DbFailure,
    /// the requested parent folder does not exist
    ParentNotFound,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFolderError {
    /// database could not execute the query
    DbFailure,
    /// folder not in the repository, already deleted, or owned by someone else
    FolderNotFound,
}
