#[derive(PartialEq, Debug)]
pub enum CreateAccountError {
    /// the id was blank
    MissingId,
    AlreadyExists,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetAccountError {
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DashboardError {
    /// the account disappeared between resolving the caller and building the summary
    AccountNotFound,
    DbFailure,
}
