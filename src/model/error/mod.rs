pub mod account_errors;
pub mod file_errors;
pub mod folder_errors;
pub mod share_errors;
