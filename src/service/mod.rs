pub mod account_service;
pub mod dashboard_service;
pub mod file_service;
pub mod folder_service;
pub mod share_service;

#[cfg(test)]
mod tests;
