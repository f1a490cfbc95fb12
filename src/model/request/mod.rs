pub mod file_requests;
pub mod folder_requests;
pub mod share_requests;

use rocket::serde::Deserialize;

/// sent by the identity provider when a new user registers
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateAccountRequest {
    pub id: String,
    /// in bytes. Falls back to the configured default when missing
    #[serde(rename = "storageLimit")]
    pub storage_limit: Option<u64>,
}
