use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateShareRequest {
    #[serde(rename = "fileId")]
    pub file_id: u32,
    /// blank passwords are treated as no password
    pub password: Option<String>,
    /// `None` for a share that never expires
    #[serde(rename = "expiresInHours")]
    pub expires_in_hours: Option<u32>,
}
