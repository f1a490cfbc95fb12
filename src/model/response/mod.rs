use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

pub mod api_responses;
pub mod dashboard_responses;
pub mod file_responses;
pub mod folder_responses;
pub mod share_responses;

/// how timestamps are formatted in every response
pub static DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// represents a basic json message
#[derive(Responder, Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BasicMessage {
    pub message: String,
}

/// the result of a delete. `success` is false (with a message) when there was nothing to delete
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct DeleteResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ----------------------------------

impl BasicMessage {
    pub fn new(message: &str) -> Json<BasicMessage> {
        Json::from(BasicMessage {
            message: message.to_string(),
        })
    }
}

impl From<&str> for BasicMessage {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl DeleteResult {
    pub fn success() -> Json<DeleteResult> {
        Json::from(DeleteResult {
            success: true,
            message: None,
        })
    }

    pub fn failure(message: &str) -> Json<DeleteResult> {
        Json::from(DeleteResult {
            success: false,
            message: Some(message.to_string()),
        })
    }
}
