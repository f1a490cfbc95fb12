use rocket::serde::json::Json;
use rocket::serde::Serialize;

use crate::config::DRIVE_CONFIG;
use crate::guard::ProvisioningSecret;
use crate::model::error::account_errors::CreateAccountError;
use crate::model::request::CreateAccountRequest;
use crate::model::response::api_responses::{AccountResponse, CreateAccountResponse};
use crate::model::response::BasicMessage;
use crate::service::account_service;

static API_VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiVersion {
    version: &'static str,
}

#[get("/version")]
pub fn api_version() -> Json<ApiVersion> {
    Json(ApiVersion {
        version: API_VERSION_NUMBER,
    })
}

/// called by the identity provider when a user registers
#[post("/accounts", data = "<request>")]
pub fn create_account(
    request: Json<CreateAccountRequest>,
    secret: ProvisioningSecret,
) -> CreateAccountResponse {
    if !secret.is_valid(DRIVE_CONFIG.provisioning.secret.as_deref()) {
        log::warn!("Rejected account provisioning without a valid secret");
        return CreateAccountResponse::Unauthorized(BasicMessage::new(
            "Accounts can only be provisioned by the identity provider.",
        ));
    }
    let limit = request
        .storage_limit
        .unwrap_or(DRIVE_CONFIG.quota.default_limit);
    match account_service::create_account(&request.id, limit) {
        Ok(account) => CreateAccountResponse::Created(Json::from(AccountResponse::from(&account))),
        Err(CreateAccountError::MissingId) => {
            CreateAccountResponse::BadRequest(BasicMessage::new("An account id is required."))
        }
        Err(CreateAccountError::AlreadyExists) => CreateAccountResponse::AlreadyExists(
            BasicMessage::new("An account with that id already exists."),
        ),
        Err(CreateAccountError::DbFailure) => CreateAccountResponse::Failure(BasicMessage::new(
            "Failed to create account. Check server logs for details",
        )),
    }
}
