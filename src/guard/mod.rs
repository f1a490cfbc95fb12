use rocket::async_trait;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

use crate::model::error::account_errors::GetAccountError;
use crate::service::account_service;

/// the header the upstream identity provider puts the authenticated user's id in
pub static IDENTITY_HEADER: &str = "X-User-Id";

/// carries the password for a protected share link, so it stays out of urls and access logs
pub static SHARE_PASSWORD_HEADER: &str = "X-Share-Password";
/// sent by the identity provider when it provisions accounts
pub static PROVISIONING_SECRET_HEADER: &str = "X-Provisioning-Secret";

pub static MISSING_IDENTITY_MESSAGE: &str =
    "No caller identity was provided. Requests must come through the identity provider";
pub static UNKNOWN_ACCOUNT_MESSAGE: &str = "No account exists for the caller";

/// used to represent the result of calling `CallerIdentity::resolve`
#[derive(Debug, PartialEq)]
pub enum ResolveResult {
    /// the caller has an account, and this is its id
    Ok(String),
    /// no identity header was sent
    Missing,
    /// the identity doesn't belong to any account, or the account couldn't be looked up
    UnknownAccount,
}

/// the caller's identity as the identity provider passed it along. This never fails as a request guard,
/// so that each handler can answer with its own unauthorized response
#[derive(Debug)]
pub struct CallerIdentity {
    pub user_id: Option<String>,
}

impl CallerIdentity {
    /// checks that the caller sent an identity and that it belongs to an account
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn resolve(&self) -> ResolveResult {
        let user_id = match &self.user_id {
            Some(id) if !id.trim().is_empty() => id.trim(),
            _ => return ResolveResult::Missing,
        };
        match account_service::get_account(user_id) {
            Ok(account) => ResolveResult::Ok(account.id),
            Err(GetAccountError::NotFound) => {
                log::debug!("Rejecting request from unknown account {user_id}");
                ResolveResult::UnknownAccount
            }
            Err(GetAccountError::DbFailure) => ResolveResult::UnknownAccount,
        }
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for CallerIdentity {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(CallerIdentity {
            user_id: request
                .headers()
                .get_one(IDENTITY_HEADER)
                .map(|value| value.to_string()),
        })
    }
}

/// the password sent along with a shared download, if any
#[derive(Debug)]
pub struct SharePassword(pub Option<String>);

#[async_trait]
impl<'r> FromRequest<'r> for SharePassword {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(SharePassword(
            request
                .headers()
                .get_one(SHARE_PASSWORD_HEADER)
                .map(|value| value.to_string()),
        ))
    }
}

/// the provisioning secret the caller sent. Like [`CallerIdentity`], checking it is left to the handler
#[derive(Debug)]
pub struct ProvisioningSecret {
    pub value: Option<String>,
}

impl ProvisioningSecret {
    /// with no `expected` secret configured, every caller is allowed
    pub fn is_valid(&self, expected: Option<&str>) -> bool {
        match expected {
            None => true,
            Some(expected) => self.value.as_deref() == Some(expected),
        }
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for ProvisioningSecret {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(ProvisioningSecret {
            value: request
                .headers()
                .get_one(PROVISIONING_SECRET_HEADER)
                .map(|value| value.to_string()),
        })
    }
}
