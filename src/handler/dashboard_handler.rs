use rocket::serde::json::Json;

use crate::guard::{CallerIdentity, ResolveResult, MISSING_IDENTITY_MESSAGE, UNKNOWN_ACCOUNT_MESSAGE};
use crate::model::response::dashboard_responses::{
    DashboardPageResponse, DashboardResponse, ReconcileResponse, StorageSummaryResponse,
};
use crate::model::response::BasicMessage;
use crate::service::dashboard_service;

#[get("/")]
pub fn get_dashboard(identity: CallerIdentity) -> DashboardPageResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return DashboardPageResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return DashboardPageResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    match dashboard_service::get_dashboard(&user_id) {
        Ok(summary) => DashboardPageResponse::Success(Json::from(DashboardResponse::from(&summary))),
        Err(_) => DashboardPageResponse::Failure(BasicMessage::new(
            "Failed to build the dashboard. Check server logs for details",
        )),
    }
}

/// recomputes the caller's storage usage from their files
#[post("/reconcile")]
pub fn reconcile_storage(identity: CallerIdentity) -> ReconcileResponse {
    let user_id = match identity.resolve() {
        ResolveResult::Ok(id) => id,
        ResolveResult::Missing => return ReconcileResponse::Unauthorized(MISSING_IDENTITY_MESSAGE.to_string()),
        ResolveResult::UnknownAccount => return ReconcileResponse::Unauthorized(UNKNOWN_ACCOUNT_MESSAGE.to_string()),
    };
    match dashboard_service::reconcile_storage(&user_id) {
        Ok(summary) => ReconcileResponse::Success(Json::from(StorageSummaryResponse::from(&summary))),
        Err(_) => ReconcileResponse::Failure(BasicMessage::new(
            "Failed to reconcile storage. Check server logs for details",
        )),
    }
}
