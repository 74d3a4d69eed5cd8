//! Bill cancellation.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
};
use billsplit_core::bill::{BillValidationError, ChatType, validate_cancel};
use billsplit_core::message::bill_cancelled_message;
use billsplit_db::{BillRepository, entities::sea_orm_active_enums::BillStatus};
use billsplit_shared::AppError;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::authenticate};

/// Creates the bill cancellation route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/cancel-bill", post(cancel_bill))
}

/// POST `/cancel-bill` - Cancel a bill of the caller's chat.
async fn cancel_bill(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonBody,
) -> Result<Response, ApiError> {
    let (bill_id, chat) = validate_cancel(
        body.str("billId"),
        body.str("groupId"),
        body.str("chatType"),
    )?;

    let auth = authenticate(&state, &headers).await?;

    let not_found = || ApiError(AppError::NotFound(BillValidationError::MissingBillId.to_string()));
    let bill_id = Uuid::parse_str(&bill_id).map_err(|_| not_found())?;

    let repo = BillRepository::new((*state.db).clone());
    let bill = repo
        .find_by_id(bill_id)
        .await
        .map_err(|e| {
            error!(error = %e, bill_id = %bill_id, "Failed to load bill");
            ApiError::database(&BillValidationError::MissingBillId.to_string())
        })?
        .ok_or_else(not_found)?;

    if bill.group_id != chat.chat_id {
        return Err(BillValidationError::BillNotInChat.into());
    }

    if bill.status == BillStatus::Cancelled {
        return Ok(Json(json!({ "success": true, "alreadyCancelled": true })).into_response());
    }

    repo.cancel(bill_id, &chat.chat_id).await.map_err(|e| {
        error!(error = %e, bill_id = %bill_id, "Failed to cancel bill");
        ApiError::database("ยกเลิกบิลไม่สำเร็จ")
    })?;
    info!(bill_id = %bill_id, user_id = %auth.user_id, "Bill cancelled");

    if let Err(e) = repo.cancel_participants(bill_id).await {
        warn!(error = %e, bill_id = %bill_id, "Failed to update participant status");
    }

    if chat.chat_type == ChatType::Group
        && let Some(messaging) = &state.messaging
    {
        let notice = bill_cancelled_message(&bill.title, auth.display_name.as_deref());
        if let Err(e) = messaging.push_message(&chat.chat_id, &[notice]).await {
            warn!(error = %e, bill_id = %bill_id, "Failed to push cancel notice");
        }
    }

    Ok(Json(json!({ "success": true })).into_response())
}
