//! Bill creation from the LIFF form.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
};
use billsplit_core::bill::{ParticipantInput, ParticipantShare, plan_split, validate_new_bill};
use billsplit_core::message::{BillSummary, Message, ParticipantSummary, create_bill_flex_message};
use billsplit_db::{BankAccountRepository, BillRepository, CreateBillInput};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    extractors::JsonBody,
    middleware::authenticate,
};

const PUSH_FAILED_WARNING: &str =
    "ส่งข้อความเข้ากลุ่มไม่สำเร็จ กรุณาส่งสรุปบิลจากหน้า LIFF แทน";
const MESSAGING_DISABLED_WARNING: &str = "ยังไม่ได้ตั้งค่า LINE_CHANNEL_ACCESS_TOKEN บนเซิร์ฟเวอร์";

/// Creates the bill creation route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/create-bill", post(create_bill))
}

/// Response for a created bill.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillResponse {
    /// Always true.
    pub success: bool,
    /// New bill id.
    pub bill_id: Uuid,
    /// Shares in participant order.
    pub shares: Vec<ParticipantShare>,
    /// Rounding explanation, if any.
    pub rounding_note: Option<String>,
    /// Set when the summary could not be pushed to the chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// The summary message, returned when the client has to deliver it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_message: Option<Message>,
}

fn participants(body: &JsonBody) -> Vec<ParticipantInput> {
    body.array("participants")
        .iter()
        .map(|p| ParticipantInput {
            user_id: p
                .get("userId")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            display_name: p
                .get("displayName")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
        .collect()
}

/// POST `/create-bill` - Split a bill and post its summary to the chat.
async fn create_bill(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonBody,
) -> Result<Response, ApiError> {
    let bill = validate_new_bill(
        body.str("groupId"),
        body.str("chatType"),
        body.str("title"),
        body.decimal("amount"),
        body.decimal("roundingStep"),
        participants(&body),
    )?;

    let auth = authenticate(&state, &headers).await?;
    let plan = plan_split(&bill)?;

    let creator_name = body
        .str("creatorName")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| auth.display_name.clone());

    let saved = BillRepository::new((*state.db).clone())
        .create_with_participants(CreateBillInput {
            group_id: bill.chat.chat_id.clone(),
            created_by: auth.user_id.clone(),
            creator_name: creator_name.clone(),
            title: bill.title.clone(),
            total_amount: bill.total,
            rounding_step: bill.rounding_step,
            shares: plan.shares.clone(),
        })
        .await
        .map_err(|e| {
            error!(error = %e, group_id = %bill.chat.chat_id, "Failed to create bill");
            ApiError::database("บันทึกบิลไม่สำเร็จ")
        })?;

    info!(bill_id = %saved.bill_id, group_id = %saved.group_id, "Bill created");

    let bank_account = BankAccountRepository::new((*state.db).clone())
        .find_for_group(&bill.chat.chat_id)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load bank account");
            None
        });

    let summary_rows: Vec<ParticipantSummary> = plan
        .shares
        .iter()
        .map(|share| ParticipantSummary {
            display_name: share.display_name.clone(),
            share: share.share,
            status: None,
        })
        .collect();

    let flex = create_bill_flex_message(&BillSummary {
        bill_id: saved.bill_id,
        title: &bill.title,
        amount: bill.total,
        creator_name: creator_name.as_deref(),
        participants: &summary_rows,
        bank_account: bank_account.as_ref(),
        rounding_note: plan.rounding_note.as_deref(),
        max_participant_rows: state.bill.max_summary_participants,
    });

    let warning = match &state.messaging {
        Some(messaging) => match messaging
            .push_message(&bill.chat.chat_id, std::slice::from_ref(&flex))
            .await
        {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, bill_id = %saved.bill_id, "Failed to push bill summary");
                Some(PUSH_FAILED_WARNING)
            }
        },
        None => Some(MESSAGING_DISABLED_WARNING),
    };

    let response = CreateBillResponse {
        success: true,
        bill_id: saved.bill_id,
        shares: plan.shares,
        rounding_note: plan.rounding_note,
        flex_message: warning.is_some().then_some(flex),
        warning: warning.map(str::to_string),
    };

    Ok(Json(response).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_participants_tolerate_missing_fields() {
        let body = JsonBody(json!({
            "participants": [
                { "userId": "U1", "displayName": "Ann" },
                { "userId": "U2" },
                { "displayName": "ghost" }
            ]
        }));

        let parsed = participants(&body);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].display_name.as_deref(), Some("Ann"));
        assert_eq!(parsed[1].display_name, None);
        assert_eq!(parsed[2].user_id, "");
    }
}
