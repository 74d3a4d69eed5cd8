//! Bank account shown on a chat's bill summaries.

use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
use billsplit_core::bill::{BankAccount, validate_bank_account};
use billsplit_db::{BankAccountRepository, GroupRepository};
use serde::Serialize;
use tracing::{error, info};

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::authenticate};

const SAVE_FAILED: &str = "บันทึกเลขบัญชีไม่สำเร็จ";

/// Creates the bank account route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/group-bank-account", post(save_bank_account))
}

/// Who changed the account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedBy {
    /// LINE user id.
    pub user_id: String,
    /// Display name, if known.
    pub display_name: Option<String>,
}

/// Response for a saved bank account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountResponse {
    /// Always true.
    pub success: bool,
    /// The stored account.
    pub bank_account: BankAccount,
    /// The caller.
    pub updated_by: UpdatedBy,
}

/// POST `/group-bank-account` - Set the account transfers for a chat go to.
async fn save_bank_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonBody,
) -> Result<Json<BankAccountResponse>, ApiError> {
    let (chat, account) = validate_bank_account(
        body.str("groupId"),
        body.str("chatType"),
        body.str("accountNumber"),
        body.str("bankName"),
        body.str("accountName"),
    )?;

    let auth = authenticate(&state, &headers).await?;

    GroupRepository::new((*state.db).clone())
        .upsert(&chat.chat_id)
        .await
        .map_err(|e| {
            error!(error = %e, group_id = %chat.chat_id, "Failed to upsert group");
            ApiError::database(SAVE_FAILED)
        })?;

    let saved = BankAccountRepository::new((*state.db).clone())
        .upsert(&chat.chat_id, &account)
        .await
        .map_err(|e| {
            error!(error = %e, group_id = %chat.chat_id, "Failed to save bank account");
            ApiError::database(SAVE_FAILED)
        })?;

    info!(group_id = %chat.chat_id, user_id = %auth.user_id, "Bank account updated");

    Ok(Json(BankAccountResponse {
        success: true,
        bank_account: saved,
        updated_by: UpdatedBy {
            user_id: auth.user_id,
            display_name: auth.display_name,
        },
    }))
}
