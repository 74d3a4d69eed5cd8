//! Data for the LIFF bill management page.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
};
use billsplit_core::bill::{BankAccount, ChatType, validate_chat};
use billsplit_db::{BankAccountRepository, BillRepository, entities::bills};
use billsplit_line::messaging::dedupe;
use billsplit_shared::AppError;
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::authenticate};

/// Creates the bill management route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/bill-management", get(bill_management))
}

/// Query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillManagementQuery {
    /// Group or room id.
    pub chat_id: Option<String>,
    /// `group` or `room`.
    pub chat_type: Option<String>,
}

/// A chat member selectable as a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// LINE user id.
    pub user_id: String,
    /// Display name; `None` when the profile lookup failed.
    pub display_name: Option<String>,
}

/// A bill row as listed on the page.
#[derive(Debug, Serialize)]
pub struct BillListItem {
    /// Bill id.
    pub bill_id: Uuid,
    /// Bill title.
    pub title: String,
    /// Bill total.
    pub total_amount: Decimal,
    /// `open` or `cancelled`.
    pub status: billsplit_core::bill::BillStatus,
    /// Creation time.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<bills::Model> for BillListItem {
    fn from(bill: bills::Model) -> Self {
        Self {
            bill_id: bill.bill_id,
            title: bill.title,
            total_amount: bill.total_amount,
            status: bill.status.into(),
            created_at: bill.created_at,
        }
    }
}

/// Response for the bill management page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillManagementResponse {
    /// Chat members, the caller included.
    pub members: Vec<Member>,
    /// Latest bills, newest first.
    pub bills: Vec<BillListItem>,
    /// Account transfers go to.
    pub bank_account: Option<BankAccount>,
    /// The caller.
    pub me: Member,
    /// Group or room id.
    pub chat_id: String,
    /// `group` or `room`.
    pub chat_type: ChatType,
}

/// GET `/bill-management` - Members, recent bills and bank account of a chat.
async fn bill_management(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BillManagementQuery>,
) -> Result<Json<BillManagementResponse>, ApiError> {
    let chat = validate_chat(query.chat_id.as_deref(), query.chat_type.as_deref())?;
    let auth = authenticate(&state, &headers).await?;

    let bank_repo = BankAccountRepository::new((*state.db).clone());
    let bill_repo = BillRepository::new((*state.db).clone());
    let (bank_account, bills) = tokio::join!(
        bank_repo.find_for_group(&chat.chat_id),
        bill_repo.list_recent(&chat.chat_id, state.bill.max_listed_bills),
    );

    let bank_account = bank_account.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load bank account");
        None
    });
    let bills = bills.map_err(|e| {
        error!(error = %e, group_id = %chat.chat_id, "Failed to load bills");
        ApiError::database("ไม่สามารถโหลดข้อมูลบิลได้")
    })?;

    let mut members = load_members(&state, chat.chat_type, &chat.chat_id).await?;
    if !members.iter().any(|m| m.user_id == auth.user_id) {
        members.push(Member {
            user_id: auth.user_id.clone(),
            display_name: auth.display_name.clone(),
        });
    }

    Ok(Json(BillManagementResponse {
        members,
        bills: bills.into_iter().map(BillListItem::from).collect(),
        bank_account,
        me: Member {
            user_id: auth.user_id,
            display_name: auth.display_name,
        },
        chat_id: chat.chat_id,
        chat_type: chat.chat_type,
    }))
}

async fn load_members(
    state: &AppState,
    chat_type: ChatType,
    chat_id: &str,
) -> Result<Vec<Member>, ApiError> {
    let Some(messaging) = &state.messaging else {
        return Err(ApiError(AppError::NotConfigured(
            "ยังไม่ได้ตั้งค่า LINE_CHANNEL_ACCESS_TOKEN บนเซิร์ฟเวอร์".to_string(),
        )));
    };

    let ids = dedupe(messaging.list_member_ids(chat_type, chat_id).await);
    if ids.is_empty() {
        return Err(ApiError(AppError::ExternalService(
            "ไม่สามารถดึงรายชื่อสมาชิกจาก Messaging API ได้ กรุณาตรวจสอบว่าเชิญบอทเข้ากลุ่มแล้ว"
                .to_string(),
        )));
    }

    let ids: Vec<String> = ids.into_iter().take(state.bill.max_members).collect();
    let profiles = join_all(
        ids.iter()
            .map(|user_id| messaging.member_profile(chat_type, chat_id, user_id)),
    )
    .await;

    Ok(ids
        .into_iter()
        .zip(profiles)
        .map(|(user_id, profile)| Member {
            user_id,
            display_name: profile.and_then(|p| p.display_name),
        })
        .collect())
}
