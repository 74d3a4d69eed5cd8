//! LINE webhook receiver.
//!
//! LINE retries deliveries that do not get a 200, so every path answers
//! `200 OK`; failures are only logged.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::get,
};
use billsplit_core::bill::{ChatType, PostbackAction, is_create_bill_command};
use billsplit_core::message::{
    Message, PaymentRejection, bill_paid_message, create_bill_button, payment_rejected_message,
};
use billsplit_db::{BillError, BillRepository, GroupRepository, UserRepository};
use billsplit_line::{
    ChatGateway, EventSource, SignatureCheck, WebhookEvent, check_signature, parse_events,
    signature::sign,
    webhook::EventMessage,
};
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Creates the webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/line-webhook", get(webhook_status).post(receive))
}

/// GET `/line-webhook` - Liveness probe for the LINE console.
async fn webhook_status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST `/line-webhook` - Handle a webhook delivery.
async fn receive(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> &'static str {
    let secret = state.line.channel_secret.as_deref();
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok());

    if check_signature(secret, signature, &body) == SignatureCheck::Invalid {
        let calculated = secret.and_then(|s| sign(s, &body)).unwrap_or_default();
        error!(
            received = signature.unwrap_or_default(),
            calculated = %calculated,
            "Invalid webhook signature"
        );
        return "OK";
    }

    let events = parse_events(&body);
    if state.messaging.is_none() && !events.is_empty() {
        warn!("Messaging API is not configured; webhook replies are disabled");
    }

    for event in events {
        debug!(kind = event.kind(), "Webhook event");
        match event {
            WebhookEvent::Join { source } => on_join(&state, &source).await,
            WebhookEvent::Message {
                reply_token,
                message: EventMessage::Text { text },
                ..
            } if is_create_bill_command(&text) => {
                on_create_bill_command(&state, reply_token.as_deref()).await;
            }
            WebhookEvent::Postback {
                source,
                reply_token,
                postback,
            } => on_postback(&state, &source, reply_token.as_deref(), &postback.data).await,
            WebhookEvent::Follow { .. } | WebhookEvent::Message { .. } | WebhookEvent::Other => {}
        }
    }

    "OK"
}

async fn on_join(state: &AppState, source: &EventSource) {
    let Some((ChatType::Group, group_id)) = source.chat() else {
        return;
    };

    match GroupRepository::new((*state.db).clone()).upsert(group_id).await {
        Ok(()) => info!(group_id = %group_id, "Joined group"),
        Err(e) => error!(error = %e, group_id = %group_id, "Failed to save group"),
    }
}

async fn on_create_bill_command(state: &AppState, reply_token: Option<&str>) {
    let (Some(messaging), Some(reply_token)) = (&state.messaging, reply_token) else {
        return;
    };

    let button = create_bill_button(state.line.liff_channel_id.as_deref());
    if let Err(e) = messaging.reply_message(reply_token, &[button]).await {
        error!(error = %e, "Failed to reply with the create-bill button");
    }
}

async fn on_postback(
    state: &AppState,
    source: &EventSource,
    reply_token: Option<&str>,
    data: &str,
) {
    let Some(PostbackAction::MarkPaid { bill_id }) = PostbackAction::parse(data) else {
        debug!(data = %data, "Ignoring unknown postback");
        return;
    };
    let Some(user_id) = source.user_id() else {
        warn!(bill_id = %bill_id, "Mark-paid postback without a user id");
        return;
    };

    let reply = match BillRepository::new((*state.db).clone())
        .mark_participant_paid(bill_id, user_id)
        .await
    {
        Ok(receipt) => {
            info!(
                bill_id = %bill_id,
                user_id = %user_id,
                already_paid = receipt.already_paid,
                "Share paid"
            );
            let payer = payer_name(state, user_id).await;
            bill_paid_message(&receipt.bill.title, payer.as_deref(), receipt.already_paid)
        }
        Err(BillError::NotFound(_)) => payment_rejected_message(PaymentRejection::BillNotFound),
        Err(BillError::Cancelled(_)) => payment_rejected_message(PaymentRejection::BillCancelled),
        Err(BillError::NotParticipant { .. }) => {
            payment_rejected_message(PaymentRejection::NotParticipant)
        }
        Err(e) => {
            error!(error = %e, bill_id = %bill_id, "Failed to mark share paid");
            return;
        }
    };

    if let (Some(messaging), Some(reply_token)) = (&state.messaging, reply_token) {
        send_reply(messaging, reply_token, reply).await;
    }
}

async fn payer_name(state: &AppState, user_id: &str) -> Option<String> {
    match UserRepository::new((*state.db).clone()).find_by_id(user_id).await {
        Ok(user) => user.and_then(|u| u.display_name),
        Err(e) => {
            warn!(error = %e, user_id = %user_id, "Failed to load payer name");
            None
        }
    }
}

async fn send_reply(
    messaging: &Arc<dyn ChatGateway>,
    reply_token: &str,
    message: Message,
) {
    if let Err(e) = messaging.reply_message(reply_token, &[message]).await {
        error!(error = %e, "Failed to reply to postback");
    }
}
