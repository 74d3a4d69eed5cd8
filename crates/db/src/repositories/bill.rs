//! Bill repository for database operations.

use billsplit_core::bill::ParticipantShare;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::{Alias, Expr},
};
use uuid::Uuid;

use super::group::upsert_group;
use super::user::upsert_users;
use crate::entities::{
    bill_participants, bills,
    sea_orm_active_enums::{BillStatus, ParticipantStatus},
};

/// Error types for bill operations.
#[derive(Debug, thiserror::Error)]
pub enum BillError {
    /// Bill not found.
    #[error("Bill not found: {0}")]
    NotFound(Uuid),

    /// Bill was cancelled.
    #[error("Bill is cancelled: {0}")]
    Cancelled(Uuid),

    /// User has no share in the bill.
    #[error("User {user_id} is not a participant of bill {bill_id}")]
    NotParticipant {
        /// Bill id.
        bill_id: Uuid,
        /// LINE user id.
        user_id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a bill.
#[derive(Debug, Clone)]
pub struct CreateBillInput {
    /// Chat the bill belongs to.
    pub group_id: String,
    /// LINE user id of the creator.
    pub created_by: String,
    /// Creator display name.
    pub creator_name: Option<String>,
    /// Bill title.
    pub title: String,
    /// Bill total.
    pub total_amount: Decimal,
    /// Cash rounding step, if any.
    pub rounding_step: Option<Decimal>,
    /// Participant shares in display order.
    pub shares: Vec<ParticipantShare>,
}

/// Result of a mark-paid request.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// The bill that was paid.
    pub bill: bills::Model,
    /// The participant row after the update.
    pub participant: bill_participants::Model,
    /// True if the share was already marked paid.
    pub already_paid: bool,
}

/// Bill repository.
#[derive(Debug, Clone)]
pub struct BillRepository {
    db: DatabaseConnection,
}

impl BillRepository {
    /// Creates a new bill repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a bill with one participant row per share.
    ///
    /// The chat, the creator and every participant are upserted in the same
    /// database transaction, so either everything is stored or nothing is.
    ///
    /// # Errors
    ///
    /// Returns an error if any database operation fails.
    pub async fn create_with_participants(
        &self,
        input: CreateBillInput,
    ) -> Result<bills::Model, BillError> {
        let txn = self.db.begin().await?;

        upsert_group(&txn, &input.group_id).await?;

        let mut people: Vec<(&str, Option<&str>)> =
            vec![(input.created_by.as_str(), input.creator_name.as_deref())];
        people.extend(
            input
                .shares
                .iter()
                .filter(|share| share.user_id != input.created_by)
                .map(|share| (share.user_id.as_str(), share.display_name.as_deref())),
        );
        upsert_users(&txn, &people).await?;

        let now = chrono::Utc::now().into();
        let bill_id = Uuid::new_v4();

        let bill = bills::ActiveModel {
            bill_id: Set(bill_id),
            group_id: Set(input.group_id.clone()),
            created_by: Set(input.created_by.clone()),
            title: Set(input.title.clone()),
            total_amount: Set(input.total_amount),
            rounding_step: Set(input.rounding_step),
            status: Set(BillStatus::Open),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if !input.shares.is_empty() {
            let rows = input.shares.iter().map(|share| bill_participants::ActiveModel {
                bill_id: Set(bill_id),
                user_id: Set(share.user_id.clone()),
                share_amount: Set(share.share),
                status: Set(ParticipantStatus::Pending),
                paid_at: Set(None),
                created_at: Set(now),
            });
            bill_participants::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(bill)
    }

    /// Finds a bill by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, bill_id: Uuid) -> Result<Option<bills::Model>, DbErr> {
        bills::Entity::find_by_id(bill_id).one(&self.db).await
    }

    /// Lists the participants of a bill.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn participants(
        &self,
        bill_id: Uuid,
    ) -> Result<Vec<bill_participants::Model>, DbErr> {
        bill_participants::Entity::find()
            .filter(bill_participants::Column::BillId.eq(bill_id))
            .order_by_asc(bill_participants::Column::CreatedAt)
            .order_by_asc(bill_participants::Column::UserId)
            .all(&self.db)
            .await
    }

    /// Lists the most recent bills of a chat, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_recent(
        &self,
        group_id: &str,
        limit: u64,
    ) -> Result<Vec<bills::Model>, DbErr> {
        bills::Entity::find()
            .filter(bills::Column::GroupId.eq(group_id))
            .order_by_desc(bills::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// Marks a bill of the given chat as cancelled.
    ///
    /// Returns the number of bill rows updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn cancel(&self, bill_id: Uuid, group_id: &str) -> Result<u64, DbErr> {
        let result = bills::Entity::update_many()
            .col_expr(
                bills::Column::Status,
                Expr::val(BillStatus::Cancelled).as_enum(Alias::new("bill_status")),
            )
            .filter(bills::Column::BillId.eq(bill_id))
            .filter(bills::Column::GroupId.eq(group_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks every participant of a bill as cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn cancel_participants(&self, bill_id: Uuid) -> Result<u64, DbErr> {
        let result = bill_participants::Entity::update_many()
            .col_expr(
                bill_participants::Column::Status,
                Expr::val(ParticipantStatus::Cancelled).as_enum(Alias::new("participant_status")),
            )
            .filter(bill_participants::Column::BillId.eq(bill_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks one participant's share as paid.
    ///
    /// Paying twice is not an error; the receipt reports `already_paid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bill does not exist or is cancelled, the user
    /// has no share in it, or a database operation fails.
    pub async fn mark_participant_paid(
        &self,
        bill_id: Uuid,
        user_id: &str,
    ) -> Result<PaymentReceipt, BillError> {
        let bill = self
            .find_by_id(bill_id)
            .await?
            .ok_or(BillError::NotFound(bill_id))?;

        if bill.status == BillStatus::Cancelled {
            return Err(BillError::Cancelled(bill_id));
        }

        let participant = bill_participants::Entity::find_by_id((bill_id, user_id.to_string()))
            .one(&self.db)
            .await?
            .ok_or_else(|| BillError::NotParticipant {
                bill_id,
                user_id: user_id.to_string(),
            })?;

        if participant.status == ParticipantStatus::Paid {
            return Ok(PaymentReceipt {
                bill,
                participant,
                already_paid: true,
            });
        }

        let mut active: bill_participants::ActiveModel = participant.into();
        active.status = Set(ParticipantStatus::Paid);
        active.paid_at = Set(Some(chrono::Utc::now().into()));
        let participant = active.update(&self.db).await?;

        Ok(PaymentReceipt {
            bill,
            participant,
            already_paid: false,
        })
    }
}
