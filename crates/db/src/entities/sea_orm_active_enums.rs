//! Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `bill_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "bill_status")]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Accepting payments.
    #[sea_orm(string_value = "open")]
    Open,
    /// Cancelled by a chat member.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// `participant_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "participant_status")]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    /// Share not paid yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Share paid.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Bill cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<BillStatus> for billsplit_core::bill::BillStatus {
    fn from(status: BillStatus) -> Self {
        match status {
            BillStatus::Open => Self::Open,
            BillStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ParticipantStatus> for billsplit_core::bill::ParticipantStatus {
    fn from(status: ParticipantStatus) -> Self {
        match status {
            ParticipantStatus::Pending => Self::Pending,
            ParticipantStatus::Paid => Self::Paid,
            ParticipantStatus::Cancelled => Self::Cancelled,
        }
    }
}
