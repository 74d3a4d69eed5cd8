//! `SeaORM` entity definitions.

pub mod bill_participants;
pub mod bills;
pub mod group_bank_accounts;
pub mod groups;
pub mod sea_orm_active_enums;
pub mod users;
