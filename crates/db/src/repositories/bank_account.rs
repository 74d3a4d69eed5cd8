//! Group bank account repository.

use billsplit_core::bill::BankAccount;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, sea_query::OnConflict};

use crate::entities::group_bank_accounts;

/// Repository for the account each chat collects transfers into.
#[derive(Debug, Clone)]
pub struct BankAccountRepository {
    db: DatabaseConnection,
}

impl BankAccountRepository {
    /// Creates a new bank account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the bank account of a chat.
    ///
    /// Rows with an empty account number are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_group(&self, group_id: &str) -> Result<Option<BankAccount>, DbErr> {
        let account = group_bank_accounts::Entity::find_by_id(group_id.to_string())
            .one(&self.db)
            .await?;

        Ok(account
            .filter(|row| !row.account_number.is_empty())
            .map(to_bank_account))
    }

    /// Replaces the bank account of a chat.
    ///
    /// The group row must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn upsert(&self, group_id: &str, account: &BankAccount) -> Result<BankAccount, DbErr> {
        let row = group_bank_accounts::ActiveModel {
            group_id: Set(group_id.to_string()),
            account_number: Set(account.account_number.clone()),
            account_name: Set(account.account_name.clone()),
            bank_name: Set(account.bank_name.clone()),
            updated_at: Set(chrono::Utc::now().into()),
        };

        let saved = group_bank_accounts::Entity::insert(row)
            .on_conflict(
                OnConflict::column(group_bank_accounts::Column::GroupId)
                    .update_columns([
                        group_bank_accounts::Column::AccountNumber,
                        group_bank_accounts::Column::AccountName,
                        group_bank_accounts::Column::BankName,
                        group_bank_accounts::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        Ok(to_bank_account(saved))
    }
}

fn to_bank_account(row: group_bank_accounts::Model) -> BankAccount {
    BankAccount {
        account_number: row.account_number,
        account_name: row.account_name,
        bank_name: row.bank_name,
    }
}
