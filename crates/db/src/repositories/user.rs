//! User repository for database operations.

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Set,
    sea_query::{Expr, OnConflict},
};

use crate::entities::users;

/// Repository for LINE users.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts or refreshes a user.
    ///
    /// A `None` display name keeps the stored one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn upsert(&self, user_id: &str, display_name: Option<&str>) -> Result<(), DbErr> {
        upsert_users(&self.db, &[(user_id, display_name)]).await
    }

    /// Finds a user by LINE user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
    }
}

pub(crate) async fn upsert_users<C: ConnectionTrait>(
    conn: &C,
    users_to_save: &[(&str, Option<&str>)],
) -> Result<(), DbErr> {
    if users_to_save.is_empty() {
        return Ok(());
    }

    let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
    let models = users_to_save.iter().map(|(user_id, display_name)| users::ActiveModel {
        user_id: Set((*user_id).to_string()),
        display_name: Set(display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
    });

    users::Entity::insert_many(models)
        .on_conflict(
            OnConflict::column(users::Column::UserId)
                .value(
                    users::Column::DisplayName,
                    Expr::cust("COALESCE(EXCLUDED.display_name, users.display_name)"),
                )
                .update_column(users::Column::UpdatedAt)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(())
}
