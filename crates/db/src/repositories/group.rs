//! Group repository for database operations.

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Set, sea_query::OnConflict,
};

use crate::entities::groups;

/// Repository for LINE groups and rooms.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    /// Creates a new group repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a chat id, leaving an existing row untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn upsert(&self, group_id: &str) -> Result<(), DbErr> {
        upsert_group(&self.db, group_id).await
    }

    /// Finds a group by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, group_id: &str) -> Result<Option<groups::Model>, DbErr> {
        groups::Entity::find_by_id(group_id.to_string())
            .one(&self.db)
            .await
    }
}

pub(crate) async fn upsert_group<C: ConnectionTrait>(conn: &C, group_id: &str) -> Result<(), DbErr> {
    let group = groups::ActiveModel {
        group_id: Set(group_id.to_string()),
        created_at: Set(chrono::Utc::now().into()),
    };

    groups::Entity::insert(group)
        .on_conflict(
            OnConflict::column(groups::Column::GroupId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(())
}
