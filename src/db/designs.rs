use sea_orm::*;
use uuid::Uuid;

use crate::models::designs::{self, NewSavedDesign};

/// Insert a new saved design row.
pub async fn insert_design(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: NewSavedDesign,
) -> Result<designs::Model, DbErr> {
    let new_design = designs::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        filename: Set(input.filename),
        product_type: Set(input.product_type),
        color: Set(input.color),
        size: Set(input.size),
        view_angle: Set(input.view_angle),
        created_at: Set(chrono::Utc::now()),
    };

    new_design.insert(db).await
}

/// Fetch a single saved design by ID.
pub async fn get_design_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<designs::Model>, DbErr> {
    designs::Entity::find_by_id(id).one(db).await
}

/// A user's saved designs, newest first.
pub async fn get_designs_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<designs::Model>, DbErr> {
    designs::Entity::find()
        .filter(designs::Column::UserId.eq(user_id))
        .order_by_desc(designs::Column::CreatedAt)
        .all(db)
        .await
}

/// Delete a saved design row by ID.
pub async fn delete_design(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    designs::Entity::delete_by_id(id).exec(db).await
}

/// Drop rows whose backing file has gone missing (lazy orphan purge).
pub async fn delete_designs_by_ids(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = designs::Entity::delete_many()
        .filter(designs::Column::Id.is_in(ids))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
