use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, Role};

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// The support admin customers chat with: the oldest account carrying the
/// admin role.
pub async fn find_support_admin(db: &DatabaseConnection) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(Role::Admin))
        .order_by_asc(users::Column::CreatedAt)
        .one(db)
        .await
}
