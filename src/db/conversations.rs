use sea_orm::*;
use uuid::Uuid;

use crate::models::conversations;

/// Insert a new support conversation between a customer and the admin.
pub async fn insert_conversation(
    db: &DatabaseConnection,
    user_id: Uuid,
    admin_id: Uuid,
) -> Result<conversations::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_conversation = conversations::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        admin_id: Set(admin_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_conversation.insert(db).await
}

/// Fetch a single conversation by ID.
pub async fn get_conversation_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<conversations::Model>, DbErr> {
    conversations::Entity::find_by_id(id).one(db).await
}

/// A customer's support conversation, if they have opened one.
pub async fn find_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<conversations::Model>, DbErr> {
    conversations::Entity::find()
        .filter(conversations::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// All conversations, most recent activity first (admin view).
pub async fn get_all_conversations(
    db: &DatabaseConnection,
) -> Result<Vec<conversations::Model>, DbErr> {
    conversations::Entity::find()
        .order_by_desc(conversations::Column::UpdatedAt)
        .all(db)
        .await
}

/// Bump a conversation's activity timestamp (called on every message send).
pub async fn touch(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let Some(conversation) = conversations::Entity::find_by_id(id).one(db).await? else {
        return Ok(());
    };

    let mut active: conversations::ActiveModel = conversation.into();
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await?;

    Ok(())
}
