use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::messages;

/// Insert a new message.
pub async fn insert_message(
    db: &DatabaseConnection,
    conversation_id: Uuid,
    sender_id: Uuid,
    content: String,
) -> Result<messages::Model, DbErr> {
    let new_message = messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        conversation_id: Set(conversation_id),
        sender_id: Set(sender_id),
        content: Set(content),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    new_message.insert(db).await
}

/// Fetch messages for a conversation, newest first, with page/limit
/// pagination.
pub async fn get_messages_by_conversation(
    db: &DatabaseConnection,
    conversation_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<messages::Model>, DbErr> {
    messages::Entity::find()
        .filter(messages::Column::ConversationId.eq(conversation_id))
        .order_by_desc(messages::Column::CreatedAt)
        .order_by_desc(messages::Column::Id)
        .limit(limit)
        .offset((page - 1) * limit)
        .all(db)
        .await
}

/// Mark every message the other party sent in a conversation as read.
pub async fn mark_all_read_for_conversation(
    db: &DatabaseConnection,
    conversation_id: Uuid,
    reader_id: Uuid,
) -> Result<u64, DbErr> {
    let result = messages::Entity::update_many()
        .col_expr(messages::Column::IsRead, Expr::value(true))
        .filter(messages::Column::ConversationId.eq(conversation_id))
        .filter(messages::Column::SenderId.ne(reader_id))
        .filter(messages::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Count unread messages in a conversation for a specific user (messages
/// sent by the other party).
pub async fn count_unread_for_conversation(
    db: &DatabaseConnection,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Result<u64, DbErr> {
    messages::Entity::find()
        .filter(messages::Column::ConversationId.eq(conversation_id))
        .filter(messages::Column::SenderId.ne(user_id))
        .filter(messages::Column::IsRead.eq(false))
        .count(db)
        .await
}

/// Get the latest message in a conversation.
pub async fn get_latest_message_for_conversation(
    db: &DatabaseConnection,
    conversation_id: Uuid,
) -> Result<Option<messages::Model>, DbErr> {
    messages::Entity::find()
        .filter(messages::Column::ConversationId.eq(conversation_id))
        .order_by_desc(messages::Column::CreatedAt)
        .one(db)
        .await
}
