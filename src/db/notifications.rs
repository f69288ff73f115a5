use sea_orm::*;
use uuid::Uuid;

use crate::models::notifications;

/// Insert a notification for a user.
pub async fn insert_notification(
    db: &DatabaseConnection,
    user_id: Uuid,
    content: String,
) -> Result<notifications::Model, DbErr> {
    let new_notification = notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        content: Set(content),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    new_notification.insert(db).await
}

/// A user's notifications, newest first.
pub async fn get_notifications_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .all(db)
        .await
}

/// Mark a notification as read, scoped to its owner. Returns the updated
/// row, or None when the id does not exist or belongs to someone else.
pub async fn mark_notification_read(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<notifications::Model>, DbErr> {
    let Some(notification) = notifications::Entity::find_by_id(id)
        .filter(notifications::Column::UserId.eq(user_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let mut active: notifications::ActiveModel = notification.into();
    active.is_read = Set(true);

    Ok(Some(active.update(db).await?))
}
