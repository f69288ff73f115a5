use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::notifications as notification_db;
use crate::error::ApiError;

/// GET /api/notifications — the caller's notifications, newest first.
pub async fn list_notifications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let notifications =
        notification_db::get_notifications_by_user(db.get_ref(), user.0.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "notifications": notifications,
    })))
}

/// PUT /api/notifications/{id}/read — mark one of the caller's notifications
/// as read.
pub async fn mark_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let notification_id = path.into_inner();

    let notification =
        notification_db::mark_notification_read(db.get_ref(), notification_id, user.0.id)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(format!("Notification {notification_id} not found"))
            })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": notification,
    })))
}
