use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, CacheData, keys};
use crate::db::conversations as conversation_db;
use crate::db::messages as message_db;
use crate::db::notifications as notification_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::PaginationQuery;
use crate::models::conversations::{self, ConversationSummary};
use crate::models::messages::{MessageResponse, SendMessageRequest};
use crate::models::users::Role;

/// Helper: load a conversation and verify the caller is one of its two
/// parties.
async fn authorize_party(
    db: &DatabaseConnection,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Result<conversations::Model, ApiError> {
    let conversation = conversation_db::get_conversation_by_id(db, conversation_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Conversation {conversation_id} not found")))?;

    if !conversation.has_party(user_id) {
        return Err(ApiError::forbidden(
            "You are not a party to this conversation",
        ));
    }

    Ok(conversation)
}

/// POST /api/chat/conversations — open (or return) the caller's support
/// conversation, pinned to the role-resolved support admin.
pub async fn open_conversation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.0.id;

    // 1. Reuse an existing thread.
    if let Some(existing) = conversation_db::find_by_user(db.get_ref(), user_id).await? {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "data": existing,
        })));
    }

    // 2. Pin a new thread to the support admin.
    let admin = user_db::find_support_admin(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::not_found("No support admin is available"))?;

    let conversation =
        conversation_db::insert_conversation(db.get_ref(), user_id, admin.id).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": conversation,
    })))
}

/// GET /api/chat/conversations — conversation summaries.
///
/// Customers see their own support thread; the admin sees every thread,
/// most recent activity first. Each summary carries the other party's name,
/// the latest message, and an unread count.
pub async fn list_conversations(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    config: web::Data<CacheConfig>,
) -> Result<HttpResponse, ApiError> {
    let caller = user.0;
    let key = keys::conversations(caller.id);

    if let Ok(Some(cached)) = cache.get::<Vec<serde_json::Value>>(&key).await {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "conversations": cached,
        })));
    }

    let conversations = if caller.role == Role::Admin {
        conversation_db::get_all_conversations(db.get_ref()).await?
    } else {
        conversation_db::find_by_user(db.get_ref(), caller.id)
            .await?
            .into_iter()
            .collect()
    };

    let mut summaries: Vec<ConversationSummary> = Vec::new();

    for conversation in conversations {
        let other_user_id = conversation.other_party(caller.id);

        let other_user_name = match user_db::get_user_by_id(db.get_ref(), other_user_id).await {
            Ok(Some(u)) => Some(u.display_name()),
            _ => None,
        };

        let latest =
            message_db::get_latest_message_for_conversation(db.get_ref(), conversation.id).await;
        let unread =
            message_db::count_unread_for_conversation(db.get_ref(), conversation.id, caller.id)
                .await
                .unwrap_or(0);

        let (last_message, last_message_at) = match latest {
            Ok(Some(msg)) => (Some(msg.content), Some(msg.created_at)),
            _ => (None, None),
        };

        summaries.push(ConversationSummary {
            conversation_id: conversation.id,
            other_user_id,
            other_user_name,
            last_message,
            last_message_at,
            unread_count: unread,
        });
    }

    if let Err(e) = cache
        .set(&key, &summaries, Some(config.conversation_ttl.as_secs()))
        .await
    {
        tracing::warn!(error = %e, "failed to cache conversation list");
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "conversations": summaries,
    })))
}

/// GET /api/chat/conversations/{id}/messages?page=1&limit=50
///
/// Paginated message history, parties only.
pub async fn get_messages(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let conversation_id = path.into_inner();
    let user_id = user.0.id;

    authorize_party(db.get_ref(), conversation_id, user_id).await?;

    let messages = message_db::get_messages_by_conversation(
        db.get_ref(),
        conversation_id,
        query.page(),
        query.limit(),
    )
    .await?;

    let response: Vec<MessageResponse> = messages.into_iter().map(|m| m.into()).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "messages": response,
    })))
}

/// POST /api/chat/conversations/{id}/messages — send a message and fan a
/// notification out to the other party.
pub async fn send_message(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    let conversation_id = path.into_inner();
    let sender = user.0;

    let content = body.into_inner().content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::validation("Message content must not be empty"));
    }

    let conversation = authorize_party(db.get_ref(), conversation_id, sender.id).await?;

    let message =
        message_db::insert_message(db.get_ref(), conversation.id, sender.id, content).await?;
    conversation_db::touch(db.get_ref(), conversation.id).await?;

    // Notification fan-out is best-effort: a failed insert must not lose the
    // message itself.
    let recipient = conversation.other_party(sender.id);
    let note = format!("New message from {}", sender.display_name());
    if let Err(e) = notification_db::insert_notification(db.get_ref(), recipient, note).await {
        tracing::warn!(error = %e, "failed to fan out message notification");
    }

    cache.invalidate(&keys::conversations(sender.id)).await;
    cache.invalidate(&keys::conversations(recipient)).await;

    let response: MessageResponse = message.into();
    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": response,
    })))
}

/// PUT /api/chat/conversations/{id}/read — mark the other party's messages
/// as read.
pub async fn mark_conversation_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let conversation_id = path.into_inner();
    let user_id = user.0.id;

    authorize_party(db.get_ref(), conversation_id, user_id).await?;

    let updated =
        message_db::mark_all_read_for_conversation(db.get_ref(), conversation_id, user_id).await?;

    cache.invalidate(&keys::conversations(user_id)).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "updated": updated,
    })))
}
