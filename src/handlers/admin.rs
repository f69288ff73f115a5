use actix_web::{HttpResponse, web};
use sea_orm::{ActiveEnum, DatabaseConnection, TransactionTrait};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AdminUser;
use crate::cache::{CacheConfig, CacheData, keys};
use crate::confirmation_log::{ConfirmationEntry, ConfirmationLog};
use crate::db::admin_orders as admin_db;
use crate::db::orders as order_db;
use crate::error::ApiError;
use crate::models::admin_orders::{self, AdminOrderStatus, UpdateAdminOrderStatus};

/// GET /api/admin/orders — every review snapshot, newest first.
pub async fn list_orders(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    config: web::Data<CacheConfig>,
) -> Result<HttpResponse, ApiError> {
    let key = keys::admin_orders();

    if let Ok(Some(cached)) = cache.get::<Vec<admin_orders::Model>>(&key).await {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "orders": cached,
        })));
    }

    let orders = admin_db::get_all_admin_orders(db.get_ref()).await?;

    if let Err(e) = cache
        .set(&key, &orders, Some(config.admin_orders_ttl.as_secs()))
        .await
    {
        tracing::warn!(error = %e, "failed to cache admin order list");
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "orders": orders,
    })))
}

/// PUT /api/admin/orders/{id}/status — move a snapshot through review.
///
/// Accepts "under review", "confirmed" and "rejected". The snapshot and the
/// linked order change status in one transaction; the confirmation log is a
/// projection updated after commit (confirm writes the order's line, reject
/// removes it).
pub async fn update_order_status(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    log: web::Data<Arc<ConfirmationLog>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateAdminOrderStatus>,
) -> Result<HttpResponse, ApiError> {
    let admin_order_id = path.into_inner();

    // 1. The target status must be in the review vocabulary.
    let status = AdminOrderStatus::try_from_value(&body.status)
        .map_err(|_| ApiError::validation(format!("Invalid status: {}", body.status)))?;

    // 2. The snapshot must exist.
    let snapshot = admin_db::get_admin_order_by_id(db.get_ref(), admin_order_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Admin order {admin_order_id} not found")))?;

    // 3. Move both rows together. Confirmation stamps its own timestamp;
    //    created_at stays the creation time on both sides.
    let now = chrono::Utc::now();
    let confirmed_at = (status == AdminOrderStatus::Confirmed).then_some(now);

    let txn = db.begin().await?;
    let updated = admin_db::set_status(&txn, admin_order_id, status, confirmed_at).await?;
    let order = order_db::set_status(
        &txn,
        snapshot.order_id,
        status.order_status(),
        confirmed_at,
    )
    .await?;
    txn.commit().await?;

    // 4. Project the outcome onto the confirmation log.
    match status {
        AdminOrderStatus::Confirmed => {
            log.record(&ConfirmationEntry {
                order_id: updated.order_id.to_string(),
                client_name: updated.client_name.clone(),
                client_email: updated.client_email.clone(),
                design_price: updated.design_price.to_string(),
                confirmed_on: now.date_naive(),
            })?;
        }
        AdminOrderStatus::Rejected => {
            log.withdraw(&updated.order_id.to_string())?;
        }
        AdminOrderStatus::UnderReview => {}
    }

    cache.invalidate(&keys::admin_orders()).await;
    cache.invalidate(&keys::orders(order.user_id)).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": updated,
    })))
}

/// DELETE /api/admin/orders/{id} — drop a review snapshot.
pub async fn delete_order(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let admin_order_id = path.into_inner();

    let result = admin_db::delete_admin_order(db.get_ref(), admin_order_id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!(
            "Admin order {admin_order_id} not found"
        )));
    }

    cache.invalidate(&keys::admin_orders()).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": format!("Admin order {admin_order_id} deleted"),
    })))
}
