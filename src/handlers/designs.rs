use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, CacheData, keys};
use crate::db::designs as design_db;
use crate::db::orders as order_db;
use crate::error::{ApiError, require};
use crate::models::designs::{self, CombineDesignsRequest, NewSavedDesign, RegisterDesignRequest};
use crate::models::orders::{DesignRef, DesignSlots, NewOrder, OrderStatus, SourceDesigns};
use crate::pricing;
use crate::storage::UploadStore;

/// POST /api/designs — record metadata for an artifact the upload service
/// already placed in the uploads directory.
pub async fn register_design(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    store: web::Data<UploadStore>,
    body: web::Json<RegisterDesignRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.0.id;
    let req = body.into_inner();

    // 1. Validate the required fields, naming the first missing one.
    let filename = require(req.filename, "filename")?;
    let product_type = require(req.product_type, "product_type")?;
    let color = require(req.color, "color")?;
    let view_angle = require(req.view_angle, "view_angle")?;

    // 2. The artifact itself must already exist on disk.
    UploadStore::validate_filename(&filename)?;
    if !store.exists(&filename) {
        return Err(ApiError::validation(format!(
            "No uploaded file named {filename}"
        )));
    }

    let design = design_db::insert_design(
        db.get_ref(),
        user_id,
        NewSavedDesign {
            filename,
            product_type,
            color,
            size: req.size,
            view_angle,
        },
    )
    .await?;

    cache.invalidate(&keys::designs(user_id)).await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": design,
    })))
}

/// GET /api/designs — the caller's saved designs.
///
/// Rows whose backing file has vanished are purged during the read and left
/// out of the response.
pub async fn list_designs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    config: web::Data<CacheConfig>,
    store: web::Data<UploadStore>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.0.id;
    let key = keys::designs(user_id);

    if let Ok(Some(cached)) = cache.get::<Vec<designs::Model>>(&key).await {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "designs": cached,
        })));
    }

    let rows = design_db::get_designs_by_user(db.get_ref(), user_id).await?;

    let (live, orphaned): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|d| store.exists(&d.filename));

    if !orphaned.is_empty() {
        let ids = orphaned.iter().map(|d| d.id).collect();
        let purged = design_db::delete_designs_by_ids(db.get_ref(), ids).await?;
        tracing::info!(%user_id, purged, "purged design rows with missing files");
    }

    if let Err(e) = cache
        .set(&key, &live, Some(config.design_list_ttl.as_secs()))
        .await
    {
        tracing::warn!(error = %e, "failed to cache design list");
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "designs": live,
    })))
}

/// DELETE /api/designs/{id} — owner-scoped delete.
///
/// Removes the row, unlinks the artifact, and deletes the caller's orders
/// that were built from this design (matched by side filename or by design
/// id in the source-designs map).
pub async fn delete_design(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    store: web::Data<UploadStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let design_id = path.into_inner();
    let user_id = user.0.id;

    // 1. Foreign rows read as missing.
    let design = design_db::get_design_by_id(db.get_ref(), design_id)
        .await?
        .filter(|d| d.user_id == user_id)
        .ok_or_else(|| ApiError::not_found(format!("Design {design_id} not found")))?;

    // 2. Row first, then the artifact (best-effort).
    design_db::delete_design(db.get_ref(), design.id).await?;
    store.remove(&design.filename);

    // 3. Cascade to orders that reference the design.
    let orders_removed = order_db::delete_orders_referencing_design(
        db.get_ref(),
        user_id,
        design.id,
        &design.filename,
    )
    .await?;

    cache.invalidate(&keys::designs(user_id)).await;
    cache.invalidate(&keys::orders(user_id)).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": format!("Design {design_id} deleted"),
        "orders_removed": orders_removed,
    })))
}

/// POST /api/designs/combine — build a priced multi-side order out of 2–4
/// saved designs.
pub async fn combine_designs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    store: web::Data<UploadStore>,
    body: web::Json<CombineDesignsRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.0.id;
    let sides = body.sides();

    // 1. Only 2–4 sides are sellable as a combination.
    if !(2..=4).contains(&sides.len()) {
        return Err(ApiError::validation(
            "Select between 2 and 4 sides to combine",
        ));
    }

    // 2. Every referenced design must exist and belong to the caller.
    //    Nothing is inserted if any side fails.
    let mut slots = DesignSlots::default();
    let mut sources = BTreeMap::new();
    let mut first: Option<designs::Model> = None;

    for (side, design_id) in &sides {
        let design = design_db::get_design_by_id(db.get_ref(), *design_id)
            .await?
            .filter(|d| d.user_id == user_id)
            .ok_or_else(|| ApiError::not_found(format!("Design for side '{side}' not found")))?;

        slots.set(*side, design.filename.clone());
        sources.insert(
            *side,
            DesignRef {
                design_id: design.id,
                image: store.public_path(&design.filename),
            },
        );
        if first.is_none() {
            first = Some(design);
        }
    }

    let first = first.ok_or_else(|| ApiError::validation("No sides selected"))?;

    // 3. Price from the side-count table, on top of the flat base.
    let design_price = pricing::combination_price(sides.len()).ok_or_else(|| {
        ApiError::validation("Select between 2 and 4 sides to combine")
    })?;
    let total_price = pricing::COMBINED_BASE_PRICE + design_price;

    // 4. Insert as a review-ready order, keeping the source-design audit
    //    trail. Product metadata comes from the first side's design.
    let order = order_db::insert_order(
        db.get_ref(),
        user_id,
        NewOrder {
            status: OrderStatus::UnderReview,
            quantity: 1,
            design: slots,
            base_price: pricing::COMBINED_BASE_PRICE,
            design_price,
            total_price,
            product_type: first.product_type,
            color: first.color,
            size: first.size,
            view_angle: first.view_angle,
            source_designs: Some(SourceDesigns(sources)),
            is_hidden: false,
            is_cart_order: false,
        },
    )
    .await?;

    cache.invalidate(&keys::orders(user_id)).await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": {
            "order_id": order.id,
            "status": order.status,
            "design_price": order.design_price,
            "total_price": order.total_price,
        },
    })))
}
