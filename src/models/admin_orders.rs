use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::orders::OrderStatus;

/// Review status of an admin-order snapshot, stored as the legacy lowercase
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AdminOrderStatus {
    #[sea_orm(string_value = "under review")]
    #[serde(rename = "under review")]
    UnderReview,
    #[sea_orm(string_value = "confirmed")]
    #[serde(rename = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "rejected")]
    #[serde(rename = "rejected")]
    Rejected,
}

impl AdminOrderStatus {
    /// The order-side status that mirrors this review status. Status updates
    /// write both rows inside one transaction.
    pub fn order_status(&self) -> OrderStatus {
        match self {
            AdminOrderStatus::UnderReview => OrderStatus::UnderReview,
            AdminOrderStatus::Confirmed => OrderStatus::Confirmed,
            AdminOrderStatus::Rejected => OrderStatus::Rejected,
        }
    }
}

/// SeaORM entity for the `admin_orders` table: a denormalized snapshot of an
/// order plus the client's identity/shipping data, taken at submission time
/// and never re-synced with `users`.
///
/// `created_at` is the snapshot's creation time; the confirmation instant
/// lives in `confirmed_at`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub postal: Option<String>,
    pub cin: Option<String>,
    pub product_type: String,
    pub color: String,
    pub size: Option<String>,
    pub view_angle: String,
    pub quantity: i32,
    pub front_design: Option<String>,
    pub back_design: Option<String>,
    pub left_design: Option<String>,
    pub right_design: Option<String>,
    pub base_price: Decimal,
    pub design_price: Decimal,
    pub total_price: Decimal,
    pub currency: String,
    pub status: AdminOrderStatus,
    pub created_at: DateTimeUtc,
    pub confirmed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id"
    )]
    Order,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for PUT /api/admin/orders/{id}/status. The status arrives as
/// a raw string so out-of-vocabulary values get a proper validation error
/// instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAdminOrderStatus {
    pub status: String,
}

/// Snapshot fields for a new admin-order row, assembled by the submit flow.
#[derive(Debug, Clone)]
pub struct NewAdminOrder {
    pub order_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub postal: Option<String>,
    pub cin: Option<String>,
    pub product_type: String,
    pub color: String,
    pub size: Option<String>,
    pub view_angle: String,
    pub quantity: i32,
    pub front_design: Option<String>,
    pub back_design: Option<String>,
    pub left_design: Option<String>,
    pub right_design: Option<String>,
    pub base_price: Decimal,
    pub design_price: Decimal,
    pub total_price: Decimal,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn status_strings_round_trip() {
        for (status, value) in [
            (AdminOrderStatus::UnderReview, "under review"),
            (AdminOrderStatus::Confirmed, "confirmed"),
            (AdminOrderStatus::Rejected, "rejected"),
        ] {
            assert_eq!(status.to_value(), value);
            assert_eq!(
                AdminOrderStatus::try_from_value(&value.to_string()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn unknown_status_strings_are_rejected() {
        assert!(AdminOrderStatus::try_from_value(&"shipped".to_string()).is_err());
        assert!(AdminOrderStatus::try_from_value(&"Confirmed".to_string()).is_err());
    }

    #[test]
    fn review_status_mirrors_onto_order_status() {
        assert_eq!(
            AdminOrderStatus::Confirmed.order_status(),
            OrderStatus::Confirmed
        );
        assert_eq!(
            AdminOrderStatus::Rejected.order_status(),
            OrderStatus::Rejected
        );
        assert_eq!(
            AdminOrderStatus::UnderReview.order_status(),
            OrderStatus::UnderReview
        );
    }
}
