use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order status stored as the legacy lowercase strings (two of them contain
/// spaces, so the wire names are pinned per variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    #[serde(rename = "pending")]
    Pending,
    #[sea_orm(string_value = "under review")]
    #[serde(rename = "under review")]
    UnderReview,
    #[sea_orm(string_value = "submitted_for_review")]
    #[serde(rename = "submitted_for_review")]
    SubmittedForReview,
    #[sea_orm(string_value = "approved")]
    #[serde(rename = "approved")]
    Approved,
    #[sea_orm(string_value = "confirmed")]
    #[serde(rename = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "rejected")]
    #[serde(rename = "rejected")]
    Rejected,
}

/// One of the four garment placements a design can occupy.
///
/// Declaration order is the canonical side order (front, back, left, right);
/// `BTreeMap<Side, _>` iteration and `Side::ALL` both follow it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Front, Side::Back, Side::Left, Side::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to the saved design an order side was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRef {
    pub design_id: Uuid,
    pub image: String,
}

/// Typed audit trail of which saved designs a combined order came from,
/// persisted as a JSON column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SourceDesigns(pub BTreeMap<Side, DesignRef>);

impl SourceDesigns {
    pub fn references(&self, design_id: Uuid) -> bool {
        self.0.values().any(|r| r.design_id == design_id)
    }
}

/// SeaORM entity for the `orders` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub quantity: i32,
    pub front_design: Option<String>,
    pub back_design: Option<String>,
    pub left_design: Option<String>,
    pub right_design: Option<String>,
    pub base_price: Decimal,
    pub design_price: Decimal,
    pub total_price: Decimal,
    pub product_type: String,
    pub color: String,
    pub size: Option<String>,
    pub view_angle: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub source_designs: Option<SourceDesigns>,
    pub is_hidden: bool,
    pub is_cart_order: bool,
    pub approval_timestamp: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::admin_orders::Entity")]
    AdminOrders,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::admin_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn side_design(&self, side: Side) -> Option<&str> {
        match side {
            Side::Front => self.front_design.as_deref(),
            Side::Back => self.back_design.as_deref(),
            Side::Left => self.left_design.as_deref(),
            Side::Right => self.right_design.as_deref(),
        }
    }

    /// True when the order uses `filename` on any side or lists `design_id`
    /// among its source designs. Drives the delete-design cascade.
    pub fn references_design(&self, design_id: Uuid, filename: &str) -> bool {
        Side::ALL
            .iter()
            .any(|&s| self.side_design(s) == Some(filename))
            || self
                .source_designs
                .as_ref()
                .is_some_and(|s| s.references(design_id))
    }
}

// ── DTOs ──

/// Per-side design file references, the typed form of the legacy
/// `design_data` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSlots {
    pub front: Option<String>,
    pub back: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
}

impl DesignSlots {
    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::Front => self.front.as_deref(),
            Side::Back => self.back.as_deref(),
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    pub fn set(&mut self, side: Side, value: String) {
        let slot = match side {
            Side::Front => &mut self.front,
            Side::Back => &mut self.back,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        Side::ALL.iter().all(|&s| self.get(s).is_none())
    }

    /// Normalized side references for cart-line matching: absent sides become
    /// empty strings so `None` and `Some("")` fingerprint identically.
    pub fn fingerprint(&self) -> [String; 4] {
        Side::ALL.map(|s| self.get(s).unwrap_or("").to_string())
    }
}

/// Request body for POST /api/orders and POST /api/orders/cart. Fields are
/// optional so missing ones can be reported by name instead of failing at
/// deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub design: Option<DesignSlots>,
    pub product_type: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub view_angle: Option<String>,
    pub quantity: Option<i32>,
    pub base_price: Option<Decimal>,
    pub design_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub is_hidden: Option<bool>,
    pub is_cart_order: Option<bool>,
}

/// Request body for POST /api/orders/{id}/submit.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitOrderRequest {
    pub quantity: Option<i32>,
    pub currency: Option<String>,
}

/// Fully-resolved order fields, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub status: OrderStatus,
    pub quantity: i32,
    pub design: DesignSlots,
    pub base_price: Decimal,
    pub design_price: Decimal,
    pub total_price: Decimal,
    pub product_type: String,
    pub color: String,
    pub size: Option<String>,
    pub view_angle: String,
    pub source_designs: Option<SourceDesigns>,
    pub is_hidden: bool,
    pub is_cart_order: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(front: Option<&str>, back: Option<&str>) -> DesignSlots {
        DesignSlots {
            front: front.map(str::to_string),
            back: back.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn fingerprint_normalizes_missing_sides_to_empty() {
        let a = slots(Some("front.png"), None);
        let b = DesignSlots {
            front: Some("front.png".into()),
            back: Some("".into()),
            left: Some("".into()),
            right: Some("".into()),
        };
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_distinguishes_different_sides() {
        assert_ne!(
            slots(Some("a.png"), None).fingerprint(),
            slots(None, Some("a.png")).fingerprint()
        );
    }

    #[test]
    fn empty_slots_are_detected() {
        assert!(DesignSlots::default().is_empty());
        assert!(!slots(Some("x.png"), None).is_empty());
    }

    #[test]
    fn source_designs_lookup_by_design_id() {
        let id = Uuid::new_v4();
        let mut map = BTreeMap::new();
        map.insert(
            Side::Back,
            DesignRef {
                design_id: id,
                image: "/uploads/back.png".into(),
            },
        );
        let sources = SourceDesigns(map);

        assert!(sources.references(id));
        assert!(!sources.references(Uuid::new_v4()));
    }

    #[test]
    fn side_json_names_are_lowercase() {
        let json = serde_json::to_string(&Side::Front).unwrap();
        assert_eq!(json, "\"front\"");

        let side: Side = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(side, Side::Right);
    }
}
