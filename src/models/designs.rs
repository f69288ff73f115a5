use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::orders::Side;

/// SeaORM entity for the `saved_designs` table. `filename` names an artifact
/// in the uploads directory; rows whose file has gone missing are purged
/// lazily on list reads.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "saved_designs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub product_type: String,
    pub color: String,
    pub size: Option<String>,
    pub view_angle: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/designs. The artifact itself is placed in the
/// uploads directory by the upload service; this call records its metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDesignRequest {
    pub filename: Option<String>,
    pub product_type: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub view_angle: Option<String>,
}

/// Validated metadata for a new saved design row.
#[derive(Debug, Clone)]
pub struct NewSavedDesign {
    pub filename: String,
    pub product_type: String,
    pub color: String,
    pub size: Option<String>,
    pub view_angle: String,
}

/// Request body for POST /api/designs/combine: 2–4 sides, each naming a
/// saved design owned by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CombineDesignsRequest {
    pub front: Option<Uuid>,
    pub back: Option<Uuid>,
    pub left: Option<Uuid>,
    pub right: Option<Uuid>,
}

impl CombineDesignsRequest {
    /// The requested sides in canonical order.
    pub fn sides(&self) -> Vec<(Side, Uuid)> {
        [
            (Side::Front, self.front),
            (Side::Back, self.back),
            (Side::Left, self.left),
            (Side::Right, self.right),
        ]
        .into_iter()
        .filter_map(|(side, id)| id.map(|id| (side, id)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_come_back_in_canonical_order() {
        let req = CombineDesignsRequest {
            right: Some(Uuid::new_v4()),
            front: Some(Uuid::new_v4()),
            back: None,
            left: None,
        };

        let sides: Vec<Side> = req.sides().into_iter().map(|(s, _)| s).collect();
        assert_eq!(sides, vec![Side::Front, Side::Right]);
    }

    #[test]
    fn absent_sides_are_skipped() {
        let req = CombineDesignsRequest {
            front: None,
            back: None,
            left: None,
            right: None,
        };
        assert!(req.sides().is_empty());
    }
}
