use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `conversations` table: one support thread per
/// customer, pinned to the role-resolved support admin.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conversations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub admin_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether `user_id` is one of the two parties.
    pub fn has_party(&self, user_id: Uuid) -> bool {
        self.user_id == user_id || self.admin_id == user_id
    }

    /// The other party's user id, from `user_id`'s point of view.
    pub fn other_party(&self, user_id: Uuid) -> Uuid {
        if self.user_id == user_id {
            self.admin_id
        } else {
            self.user_id
        }
    }
}

// ── DTOs ──

/// Response for the conversations list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub conversation_id: Uuid,
    pub other_user_id: Uuid,
    pub other_user_name: Option<String>,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTimeUtc>,
    pub unread_count: u64,
}
