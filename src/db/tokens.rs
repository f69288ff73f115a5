use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::models::tokens;

/// Resolve a bearer token string to its row, ignoring expired tokens.
pub async fn find_valid_token(
    db: &DatabaseConnection,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<tokens::Model>, DbErr> {
    tokens::Entity::find()
        .filter(tokens::Column::Token.eq(token))
        .filter(tokens::Column::ExpiresAt.gt(now))
        .one(db)
        .await
}
