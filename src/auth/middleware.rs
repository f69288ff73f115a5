use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::auth::tokens::TokenCache;
use crate::error::ApiError;
use crate::models::users::{self, Role};

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header via the token cache and the `user_tokens` table.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ApiError::auth("Missing Authorization header"))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| ApiError::auth("Authorization header must be: Bearer <token>"))?;

            // 2. Get the token cache from app data.
            let token_cache = req
                .app_data::<web::Data<Arc<TokenCache>>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Token cache not configured")
                })?;

            // 3. Get the database connection.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Database not configured")
                })?;

            // 4. Resolve the token to an active user account.
            let user = token_cache.resolve(db.get_ref(), token).await?;

            Ok(AuthenticatedUser(user))
        })
    }
}

/// An authenticated caller that also holds the admin role. This is the one
/// place admin capability is checked; handlers just take `AdminUser`.
pub struct AdminUser(pub users::Model);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let auth = AuthenticatedUser::from_request(req, payload);

        Box::pin(async move {
            let AuthenticatedUser(user) = auth.await?;

            if user.role != Role::Admin {
                return Err(ApiError::forbidden("Administrator access required").into());
            }

            Ok(AdminUser(user))
        })
    }
}
