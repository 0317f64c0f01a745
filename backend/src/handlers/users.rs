use crate::error::AppError;
use crate::services::AccountService;
use actix_web::{web, HttpResponse};
use serde_json::json;
use storefront_shared::{CreateUserRequest, PaginationParams, UpdateUserRequest};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

/// List users with pagination.
pub async fn list_users(
    query: web::Query<PaginationParams>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let users = account_service.list_users(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(users))
}

/// Register a new user.
pub async fn create_user(
    request: web::Json<CreateUserRequest>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    debug!("Registering user '{}'", request.username);

    let user = account_service.register(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(user))
}

/// Get user by ID.
pub async fn get_user(
    user_id: web::Path<Uuid>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    let user = account_service.get_user(*user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Update user profile fields, password, or active flag.
pub async fn update_user(
    user_id: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let user = account_service
        .update_user(*user_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Delete a user and, by cascade, their orders and order items.
pub async fn delete_user(
    user_id: web::Path<Uuid>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    account_service.delete_user(*user_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "user deleted" })))
}
