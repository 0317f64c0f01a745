use crate::error::AppError;
use crate::models::{Pagination, User};
use crate::utils::password::hash_password;
use crate::utils::validation::validate_username;
use sqlx::PgPool;
use storefront_shared::{
    CreateUserRequest, PaginatedResponse, PaginationParams, UpdateUserRequest, UserResponse,
};
use tracing::info;
use uuid::Uuid;

/// User account management: registration, profile updates, the
/// soft-disable flag, and the cascading hard delete.
#[derive(Clone)]
pub struct AccountService {
    db_pool: PgPool,
}

impl AccountService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Register a new user. Uniqueness is pre-checked for a clean error
    /// message; the unique constraints remain the backstop under races.
    pub async fn register(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        validate_username(&request.username)
            .map_err(|e| AppError::Validation(e.code.to_string()))?;

        if User::username_exists(&self.db_pool, &request.username, None).await? {
            return Err(AppError::Conflict(format!(
                "username '{}' is already taken",
                request.username
            )));
        }

        if User::email_exists(&self.db_pool, &request.email, None).await? {
            return Err(AppError::Conflict(format!(
                "email '{}' is already registered",
                request.email
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::create(&self.db_pool, &request.username, &request.email, &password_hash)
            .await?;

        info!("Registered user {} ({})", user.username, user.id);

        Ok(user.to_response())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = User::find_by_id(&self.db_pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))?;

        Ok(user.to_response())
    }

    pub async fn list_users(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<UserResponse>, AppError> {
        let page = Pagination::new(params.limit, params.offset);

        let users = User::list(&self.db_pool, page.limit, page.offset).await?;
        let total = User::count(&self.db_pool).await?;

        Ok(PaginatedResponse {
            data: users.iter().map(User::to_response).collect(),
            total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.offset + page.limit < total,
        })
    }

    /// Update profile fields, the password, or the active flag. Setting
    /// `is_active: false` is the soft-disable path.
    pub async fn update_user(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        if let Some(username) = &request.username {
            validate_username(username).map_err(|e| AppError::Validation(e.code.to_string()))?;

            if User::username_exists(&self.db_pool, username, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "username '{}' is already taken",
                    username
                )));
            }
        }

        if let Some(email) = &request.email {
            if User::email_exists(&self.db_pool, email, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "email '{}' is already registered",
                    email
                )));
            }
        }

        let password_hash = match &request.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = User::update(
            &self.db_pool,
            id,
            request.username.as_deref(),
            request.email.as_deref(),
            password_hash.as_deref(),
            request.is_active,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))?;

        Ok(user.to_response())
    }

    /// Hard delete; the engine cascades through orders to order items.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = User::delete(&self.db_pool, id).await?;

        if !deleted {
            return Err(AppError::NotFound(format!("user {} not found", id)));
        }

        info!("Deleted user {} and their orders", id);

        Ok(())
    }
}
