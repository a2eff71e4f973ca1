use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::JwtService,
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::RegisterUserRequest,
            response::{RegisterUserResponse, UserDto},
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    /// Creates a locked user and issues its bearer token.
    pub async fn register(&self, request: RegisterUserRequest) -> AppResult<RegisterUserResponse> {
        request.validate()?;

        let user = self.repository.create(User::new(&request.email)).await?;
        let token = self.jwt_service.create_token(&user)?;

        log::info!("Registered user {}", user.id);

        Ok(RegisterUserResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn get_user(&self, id: &str) -> AppResult<UserDto> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))?;

        Ok(user.into())
    }
}
