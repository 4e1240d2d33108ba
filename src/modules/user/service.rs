use log::info;
use std::sync::Arc;

use crate::api::error;
use crate::modules::user::model::{InsertUser, SignUpModel, UserResponse};
use crate::modules::user::{repository::UserRepository, schema::UserEntity};
use crate::utils::hash_password;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn with_dependencies(repo: Arc<dyn UserRepository + Send + Sync>) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<UserResponse, error::SystemError> {
        self.find_entity(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| error::SystemError::not_found("user", id))
    }

    pub async fn find_entity(&self, id: i64) -> Result<Option<UserEntity>, error::SystemError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserResponse>, error::SystemError> {
        Ok(self.repo.find_by_username(username).await?.map(UserResponse::from))
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserResponse>, error::SystemError> {
        Ok(self.repo.find_by_email(email).await?.map(UserResponse::from))
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn register(&self, user: SignUpModel) -> Result<UserResponse, error::SystemError> {
        let password_hash = hash_password(&user.password)?;

        let new_user = InsertUser {
            username: user.username.trim().to_string(),
            email: user.email.trim().to_string(),
            password_hash,
        };

        let created = self.repo.create(&new_user).await?;
        info!("User {} registered as {}", created.id, created.username);
        Ok(UserResponse::from(created))
    }

    pub async fn delete(&self, id: i64) -> Result<(), error::SystemError> {
        if !self.repo.delete(id).await? {
            return Err(error::SystemError::not_found("user", id));
        }
        info!("User {} deleted", id);
        Ok(())
    }
}
