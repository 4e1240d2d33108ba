use crate::{
    api::error,
    modules::user::{model::InsertUser, schema::UserEntity},
};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, error::SystemError>;

    /// Resolves several users in one round-trip; missing ids are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError>;
}
