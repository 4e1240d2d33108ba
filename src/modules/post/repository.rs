use std::collections::HashMap;

use crate::api::error;
use crate::modules::post::schema::{CommentEntity, LikeEntity, PostEntity};

#[async_trait::async_trait]
pub trait PostRepository {
    async fn create(&self, user_id: i64, content: &str) -> Result<PostEntity, error::SystemError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<PostEntity>, error::SystemError>;

    async fn find_all(&self) -> Result<Vec<PostEntity>, error::SystemError>;

    /// Newest first.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostEntity>, error::SystemError>;

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<PostEntity>, error::SystemError>;

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError>;

    /// Case-insensitive substring match on content.
    async fn search_by_content(&self, keyword: &str)
    -> Result<Vec<PostEntity>, error::SystemError>;

    /// Inclusive on both ends, newest first.
    async fn find_between(
        &self,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<PostEntity>, error::SystemError>;
}

#[async_trait::async_trait]
pub trait CommentRepository {
    async fn create(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CommentEntity>, error::SystemError>;

    /// Oldest first.
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<CommentEntity>, error::SystemError>;

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<CommentEntity>, error::SystemError>;

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait LikeRepository {
    async fn create(&self, post_id: i64, user_id: i64) -> Result<LikeEntity, error::SystemError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<LikeEntity>, error::SystemError>;

    async fn find_by_user_and_post(
        &self,
        user_id: i64,
        post_id: i64,
    ) -> Result<Option<LikeEntity>, error::SystemError>;

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<LikeEntity>, error::SystemError>;

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<LikeEntity>, error::SystemError>;

    /// Like counts keyed by post id. Posts without likes are absent from the map.
    async fn count_by_posts(
        &self,
        post_ids: &[i64],
    ) -> Result<HashMap<i64, i64>, error::SystemError>;

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError>;
}
