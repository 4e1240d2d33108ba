use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PostEntity {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CommentEntity {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LikeEntity {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
