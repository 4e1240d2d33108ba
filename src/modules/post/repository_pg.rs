use std::collections::HashMap;

use crate::{
    api::error,
    modules::post::{
        repository::{CommentRepository, LikeRepository, PostRepository},
        schema::{CommentEntity, LikeEntity, PostEntity},
    },
};

#[derive(Clone)]
pub struct PostRepositoryPg {
    pool: sqlx::PgPool,
}

impl PostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryPg {
    async fn create(&self, user_id: i64, content: &str) -> Result<PostEntity, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>(
            "INSERT INTO posts (user_id, content) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<PostEntity>, error::SystemError> {
        let posts = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostEntity>, error::SystemError> {
        let posts = sqlx::query_as::<_, PostEntity>(
            "SELECT * FROM posts WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>(
            "UPDATE posts SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    async fn search_by_content(
        &self,
        keyword: &str,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        // `\` is the default LIKE escape, so it goes first.
        let escaped = keyword.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let search_pattern = format!("%{escaped}%");
        let posts = sqlx::query_as::<_, PostEntity>(
            "SELECT * FROM posts WHERE content ILIKE $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(&search_pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_between(
        &self,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        // has index on (created_at DESC)
        let posts = sqlx::query_as::<_, PostEntity>(
            r#"
            SELECT * FROM posts
            WHERE created_at BETWEEN $1 AND $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}

#[derive(Clone)]
pub struct CommentRepositoryPg {
    pool: sqlx::PgPool,
}

impl CommentRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CommentRepository for CommentRepositoryPg {
    async fn create(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>(
            "INSERT INTO comments (post_id, user_id, content) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CommentEntity>, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comment)
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<CommentEntity>, error::SystemError> {
        let comments = sqlx::query_as::<_, CommentEntity>(
            "SELECT * FROM comments WHERE post_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<CommentEntity>, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>(
            "UPDATE comments SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}

#[derive(Clone)]
pub struct LikeRepositoryPg {
    pool: sqlx::PgPool,
}

impl LikeRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LikeRepository for LikeRepositoryPg {
    async fn create(&self, post_id: i64, user_id: i64) -> Result<LikeEntity, error::SystemError> {
        let like = sqlx::query_as::<_, LikeEntity>(
            "INSERT INTO likes (post_id, user_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(like)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LikeEntity>, error::SystemError> {
        let like = sqlx::query_as::<_, LikeEntity>("SELECT * FROM likes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(like)
    }

    async fn find_by_user_and_post(
        &self,
        user_id: i64,
        post_id: i64,
    ) -> Result<Option<LikeEntity>, error::SystemError> {
        let like = sqlx::query_as::<_, LikeEntity>(
            "SELECT * FROM likes WHERE user_id = $1 AND post_id = $2",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(like)
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<LikeEntity>, error::SystemError> {
        let likes =
            sqlx::query_as::<_, LikeEntity>("SELECT * FROM likes WHERE post_id = $1 ORDER BY id")
                .bind(post_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(likes)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<LikeEntity>, error::SystemError> {
        let likes =
            sqlx::query_as::<_, LikeEntity>("SELECT * FROM likes WHERE user_id = $1 ORDER BY id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(likes)
    }

    async fn count_by_posts(
        &self,
        post_ids: &[i64],
    ) -> Result<HashMap<i64, i64>, error::SystemError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (i64, i64)>(
            "SELECT post_id, COUNT(*) FROM likes WHERE post_id = ANY($1) GROUP BY post_id",
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}
