//! Content service: posts, comments and likes.
//!
//! Every write resolves the referenced post and user first, so a dangling id surfaces
//! as `NotFound` instead of a foreign-key violation from the store.
use std::cmp::Reverse;
use std::sync::Arc;

use log::info;

use crate::api::error;
use crate::modules::post::model::RankedPost;
use crate::modules::post::repository::{CommentRepository, LikeRepository, PostRepository};
use crate::modules::post::schema::{CommentEntity, LikeEntity, PostEntity};
use crate::modules::user::repository::UserRepository;

#[derive(Clone)]
pub struct PostService<P, C, L, U>
where
    P: PostRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
    L: LikeRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
    like_repo: Arc<L>,
    user_repo: Arc<U>,
}

impl<P, C, L, U> PostService<P, C, L, U>
where
    P: PostRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
    L: LikeRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(
        post_repo: Arc<P>,
        comment_repo: Arc<C>,
        like_repo: Arc<L>,
        user_repo: Arc<U>,
    ) -> Self {
        PostService { post_repo, comment_repo, like_repo, user_repo }
    }

    async fn ensure_user(&self, user_id: i64) -> Result<(), error::SystemError> {
        match self.user_repo.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(error::SystemError::not_found("user", user_id)),
        }
    }

    pub async fn create_post(
        &self,
        user_id: i64,
        content: &str,
    ) -> Result<PostEntity, error::SystemError> {
        self.ensure_user(user_id).await?;
        let post = self.post_repo.create(user_id, content).await?;
        info!("Post {} created by user {}", post.id, user_id);
        Ok(post)
    }

    pub async fn get_post(&self, post_id: i64) -> Result<PostEntity, error::SystemError> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("post", post_id))
    }

    pub async fn list_posts(&self) -> Result<Vec<PostEntity>, error::SystemError> {
        self.post_repo.find_all().await
    }

    pub async fn get_posts_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        self.ensure_user(user_id).await?;
        self.post_repo.find_by_user(user_id).await
    }

    pub async fn update_post(
        &self,
        post_id: i64,
        content: &str,
    ) -> Result<PostEntity, error::SystemError> {
        self.post_repo
            .update_content(post_id, content)
            .await?
            .ok_or_else(|| error::SystemError::not_found("post", post_id))
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<(), error::SystemError> {
        if !self.post_repo.delete(post_id).await? {
            return Err(error::SystemError::not_found("post", post_id));
        }
        info!("Post {} deleted", post_id);
        Ok(())
    }

    pub async fn add_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError> {
        self.get_post(post_id).await?;
        self.ensure_user(user_id).await?;
        self.comment_repo.create(post_id, user_id, content).await
    }

    pub async fn get_comment(&self, comment_id: i64) -> Result<CommentEntity, error::SystemError> {
        self.comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("comment", comment_id))
    }

    pub async fn get_comments_by_post(
        &self,
        post_id: i64,
    ) -> Result<Vec<CommentEntity>, error::SystemError> {
        self.get_post(post_id).await?;
        self.comment_repo.find_by_post(post_id).await
    }

    pub async fn update_comment(
        &self,
        comment_id: i64,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError> {
        self.comment_repo
            .update_content(comment_id, content)
            .await?
            .ok_or_else(|| error::SystemError::not_found("comment", comment_id))
    }

    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), error::SystemError> {
        if !self.comment_repo.delete(comment_id).await? {
            return Err(error::SystemError::not_found("comment", comment_id));
        }
        Ok(())
    }

    pub async fn add_like(
        &self,
        post_id: i64,
        user_id: i64,
    ) -> Result<LikeEntity, error::SystemError> {
        self.get_post(post_id).await?;
        self.ensure_user(user_id).await?;

        if self.like_repo.find_by_user_and_post(user_id, post_id).await?.is_some() {
            return Err(error::SystemError::AlreadyLiked { user_id, post_id });
        }

        match self.like_repo.create(post_id, user_id).await {
            Err(e) if e.is_conflict() => Err(error::SystemError::AlreadyLiked { user_id, post_id }),
            result => result,
        }
    }

    pub async fn get_like(&self, like_id: i64) -> Result<LikeEntity, error::SystemError> {
        self.like_repo
            .find_by_id(like_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("like", like_id))
    }

    pub async fn get_likes_by_post(
        &self,
        post_id: i64,
    ) -> Result<Vec<LikeEntity>, error::SystemError> {
        self.get_post(post_id).await?;
        self.like_repo.find_by_post(post_id).await
    }

    pub async fn get_likes_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<LikeEntity>, error::SystemError> {
        self.ensure_user(user_id).await?;
        self.like_repo.find_by_user(user_id).await
    }

    pub async fn remove_like(&self, post_id: i64, user_id: i64) -> Result<(), error::SystemError> {
        self.get_post(post_id).await?;
        self.ensure_user(user_id).await?;

        let like = self
            .like_repo
            .find_by_user_and_post(user_id, post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("like", post_id))?;

        self.like_repo.delete(like.id).await?;
        Ok(())
    }

    pub async fn search_posts(&self, keyword: &str) -> Result<Vec<PostEntity>, error::SystemError> {
        self.post_repo.search_by_content(keyword).await
    }

    pub async fn get_posts_between(
        &self,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        if start > end {
            return Err(error::SystemError::bad_request("Start date must not be after end date"));
        }
        self.post_repo.find_between(start, end).await
    }

    /// A user's posts ranked by like count, most liked first. Ties keep the newest post
    /// first.
    pub async fn get_top_posts_for_user(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<RankedPost>, error::SystemError> {
        self.ensure_user(user_id).await?;

        let posts = self.post_repo.find_by_user(user_id).await?;
        let ids: Vec<i64> = posts.iter().map(|post| post.id).collect();
        let counts = self.like_repo.count_by_posts(&ids).await?;

        let mut ranked: Vec<RankedPost> = posts
            .into_iter()
            .map(|post| {
                let like_count = counts.get(&post.id).copied().unwrap_or(0);
                RankedPost { post, like_count }
            })
            .collect();
        ranked.sort_by_key(|entry| Reverse(entry.like_count));
        ranked.truncate(limit);

        Ok(ranked)
    }
}
