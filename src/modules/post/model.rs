use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::post::schema::PostEntity;

#[derive(Deserialize, Validate)]
pub struct CreatePostModel {
    pub user_id: i64,
    #[validate(length(min = 1, max = 10000, message = "Content must be 1 to 10000 characters"))]
    pub content: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateContentModel {
    #[validate(length(min = 1, max = 10000, message = "Content must be 1 to 10000 characters"))]
    pub content: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateCommentModel {
    pub user_id: i64,
    #[validate(length(min = 1, max = 2000, message = "Content must be 1 to 2000 characters"))]
    pub content: String,
}

#[derive(Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, message = "Keyword cannot be empty"))]
    pub keyword: String,
}

#[derive(Deserialize, Validate)]
pub struct DateRangeQuery {
    pub start: chrono::DateTime<chrono::Utc>,
    pub end: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Validate)]
pub struct TopPostsQuery {
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedPost {
    #[serde(flatten)]
    pub post: PostEntity,
    pub like_count: i64,
}
