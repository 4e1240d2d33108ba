use actix_web::{delete, get, patch, post, web};

use crate::{
    api::{error, success},
    modules::{
        post::{
            model,
            repository_pg::{CommentRepositoryPg, LikeRepositoryPg, PostRepositoryPg},
            schema::{CommentEntity, LikeEntity, PostEntity},
            service::PostService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type PostSvc =
    PostService<PostRepositoryPg, CommentRepositoryPg, LikeRepositoryPg, UserRepositoryPg>;

const DEFAULT_TOP_POSTS: usize = 10;

#[post("")]
pub async fn create_post(
    post_service: web::Data<PostSvc>,
    body: ValidatedJson<model::CreatePostModel>,
) -> Result<success::Success<PostEntity>, error::Error> {
    let post = post_service.create_post(body.0.user_id, &body.0.content).await?;
    Ok(success::Success::created(Some(post)).message("Post created successfully"))
}

#[get("")]
pub async fn list_posts(
    post_service: web::Data<PostSvc>,
) -> Result<success::Success<Vec<PostEntity>>, error::Error> {
    let posts = post_service.list_posts().await?;
    Ok(success::Success::ok(Some(posts)).message("Posts retrieved successfully"))
}

#[get("/search")]
pub async fn search_posts(
    post_service: web::Data<PostSvc>,
    query: ValidatedQuery<model::SearchQuery>,
) -> Result<success::Success<Vec<PostEntity>>, error::Error> {
    let posts = post_service.search_posts(&query.0.keyword).await?;
    Ok(success::Success::ok(Some(posts)).message("Posts retrieved successfully"))
}

#[get("/range")]
pub async fn posts_between(
    post_service: web::Data<PostSvc>,
    query: ValidatedQuery<model::DateRangeQuery>,
) -> Result<success::Success<Vec<PostEntity>>, error::Error> {
    let posts = post_service.get_posts_between(query.0.start, query.0.end).await?;
    Ok(success::Success::ok(Some(posts)).message("Posts retrieved successfully"))
}

#[get("/{id}")]
pub async fn get_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
) -> Result<success::Success<PostEntity>, error::Error> {
    let post = post_service.get_post(post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(post)).message("Post retrieved successfully"))
}

#[patch("/{id}")]
pub async fn update_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
    body: ValidatedJson<model::UpdateContentModel>,
) -> Result<success::Success<PostEntity>, error::Error> {
    let post = post_service.update_post(post_id.into_inner(), &body.0.content).await?;
    Ok(success::Success::ok(Some(post)).message("Post updated successfully"))
}

#[delete("/{id}")]
pub async fn delete_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
) -> Result<success::Success<()>, error::Error> {
    post_service.delete_post(post_id.into_inner()).await?;
    Ok(success::Success::no_content())
}

#[post("/{id}/comments")]
pub async fn add_comment(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
    body: ValidatedJson<model::CreateCommentModel>,
) -> Result<success::Success<CommentEntity>, error::Error> {
    let comment =
        post_service.add_comment(post_id.into_inner(), body.0.user_id, &body.0.content).await?;
    Ok(success::Success::created(Some(comment)).message("Comment added successfully"))
}

#[get("/{id}/comments")]
pub async fn list_comments(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
) -> Result<success::Success<Vec<CommentEntity>>, error::Error> {
    let comments = post_service.get_comments_by_post(post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(comments)).message("Comments retrieved successfully"))
}

#[get("/{id}/likes")]
pub async fn list_likes(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
) -> Result<success::Success<Vec<LikeEntity>>, error::Error> {
    let likes = post_service.get_likes_by_post(post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(likes)).message("Likes retrieved successfully"))
}

#[post("/{id}/likes/{user_id}")]
pub async fn like_post(
    post_service: web::Data<PostSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<LikeEntity>, error::Error> {
    let (post_id, user_id) = path.into_inner();
    let like = post_service.add_like(post_id, user_id).await?;
    Ok(success::Success::created(Some(like)).message("Post liked successfully"))
}

#[delete("/{id}/likes/{user_id}")]
pub async fn unlike_post(
    post_service: web::Data<PostSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<()>, error::Error> {
    let (post_id, user_id) = path.into_inner();
    post_service.remove_like(post_id, user_id).await?;
    Ok(success::Success::no_content())
}

#[get("/{id}")]
pub async fn get_comment(
    post_service: web::Data<PostSvc>,
    comment_id: web::Path<i64>,
) -> Result<success::Success<CommentEntity>, error::Error> {
    let comment = post_service.get_comment(comment_id.into_inner()).await?;
    Ok(success::Success::ok(Some(comment)).message("Comment retrieved successfully"))
}

#[patch("/{id}")]
pub async fn update_comment(
    post_service: web::Data<PostSvc>,
    comment_id: web::Path<i64>,
    body: ValidatedJson<model::UpdateContentModel>,
) -> Result<success::Success<CommentEntity>, error::Error> {
    let comment = post_service.update_comment(comment_id.into_inner(), &body.0.content).await?;
    Ok(success::Success::ok(Some(comment)).message("Comment updated successfully"))
}

#[delete("/{id}")]
pub async fn delete_comment(
    post_service: web::Data<PostSvc>,
    comment_id: web::Path<i64>,
) -> Result<success::Success<()>, error::Error> {
    post_service.delete_comment(comment_id.into_inner()).await?;
    Ok(success::Success::no_content())
}

#[get("/{id}")]
pub async fn get_like(
    post_service: web::Data<PostSvc>,
    like_id: web::Path<i64>,
) -> Result<success::Success<LikeEntity>, error::Error> {
    let like = post_service.get_like(like_id.into_inner()).await?;
    Ok(success::Success::ok(Some(like)).message("Like retrieved successfully"))
}

#[get("/{id}/posts")]
pub async fn list_user_posts(
    post_service: web::Data<PostSvc>,
    user_id: web::Path<i64>,
) -> Result<success::Success<Vec<PostEntity>>, error::Error> {
    let posts = post_service.get_posts_by_user(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(posts)).message("Posts retrieved successfully"))
}

#[get("/{id}/posts/top")]
pub async fn top_user_posts(
    post_service: web::Data<PostSvc>,
    user_id: web::Path<i64>,
    query: ValidatedQuery<model::TopPostsQuery>,
) -> Result<success::Success<Vec<model::RankedPost>>, error::Error> {
    let limit = query.0.limit.unwrap_or(DEFAULT_TOP_POSTS);
    let posts = post_service.get_top_posts_for_user(user_id.into_inner(), limit).await?;
    Ok(success::Success::ok(Some(posts)).message("Top posts retrieved successfully"))
}

#[get("/{id}/likes")]
pub async fn list_user_likes(
    post_service: web::Data<PostSvc>,
    user_id: web::Path<i64>,
) -> Result<success::Success<Vec<LikeEntity>>, error::Error> {
    let likes = post_service.get_likes_by_user(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(likes)).message("Likes retrieved successfully"))
}
