use crate::modules::post::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/posts")
            .service(create_post)
            .service(list_posts)
            .service(search_posts)
            .service(posts_between)
            .service(get_post)
            .service(update_post)
            .service(delete_post)
            .service(add_comment)
            .service(list_comments)
            .service(list_likes)
            .service(like_post)
            .service(unlike_post),
    )
    .service(
        scope("/comments").service(get_comment).service(update_comment).service(delete_comment),
    )
    .service(scope("/likes").service(get_like));
}

/// Per-user content routes, mounted inside the `/users` scope.
pub fn configure_user_content(cfg: &mut ServiceConfig) {
    cfg.service(list_user_posts).service(top_user_posts).service(list_user_likes);
}
