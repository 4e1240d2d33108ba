use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::connect_database,
    modules::{
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        post::{
            repository_pg::{CommentRepositoryPg, LikeRepositoryPg, PostRepositoryPg},
            service::PostService,
        },
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool = connect_database().await.map_err(|e| {
        log::error!("Database connection error: {e}");
        std::io::Error::other("Database connection error")
    })?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendRepositoryPg::new(db_pool.clone()));

    let user_service = UserService::with_dependencies(user_repo.clone());
    let friend_service = FriendService::with_dependencies(friend_repo, user_repo.clone());
    let post_service = PostService::with_dependencies(
        Arc::new(PostRepositoryPg::new(db_pool.clone())),
        Arc::new(CommentRepositoryPg::new(db_pool.clone())),
        Arc::new(LikeRepositoryPg::new(db_pool.clone())),
        user_repo,
    );

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .service(health_check)
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/users")
                            .configure(modules::user::route::configure)
                            .configure(modules::post::route::configure_user_content),
                    )
                    .configure(modules::friend::route::configure)
                    .configure(modules::post::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(ENV.workers)
    .run()
    .await
}
