use actix_web::{delete, get, post, web};

use crate::api::{error, success};
use crate::modules::user::{model, service::UserService};
use crate::utils::{ValidatedJson, ValidatedQuery};

#[post("")]
pub async fn register(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::SignUpModel>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.register(user_data.0).await?;
    Ok(success::Success::created(Some(user)).message("User registered successfully"))
}

#[get("")]
pub async fn list_users(
    user_service: web::Data<UserService>,
) -> Result<success::Success<Vec<model::UserResponse>>, error::Error> {
    let users = user_service.list().await?;
    Ok(success::Success::ok(Some(users)).message("Users retrieved successfully"))
}

#[get("/search")]
pub async fn search_user(
    user_service: web::Data<UserService>,
    query: ValidatedQuery<model::UserLookupQuery>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = match (&query.0.username, &query.0.email) {
        (Some(username), _) => user_service.find_by_username(username).await?,
        (None, Some(email)) => user_service.find_by_email(email).await?,
        (None, None) => {
            return Err(error::Error::bad_request("Either username or email is required"));
        }
    };

    let user = user.ok_or_else(|| error::Error::NotFound("User not found".into()))?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[get("/{id}")]
pub async fn get_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_id(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[delete("/{id}")]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<success::Success<()>, error::Error> {
    user_service.delete(user_id.into_inner()).await?;
    Ok(success::Success::no_content())
}
