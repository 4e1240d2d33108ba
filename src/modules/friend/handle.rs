use actix_web::{delete, get, post, web};

use crate::{
    api::{error, success},
    modules::{
        friend::{
            model::{FriendRequestsResponse, FriendResponse},
            repository_pg::FriendRepositoryPg,
            schema::FriendEntity,
            service::FriendService,
        },
        user::repository_pg::UserRepositoryPg,
    },
};

pub type FriendSvc = FriendService<FriendRepositoryPg, UserRepositoryPg>;

#[post("/{sender_id}/requests/{receiver_id}")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<FriendEntity>, error::Error> {
    let (sender_id, receiver_id) = path.into_inner();
    let request = friend_service.send_request_by_id(sender_id, receiver_id).await?;

    Ok(success::Success::created(Some(request)).message("Friend request sent successfully"))
}

#[post("/{sender_id}/requests/{receiver_id}/accept")]
pub async fn accept_friend_request(
    friend_service: web::Data<FriendSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<FriendEntity>, error::Error> {
    let (sender_id, receiver_id) = path.into_inner();
    let friendship = friend_service.accept_request(sender_id, receiver_id).await?;

    Ok(success::Success::ok(Some(friendship)).message("Friend request accepted successfully"))
}

#[post("/{sender_id}/requests/{receiver_id}/decline")]
pub async fn decline_friend_request(
    friend_service: web::Data<FriendSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<()>, error::Error> {
    let (sender_id, receiver_id) = path.into_inner();
    friend_service.decline_request(sender_id, receiver_id).await?;
    Ok(success::Success::no_content())
}

#[get("/{user_id}")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    user_id: web::Path<i64>,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let friends = friend_service.get_friends(user_id.into_inner()).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[get("/{user_id}/requests")]
pub async fn list_friend_requests(
    friend_service: web::Data<FriendSvc>,
    user_id: web::Path<i64>,
) -> Result<success::Success<FriendRequestsResponse>, error::Error> {
    let requests = friend_service.get_friend_requests(user_id.into_inner()).await?;

    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}

#[get("/{user_id}/with/{other_id}")]
pub async fn get_relationship(
    friend_service: web::Data<FriendSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<FriendEntity>, error::Error> {
    let (user_id, other_id) = path.into_inner();
    let edge = friend_service
        .find_relationship(user_id, other_id)
        .await?
        .ok_or_else(|| error::Error::NotFound("No relationship between these users".into()))?;

    Ok(success::Success::ok(Some(edge)).message("Relationship retrieved successfully"))
}

#[delete("/{user_id}/{friend_id}")]
pub async fn remove_friend(
    friend_service: web::Data<FriendSvc>,
    path: web::Path<(i64, i64)>,
) -> Result<success::Success<()>, error::Error> {
    let (user_id, friend_id) = path.into_inner();
    friend_service.remove_friendship_by_id(user_id, friend_id).await?;
    Ok(success::Success::no_content())
}
