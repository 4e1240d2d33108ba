use serde::{Deserialize, Serialize};

use crate::modules::friend::schema::{FriendEntity, FriendStatus};
use crate::modules::user::schema::UserEntity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FriendResponse {
    pub id: i64,
    pub username: String,
}

impl From<UserEntity> for FriendResponse {
    fn from(user: UserEntity) -> Self {
        FriendResponse { id: user.id, username: user.username }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FriendRequestResponse {
    pub requester_id: i64,
    pub recipient_id: i64,
    /// The user on the other end of the request.
    pub user: FriendResponse,
    pub status: FriendStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FriendRequestResponse {
    pub fn new(edge: FriendEntity, user: FriendResponse) -> Self {
        FriendRequestResponse {
            requester_id: edge.user_id,
            recipient_id: edge.friend_id,
            user,
            status: edge.status,
            created_at: edge.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FriendRequestsResponse {
    pub incoming: Vec<FriendRequestResponse>,
    pub outgoing: Vec<FriendRequestResponse>,
}
