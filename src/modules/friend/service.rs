use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendRequestsResponse, FriendResponse},
            repository::{FriendRepository, FriendTransaction},
            schema::{FriendEntity, FriendKey, FriendStatus},
        },
        user::{repository::UserRepository, schema::UserEntity},
    },
};

/// Friend-edge state machine.
///
/// Edges move PENDING -> ACCEPTED on accept, and are deleted on decline (from PENDING) or
/// remove (from ACCEPTED). Each mutating operation runs inside one transaction that also
/// holds the pair lock, so the existence checks and the write commit together or not at
/// all.
#[derive(Clone)]
pub struct FriendService<R, U>
where
    R: FriendRepository,
    U: UserRepository + Send + Sync,
{
    friend_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> FriendService<R, U>
where
    R: FriendRepository,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(friend_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        FriendService { friend_repo, user_repo }
    }

    async fn resolve_user(
        &self,
        entity: &'static str,
        id: i64,
    ) -> Result<UserEntity, error::SystemError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found(entity, id))
    }

    pub async fn send_request(
        &self,
        sender: &UserEntity,
        receiver: &UserEntity,
    ) -> Result<FriendEntity, error::SystemError> {
        let key = FriendKey::new(sender.id, receiver.id);
        if key.is_self() {
            return Err(error::SystemError::SelfRequest);
        }

        let mut tx = self.friend_repo.begin().await?;
        tx.lock_pair(&key).await?;

        if tx.find_edge(&key).await?.is_some() || tx.find_edge(&key.reversed()).await?.is_some() {
            tracing::debug!(requester = key.requester, recipient = key.recipient, "edge already exists");
            return Err(error::SystemError::DuplicateRequest);
        }

        let edge = match tx.insert_edge(&key).await {
            Ok(edge) => edge,
            Err(e) if e.is_conflict() => return Err(error::SystemError::DuplicateRequest),
            Err(e) => return Err(e),
        };
        tx.commit().await?;

        tracing::info!(requester = key.requester, recipient = key.recipient, "friend request sent");
        Ok(edge)
    }

    pub async fn send_request_by_id(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<FriendEntity, error::SystemError> {
        let sender = self.resolve_user("sender", sender_id).await?;
        let receiver = self.resolve_user("receiver", receiver_id).await?;
        self.send_request(&sender, &receiver).await
    }

    /// Accepts the PENDING edge `sender_id -> receiver_id`. The caller must pass the
    /// original requester first; the reverse direction is not looked up.
    pub async fn accept_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<FriendEntity, error::SystemError> {
        let sender = self.resolve_user("sender", sender_id).await?;
        let receiver = self.resolve_user("receiver", receiver_id).await?;
        let key = FriendKey::new(sender.id, receiver.id);

        let mut tx = self.friend_repo.begin().await?;
        tx.lock_pair(&key).await?;

        let request = tx
            .find_edge_with_status(&key, FriendStatus::Pending)
            .await?
            .ok_or(error::SystemError::RequestNotFound)?;

        let accepted = tx.update_edge_status(&request, FriendStatus::Accepted).await?;
        tx.commit().await?;

        tracing::info!(requester = key.requester, recipient = key.recipient, "friend request accepted");
        Ok(accepted)
    }

    pub async fn decline_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<(), error::SystemError> {
        let sender = self.resolve_user("sender", sender_id).await?;
        let receiver = self.resolve_user("receiver", receiver_id).await?;
        let key = FriendKey::new(sender.id, receiver.id);

        let mut tx = self.friend_repo.begin().await?;
        tx.lock_pair(&key).await?;

        let request = tx
            .find_edge_with_status(&key, FriendStatus::Pending)
            .await?
            .ok_or(error::SystemError::RequestNotFound)?;

        tx.delete_edge(&request).await?;
        tx.commit().await?;

        tracing::info!(requester = key.requester, recipient = key.recipient, "friend request declined");
        Ok(())
    }

    /// Deletes the ACCEPTED edge between two users, whichever direction it was created in.
    /// The forward direction `user1 -> user2` is checked first.
    pub async fn remove_friendship(
        &self,
        user1: &UserEntity,
        user2: &UserEntity,
    ) -> Result<(), error::SystemError> {
        let key = FriendKey::new(user1.id, user2.id);

        let mut tx = self.friend_repo.begin().await?;
        tx.lock_pair(&key).await?;

        let friendship = match tx.find_edge_with_status(&key, FriendStatus::Accepted).await? {
            Some(edge) => edge,
            None => tx
                .find_edge_with_status(&key.reversed(), FriendStatus::Accepted)
                .await?
                .ok_or(error::SystemError::FriendshipNotFound)?,
        };

        tx.delete_edge(&friendship).await?;
        tx.commit().await?;

        tracing::info!(
            requester = friendship.user_id,
            recipient = friendship.friend_id,
            "friendship removed"
        );
        Ok(())
    }

    pub async fn remove_friendship_by_id(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<(), error::SystemError> {
        let user = self.resolve_user("user", user_id).await?;
        let friend = self.resolve_user("friend", friend_id).await?;
        self.remove_friendship(&user, &friend).await
    }

    pub async fn find_relationship(
        &self,
        user_id_a: i64,
        user_id_b: i64,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        self.friend_repo.find_edge_between(user_id_a, user_id_b).await
    }

    pub async fn get_friends(
        &self,
        user_id: i64,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        self.resolve_user("user", user_id).await?;

        let edges = self.friend_repo.find_edges_for_user(user_id, FriendStatus::Accepted).await?;
        let mut users = self.counterparts(user_id, &edges).await?;

        Ok(edges
            .iter()
            .filter_map(|edge| users.remove(&edge.key().counterpart(user_id)))
            .map(FriendResponse::from)
            .collect())
    }

    pub async fn get_friend_requests(
        &self,
        user_id: i64,
    ) -> Result<FriendRequestsResponse, error::SystemError> {
        self.resolve_user("user", user_id).await?;

        let edges = self.friend_repo.find_edges_for_user(user_id, FriendStatus::Pending).await?;
        let users = self.counterparts(user_id, &edges).await?;

        let mut response = FriendRequestsResponse::default();
        for edge in edges {
            let Some(user) = users.get(&edge.key().counterpart(user_id)) else {
                continue;
            };
            let incoming = edge.friend_id == user_id;
            let request = FriendRequestResponse::new(edge, FriendResponse::from(user.clone()));
            if incoming {
                response.incoming.push(request);
            } else {
                response.outgoing.push(request);
            }
        }

        Ok(response)
    }

    async fn counterparts(
        &self,
        user_id: i64,
        edges: &[FriendEntity],
    ) -> Result<HashMap<i64, UserEntity>, error::SystemError> {
        let ids: Vec<i64> = edges.iter().map(|edge| edge.key().counterpart(user_id)).collect();
        let users = self.user_repo.find_by_ids(&ids).await?;
        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}
