use crate::api::error;
use crate::modules::friend::schema::{FriendEntity, FriendKey, FriendStatus};

/// A unit of work over the edge set.
///
/// Every read and write of one friendship operation goes through the same transaction.
/// Nothing becomes visible until [`FriendTransaction::commit`]; dropping the transaction
/// rolls it back.
#[async_trait::async_trait]
pub trait FriendTransaction: Send {
    /// Serializes concurrent operations on the same unordered pair until commit or rollback.
    async fn lock_pair(&mut self, key: &FriendKey) -> Result<(), error::SystemError>;

    async fn find_edge(
        &mut self,
        key: &FriendKey,
    ) -> Result<Option<FriendEntity>, error::SystemError>;

    async fn find_edge_with_status(
        &mut self,
        key: &FriendKey,
        status: FriendStatus,
    ) -> Result<Option<FriendEntity>, error::SystemError>;

    /// Inserts a PENDING edge. Fails with a storage conflict when any edge already
    /// exists for the unordered pair.
    async fn insert_edge(&mut self, key: &FriendKey) -> Result<FriendEntity, error::SystemError>;

    async fn update_edge_status(
        &mut self,
        edge: &FriendEntity,
        status: FriendStatus,
    ) -> Result<FriendEntity, error::SystemError>;

    async fn delete_edge(&mut self, edge: &FriendEntity) -> Result<(), error::SystemError>;

    async fn commit(self: Box<Self>) -> Result<(), error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn FriendTransaction>, error::SystemError>;

    /// The edge between two users in either direction, any status.
    async fn find_edge_between(
        &self,
        user_id_a: i64,
        user_id_b: i64,
    ) -> Result<Option<FriendEntity>, error::SystemError>;

    /// Edges with the given status where the user is requester or recipient, oldest first.
    async fn find_edges_for_user(
        &self,
        user_id: i64,
        status: FriendStatus,
    ) -> Result<Vec<FriendEntity>, error::SystemError>;
}
