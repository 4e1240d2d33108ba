use sqlx::{Postgres, Transaction};

use crate::{
    api::error,
    modules::friend::{
        repository::{FriendRepository, FriendTransaction},
        schema::{FriendEntity, FriendKey, FriendStatus},
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

pub struct FriendTransactionPg {
    tx: Transaction<'static, Postgres>,
}

#[async_trait::async_trait]
impl FriendTransaction for FriendTransactionPg {
    async fn lock_pair(&mut self, key: &FriendKey) -> Result<(), error::SystemError> {
        let (low, high) = key.canonical();

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text || ':' || $2::text, 0))")
            .bind(low)
            .bind(high)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn find_edge(
        &mut self,
        key: &FriendKey,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let edge = sqlx::query_as::<_, FriendEntity>(
            "SELECT * FROM friends WHERE user_id = $1 AND friend_id = $2",
        )
        .bind(key.requester)
        .bind(key.recipient)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(edge)
    }

    async fn find_edge_with_status(
        &mut self,
        key: &FriendKey,
        status: FriendStatus,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let edge = sqlx::query_as::<_, FriendEntity>(
            "SELECT * FROM friends WHERE user_id = $1 AND friend_id = $2 AND status = $3 FOR UPDATE",
        )
        .bind(key.requester)
        .bind(key.recipient)
        .bind(status)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(edge)
    }

    async fn insert_edge(&mut self, key: &FriendKey) -> Result<FriendEntity, error::SystemError> {
        let edge = sqlx::query_as::<_, FriendEntity>(
            r#"
            INSERT INTO friends (user_id, friend_id, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(key.requester)
        .bind(key.recipient)
        .bind(FriendStatus::Pending)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(edge)
    }

    async fn update_edge_status(
        &mut self,
        edge: &FriendEntity,
        status: FriendStatus,
    ) -> Result<FriendEntity, error::SystemError> {
        let updated = sqlx::query_as::<_, FriendEntity>(
            r#"
            UPDATE friends
            SET status = $3
            WHERE user_id = $1 AND friend_id = $2
            RETURNING *
            "#,
        )
        .bind(edge.user_id)
        .bind(edge.friend_id)
        .bind(status)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or(error::SystemError::RequestNotFound)?;

        Ok(updated)
    }

    async fn delete_edge(&mut self, edge: &FriendEntity) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM friends WHERE user_id = $1 AND friend_id = $2")
            .bind(edge.user_id)
            .bind(edge.friend_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), error::SystemError> {
        let FriendTransactionPg { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn begin(&self) -> Result<Box<dyn FriendTransaction>, error::SystemError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(FriendTransactionPg { tx }))
    }

    async fn find_edge_between(
        &self,
        user_id_a: i64,
        user_id_b: i64,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let edge = sqlx::query_as::<_, FriendEntity>(
            r#"
            SELECT *
            FROM friends
            WHERE
                (user_id = $1 AND friend_id = $2)
            OR (user_id = $2 AND friend_id = $1)
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(edge)
    }

    async fn find_edges_for_user(
        &self,
        user_id: i64,
        status: FriendStatus,
    ) -> Result<Vec<FriendEntity>, error::SystemError> {
        let edges = sqlx::query_as::<_, FriendEntity>(
            r#"
            SELECT *
            FROM friends
            WHERE (user_id = $1 OR friend_id = $1)
              AND status = $2
            ORDER BY created_at, user_id, friend_id
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(edges)
    }
}
