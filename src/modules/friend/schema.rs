use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Type, Serialize, Deserialize)]
#[sqlx(type_name = "friend_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum FriendStatus {
    Pending,
    Accepted,
}

/// Identity of a directed edge: requester first, recipient second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FriendKey {
    pub requester: i64,
    pub recipient: i64,
}

impl FriendKey {
    pub fn new(requester: i64, recipient: i64) -> Self {
        FriendKey { requester, recipient }
    }

    pub fn reversed(&self) -> Self {
        FriendKey { requester: self.recipient, recipient: self.requester }
    }

    /// Unordered form of the pair, shared by both directions.
    pub fn canonical(&self) -> (i64, i64) {
        if self.requester <= self.recipient {
            (self.requester, self.recipient)
        } else {
            (self.recipient, self.requester)
        }
    }

    pub fn is_self(&self) -> bool {
        self.requester == self.recipient
    }

    /// The other side of the pair as seen from `user_id`.
    pub fn counterpart(&self, user_id: i64) -> i64 {
        if self.requester == user_id {
            self.recipient
        } else {
            self.requester
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FriendEntity {
    #[serde(rename = "requester_id")]
    pub user_id: i64,
    #[serde(rename = "recipient_id")]
    pub friend_id: i64,
    pub status: FriendStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FriendEntity {
    pub fn key(&self) -> FriendKey {
        FriendKey::new(self.user_id, self.friend_id)
    }
}
