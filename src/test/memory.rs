//! In-memory repositories used by the service tests.
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::api::error::{DbErrorMeta, StorageError, SystemError};
use crate::modules::friend::repository::{FriendRepository, FriendTransaction};
use crate::modules::friend::schema::{FriendEntity, FriendKey, FriendStatus};
use crate::modules::post::repository::{CommentRepository, LikeRepository, PostRepository};
use crate::modules::post::schema::{CommentEntity, LikeEntity, PostEntity};
use crate::modules::user::model::InsertUser;
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::UserEntity;

pub fn conflict(constraint: &str) -> SystemError {
    SystemError::Storage(StorageError::Conflict(Some(DbErrorMeta {
        code: Some("23505".to_string()),
        constraint: Some(constraint.to_string()),
        message: format!("duplicate key value violates unique constraint \"{constraint}\""),
    })))
}

#[derive(Clone, Default)]
struct Sequence(Arc<AtomicI64>);

impl Sequence {
    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[derive(Clone, Default)]
pub struct UserRepositoryMem {
    users: Arc<StdMutex<BTreeMap<i64, UserEntity>>>,
    ids: Sequence,
}

impl UserRepositoryMem {
    pub async fn seed(&self, username: &str) -> UserEntity {
        let user = InsertUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: format!("hashed-{username}"),
        };
        self.create(&user).await.unwrap()
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryMem {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, SystemError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<UserEntity>, SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().filter(|user| ids.contains(&user.id)).cloned().collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserEntity>, SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|user| user.username.eq_ignore_ascii_case(username)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|user| user.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn find_all(&self) -> Result<Vec<UserEntity>, SystemError> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, SystemError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username.eq_ignore_ascii_case(&user.username)) {
            return Err(conflict("users_username"));
        }
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(conflict("users_email"));
        }

        let entity = UserEntity {
            id: self.ids.next(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<bool, SystemError> {
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }
}

type EdgeSet = BTreeMap<FriendKey, FriendEntity>;

/// Edge store whose transactions hold the whole set until commit or drop.
#[derive(Clone, Default)]
pub struct FriendRepositoryMem {
    edges: Arc<Mutex<EdgeSet>>,
    fail_commits: Arc<AtomicBool>,
}

impl FriendRepositoryMem {
    pub async fn snapshot(&self) -> Vec<FriendEntity> {
        self.edges.lock().await.values().cloned().collect()
    }

    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

pub struct FriendTransactionMem {
    committed: OwnedMutexGuard<EdgeSet>,
    staged: EdgeSet,
    fail_commit: bool,
}

#[async_trait::async_trait]
impl FriendTransaction for FriendTransactionMem {
    async fn lock_pair(&mut self, _key: &FriendKey) -> Result<(), SystemError> {
        Ok(())
    }

    async fn find_edge(&mut self, key: &FriendKey) -> Result<Option<FriendEntity>, SystemError> {
        Ok(self.staged.get(key).cloned())
    }

    async fn find_edge_with_status(
        &mut self,
        key: &FriendKey,
        status: FriendStatus,
    ) -> Result<Option<FriendEntity>, SystemError> {
        Ok(self.staged.get(key).filter(|edge| edge.status == status).cloned())
    }

    async fn insert_edge(&mut self, key: &FriendKey) -> Result<FriendEntity, SystemError> {
        if self.staged.contains_key(key) || self.staged.contains_key(&key.reversed()) {
            return Err(conflict("friends_pair_key"));
        }

        let edge = FriendEntity {
            user_id: key.requester,
            friend_id: key.recipient,
            status: FriendStatus::Pending,
            created_at: Utc::now(),
        };
        self.staged.insert(*key, edge.clone());
        Ok(edge)
    }

    async fn update_edge_status(
        &mut self,
        edge: &FriendEntity,
        status: FriendStatus,
    ) -> Result<FriendEntity, SystemError> {
        let stored = self.staged.get_mut(&edge.key()).ok_or(SystemError::RequestNotFound)?;
        stored.status = status;
        Ok(stored.clone())
    }

    async fn delete_edge(&mut self, edge: &FriendEntity) -> Result<(), SystemError> {
        self.staged.remove(&edge.key());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), SystemError> {
        let FriendTransactionMem { mut committed, staged, fail_commit } = *self;
        if fail_commit {
            return Err(SystemError::Storage(StorageError::Database("commit failed".into())));
        }
        *committed = staged;
        Ok(())
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryMem {
    async fn begin(&self) -> Result<Box<dyn FriendTransaction>, SystemError> {
        let committed = self.edges.clone().lock_owned().await;
        let staged = committed.clone();
        Ok(Box::new(FriendTransactionMem {
            committed,
            staged,
            fail_commit: self.fail_commits.load(Ordering::SeqCst),
        }))
    }

    async fn find_edge_between(
        &self,
        user_id_a: i64,
        user_id_b: i64,
    ) -> Result<Option<FriendEntity>, SystemError> {
        let key = FriendKey::new(user_id_a, user_id_b);
        let edges = self.edges.lock().await;
        Ok(edges.get(&key).or_else(|| edges.get(&key.reversed())).cloned())
    }

    async fn find_edges_for_user(
        &self,
        user_id: i64,
        status: FriendStatus,
    ) -> Result<Vec<FriendEntity>, SystemError> {
        let edges = self.edges.lock().await;
        let mut found: Vec<FriendEntity> = edges
            .values()
            .filter(|edge| edge.status == status)
            .filter(|edge| edge.user_id == user_id || edge.friend_id == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|edge| (edge.created_at, edge.key()));
        Ok(found)
    }
}

fn newest_first(posts: &mut [PostEntity]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[derive(Clone, Default)]
pub struct PostRepositoryMem {
    posts: Arc<StdMutex<BTreeMap<i64, PostEntity>>>,
    ids: Sequence,
}

impl PostRepositoryMem {
    pub fn insert_at(&self, user_id: i64, content: &str, created_at: DateTime<Utc>) -> PostEntity {
        let post = PostEntity {
            id: self.ids.next(),
            user_id,
            content: content.to_string(),
            created_at,
            updated_at: created_at,
        };
        self.posts.lock().unwrap().insert(post.id, post.clone());
        post
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryMem {
    async fn create(&self, user_id: i64, content: &str) -> Result<PostEntity, SystemError> {
        Ok(self.insert_at(user_id, content, Utc::now()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostEntity>, SystemError> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<PostEntity>, SystemError> {
        Ok(self.posts.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<PostEntity>, SystemError> {
        let mut posts: Vec<PostEntity> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<PostEntity>, SystemError> {
        let mut posts = self.posts.lock().unwrap();
        Ok(posts.get_mut(&id).map(|post| {
            post.content = content.to_string();
            post.updated_at = Utc::now();
            post.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, SystemError> {
        Ok(self.posts.lock().unwrap().remove(&id).is_some())
    }

    async fn search_by_content(&self, keyword: &str) -> Result<Vec<PostEntity>, SystemError> {
        let keyword = keyword.to_lowercase();
        let mut posts: Vec<PostEntity> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|post| post.content.to_lowercase().contains(&keyword))
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PostEntity>, SystemError> {
        let mut posts: Vec<PostEntity> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|post| post.created_at >= start && post.created_at <= end)
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }
}

#[derive(Clone, Default)]
pub struct CommentRepositoryMem {
    comments: Arc<StdMutex<BTreeMap<i64, CommentEntity>>>,
    ids: Sequence,
}

#[async_trait::async_trait]
impl CommentRepository for CommentRepositoryMem {
    async fn create(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentEntity, SystemError> {
        let now = Utc::now();
        let comment = CommentEntity {
            id: self.ids.next(),
            post_id,
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.comments.lock().unwrap().insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CommentEntity>, SystemError> {
        Ok(self.comments.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<CommentEntity>, SystemError> {
        let mut comments: Vec<CommentEntity> = self
            .comments
            .lock()
            .unwrap()
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| (comment.created_at, comment.id));
        Ok(comments)
    }

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<CommentEntity>, SystemError> {
        let mut comments = self.comments.lock().unwrap();
        Ok(comments.get_mut(&id).map(|comment| {
            comment.content = content.to_string();
            comment.updated_at = Utc::now();
            comment.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, SystemError> {
        Ok(self.comments.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Clone, Default)]
pub struct LikeRepositoryMem {
    likes: Arc<StdMutex<BTreeMap<i64, LikeEntity>>>,
    ids: Sequence,
}

#[async_trait::async_trait]
impl LikeRepository for LikeRepositoryMem {
    async fn create(&self, post_id: i64, user_id: i64) -> Result<LikeEntity, SystemError> {
        let mut likes = self.likes.lock().unwrap();
        if likes.values().any(|like| like.post_id == post_id && like.user_id == user_id) {
            return Err(conflict("likes_user_post"));
        }

        let like = LikeEntity { id: self.ids.next(), post_id, user_id, created_at: Utc::now() };
        likes.insert(like.id, like.clone());
        Ok(like)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LikeEntity>, SystemError> {
        Ok(self.likes.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_user_and_post(
        &self,
        user_id: i64,
        post_id: i64,
    ) -> Result<Option<LikeEntity>, SystemError> {
        let likes = self.likes.lock().unwrap();
        Ok(likes.values().find(|like| like.user_id == user_id && like.post_id == post_id).cloned())
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<LikeEntity>, SystemError> {
        let likes = self.likes.lock().unwrap();
        Ok(likes.values().filter(|like| like.post_id == post_id).cloned().collect())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<LikeEntity>, SystemError> {
        let likes = self.likes.lock().unwrap();
        Ok(likes.values().filter(|like| like.user_id == user_id).cloned().collect())
    }

    async fn count_by_posts(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>, SystemError> {
        let likes = self.likes.lock().unwrap();
        let mut counts = HashMap::new();
        for like in likes.values().filter(|like| post_ids.contains(&like.post_id)) {
            *counts.entry(like.post_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn delete(&self, id: i64) -> Result<bool, SystemError> {
        Ok(self.likes.lock().unwrap().remove(&id).is_some())
    }
}
