use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            // Has Message
            Error::NotFound(msg) | Error::Conflict(msg) | Error::BadRequest(msg) => {
                res.json(ErrorBody { message: msg.clone() })
            }
            // No Message
            Error::InternalServer => {
                res.json(ErrorBody { message: "Internal Server Error".into() })
            }
        }
    }
}

/// Faults raised by the backing store. Services pass these through untouched.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Database Error : {0}")]
    Database(Cow<'static, str>),
    #[error("Database Conflict: {0:?}")]
    Conflict(Option<DbErrorMeta>),
    #[error("Internal Storage Error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // argon2 errors
    #[error("Hash Error")]
    HashError(#[from] argon2::password_hash::Error),
    // sqlx and other storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),
    // Custom Errors
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Cannot send a friend request to yourself")]
    SelfRequest,
    #[error("Friend request already exists between these users")]
    DuplicateRequest,
    #[error("Pending friend request not found from sender to receiver")]
    RequestNotFound,
    #[error("No active friendship found between these users")]
    FriendshipNotFound,
    #[error("User {user_id} has already liked post {post_id}")]
    AlreadyLiked { user_id: i64, post_id: i64 },
}

fn conflict_message(meta: &Option<DbErrorMeta>) -> Cow<'static, str> {
    let Some(m) = meta else {
        return "Duplicate value".into();
    };

    let Some(constraint) = &m.constraint else {
        return "Duplicate value".into();
    };

    let field = constraint.split('_').next_back().unwrap_or("value");

    let mut chars = field.chars();
    let field = match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Value".to_string(),
    };

    format!("{field} already exists").into()
}

#[derive(Debug)]
pub struct DbErrorMeta {
    pub code: Option<String>,
    pub constraint: Option<String>,
    pub message: String,
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::SelfRequest => Error::BadRequest(value.to_string().into()),
            SystemError::NotFound { .. }
            | SystemError::RequestNotFound
            | SystemError::FriendshipNotFound => Error::NotFound(value.to_string().into()),
            SystemError::DuplicateRequest | SystemError::AlreadyLiked { .. } => {
                Error::Conflict(value.to_string().into())
            }
            SystemError::Storage(StorageError::Conflict(meta)) => {
                Error::Conflict(conflict_message(&meta))
            }
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("{:?}", err);
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return StorageError::Conflict(Some(DbErrorMeta {
                    code: db_err.code().map(|s| s.to_string()),
                    constraint: db_err.constraint().map(|s| s.to_string()),
                    message: db_err.message().to_string(),
                }));
            }
            log::error!("Unhandled DB error: {:?}", db_err);
            return StorageError::Database(db_err.message().to_string().into());
        }
        StorageError::Internal(Box::new(err))
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        SystemError::Storage(err.into())
    }
}

impl From<sqlx::migrate::MigrateError> for SystemError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        SystemError::Storage(StorageError::Internal(Box::new(err)))
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Storage(StorageError::Conflict(_)))
    }
}
