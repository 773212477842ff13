//! Error types for the object pool

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Type not registered: `{0}`")]
    UnknownType(String),

    #[error("Pool for this type already exists: `{0}`")]
    AlreadyExists(String),

    #[error("Object type does not match expected type (expected `{expected}`, got `{found}`)")]
    TypeMismatch { expected: String, found: String },

    /// Raised before a pool is touched, when the object's declared type is not
    /// the one the pool was created for.
    #[error("Object type does not match pool type (pool `{pool}` holds `{expected}`, got `{found}`)")]
    PoolTypeMismatch {
        pool: String,
        expected: String,
        found: String,
    },

    #[error("Input list is too large. Pool is at maximum capacity ({0})")]
    CapacityExceeded(usize),

    #[error("Pool not found: `{0}`")]
    PoolNotFound(String),

    #[error("Object not found in pool")]
    ObjectNotFound,

    #[error("No objects in the pool")]
    EmptyPool,
}

/// Coarse classification of a [`PoolError`].
///
/// Both type mismatch variants share [`ErrorKind::TypeMismatch`], and a
/// missing pool shares [`ErrorKind::NotFound`] with a missing object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownType,
    AlreadyExists,
    TypeMismatch,
    CapacityExceeded,
    NotFound,
    EmptyPool,
}

impl PoolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PoolError::UnknownType(_) => ErrorKind::UnknownType,
            PoolError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            PoolError::TypeMismatch { .. } | PoolError::PoolTypeMismatch { .. } => {
                ErrorKind::TypeMismatch
            }
            PoolError::CapacityExceeded(_) => ErrorKind::CapacityExceeded,
            PoolError::PoolNotFound(_) | PoolError::ObjectNotFound => ErrorKind::NotFound,
            PoolError::EmptyPool => ErrorKind::EmptyPool,
        }
    }

    /// Whether the error means something the caller asked for does not exist
    /// (a pool, an object, or any member at all).
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound | ErrorKind::EmptyPool)
    }
}

pub type PoolResult<T> = Result<T, PoolError>;

/// Errors raised while loading or validating [`crate::PoolConfiguration`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MAX_POOL_SIZE must be a positive integer, got `{0}`")]
    InvalidMaxPoolSize(String),

    #[error("Maximum pool size must be greater than zero")]
    ZeroCapacity,

    #[error("Invalid bind address `{0}`")]
    InvalidBindAddress(String),
}
