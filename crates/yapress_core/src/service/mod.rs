//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into page-level use cases.
//! - Apply author-only access and form validation before any mutation.
//! - Produce the typed contexts templates render.
//!
//! # Invariants
//! - A resource owned by someone else is reported exactly like a missing one
//!   (`ServiceError::NotFound`); callers cannot tell the two apart.
//! - Invalid submissions are values (`Submission::Rejected`), not errors.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod news_service;
pub mod note_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T, C> {
    /// Input was valid and the change is persisted.
    Accepted(T),
    /// Input was invalid; the context carries the bound form with errors.
    Rejected(C),
}

impl<T, C> Submission<T, C> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejected(self) -> Option<C> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(context) => Some(context),
        }
    }
}

/// Service error for all use cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Resource is missing or not visible to the caller.
    NotFound { entity: &'static str, key: String },
    /// Unique value already taken outside of a form flow.
    Conflict(String),
    /// Input rejected outside of a form flow (admin commands).
    InvalidInput(String),
    /// Password hashing failed.
    Password(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Password(message) => write!(f, "password hashing failed: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, key } => Self::NotFound { entity, key },
            RepoError::Conflict(message) => Self::Conflict(message),
            other => Self::Repo(other),
        }
    }
}
