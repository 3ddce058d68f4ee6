//! Signup, login and session use cases.
//!
//! # Invariants
//! - Passwords are stored only as argon2 hashes.
//! - A failed login never reveals whether the username exists.
//! - Session keys are random UUID v4 strings.

use super::{ServiceError, ServiceResult, Submission};
use crate::forms::{LoginForm, LoginInput, SignupForm, SignupInput, USERNAME_TAKEN_MESSAGE};
use crate::model::user::{Session, User, UserId};
use crate::password::{hash_password, verify_password};
use crate::repo::user_repo::UserRepository;
use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

/// User service facade over repository implementations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers an account from the signup form.
    pub fn signup(&self, input: &SignupInput) -> ServiceResult<Submission<User, SignupForm>> {
        let data = match SignupForm::clean(input) {
            Ok(data) => data,
            Err(form) => return Ok(Submission::Rejected(form)),
        };
        if self.repo.find_by_username(&data.username)?.is_some() {
            return Ok(Submission::Rejected(SignupForm::rejected(
                &data.username,
                "username",
                USERNAME_TAKEN_MESSAGE,
            )));
        }

        match self.create_user(&data.username, &data.password) {
            Ok(user) => Ok(Submission::Accepted(user)),
            Err(ServiceError::Conflict(_)) => Ok(Submission::Rejected(SignupForm::rejected(
                &data.username,
                "username",
                USERNAME_TAKEN_MESSAGE,
            ))),
            Err(err) => Err(err),
        }
    }

    /// Creates an account directly, bypassing form rules.
    pub fn create_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        let hash = hash_password(password).map_err(ServiceError::Password)?;
        let id = self.repo.create_user(username, &hash, Utc::now())?;
        info!("event=user_create module=users status=ok user_id={id}");
        self.get_user(id)
    }

    /// Checks credentials; `None` covers unknown users and wrong passwords.
    pub fn authenticate(&self, username: &str, password: &str) -> ServiceResult<Option<User>> {
        let user = self.repo.find_by_username(username.trim())?;
        Ok(user.filter(|user| verify_password(&user.password_hash, password)))
    }

    /// Authenticates the login form and opens a session on success.
    pub fn login(&self, input: &LoginInput) -> ServiceResult<Submission<Session, LoginForm>> {
        match self.authenticate(&input.username, &input.password)? {
            Some(user) => self.start_session(&user).map(Submission::Accepted),
            None => {
                warn!("event=login module=users status=rejected");
                Ok(Submission::Rejected(LoginForm::invalid(input)))
            }
        }
    }

    pub fn start_session(&self, user: &User) -> ServiceResult<Session> {
        let session = Session {
            key: Uuid::new_v4().to_string(),
            user_id: user.id,
            created_at: Utc::now(),
        };
        self.repo.create_session(&session)?;
        info!("event=session_start module=users status=ok user_id={}", user.id);
        Ok(session)
    }

    pub fn resolve_session(&self, key: &str) -> ServiceResult<Option<User>> {
        Ok(self.repo.get_session_user(key)?)
    }

    /// Ends a session; unknown keys are not an error.
    pub fn end_session(&self, key: &str) -> ServiceResult<bool> {
        let removed = self.repo.delete_session(key)?;
        if removed {
            info!("event=session_end module=users status=ok");
        }
        Ok(removed)
    }

    fn get_user(&self, id: UserId) -> ServiceResult<User> {
        self.repo
            .get_user(id)?
            .ok_or_else(|| ServiceError::not_found("user", id))
    }
}
