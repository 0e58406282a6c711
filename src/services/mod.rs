//! Screen workflows over the gateway traits.
//!
//! Services are plain functions generic over the reader/writer traits they
//! need. Each one checks the session before touching the gateway, raises
//! the notices the screen shows, and returns the error to the caller so an
//! open form can stay open.

use thiserror::Error;

use crate::domain::types::Role;
use crate::notice::{Notice, Notifier};
use crate::repository::errors::RepositoryError;
use crate::session::{Session, SessionError};

pub mod accounts;
pub mod auth;
pub mod categories;
pub mod home;
pub mod news;
pub mod profile;
pub mod reports;
pub mod tags;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    /// User-facing validation message.
    #[error("{0}")]
    Form(String),
    #[error("Invalid value: {0}")]
    TypeConstraint(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Message to show for a failed `action`, e.g. "delete category".
    ///
    /// Messages supplied by the server and validation messages are shown
    /// verbatim.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            ServiceError::Form(message) => message.clone(),
            ServiceError::Repository(err) => match err.server_message() {
                Some(message) => message.to_string(),
                None => format!("Failed to {action}"),
            },
            _ => format!("Failed to {action}"),
        }
    }
}

/// Ensures the session is live and carries one of `roles`.
///
/// An empty `roles` slice only requires a live session.
pub fn ensure_role(session: &Session, roles: &[Role]) -> ServiceResult<()> {
    if !session.is_authenticated_now() {
        return Err(ServiceError::Unauthorized);
    }
    if roles.is_empty() || roles.iter().any(|role| session.has_role(*role)) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Logs a failed `action` and raises the matching error notice.
pub(crate) fn report_failure<T>(
    notifier: &dyn Notifier,
    action: &str,
    result: ServiceResult<T>,
) -> ServiceResult<T> {
    if let Err(err) = &result {
        log::error!("Failed to {action}: {err}");
        notifier.notify(Notice::error(err.user_message(action)));
    }
    result
}

/// Like [`report_failure`], raising `success` when the action went through.
pub(crate) fn announce<T>(
    notifier: &dyn Notifier,
    action: &str,
    success: &str,
    result: ServiceResult<T>,
) -> ServiceResult<T> {
    let result = report_failure(notifier, action, result);
    if result.is_ok() {
        notifier.notify(Notice::success(success));
    }
    result
}
