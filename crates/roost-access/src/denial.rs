//! Denial taxonomy — the structured rejection every gate terminates
//! with.
//!
//! The stable [`DenyCode`] is the contract clients switch on; the
//! message text is informational only. Infrastructure faults map to a
//! per-gate 500-class code and are logged at the gate; the response
//! body never exposes internals.

use roost_core::models::Role;
use serde::Serialize;
use thiserror::Error;

/// Stable rejection codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyCode {
    // Missing / invalid credential
    TokenMissing,
    InvalidToken,
    TokenExpired,
    // Unknown or disabled principal
    UserNotFound,
    UserDeactivated,
    UserNotVerified,
    // Gate preconditions
    AuthRequired,
    // Authorization failures
    InsufficientPermissions,
    FarmAccessDenied,
    FlockAccessDenied,
    // Bad request shape
    FarmIdRequired,
    FlockIdRequired,
    // Not found
    FlockNotFound,
    // Infrastructure faults (one code per gate)
    AuthError,
    FarmOwnershipError,
    FarmAccessError,
    /// Reserved: the permission gate is pure (no store call) and
    /// currently cannot fault, but the code stays part of the client
    /// contract.
    PermissionCheckError,
    FlockAccessError,
}

impl DenyCode {
    /// HTTP status this code maps to.
    pub const fn http_status(self) -> u16 {
        match self {
            DenyCode::TokenMissing
            | DenyCode::InvalidToken
            | DenyCode::TokenExpired
            | DenyCode::UserNotFound
            | DenyCode::UserDeactivated
            | DenyCode::UserNotVerified
            | DenyCode::AuthRequired => 401,
            DenyCode::InsufficientPermissions
            | DenyCode::FarmAccessDenied
            | DenyCode::FlockAccessDenied => 403,
            DenyCode::FarmIdRequired | DenyCode::FlockIdRequired => 400,
            DenyCode::FlockNotFound => 404,
            DenyCode::AuthError
            | DenyCode::FarmOwnershipError
            | DenyCode::FarmAccessError
            | DenyCode::PermissionCheckError
            | DenyCode::FlockAccessError => 500,
        }
    }
}

/// A terminal gate rejection.
///
/// Serializes to the wire envelope
/// `{ success: false, message, code, ...diagnostics }`; the HTTP
/// status is carried out of band via [`DenyCode::http_status`].
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct Denial {
    success: bool,
    pub message: String,
    pub code: DenyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_roles: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_permissions: Option<Vec<String>>,
}

impl Denial {
    pub fn new(code: DenyCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code,
            required_roles: None,
            user_role: None,
            required_permissions: None,
            worker_permissions: None,
        }
    }

    /// Attach role diagnostics (required allow-list and actual role).
    pub fn with_roles(mut self, required: &[Role], actual: Role) -> Self {
        self.required_roles = Some(required.to_vec());
        self.user_role = Some(actual);
        self
    }

    /// Attach permission diagnostics (required set and held set).
    pub fn with_permissions(mut self, required: &[&str], held: Vec<String>) -> Self {
        self.required_permissions = Some(required.iter().map(|p| p.to_string()).collect());
        self.worker_permissions = Some(held);
        self
    }

    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}
