//! Login, roles and request-scoped session state.
//!
//! # Responsibility
//! - Verify credentials against configured SHA-256 digests.
//! - Gate role-specific operations.
//! - Carry the worker's selected task between checklist steps.
//!
//! # Invariants
//! - A `Session` only exists after successful authentication.
//! - Unknown users and wrong passwords are indistinguishable to callers.
//! - `active_task` is always a task name from the catalog it was chosen from.

use crate::config::AccountConfig;
use crate::schedule::TaskCatalog;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Dashboard role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Janitor who performs and logs the work.
    Worker,
    /// Staff member who reviews progress and files complaints.
    Supervisor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Supervisor => "supervisor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Worker => "Pelaksana",
            Self::Supervisor => "Pengawas",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid username or password"),
        }
    }
}

impl Error for AuthError {}

/// Returned when a session's role may not perform an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub role: Role,
    pub action: &'static str,
}

impl Display for AccessDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "role `{}` may not {}", self.role.as_str(), self.action)
    }
}

impl Error for AccessDenied {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Access(AccessDenied),
    /// Task name is not in today's catalog.
    UnknownTask(String),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access(err) => write!(f, "{err}"),
            Self::UnknownTask(task) => write!(f, "task is not scheduled today: `{task}`"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::UnknownTask(_) => None,
        }
    }
}

impl From<AccessDenied> for SessionError {
    fn from(value: AccessDenied) -> Self {
        Self::Access(value)
    }
}

/// Authenticated caller plus per-request UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
    active_task: Option<String>,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            active_task: None,
        }
    }

    /// Fails unless this session has `role`.
    pub fn require(&self, role: Role, action: &'static str) -> Result<(), AccessDenied> {
        if self.role == role {
            Ok(())
        } else {
            Err(AccessDenied {
                role: self.role,
                action,
            })
        }
    }

    /// Marks `task` as the one the worker is about to document.
    pub fn select_task(&mut self, catalog: &TaskCatalog, task: &str) -> Result<(), SessionError> {
        self.require(Role::Worker, "select checklist tasks")?;
        if !catalog.contains(task) {
            return Err(SessionError::UnknownTask(task.to_string()));
        }
        self.active_task = Some(task.to_string());
        Ok(())
    }

    pub fn active_task(&self) -> Option<&str> {
        self.active_task.as_deref()
    }

    pub fn clear_active_task(&mut self) {
        self.active_task = None;
    }
}

/// Checks `username`/`password` against `accounts`.
pub fn authenticate(
    accounts: &[AccountConfig],
    username: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let digest = password_digest(password);
    let account = accounts.iter().find(|account| {
        account.username == username && account.password_sha256.eq_ignore_ascii_case(&digest)
    });

    match account {
        Some(account) => {
            info!(
                "event=login module=auth status=ok role={}",
                account.role.as_str()
            );
            Ok(Session::new(account.username.clone(), account.role))
        }
        None => {
            warn!("event=login module=auth status=rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Lowercase hex SHA-256 of `password`, the format stored in config.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
