//! Client-side session: the bearer token, its decoded claims and the
//! one-shot logout flag.
//!
//! Claims are decoded without verifying the signature. They only drive UI
//! gating; the remote API enforces authorization on every call.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use jsonwebtoken::dangerous::insecure_decode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::Role;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_INFO_KEY: &str = "user_info";
pub const LOGOUT_NOTICE_KEY: &str = "show_logout_toast";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Storage(err.to_string())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Persistent key/value storage backing a [`Session`].
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// JSON file store. The whole map is rewritten after every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

/// Claims carried by the bearer token issued by `POST /Accounts/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(
        default,
        alias = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role"
    )]
    pub role: String,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub nbf: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iss: Option<String>,
}

impl Claims {
    /// Token is usable strictly before its `exp` second.
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp > now)
    }

    pub fn has_role(&self, role: Role) -> bool {
        role.matches(&self.role)
    }

    /// Parsed role, `None` for roles this client does not know.
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Decodes the payload of a bearer token without checking its signature
/// or any registered claim.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    insecure_decode::<Claims>(token)
        .map(|data| data.claims)
        .map_err(|err| SessionError::InvalidToken(err.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
    /// Token present but past its expiry. Gated like [`SessionState::Anonymous`].
    Expired,
}

/// Explicit session context shared by the HTTP client and the services.
pub struct Session {
    store: Box<dyn SessionStore>,
    claims: Mutex<Option<Claims>>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            claims: Mutex::new(None),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Stores a freshly issued token and caches its claims.
    ///
    /// Undecodable tokens are rejected and leave the session untouched.
    pub fn login(&self, token: &str) -> Result<Claims, SessionError> {
        let claims = decode_claims(token)?;
        let blob = serde_json::to_string(&claims)?;

        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_INFO_KEY, &blob)?;
        *lock(&self.claims) = Some(claims.clone());

        log::info!("Signed in as {} ({})", claims.email, claims.role);
        Ok(claims)
    }

    /// Swaps the token for a new one, invalidating the cached claims.
    pub fn replace_token(&self, token: &str) -> Result<Claims, SessionError> {
        let claims = self.login(token)?;
        log::info!("Session token replaced");
        Ok(claims)
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// Cached claims, falling back to the stored blob and then to decoding
    /// the stored token.
    pub fn current_claims(&self) -> Option<Claims> {
        let token = self.token()?;

        let mut cache = lock(&self.claims);
        if let Some(claims) = cache.as_ref() {
            return Some(claims.clone());
        }

        if let Some(blob) = self.store.get(USER_INFO_KEY)
            && let Ok(claims) = serde_json::from_str::<Claims>(&blob)
        {
            *cache = Some(claims.clone());
            return Some(claims);
        }

        match decode_claims(&token) {
            Ok(claims) => {
                if let Ok(blob) = serde_json::to_string(&claims)
                    && let Err(err) = self.store.set(USER_INFO_KEY, &blob)
                {
                    log::warn!("Failed to cache session claims: {err}");
                }
                *cache = Some(claims.clone());
                Some(claims)
            }
            Err(err) => {
                log::warn!("Failed to decode stored token: {err}");
                None
            }
        }
    }

    /// Session state at unix time `now`. The token itself is decoded on every
    /// call so expiry never depends on the cache.
    pub fn state_at(&self, now: i64) -> SessionState {
        let Some(token) = self.token() else {
            return SessionState::Anonymous;
        };

        match decode_claims(&token) {
            Ok(claims) if claims.is_valid_at(now) => SessionState::Authenticated,
            Ok(_) => SessionState::Expired,
            Err(_) => SessionState::Anonymous,
        }
    }

    pub fn is_authenticated(&self, now: i64) -> bool {
        self.state_at(now) == SessionState::Authenticated
    }

    /// Convenience wrapper over [`Session::is_authenticated`] using the wall clock.
    pub fn is_authenticated_now(&self) -> bool {
        self.is_authenticated(chrono::Utc::now().timestamp())
    }

    pub fn role(&self) -> Option<String> {
        self.current_claims().map(|claims| claims.role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.current_claims()
            .is_some_and(|claims| claims.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_staff(&self) -> bool {
        self.has_role(Role::Staff)
    }

    /// Drops the token and cached claims.
    pub fn clear(&self) {
        *lock(&self.claims) = None;
        for key in [TOKEN_KEY, USER_INFO_KEY] {
            if let Err(err) = self.store.remove(key) {
                log::error!("Failed to clear session key {key}: {err}");
            }
        }
    }

    /// Clears the session and arms the logout notice for the next home load.
    pub fn logout(&self) {
        self.clear();
        if let Err(err) = self.store.set(LOGOUT_NOTICE_KEY, "true") {
            log::error!("Failed to record logout notice: {err}");
        }
        log::info!("Signed out");
    }

    /// Returns whether a logout notice is pending and disarms it.
    pub fn take_logout_notice(&self) -> bool {
        let pending = self
            .store
            .get(LOGOUT_NOTICE_KEY)
            .is_some_and(|value| value == "true");
        if pending && let Err(err) = self.store.remove(LOGOUT_NOTICE_KEY) {
            log::error!("Failed to reset logout notice: {err}");
        }
        pending
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token().is_some())
            .finish()
    }
}
