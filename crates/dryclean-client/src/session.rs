//! Credential cookies and session-local addresses, persisted as one JSON file.
//!
//! Values are opaque strings with an absolute expiry. An expired cookie reads
//! as absent. Nothing here validates tokens.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use dryclean_core::LocalAddress;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::types::LoginResponse;

pub const AUTH_TOKEN: &str = "authToken";
pub const REFRESH_TOKEN: &str = "refreshToken";
pub const USER_ROLE: &str = "userRole";
pub const USER_ID: &str = "userId";

const AUTH_TOKEN_TTL_DAYS: i64 = 7;
const REFRESH_TOKEN_TTL_DAYS: i64 = 30;
const USER_ROLE_TTL_DAYS: i64 = 7;
const USER_ID_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    #[serde(default)]
    cookies: BTreeMap<String, StoredCookie>,
    #[serde(default)]
    local_addresses: Vec<LocalAddress>,
}

/// Snapshot of the stored credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub refresh_token: Option<String>,
    pub role: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
    file: SessionFile,
}

impl SessionStore {
    /// A store that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the store from `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file exists but cannot be read, or
    /// [`SessionError::Serialize`] if it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let file = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionFile::default(),
            Err(e) => {
                return Err(SessionError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            file,
        })
    }

    /// Writes the store back to the path it was loaded from. In-memory stores
    /// are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the directory or file cannot be written.
    pub fn save(&self) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |e| SessionError::Io {
            path: path.display().to_string(),
            source: e,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.file)?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        self.set_at(key, value, ttl, Utc::now());
    }

    pub fn set_at(&mut self, key: &str, value: &str, ttl: Duration, now: DateTime<Utc>) {
        self.file.cookies.insert(
            key.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_at(key, Utc::now())
    }

    #[must_use]
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<&str> {
        self.file
            .cookies
            .get(key)
            .filter(|c| c.expires_at > now)
            .map(|c| c.value.as_str())
    }

    pub fn remove(&mut self, key: &str) {
        self.file.cookies.remove(key);
    }

    pub fn store_login(&mut self, login: &LoginResponse) {
        self.store_login_at(login, Utc::now());
    }

    /// Stores the four credential cookies with their standard lifetimes.
    pub fn store_login_at(&mut self, login: &LoginResponse, now: DateTime<Utc>) {
        self.set_at(AUTH_TOKEN, &login.token, Duration::days(AUTH_TOKEN_TTL_DAYS), now);
        match &login.refresh_token {
            Some(refresh) => self.set_at(
                REFRESH_TOKEN,
                refresh,
                Duration::days(REFRESH_TOKEN_TTL_DAYS),
                now,
            ),
            None => self.remove(REFRESH_TOKEN),
        }
        match &login.role {
            Some(role) => self.set_at(USER_ROLE, role, Duration::days(USER_ROLE_TTL_DAYS), now),
            None => self.remove(USER_ROLE),
        }
        self.set_at(USER_ID, &login.user_id, Duration::days(USER_ID_TTL_DAYS), now);
    }

    /// Drops all cookies and session-local addresses.
    pub fn clear(&mut self) {
        self.file.cookies.clear();
        self.file.local_addresses.clear();
    }

    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials_at(Utc::now())
    }

    /// Credentials are present only when both the token and user id are live.
    #[must_use]
    pub fn credentials_at(&self, now: DateTime<Utc>) -> Option<Credentials> {
        Some(Credentials {
            token: self.get_at(AUTH_TOKEN, now)?.to_string(),
            refresh_token: self.get_at(REFRESH_TOKEN, now).map(str::to_string),
            role: self.get_at(USER_ROLE, now).map(str::to_string),
            user_id: self.get_at(USER_ID, now)?.to_string(),
        })
    }

    #[must_use]
    pub fn local_addresses(&self) -> &[LocalAddress] {
        &self.file.local_addresses
    }

    pub fn add_local_address(&mut self, address: LocalAddress) {
        self.file.local_addresses.push(address);
    }

    /// Removes a session-local address. Returns `false` if it was not present.
    pub fn remove_local_address(&mut self, id: &str) -> bool {
        let before = self.file.local_addresses.len();
        self.file.local_addresses.retain(|a| a.id != id);
        self.file.local_addresses.len() != before
    }
}
