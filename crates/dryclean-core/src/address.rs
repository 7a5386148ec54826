//! Address records: server-confirmed addresses and session-local additions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag the backend attaches to each saved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Work,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressType::Home => write!(f, "home"),
            AddressType::Work => write!(f, "work"),
            AddressType::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A server-confirmed address.
///
/// At most one address per user has `is_default = true`. The backend enforces
/// this; the client does not check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user_id: String,
    #[serde(default = "default_address_type")]
    pub address_type: AddressType,
    #[serde(default)]
    pub house_number: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "zipCode")]
    pub zip: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_address_type() -> AddressType {
    AddressType::Other
}

impl Address {
    /// Single-line address: `"12 Main St, Midtown, New York, NY 10001"`.
    ///
    /// Blank parts are skipped; house number and street share one segment.
    #[must_use]
    pub fn formatted(&self) -> String {
        let line1 = [self.house_number.as_deref(), self.street.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let state_zip = [self.state.as_deref(), self.zip.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [
            Some(line1.as_str()),
            self.area.as_deref(),
            self.city.as_deref(),
            Some(state_zip.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// An address added in the current session but not persisted by the backend.
///
/// The id is client-generated (`location-<millis>-<suffix>`) and carries no
/// uniqueness guarantee beyond the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAddress {
    pub id: String,
    pub address: String,
    pub zip: String,
    pub state: String,
}

impl LocalAddress {
    #[must_use]
    pub fn formatted(&self) -> String {
        let tail = format!("{} {}", self.state.trim(), self.zip.trim());
        let tail = tail.trim();
        if tail.is_empty() {
            self.address.trim().to_string()
        } else {
            format!("{}, {tail}", self.address.trim())
        }
    }
}

/// Identity of an address across its lifecycle.
///
/// A client id is only a correlation token until the backend assigns its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressId {
    Pending(String),
    Confirmed(String),
}

impl AddressId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AddressId::Pending(id) | AddressId::Confirmed(id) => id,
        }
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, AddressId::Confirmed(_))
    }
}

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
