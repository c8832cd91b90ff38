//! User records as held by the downstream user store.
//!
//! The facade keeps no copy of these beyond a single request. Every field is
//! optional on the wire because the store and callers may omit any of them;
//! registration decides which absences are acceptable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier assigned by the user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's identity and credential data.
///
/// ## Invariants
/// - `email` is the lookup key and is matched exactly (case-sensitive).
/// - `hashed_password` is opaque: it is compared verbatim against the
///   password supplied at login, never hashed by the facade.
///
/// JSON uses camelCase (`hashedPassword`); absent fields decode as `None`.
///
/// # Examples
/// ```
/// use auth_facade::domain::UserRecord;
///
/// let record: UserRecord =
///     serde_json::from_str(r#"{"email":"a@x.com","hashedPassword":"p1"}"#).unwrap();
/// assert!(record.id.is_none());
/// assert!(record.password_matches("p1"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Store-assigned identifier; absent until the record is created.
    #[serde(default)]
    pub id: Option<UserId>,
    /// Unique email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Stored password value.
    #[serde(default)]
    pub hashed_password: Option<String>,
}

impl UserRecord {
    /// Whether this record's email equals `email` exactly.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.as_deref() == Some(email)
    }

    /// Compare a provided password to the stored value.
    ///
    /// An absent or empty stored value never matches.
    #[must_use]
    pub fn password_matches(&self, provided: &str) -> bool {
        match self.hashed_password.as_deref() {
            Some(stored) if !stored.is_empty() => stored == provided,
            _ => false,
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field(
                "hashed_password",
                &self.hashed_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
