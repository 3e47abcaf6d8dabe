use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity embedded in an issued token.
///
/// Carries only what downstream authorization needs: the account
/// identifier, its email and its role. Credentials never appear here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Account identifier
    pub id: String,

    /// Normalized account email
    pub email: String,

    /// Account role ("user" or "admin")
    pub role: String,
}

impl TokenClaims {
    pub fn new(id: impl ToString, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Wire payload: the identity plus the registered time claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct SignedClaims {
    #[serde(flatten)]
    pub claims: TokenClaims,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SignedClaims {
    /// Returns `None` when `issued_at + ttl` leaves the representable range.
    pub fn issue(claims: TokenClaims, issued_at: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(ttl)?;

        Some(Self {
            claims,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}
