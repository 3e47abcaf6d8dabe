use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SignedClaims;
use super::claims::TokenClaims;
use super::errors::TokenError;

/// Signs and verifies time-bound identity tokens.
///
/// Tokens are HS256 JWTs whose payload is the [`TokenClaims`] plus
/// `iat`/`exp`. The secret is handed in at construction; there is no
/// built-in fallback key.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    /// Lifetime of every issued token unless configured otherwise.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Create an issuer with the default one day lifetime.
    ///
    /// # Arguments
    /// * `secret` - HMAC key; should be at least 32 bytes
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }

    /// Create an issuer with an explicit token lifetime.
    ///
    /// # Arguments
    /// * `secret` - HMAC key; should be at least 32 bytes
    /// * `ttl` - Time between issuance and expiry
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Lifetime stamped into issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign claims into a compact token expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiry overflows, or the signing primitive
    ///   rejected the payload
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let payload = SignedClaims::issue(claims.clone(), Utc::now(), self.ttl).ok_or_else(|| {
            TokenError::EncodingFailed(format!("token lifetime {} is out of range", self.ttl))
        })?;

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `Expired` - The `exp` claim lies in the past
    /// * `Invalid` - Malformed token, bad signature or unexpected payload
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<SignedClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}
