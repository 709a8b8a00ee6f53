//! Token issuance for the back office: short-lived HS256 access tokens
//! plus opaque, single-use refresh tokens.
//!
//! Only the SHA-256 digest of a refresh token ever reaches the database,
//! so a leaked `user_sessions` table cannot be replayed against the API.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use meridian_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// `iss` value stamped into every access token and required on decode.
const TOKEN_ISSUER: &str = "meridian-api";

/// Clock skew tolerated when checking `exp`, in seconds.
const EXPIRY_LEEWAY_SECS: u64 = 30;

const DEFAULT_ACCESS_TTL_MINS: i64 = 20;
const DEFAULT_REFRESH_TTL_DAYS: i64 = 14;

/// Payload carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// User id the token was issued to.
    pub sub: DbId,
    /// Role name at issue time (`"admin"` or `"editor"`). A role change
    /// takes effect once the current token expires.
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// Per-token UUID for audit trails.
    pub jti: String,
}

/// Signing secret and token lifetimes, loaded once at startup.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl_mins: i64,
    pub refresh_ttl_days: i64,
}

impl TokenConfig {
    /// Read token settings from the environment.
    ///
    /// `JWT_SECRET` is mandatory and must be non-empty; `JWT_ACCESS_TTL_MINS`
    /// (default 20) and `JWT_REFRESH_TTL_DAYS` (default 14) are optional.
    ///
    /// # Panics
    ///
    /// Panics on a missing or empty secret and on unparsable lifetimes, so
    /// a misconfigured deployment dies before binding the listener.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_ttl_mins = std::env::var("JWT_ACCESS_TTL_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_TTL_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_TTL_MINS must be a whole number of minutes");
        let refresh_ttl_days = std::env::var("JWT_REFRESH_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_TTL_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_TTL_DAYS must be a whole number of days");

        Self {
            secret,
            access_ttl_mins,
            refresh_ttl_days,
        }
    }
}

/// Sign a fresh access token for `user_id` with the given role.
pub fn issue_access_token(
    user_id: DbId,
    role: &str,
    config: &TokenConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = chrono::Utc::now().timestamp();
    let claims = AccessClaims {
        sub: user_id,
        role: role.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        iat: issued_at,
        exp: issued_at + config.access_ttl_mins * 60,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry, and issuer, returning the claims.
pub fn decode_access_token(
    token: &str,
    config: &TokenConfig,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = EXPIRY_LEEWAY_SECS;
    validation.set_issuer(&[TOKEN_ISSUER]);

    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// A freshly minted refresh token. Send `plaintext` to the client; persist
/// only `digest`.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub digest: String,
}

/// Mint an opaque refresh token with 256 bits of randomness (64 hex chars).
pub fn mint_refresh_token() -> RefreshToken {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let digest = refresh_token_digest(&plaintext);
    RefreshToken { plaintext, digest }
}

/// SHA-256 hex digest of a refresh token, as stored in `user_sessions`.
pub fn refresh_token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// When a refresh token minted right now stops being honoured.
pub fn refresh_expires_at(config: &TokenConfig) -> Timestamp {
    chrono::Utc::now() + chrono::Duration::days(config.refresh_ttl_days)
}
