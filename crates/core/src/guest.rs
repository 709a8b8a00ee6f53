//! Guest identity for anonymous engagement tracking.
//!
//! A guest id is a client-generated pseudonymous token used to deduplicate
//! likes (and optionally views) per anonymous visitor. It is not a security
//! credential: clearing client storage resets it. The server only checks
//! that an incoming token is shaped sanely before keying rows on it.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Maximum accepted guest id length.
pub const MAX_GUEST_ID_LEN: usize = 64;

/// Length of the random suffix on generated guest ids.
const SUFFIX_LEN: usize = 8;

/// Generate a fresh guest id: millisecond timestamp plus a random
/// alphanumeric suffix, e.g. `guest-1718041622011-k3xq9w2f`.
pub fn generate_guest_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("guest-{millis}-{}", suffix.to_lowercase())
}

/// Validate an incoming guest id at the API boundary.
///
/// Accepts any non-empty token up to [`MAX_GUEST_ID_LEN`] characters made of
/// alphanumerics, hyphens and underscores. Deliberately permissive: older
/// clients may have generated ids with a different shape.
pub fn validate_guest_id(guest_id: &str) -> Result<(), String> {
    if guest_id.is_empty() {
        return Err("guest_id must not be empty".into());
    }
    if guest_id.len() > MAX_GUEST_ID_LEN {
        return Err(format!(
            "guest_id must be at most {MAX_GUEST_ID_LEN} characters"
        ));
    }
    if !guest_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("guest_id must contain only alphanumerics, '-' or '_'".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_valid() {
        let id = generate_guest_id();
        assert!(validate_guest_id(&id).is_ok());
        assert!(id.starts_with("guest-"));
    }

    #[test]
    fn test_generated_ids_differ() {
        // The random suffix makes same-millisecond collisions vanishingly
        // unlikely; two consecutive ids must not match.
        let a = generate_guest_id();
        let b = generate_guest_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(validate_guest_id("").is_err());
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "g".repeat(MAX_GUEST_ID_LEN + 1);
        assert!(validate_guest_id(&long).is_err());
    }

    #[test]
    fn test_bad_characters_rejected() {
        assert!(validate_guest_id("guest id").is_err());
        assert!(validate_guest_id("guest/../etc").is_err());
    }

    #[test]
    fn test_legacy_shapes_accepted() {
        assert!(validate_guest_id("1718041622011").is_ok());
        assert!(validate_guest_id("some_old_client_token").is_ok());
    }
}
