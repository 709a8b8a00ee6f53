//! Slug generation and validation.
//!
//! Every publicly addressable entity (programme areas, programmes,
//! competitions, events, blog posts, publications, tags, categories) is
//! reached by slug. Slugs are generated from titles on create when the
//! caller does not provide one; uniqueness is enforced by `uq_*` database
//! constraints, surfaced as 409 by the API layer.

use crate::error::CoreError;

/// Generate a URL-safe slug from a title.
///
/// Converts to lowercase, replaces anything non-alphanumeric with hyphens,
/// collapses consecutive hyphens, and trims leading/trailing hyphens.
pub fn generate_slug(title: &str) -> String {
    let lowered: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive hyphens.
    let mut result = String::with_capacity(lowered.len());
    let mut prev_hyphen = false;
    for c in lowered.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    result.trim_matches('-').to_string()
}

/// Validate a slug (non-empty, only lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Use the provided slug when present (validated), otherwise derive one
/// from the title. Fails when neither yields a non-empty slug.
pub fn resolve_slug(provided: Option<&str>, title: &str) -> Result<String, CoreError> {
    match provided {
        Some(s) => {
            let s = s.trim();
            validate_slug(s)?;
            Ok(s.to_string())
        }
        None => {
            let generated = generate_slug(title);
            if generated.is_empty() {
                return Err(CoreError::Validation(
                    "Cannot derive a slug from the title; provide one explicitly".into(),
                ));
            }
            Ok(generated)
        }
    }
}
