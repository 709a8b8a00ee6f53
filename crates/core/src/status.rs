//! Status vocabularies for submissions and comments.
//!
//! Stored as plain strings; these constants and validators keep the DB and
//! API layers in agreement about the accepted values.

// ---------------------------------------------------------------------------
// Application submission review status
// ---------------------------------------------------------------------------

/// Submission received, not yet looked at.
pub const SUBMISSION_PENDING: &str = "pending";

/// An admin has read the submission.
pub const SUBMISSION_REVIEWED: &str = "reviewed";

/// Application accepted.
pub const SUBMISSION_ACCEPTED: &str = "accepted";

/// Application rejected.
pub const SUBMISSION_REJECTED: &str = "rejected";

/// All valid submission statuses.
pub const VALID_SUBMISSION_STATUSES: &[&str] = &[
    SUBMISSION_PENDING,
    SUBMISSION_REVIEWED,
    SUBMISSION_ACCEPTED,
    SUBMISSION_REJECTED,
];

/// Validate a submission status string.
pub fn validate_submission_status(status: &str) -> Result<(), String> {
    if VALID_SUBMISSION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_SUBMISSION_STATUSES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Blog comment moderation status
// ---------------------------------------------------------------------------

/// Comment awaiting moderation; not publicly visible.
pub const COMMENT_PENDING: &str = "pending";

/// Comment approved and publicly visible.
pub const COMMENT_APPROVED: &str = "approved";

/// Comment rejected; retained for the audit trail, never shown.
pub const COMMENT_REJECTED: &str = "rejected";

/// All valid comment statuses.
pub const VALID_COMMENT_STATUSES: &[&str] =
    &[COMMENT_PENDING, COMMENT_APPROVED, COMMENT_REJECTED];

/// Validate a comment moderation status string.
pub fn validate_comment_status(status: &str) -> Result<(), String> {
    if VALID_COMMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_COMMENT_STATUSES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_statuses_accepted() {
        for s in VALID_SUBMISSION_STATUSES {
            assert!(validate_submission_status(s).is_ok());
        }
    }

    #[test]
    fn test_submission_status_rejected() {
        let err = validate_submission_status("archived").unwrap_err();
        assert!(err.contains("Invalid status"));
        assert!(err.contains("pending"));
    }

    #[test]
    fn test_comment_statuses_accepted() {
        for s in VALID_COMMENT_STATUSES {
            assert!(validate_comment_status(s).is_ok());
        }
    }

    #[test]
    fn test_comment_status_rejected() {
        assert!(validate_comment_status("spam").is_err());
        assert!(validate_comment_status("").is_err());
    }
}
