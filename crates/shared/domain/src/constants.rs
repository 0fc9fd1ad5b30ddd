//! Domain-level constants.
//!
//! These constants define the limits enforced on account data.

// =============================================================================
// Validation
// =============================================================================

/// Maximum email length accepted for an account
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Maximum display name length
pub const MAX_NAME_LENGTH: usize = 255;

// =============================================================================
// Persistence
// =============================================================================

/// Name of the store-level unique constraint on `users.email`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "uk_users_email";
