//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateEmail};

use crate::constants::{MAX_EMAIL_LENGTH, MAX_NAME_LENGTH};
use crate::error::{DomainError, DomainResult};

/// User domain entity
///
/// `id`, `created_at` and `updated_at` are assigned by the store; callers
/// never construct them for a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Display name (None = never provided, distinct from an empty name)
    pub name: Option<String>,
    /// Identity provider that authenticated this account
    pub auth_provider: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account was registered through the given provider
    pub fn registered_with(&self, provider: &str) -> bool {
        self.auth_provider.eq_ignore_ascii_case(provider)
    }
}

/// User creation data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct NewUser {
    /// User email address
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    /// Optional display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
    /// Identity provider name (e.g. "google")
    #[validate(length(
        min = 1,
        max = 64,
        message = "Auth provider must be between 1 and 64 characters"
    ))]
    pub auth_provider: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, name: Option<String>, auth_provider: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name,
            auth_provider: auth_provider.into(),
        }
    }

    /// Run field validation, collapsing failures into a domain error
    pub fn check(&self) -> DomainResult<()> {
        self.validate()
            .map_err(|e| DomainError::validation(format_validation_errors(&e)))
    }
}

/// Identity handed over by an external provider at sign-in
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalIdentity {
    pub email: String,
    pub name: Option<String>,
    pub auth_provider: String,
}

impl From<ExternalIdentity> for NewUser {
    fn from(identity: ExternalIdentity) -> Self {
        NewUser {
            email: identity.email,
            name: identity.name,
            auth_provider: identity.auth_provider,
        }
    }
}

/// Partial update of an account
///
/// `name: Some(None)` clears the display name, `name: None` leaves it as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserChanges {
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub name: Option<Option<String>>,
}

impl UserChanges {
    /// Change only the display name
    pub fn rename(name: Option<String>) -> Self {
        Self {
            email: None,
            name: Some(name),
        }
    }

    /// Change only the email address
    pub fn change_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            name: None,
        }
    }

    /// True when applying these changes would touch no field
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none()
    }

    /// Validate the fields that are being changed
    pub fn check(&self) -> DomainResult<()> {
        let mut problems = Vec::new();

        if let Some(email) = &self.email {
            if !email.validate_email() {
                problems.push("Invalid email format".to_string());
            } else if email.chars().count() > MAX_EMAIL_LENGTH {
                problems.push(format!("Email must be at most {} characters", MAX_EMAIL_LENGTH));
            }
        }

        if let Some(Some(name)) = &self.name {
            if name.chars().count() > MAX_NAME_LENGTH {
                problems.push(format!("Name must be at most {} characters", MAX_NAME_LENGTH));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(problems.join(", ")))
        }
    }
}

// A present-but-null field must stay distinguishable from a missing one.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
