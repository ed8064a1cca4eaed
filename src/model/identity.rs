//! Accounts of the identity provider.
//!
//! Identities outlive tenants: a person may have signed in before their
//! workspace was provisioned, so provisioning looks them up by email and never
//! deletes them.

use crate::model::IdentityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form identity metadata (role, vertical, tenant id, …).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    /// Always lower-case.
    pub email: String,
    pub metadata: Metadata,
    pub password_set_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an identity.
///
/// The password is handed to the provider and never stored on the record.
#[derive(Clone)]
pub struct IdentityCreate {
    pub email: String,
    pub password: String,
    pub metadata: Metadata,
}

impl fmt::Debug for IdentityCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityCreate")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Lower-cases `email` and splits it at `@` when it has a local part and a
/// dotted domain.
pub fn parse_email(email: &str) -> Option<(String, String)> {
    let email = email.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    let dotted = domain
        .split('.')
        .all(|label| !label.is_empty())
        && domain.contains('.');
    if local.is_empty() || !dotted {
        return None;
    }
    Some((local.to_string(), domain.to_string()))
}

#[derive(Debug, Clone)]
pub enum IdentityUpdate {
    /// Insert or overwrite the given keys, keeping every other key.
    MergeMetadata(Metadata),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_requires_dotted_domain() {
        assert_eq!(
            parse_email(" Ana@Example.COM "),
            Some(("ana".to_string(), "example.com".to_string()))
        );
        assert_eq!(parse_email("owner@localhost"), None);
        assert_eq!(parse_email("@example.com"), None);
        assert_eq!(parse_email("ana@example."), None);
        assert_eq!(parse_email("no-at-sign"), None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let create = IdentityCreate {
            email: "ana@example.com".into(),
            password: "hunter2hunter2".into(),
            metadata: Metadata::new(),
        };
        let printed = format!("{create:?}");
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("hunter2"));
    }
}
