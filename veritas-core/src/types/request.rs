//! The onboarding request: the immutable intake value every analyzer reads.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque request identifier, assigned once at submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an identifier read back from storage.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vendor-onboarding application as handed over by the intake collaborator.
///
/// Created once, never mutated. The core performs no input-format validation
/// (that is intake's job); empty text fields are treated as degraded input
/// by the behavioral analyzer, not rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingRequest {
    pub request_id: RequestId,
    pub vendor_name: String,
    pub contact_email: String,
    pub business_description: String,
    pub tax_id: String,
    pub source_ip: String,
    /// Unix seconds at submission.
    pub submitted_at: i64,
    /// Seconds the requester spent filling the form, when the intake
    /// collaborator captured it.
    pub form_completion_secs: Option<u32>,
}

impl OnboardingRequest {
    /// Domain part of the contact email. `None` when the address has no `@`.
    pub fn email_domain(&self) -> Option<&str> {
        self.contact_email.split_once('@').map(|(_, d)| d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str) -> OnboardingRequest {
        OnboardingRequest {
            request_id: RequestId::generate(),
            vendor_name: "Acme Corp".to_string(),
            contact_email: email.to_string(),
            business_description: "Industrial supplies since 1990".to_string(),
            tax_id: "12-3456789".to_string(),
            source_ip: "203.0.113.7".to_string(),
            submitted_at: 1_760_000_000,
            form_completion_secs: None,
        }
    }

    #[test]
    fn email_domain_extraction() {
        assert_eq!(request("ops@acme.com").email_domain(), Some("acme.com"));
        assert_eq!(request("not-an-email").email_domain(), None);
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }
}
