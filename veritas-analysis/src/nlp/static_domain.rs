//! Table-driven domain intelligence.

use rustc_hash::FxHashMap;

use veritas_core::errors::LookupError;
use veritas_core::traits::{DomainCheck, DomainIntel};

use crate::tables;

/// Deterministic `DomainIntel` backend.
///
/// Infrastructure facts default to healthy for well-formed domains; the
/// TLD check runs against the trusted-TLD table. Per-domain overrides let
/// deployments seed known-bad infrastructure without a network probe.
#[derive(Debug, Default)]
pub struct StaticDomainIntel {
    overrides: FxHashMap<String, DomainCheck>,
}

impl StaticDomainIntel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an explicit result for one domain.
    pub fn with_override(mut self, domain: &str, check: DomainCheck) -> Self {
        self.overrides.insert(domain.to_lowercase(), check);
        self
    }

    fn infer(domain: &str) -> DomainCheck {
        // A bare label with no dot cannot resolve publicly.
        let Some((_, tld)) = domain.rsplit_once('.') else {
            return DomainCheck {
                website_resolves: false,
                has_tls: false,
                has_mx: false,
                tld_trusted: false,
            };
        };
        DomainCheck {
            website_resolves: true,
            has_tls: true,
            has_mx: true,
            tld_trusted: tables::trusted_tlds().contains(tld),
        }
    }
}

impl DomainIntel for StaticDomainIntel {
    fn check(&self, domain: &str) -> Result<DomainCheck, LookupError> {
        let domain = domain.to_lowercase();
        if domain.is_empty() {
            return Err(LookupError::DomainUnavailable {
                domain,
                message: "empty domain".to_string(),
            });
        }
        Ok(self
            .overrides
            .get(&domain)
            .copied()
            .unwrap_or_else(|| Self::infer(&domain)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_domain_defaults_healthy() {
        let intel = StaticDomainIntel::new();
        let check = intel.check("acme.com").unwrap();
        assert!(check.website_resolves && check.has_tls && check.has_mx && check.tld_trusted);
    }

    #[test]
    fn unusual_tld_is_untrusted() {
        let intel = StaticDomainIntel::new();
        assert!(!intel.check("acme.click").unwrap().tld_trusted);
    }

    #[test]
    fn dotless_label_does_not_resolve() {
        let intel = StaticDomainIntel::new();
        let check = intel.check("localhost").unwrap();
        assert!(!check.website_resolves);
    }

    #[test]
    fn overrides_replace_inference() {
        let intel = StaticDomainIntel::new().with_override(
            "shady.com",
            DomainCheck {
                website_resolves: false,
                has_tls: false,
                has_mx: false,
                tld_trusted: true,
            },
        );
        let check = intel.check("SHADY.com").unwrap();
        assert!(!check.website_resolves);
        assert!(check.tld_trusted);
    }

    #[test]
    fn empty_domain_is_a_lookup_error() {
        let intel = StaticDomainIntel::new();
        assert!(intel.check("").is_err());
    }
}
