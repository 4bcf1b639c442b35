//! Legal analyzer.
//!
//! Scores legal exposure from the description: categorized legal
//! keywords, docket and monetary evidence, and whether the matters
//! read as ongoing or resolved.

use veritas_core::errors::AnalyzerError;
use veritas_core::types::{
    Evidence, LegalStatus, OnboardingRequest, RiskFactor, RiskSignal, SignalKind, SignalRating,
};

use crate::extract::patterns::{
    extract_case_numbers, extract_court_references, extract_monetary_amounts,
};
use crate::extract::KeywordScanner;
use crate::tables;

use super::traits::SignalAnalyzer;

const CRIMINAL_SEVERITY: f64 = 1.0;
const FRAUD_SEVERITY: f64 = 0.95;
const REGULATORY_SEVERITY: f64 = 0.7;
const CIVIL_SEVERITY: f64 = 0.5;

const CASE_NUMBER_SEVERITY: f64 = 0.6;
const MONETARY_SEVERITY: f64 = 0.5;
const COURT_SEVERITY: f64 = 0.4;

/// Open matters weigh heavier than closed ones.
const ONGOING_MULTIPLIER: f64 = 1.2;
const RESOLVED_MULTIPLIER: f64 = 0.7;

/// Per-issue escalation of the combined score, capped at 1.5x.
const ISSUE_ESCALATION: f64 = 0.1;
const ESCALATION_CAP: f64 = 1.5;

pub struct LegalAnalyzer {
    criminal: KeywordScanner,
    fraud: KeywordScanner,
    regulatory: KeywordScanner,
    civil: KeywordScanner,
    ongoing: KeywordScanner,
    resolved: KeywordScanner,
}

impl LegalAnalyzer {
    pub fn new() -> Self {
        Self {
            criminal: KeywordScanner::new(tables::LEGAL_CRIMINAL_TERMS),
            fraud: KeywordScanner::new(tables::LEGAL_FRAUD_TERMS),
            regulatory: KeywordScanner::new(tables::LEGAL_REGULATORY_TERMS),
            civil: KeywordScanner::new(tables::LEGAL_CIVIL_TERMS),
            ongoing: KeywordScanner::new(tables::LEGAL_ONGOING_TERMS),
            resolved: KeywordScanner::new(tables::LEGAL_RESOLVED_TERMS),
        }
    }

    fn status_multiplier(&self, text: &str) -> (f64, &'static str) {
        if self.ongoing.matches(text) {
            (ONGOING_MULTIPLIER, "ongoing")
        } else if self.resolved.matches(text) {
            (RESOLVED_MULTIPLIER, "resolved")
        } else {
            (1.0, "unstated")
        }
    }

    fn status_rating(score: f64) -> LegalStatus {
        if score >= 0.9 {
            LegalStatus::CriticalIssues
        } else if score >= 0.7 {
            LegalStatus::HighRisk
        } else if score >= 0.4 {
            LegalStatus::MediumRisk
        } else if score > 0.0 {
            LegalStatus::LowRisk
        } else {
            LegalStatus::Clear
        }
    }
}

impl Default for LegalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalAnalyzer for LegalAnalyzer {
    fn kind(&self) -> SignalKind {
        SignalKind::Legal
    }

    fn analyze(&self, request: &OnboardingRequest, _now: i64) -> Result<RiskSignal, AnalyzerError> {
        let text = &request.business_description;
        let (multiplier, status) = self.status_multiplier(text);

        let mut factors = Vec::new();
        let categories: [(&KeywordScanner, &str, f64); 4] = [
            (&self.criminal, "criminal", CRIMINAL_SEVERITY),
            (&self.fraud, "fraud", FRAUD_SEVERITY),
            (&self.regulatory, "regulatory", REGULATORY_SEVERITY),
            (&self.civil, "civil", CIVIL_SEVERITY),
        ];
        for (scanner, category, severity) in categories {
            let mut seen: Vec<String> = Vec::new();
            for hit in scanner.scan(text) {
                if seen.contains(&hit.keyword) {
                    continue;
                }
                seen.push(hit.keyword.clone());
                // Status rides in the name; evidence keeps the text
                // surrounding the actual match.
                let name = if status == "unstated" {
                    format!("{category}_{}", hit.keyword.replace(' ', "_"))
                } else {
                    format!("{category}_{}_{status}", hit.keyword.replace(' ', "_"))
                };
                factors.push(RiskFactor::with_evidence(
                    name,
                    severity * multiplier,
                    Evidence::KeywordMatch {
                        keyword: hit.keyword,
                        context: hit.context,
                    },
                ));
            }
        }

        for case in extract_case_numbers(text) {
            factors.push(RiskFactor::with_evidence(
                "case_number_reference",
                CASE_NUMBER_SEVERITY * multiplier,
                Evidence::CaseNumber { value: case },
            ));
        }
        for amount in extract_monetary_amounts(text) {
            factors.push(RiskFactor::with_evidence(
                "monetary_penalty",
                MONETARY_SEVERITY * multiplier,
                Evidence::MonetaryAmount { value: amount },
            ));
        }
        for court in extract_court_references(text) {
            factors.push(RiskFactor::with_evidence(
                "court_reference",
                COURT_SEVERITY * multiplier,
                Evidence::CourtReference { value: court },
            ));
        }

        if factors.is_empty() {
            let signal = RiskSignal::new(SignalKind::Legal, 0.0, factors)
                .with_rating(SignalRating::Legal(LegalStatus::Clear));
            return Ok(signal);
        }

        let max = factors.iter().map(|f| f.severity).fold(0.0, f64::max);
        let mean = factors.iter().map(|f| f.severity).sum::<f64>() / factors.len() as f64;
        let escalation =
            (1.0 + ISSUE_ESCALATION * factors.len() as f64).min(ESCALATION_CAP);
        let score = max * escalation * mean;

        let signal = RiskSignal::new(SignalKind::Legal, score, factors);
        let rating = Self::status_rating(signal.score);
        Ok(signal.with_rating(SignalRating::Legal(rating)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_core::types::RequestId;

    fn request(description: &str) -> OnboardingRequest {
        OnboardingRequest {
            request_id: RequestId::generate(),
            vendor_name: "Acme Corp".to_string(),
            contact_email: "ops@acme.com".to_string(),
            business_description: description.to_string(),
            tax_id: "84-2957163".to_string(),
            source_ip: "203.0.113.7".to_string(),
            submitted_at: 1_760_000_000,
            form_completion_secs: None,
        }
    }

    #[test]
    fn clean_description_is_clear() {
        let signal = LegalAnalyzer::new()
            .analyze(&request("Wholesale distribution of industrial fittings."), 0)
            .unwrap();
        assert_eq!(signal.score, 0.0);
        assert_eq!(signal.rating, Some(SignalRating::Legal(LegalStatus::Clear)));
    }

    #[test]
    fn single_resolved_civil_matter_scores_low() {
        let signal = LegalAnalyzer::new()
            .analyze(&request("One breach of contract claim, settled in 2019."), 0)
            .unwrap();
        // One civil keyword, softened by the resolved multiplier.
        assert!(signal.score < 0.4, "score {}", signal.score);
        assert_eq!(
            signal.rating,
            Some(SignalRating::Legal(LegalStatus::LowRisk))
        );
    }

    #[test]
    fn ongoing_criminal_exposure_saturates() {
        let signal = LegalAnalyzer::new()
            .analyze(
                &request(
                    "Ongoing criminal charges and an indictment for fraud and \
                     securities violation; case 2023-cr-04511 in federal court \
                     seeks $4.5 million in damages awarded earlier.",
                ),
                0,
            )
            .unwrap();
        assert_eq!(signal.score, 1.0);
        assert_eq!(
            signal.rating,
            Some(SignalRating::Legal(LegalStatus::CriticalIssues))
        );
        assert!(signal.factors.len() >= 6);
    }

    #[test]
    fn evidence_extraction_attaches_structured_values() {
        let signal = LegalAnalyzer::new()
            .analyze(&request("Pending lawsuit 2021-cv-00987 in district court."), 0)
            .unwrap();
        let has_case = signal.factors.iter().any(|f| {
            matches!(&f.evidence, Some(Evidence::CaseNumber { value }) if value == "2021-cv-00987")
        });
        let has_court = signal.factors.iter().any(|f| {
            matches!(&f.evidence, Some(Evidence::CourtReference { value }) if value == "district court")
        });
        assert!(has_case && has_court);
    }

    #[test]
    fn keyword_evidence_carries_surrounding_text() {
        let signal = LegalAnalyzer::new()
            .analyze(
                &request("The vendor faces an ongoing lawsuit over unpaid invoices."),
                0,
            )
            .unwrap();
        let factor = signal
            .factors
            .iter()
            .find(|f| f.name == "civil_lawsuit_ongoing")
            .expect("civil factor missing");
        match &factor.evidence {
            Some(Evidence::KeywordMatch { keyword, context }) => {
                assert_eq!(keyword, "lawsuit");
                assert!(context.contains("ongoing lawsuit over unpaid"));
            }
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    #[test]
    fn ongoing_weighs_heavier_than_resolved() {
        let ongoing = LegalAnalyzer::new()
            .analyze(&request("Ongoing fraud investigation."), 0)
            .unwrap();
        let resolved = LegalAnalyzer::new()
            .analyze(&request("Fraud allegations, since dismissed."), 0)
            .unwrap();
        assert!(ongoing.score > resolved.score);
    }
}
