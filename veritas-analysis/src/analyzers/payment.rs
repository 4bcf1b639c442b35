//! Payment analyzer.
//!
//! Proxies financial stability from the application itself. Five
//! sub-analyses each produce a risk in [0, 1]: business age, bankruptcy
//! language, softer distress language, stated payment terms, and the
//! mail provider. Every slot counts toward the average even when it
//! found nothing, so a single mild hit cannot dominate.

use veritas_core::errors::AnalyzerError;
use veritas_core::types::{
    Evidence, OnboardingRequest, RiskFactor, RiskSignal, SignalKind, SignalRating,
};
use veritas_core::types::ReliabilityRating;

use crate::extract::patterns::extract_years;
use crate::extract::KeywordScanner;
use crate::scoring::blend::blend_max_mean;
use crate::tables;

use super::traits::SignalAnalyzer;

const MAX_WEIGHT: f64 = 0.7;
/// At or above this, one sub-analysis decides the score outright.
const NEAR_TERMINAL: f64 = 0.9;
const BANKRUPTCY_SEVERITY: f64 = 0.95;
const DISTRESS_BASE: f64 = 0.4;
const DISTRESS_STEP: f64 = 0.1;
const DISTRESS_CAP: f64 = 0.6;
const STARTUP_FLOOR: f64 = 0.5;
const AGGRESSIVE_TERMS_RISK: f64 = 0.5;
const FLEXIBLE_TERMS_RELIEF: f64 = 0.2;
const CONSUMER_EMAIL_RISK: f64 = 0.15;
const MAX_PLAUSIBLE_AGE: i32 = 50;

pub struct PaymentAnalyzer {
    bankruptcy: KeywordScanner,
    distress: KeywordScanner,
    startup: KeywordScanner,
    aggressive_terms: KeywordScanner,
    flexible_terms: KeywordScanner,
}

impl PaymentAnalyzer {
    pub fn new() -> Self {
        Self {
            bankruptcy: KeywordScanner::new(tables::BANKRUPTCY_TERMS),
            distress: KeywordScanner::new(tables::FINANCIAL_DISTRESS_TERMS),
            startup: KeywordScanner::new(tables::STARTUP_TERMS),
            aggressive_terms: KeywordScanner::new(tables::AGGRESSIVE_PAYMENT_TERMS),
            flexible_terms: KeywordScanner::new(tables::FLEXIBLE_PAYMENT_TERMS),
        }
    }

    /// Age banding: an unstated founding date sits between a brand-new
    /// firm and an established one.
    fn age_band(age_years: Option<i32>) -> (f64, &'static str) {
        match age_years {
            None => (0.3, "no_establishment_date"),
            Some(age) if age < 1 => (0.6, "very_new_business"),
            Some(age) if age < 3 => (0.4, "new_business"),
            Some(age) if age >= 10 => (0.0, "established_business"),
            Some(_) => (0.2, "moderate_business_history"),
        }
    }

    /// Calendar year of a Unix timestamp (days-from-epoch civil conversion).
    fn year_of(timestamp: i64) -> i32 {
        let days = timestamp.div_euclid(86_400);
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let y = yoe + era * 400;
        (if doy >= 306 { y + 1 } else { y }) as i32
    }
}

impl Default for PaymentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalAnalyzer for PaymentAnalyzer {
    fn kind(&self) -> SignalKind {
        SignalKind::Payment
    }

    fn analyze(&self, request: &OnboardingRequest, now: i64) -> Result<RiskSignal, AnalyzerError> {
        let description = &request.business_description;
        let mut risks = Vec::with_capacity(5);
        let mut factors = Vec::new();

        // Sub-analysis 1: stated business age.
        let current_year = Self::year_of(now);
        let founding_year = extract_years(description)
            .into_iter()
            .find(|&y| y <= current_year);
        let age = founding_year.map(|y| (current_year - y).min(MAX_PLAUSIBLE_AGE));

        let (mut age_risk, band) = Self::age_band(age);
        let mut age_factor = RiskFactor::new(band, age_risk);
        if let Some(year) = founding_year {
            age_factor.evidence = Some(Evidence::Metric {
                name: "stated_founding_year".to_string(),
                value: f64::from(year),
            });
        }
        factors.push(age_factor);
        if let Some(hit) = self.startup.scan(description).into_iter().next() {
            age_risk = age_risk.max(STARTUP_FLOOR);
            factors.push(RiskFactor::with_evidence(
                "startup_language",
                STARTUP_FLOOR,
                Evidence::KeywordMatch {
                    keyword: hit.keyword,
                    context: hit.context,
                },
            ));
        }
        risks.push(age_risk);

        // Sub-analysis 2: bankruptcy language is near-terminal.
        let mut bankruptcy_risk = 0.0;
        if let Some(hit) = self.bankruptcy.scan(description).into_iter().next() {
            bankruptcy_risk = BANKRUPTCY_SEVERITY;
            factors.push(RiskFactor::with_evidence(
                "bankruptcy_indicator",
                BANKRUPTCY_SEVERITY,
                Evidence::KeywordMatch {
                    keyword: hit.keyword,
                    context: hit.context,
                },
            ));
        }
        risks.push(bankruptcy_risk);

        // Sub-analysis 3: softer distress terms, scored by density.
        let distress_hits = self.distress.matched_keywords(&description.to_lowercase());
        let mut distress_risk = 0.0;
        if !distress_hits.is_empty() {
            distress_risk = (DISTRESS_BASE + DISTRESS_STEP * (distress_hits.len() - 1) as f64)
                .min(DISTRESS_CAP);
            factors.push(RiskFactor::with_evidence(
                "financial_distress",
                distress_risk,
                Evidence::Metric {
                    name: "distress_terms".to_string(),
                    value: distress_hits.len() as f64,
                },
            ));
        }
        risks.push(distress_risk);

        // Sub-analysis 4: payment terms. Aggressive terms raise, trade
        // credit relieves; both can apply.
        let mut terms_risk = 0.0;
        if let Some(hit) = self.aggressive_terms.scan(description).into_iter().next() {
            terms_risk = AGGRESSIVE_TERMS_RISK;
            factors.push(RiskFactor::with_evidence(
                "aggressive_payment_terms",
                AGGRESSIVE_TERMS_RISK,
                Evidence::KeywordMatch {
                    keyword: hit.keyword,
                    context: hit.context,
                },
            ));
        }
        if let Some(hit) = self.flexible_terms.scan(description).into_iter().next() {
            terms_risk = (terms_risk - FLEXIBLE_TERMS_RELIEF).max(0.0);
            factors.push(RiskFactor::with_evidence(
                "flexible_payment_terms",
                terms_risk,
                Evidence::KeywordMatch {
                    keyword: hit.keyword,
                    context: hit.context,
                },
            ));
        }
        risks.push(terms_risk);

        // Sub-analysis 5: consumer mail provider.
        let consumer_email = request
            .email_domain()
            .is_some_and(|d| tables::free_mail_providers().contains(d.to_lowercase().as_str()));
        let mut email_risk = 0.0;
        if consumer_email {
            email_risk = CONSUMER_EMAIL_RISK;
            factors.push(RiskFactor::new("consumer_email_provider", CONSUMER_EMAIL_RISK));
        }
        risks.push(email_risk);

        let max = risks.iter().copied().fold(0.0, f64::max);
        let score = if max >= NEAR_TERMINAL {
            // Bankruptcy decides alone; quiet slots cannot soften it.
            max
        } else {
            blend_max_mean(&risks, MAX_WEIGHT)
        };

        let signal = RiskSignal::new(SignalKind::Payment, score, factors);
        let rating = ReliabilityRating::from_score(signal.score);
        Ok(signal.with_rating(SignalRating::Reliability(rating)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_core::types::RequestId;

    fn request(email: &str, description: &str) -> OnboardingRequest {
        OnboardingRequest {
            request_id: RequestId::generate(),
            vendor_name: "Acme Corp".to_string(),
            contact_email: email.to_string(),
            business_description: description.to_string(),
            tax_id: "84-2957163".to_string(),
            source_ip: "203.0.113.7".to_string(),
            submitted_at: 1_760_000_000,
            form_completion_secs: None,
        }
    }

    /// 2026-01-05 12:00 UTC.
    const NOW: i64 = 1_767_614_400;

    #[test]
    fn year_conversion_is_civil() {
        assert_eq!(PaymentAnalyzer::year_of(0), 1970);
        assert_eq!(PaymentAnalyzer::year_of(NOW), 2026);
    }

    #[test]
    fn established_business_scores_zero() {
        let signal = PaymentAnalyzer::new()
            .analyze(&request("ops@acme.com", "Serving contractors since 2008."), NOW)
            .unwrap();
        assert_eq!(signal.score, 0.0);
        assert_eq!(signal.factor_names(), vec!["established_business"]);
        assert_eq!(
            signal.rating,
            Some(SignalRating::Reliability(ReliabilityRating::Reliable))
        );
    }

    #[test]
    fn missing_age_blends_against_quiet_slots() {
        let signal = PaymentAnalyzer::new()
            .analyze(&request("ops@acme.com", "Wholesale distribution of fittings."), NOW)
            .unwrap();
        // Only the age slot carries risk: 0.7 * 0.3 + 0.3 * (0.3 / 5).
        assert!((signal.score - 0.228).abs() < 1e-9);
        assert_eq!(signal.factor_names(), vec!["no_establishment_date"]);
    }

    #[test]
    fn bankruptcy_is_near_terminal_despite_age() {
        let signal = PaymentAnalyzer::new()
            .analyze(
                &request(
                    "ops@acme.com",
                    "Founded 2001, currently emerging from Chapter 11 bankruptcy.",
                ),
                NOW,
            )
            .unwrap();
        assert!((signal.score - 0.95).abs() < 1e-9);
        assert!(signal.factor_names().contains(&"bankruptcy_indicator"));
        assert_eq!(
            signal.rating,
            Some(SignalRating::Reliability(ReliabilityRating::HighRisk))
        );
    }

    #[test]
    fn distress_density_grows_but_caps() {
        let one = PaymentAnalyzer::new()
            .analyze(
                &request("ops@acme.com", "Founded 1999, currently restructuring."),
                NOW,
            )
            .unwrap();
        let many = PaymentAnalyzer::new()
            .analyze(
                &request(
                    "ops@acme.com",
                    "Founded 1999. Restructuring after layoffs, losses, downsizing \
                     and cash flow issues.",
                ),
                NOW,
            )
            .unwrap();
        // One term: 0.7 * 0.4 + 0.3 * 0.08 = 0.304. Five terms hit the cap:
        // 0.7 * 0.6 + 0.3 * 0.12 = 0.456.
        assert!((one.score - 0.304).abs() < 1e-9);
        assert!((many.score - 0.456).abs() < 1e-9);
    }

    #[test]
    fn consumer_email_raises_the_blend() {
        let corporate = PaymentAnalyzer::new()
            .analyze(&request("ops@acme.com", "Serving contractors since 2008."), NOW)
            .unwrap();
        let consumer = PaymentAnalyzer::new()
            .analyze(&request("ops@gmail.com", "Serving contractors since 2008."), NOW)
            .unwrap();
        // 0.7 * 0.15 + 0.3 * (0.15 / 5) = 0.114 over a zero baseline.
        assert_eq!(corporate.score, 0.0);
        assert!((consumer.score - 0.114).abs() < 1e-9);
    }

    #[test]
    fn flexible_terms_relieve_aggressive_terms() {
        let aggressive = PaymentAnalyzer::new()
            .analyze(
                &request("ops@acme.com", "Since 2008. Payment upfront, no refunds."),
                NOW,
            )
            .unwrap();
        let relieved = PaymentAnalyzer::new()
            .analyze(
                &request("ops@acme.com", "Since 2008. Payment upfront, but net 30 available."),
                NOW,
            )
            .unwrap();
        assert!(aggressive.factor_names().contains(&"aggressive_payment_terms"));
        // 0.5 vs 0.3 in the terms slot.
        assert!((aggressive.score - 0.38).abs() < 1e-9);
        assert!((relieved.score - 0.228).abs() < 1e-9);
        assert!(relieved.factor_names().contains(&"flexible_payment_terms"));
    }

    #[test]
    fn startup_language_floors_the_age_risk() {
        let signal = PaymentAnalyzer::new()
            .analyze(&request("ops@acme.com", "A new company selling widgets."), NOW)
            .unwrap();
        let names = signal.factor_names();
        assert!(names.contains(&"no_establishment_date"));
        assert!(names.contains(&"startup_language"));
        // Age slot floored to 0.5: 0.7 * 0.5 + 0.3 * 0.1 = 0.38.
        assert!((signal.score - 0.38).abs() < 1e-9);
    }

    #[test]
    fn earliest_year_sets_the_age() {
        let signal = PaymentAnalyzer::new()
            .analyze(
                &request("ops@acme.com", "Rebranded in 2024; original firm dates to 1995."),
                NOW,
            )
            .unwrap();
        assert_eq!(signal.factor_names(), vec!["established_business"]);
    }
}
