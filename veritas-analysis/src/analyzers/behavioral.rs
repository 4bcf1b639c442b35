//! Behavioral analyzer.
//!
//! Scores how the request was submitted rather than what it says:
//! submission timing, form-completion speed against the historical
//! baseline, description shape, and placeholder or test-harness input.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use statrs::statistics::Statistics;

use veritas_core::config::AnalysisConfig;
use veritas_core::errors::AnalyzerError;
use veritas_core::traits::HistoryStore;
use veritas_core::types::{Evidence, OnboardingRequest, RiskFactor, RiskSignal, SignalKind};

use crate::extract::KeywordScanner;
use crate::scoring::blend::blend_max_mean;
use crate::tables;

use super::traits::SignalAnalyzer;

const MAX_WEIGHT: f64 = 0.6;
const LATE_NIGHT_SEVERITY: f64 = 0.5;
const OFF_HOURS_SEVERITY: f64 = 0.3;
const WEEKEND_SEVERITY: f64 = 0.15;
const SHORT_DESCRIPTION_SEVERITY: f64 = 0.25;
const LONG_DESCRIPTION_SEVERITY: f64 = 0.1;
const REPETITION_SEVERITY: f64 = 0.3;
const LENGTH_OUTLIER_SEVERITY: f64 = 0.3;
const OUTLIER_SEVERITY: f64 = 0.6;
const FAST_COMPLETION_SEVERITY: f64 = 0.7;
const PLACEHOLDER_SEVERITY: f64 = 0.7;
const TEST_NAME_SEVERITY: f64 = 0.4;
const TEST_TAX_ID_SEVERITY: f64 = 0.6;
const DEGRADED_INPUT_SEVERITY: f64 = 0.4;

/// Late-night window (UTC hours, inclusive start, exclusive end).
const LATE_NIGHT: (u32, u32) = (2, 5);
/// A serious application lands inside this word-count band.
const TYPICAL_WORD_COUNT: (usize, usize) = (50, 500);
/// Repetition only means anything past this many words.
const REPETITION_MIN_WORDS: usize = 10;
/// Below this unique-to-total word ratio the text reads as stuffing.
const REPETITION_RATIO: f64 = 0.5;
/// |z| beyond this marks an outlier against the baseline.
const OUTLIER_Z: f64 = 3.0;
/// Baseline samples required before z-scoring means anything.
const MIN_BASELINE: usize = 5;
/// No human completes the full form this fast.
const FAST_COMPLETION_SECS: u32 = 30;

pub struct BehavioralAnalyzer {
    history: Arc<dyn HistoryStore>,
    placeholder: KeywordScanner,
    test_names: KeywordScanner,
    config: AnalysisConfig,
}

impl BehavioralAnalyzer {
    pub fn new(history: Arc<dyn HistoryStore>, config: AnalysisConfig) -> Self {
        Self {
            history,
            placeholder: KeywordScanner::new(tables::PLACEHOLDER_PATTERNS),
            test_names: KeywordScanner::new(tables::TEST_NAME_PATTERNS),
            config,
        }
    }

    fn utc_hour(timestamp: i64) -> u32 {
        (timestamp.rem_euclid(86_400) / 3_600) as u32
    }

    fn is_weekend(timestamp: i64) -> bool {
        // 1970-01-01 was a Thursday.
        let day = timestamp.div_euclid(86_400).rem_euclid(7);
        day == 2 || day == 3
    }

    fn is_test_tax_id(tax_id: &str) -> bool {
        let digits: Vec<char> = tax_id.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < 9 {
            return true;
        }
        let all_same = digits.iter().all(|&c| c == digits[0]);
        let sequential = digits.iter().collect::<String>().starts_with("123456789");
        all_same || sequential
    }

    /// Missing required fields degrade the signal instead of silently
    /// producing a clean score.
    fn has_degraded_input(request: &OnboardingRequest) -> bool {
        [
            &request.vendor_name,
            &request.business_description,
            &request.tax_id,
            &request.contact_email,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

impl SignalAnalyzer for BehavioralAnalyzer {
    fn kind(&self) -> SignalKind {
        SignalKind::Behavioral
    }

    fn analyze(&self, request: &OnboardingRequest, now: i64) -> Result<RiskSignal, AnalyzerError> {
        let mut factors = Vec::new();

        let hour = Self::utc_hour(request.submitted_at);
        if (LATE_NIGHT.0..LATE_NIGHT.1).contains(&hour) {
            factors.push(RiskFactor::with_evidence(
                "late_night_submission",
                LATE_NIGHT_SEVERITY,
                Evidence::Metric {
                    name: "submission_hour_utc".to_string(),
                    value: f64::from(hour),
                },
            ));
        } else if hour < self.config.effective_business_hours_start()
            || hour >= self.config.effective_business_hours_end()
        {
            factors.push(RiskFactor::with_evidence(
                "outside_business_hours",
                OFF_HOURS_SEVERITY,
                Evidence::Metric {
                    name: "submission_hour_utc".to_string(),
                    value: f64::from(hour),
                },
            ));
        }
        if Self::is_weekend(request.submitted_at) {
            factors.push(RiskFactor::new("weekend_submission", WEEKEND_SEVERITY));
        }

        if Self::has_degraded_input(request) {
            factors.push(RiskFactor::new("degraded_input", DEGRADED_INPUT_SEVERITY));
        }

        let window_secs = i64::from(self.config.effective_history_window_hours()) * 3600;
        let history: Vec<OnboardingRequest> = self
            .history
            .recent_requests(now, window_secs, self.config.effective_history_limit())?
            .into_iter()
            .filter(|p| p.request_id != request.request_id)
            .collect();

        let description = request.business_description.trim();
        if !description.is_empty() {
            let words: Vec<&str> = description.split_whitespace().collect();
            if words.len() < TYPICAL_WORD_COUNT.0 {
                factors.push(RiskFactor::with_evidence(
                    "description_too_short",
                    SHORT_DESCRIPTION_SEVERITY,
                    Evidence::Metric {
                        name: "word_count".to_string(),
                        value: words.len() as f64,
                    },
                ));
            } else if words.len() > TYPICAL_WORD_COUNT.1 {
                factors.push(RiskFactor::with_evidence(
                    "description_too_long",
                    LONG_DESCRIPTION_SEVERITY,
                    Evidence::Metric {
                        name: "word_count".to_string(),
                        value: words.len() as f64,
                    },
                ));
            }

            if words.len() > REPETITION_MIN_WORDS {
                let unique: FxHashSet<String> =
                    words.iter().map(|w| w.to_lowercase()).collect();
                let ratio = unique.len() as f64 / words.len() as f64;
                if ratio < REPETITION_RATIO {
                    factors.push(RiskFactor::with_evidence(
                        "repetitive_text",
                        REPETITION_SEVERITY,
                        Evidence::Metric {
                            name: "unique_word_ratio".to_string(),
                            value: ratio,
                        },
                    ));
                }
            }

            let lengths: Vec<f64> = history
                .iter()
                .map(|p| p.business_description.len() as f64)
                .collect();
            if lengths.len() >= MIN_BASELINE {
                let mean = lengths.as_slice().mean();
                let std_dev = lengths.as_slice().std_dev();
                if std_dev.is_finite() && std_dev > 0.0 {
                    let z = (description.len() as f64 - mean) / std_dev;
                    if z.abs() > OUTLIER_Z {
                        factors.push(RiskFactor::with_evidence(
                            "description_length_outlier",
                            LENGTH_OUTLIER_SEVERITY,
                            Evidence::Metric {
                                name: "description_length_zscore".to_string(),
                                value: z,
                            },
                        ));
                    }
                }
            }

            for hit in self.placeholder.scan(description) {
                factors.push(RiskFactor::with_evidence(
                    "placeholder_text",
                    PLACEHOLDER_SEVERITY,
                    Evidence::KeywordMatch {
                        keyword: hit.keyword,
                        context: hit.context,
                    },
                ));
                break; // One placeholder factor is enough.
            }
        }

        if let Some(secs) = request.form_completion_secs {
            if secs < FAST_COMPLETION_SECS {
                factors.push(RiskFactor::with_evidence(
                    "implausibly_fast_completion",
                    FAST_COMPLETION_SEVERITY,
                    Evidence::Metric {
                        name: "form_completion_secs".to_string(),
                        value: f64::from(secs),
                    },
                ));
            } else {
                let baseline: Vec<f64> = history
                    .iter()
                    .filter_map(|p| p.form_completion_secs)
                    .map(f64::from)
                    .collect();
                if baseline.len() >= MIN_BASELINE {
                    let mean = baseline.as_slice().mean();
                    let std_dev = baseline.as_slice().std_dev();
                    if std_dev.is_finite() && std_dev > 0.0 {
                        let z = (f64::from(secs) - mean) / std_dev;
                        if z.abs() > OUTLIER_Z {
                            factors.push(RiskFactor::with_evidence(
                                "completion_time_outlier",
                                OUTLIER_SEVERITY,
                                Evidence::Metric {
                                    name: "completion_time_zscore".to_string(),
                                    value: z,
                                },
                            ));
                        }
                    }
                }
            }
        }

        for hit in self.test_names.scan(&request.vendor_name) {
            factors.push(RiskFactor::with_evidence(
                "test_pattern_in_name",
                TEST_NAME_SEVERITY,
                Evidence::KeywordMatch {
                    keyword: hit.keyword,
                    context: request.vendor_name.clone(),
                },
            ));
            break;
        }

        if Self::is_test_tax_id(&request.tax_id) {
            factors.push(RiskFactor::new("test_tax_id", TEST_TAX_ID_SEVERITY));
        }

        let severities: Vec<f64> = factors.iter().map(|f| f.severity).collect();
        let score = blend_max_mean(&severities, MAX_WEIGHT);
        Ok(RiskSignal::new(SignalKind::Behavioral, score, factors))
    }
}
