//! Analyzer tuning knobs.

use serde::{Deserialize, Serialize};

/// Configuration shared by the signal analyzers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Per-analyzer wall-clock budget in milliseconds. Default: 5000.
    pub analyzer_timeout_ms: Option<u64>,
    /// Recent-history window for network analysis, in hours. Default: 24.
    pub history_window_hours: Option<u32>,
    /// Maximum prior requests fetched per history lookup. Default: 200.
    pub history_limit: Option<u32>,
    /// Lower clamp on the domain-trust fraud score. Default: 0.05.
    pub trust_floor: Option<f64>,
    /// Upper clamp on the domain-trust fraud score. Default: 0.95.
    pub trust_ceiling: Option<f64>,
    /// Business-hours window start (UTC hour, inclusive). Default: 8.
    pub business_hours_start: Option<u32>,
    /// Business-hours window end (UTC hour, exclusive). Default: 18.
    pub business_hours_end: Option<u32>,
    /// Submissions within the burst window that count as a burst. Default: 10.
    pub burst_threshold: Option<u32>,
    /// Burst window length in minutes. Default: 60.
    pub burst_window_mins: Option<u32>,
    /// Jaccard similarity above which two descriptions match. Default: 0.85.
    pub similarity_threshold: Option<f64>,
    /// Vendors sharing one source IP that form a cluster. Default: 3.
    pub ip_cluster_min: Option<u32>,
    /// Vendors sharing one email domain that form a cluster. Default: 5.
    pub shared_domain_min: Option<u32>,
}

impl AnalysisConfig {
    pub fn effective_analyzer_timeout_ms(&self) -> u64 {
        self.analyzer_timeout_ms.unwrap_or(5000)
    }

    pub fn effective_history_window_hours(&self) -> u32 {
        self.history_window_hours.unwrap_or(24)
    }

    pub fn effective_history_limit(&self) -> u32 {
        self.history_limit.unwrap_or(200)
    }

    pub fn effective_trust_floor(&self) -> f64 {
        self.trust_floor.unwrap_or(0.05)
    }

    pub fn effective_trust_ceiling(&self) -> f64 {
        self.trust_ceiling.unwrap_or(0.95)
    }

    pub fn effective_business_hours_start(&self) -> u32 {
        self.business_hours_start.unwrap_or(8)
    }

    pub fn effective_business_hours_end(&self) -> u32 {
        self.business_hours_end.unwrap_or(18)
    }

    pub fn effective_burst_threshold(&self) -> u32 {
        self.burst_threshold.unwrap_or(10)
    }

    pub fn effective_burst_window_mins(&self) -> u32 {
        self.burst_window_mins.unwrap_or(60)
    }

    pub fn effective_similarity_threshold(&self) -> f64 {
        self.similarity_threshold.unwrap_or(0.85)
    }

    pub fn effective_ip_cluster_min(&self) -> u32 {
        self.ip_cluster_min.unwrap_or(3)
    }

    pub fn effective_shared_domain_min(&self) -> u32 {
        self.shared_domain_min.unwrap_or(5)
    }
}
