//! Severity blending.

/// Blend factor severities as `w * max + (1 - w) * mean`.
///
/// The max term keeps one severe factor from being averaged away; the
/// mean term rewards corroboration across factors. Empty input is 0.0.
pub fn blend_max_mean(severities: &[f64], max_weight: f64) -> f64 {
    if severities.is_empty() {
        return 0.0;
    }
    let max = severities.iter().copied().fold(f64::MIN, f64::max);
    let mean = severities.iter().sum::<f64>() / severities.len() as f64;
    max_weight * max + (1.0 - max_weight) * mean
}
