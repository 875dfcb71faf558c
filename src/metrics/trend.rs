use crate::synthetic::PlaceholderSource;

/// Noise amplitude used when a caller has no reason to pick another.
pub const DEFAULT_VARIANCE: f64 = 0.3;

/// Noise-free upward ramp from 70% to 130% of `baseline` across `points`.
pub fn trend_envelope(baseline: f64, points: usize) -> Vec<f64> {
    (0..points)
        .map(|i| baseline * (0.7 + (i as f64 / points as f64) * 0.6))
        .collect()
}

/// Synthesize a plausible series of `points` values around `baseline`.
///
/// Each point is the envelope value plus `(U - 0.5) * variance * baseline`
/// noise, floored at zero. Noise is drawn fresh from `source` on every call.
pub fn synthesize(
    baseline: f64,
    points: usize,
    variance: f64,
    source: &mut dyn PlaceholderSource,
) -> Vec<f64> {
    trend_envelope(baseline, points)
        .into_iter()
        .map(|trend| {
            let noise = (source.unit() - 0.5) * variance * baseline;
            (trend + noise).max(0.0)
        })
        .collect()
}
