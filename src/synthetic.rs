use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every synthetic value in an analytics view.
///
/// Projects store only current-state metrics, so trend noise and a handful of
/// placeholder metrics (budget utilization, engagement, retention, growth,
/// members active today) are generated. Each placeholder has its own method so
/// an implementation backed by real telemetry can replace it individually.
/// The defaults all derive from [`unit`](PlaceholderSource::unit).
pub trait PlaceholderSource {
    /// A uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Share of budget spent, in `[20, 90)`.
    fn budget_utilization(&mut self) -> f64 {
        self.unit() * 70.0 + 20.0
    }

    /// Team members active today, in `[1, 5]`.
    fn active_today(&mut self) -> u32 {
        ((self.unit() * 5.0).floor() as u32 + 1).min(5)
    }

    /// Goals radar engagement score, in `[60, 100)`.
    fn engagement(&mut self) -> f64 {
        self.unit() * 40.0 + 60.0
    }

    /// Goals radar retention score, in `[70, 100)`.
    fn retention(&mut self) -> f64 {
        self.unit() * 30.0 + 70.0
    }

    /// Goals radar growth score, in `[50, 100)`.
    fn growth(&mut self) -> f64 {
        self.unit() * 50.0 + 50.0
    }

    /// Metrics polar-area engagement magnitude, in `[50, 100)`.
    fn distribution_engagement(&mut self) -> f64 {
        self.unit() * 50.0 + 50.0
    }
}

/// [`PlaceholderSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSource<StdRng> {
    /// Reproducible source, for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PlaceholderSource for RandomSource<R> {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::PlaceholderSource;

    /// Returns the same unit sample forever.
    pub struct FixedSource(pub f64);

    impl PlaceholderSource for FixedSource {
        fn unit(&mut self) -> f64 {
            self.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FixedSource;
    use super::*;

    #[test]
    fn test_placeholder_bounds_at_extremes() {
        let mut low = FixedSource(0.0);
        assert_eq!(low.budget_utilization(), 20.0);
        assert_eq!(low.active_today(), 1);
        assert_eq!(low.engagement(), 60.0);
        assert_eq!(low.retention(), 70.0);
        assert_eq!(low.growth(), 50.0);
        assert_eq!(low.distribution_engagement(), 50.0);

        let mut high = FixedSource(0.999_999);
        assert!(high.budget_utilization() < 90.0);
        assert_eq!(high.active_today(), 5);
        assert!(high.engagement() < 100.0);
        assert!(high.retention() < 100.0);
        assert!(high.growth() < 100.0);
    }

    #[test]
    fn test_random_source_in_range() {
        let mut src = RandomSource::seeded(7);
        for _ in 0..1000 {
            let u = src.unit();
            assert!((0.0..1.0).contains(&u));
            let b = src.budget_utilization();
            assert!((20.0..90.0).contains(&b));
            let a = src.active_today();
            assert!((1..=5).contains(&a));
        }
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RandomSource::seeded(42);
        let mut b = RandomSource::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.unit(), b.unit());
        }
    }
}
