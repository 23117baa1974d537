use std::time::Duration;

/// Linear CFR style decay of early training signal.
///
/// After the t-th discount interval every regret and visit count is
/// multiplied by t / (t + 1), so the factor climbs toward 1 and the
/// first, noisiest iterations weigh least. Past the cutoff nothing is
/// discounted any more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount {
    interval: Duration,
    cutoff: Duration,
}

impl From<(Duration, Duration)> for Discount {
    fn from((interval, cutoff): (Duration, Duration)) -> Self {
        assert!(!interval.is_zero(), "zero discount interval");
        Self { interval, cutoff }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::from((crate::DISCOUNT_INTERVAL, crate::DISCOUNT_CUTOFF))
    }
}

impl Discount {
    pub fn interval(&self) -> Duration {
        self.interval
    }
    /// discount intervals completed after `elapsed` training time
    pub fn epoch(&self, elapsed: Duration) -> u32 {
        (elapsed.as_secs_f64() / self.interval.as_secs_f64()) as u32
    }
    /// factor to apply at `elapsed`, none once discounting has stopped
    pub fn factor(&self, elapsed: Duration) -> Option<f32> {
        if elapsed >= self.cutoff {
            return None;
        }
        let t = self.epoch(elapsed).max(1) as f32;
        Some(t / (t + 1.))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(m: u64) -> Duration {
        Duration::from_secs(m * 60)
    }

    #[test]
    fn factor_climbs_toward_one() {
        let discount = Discount::from((minutes(10), minutes(400)));
        let factors = [10, 20, 100, 390]
            .into_iter()
            .map(|m| discount.factor(minutes(m)).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(factors[0], 0.5);
        assert!(factors.windows(2).all(|w| w[0] < w[1]));
        assert!(factors.iter().all(|f| *f < 1.));
    }

    #[test]
    fn stops_at_cutoff() {
        let discount = Discount::from((minutes(10), minutes(400)));
        assert_eq!(discount.factor(minutes(400)), None);
        assert_eq!(discount.factor(minutes(1_000)), None);
    }

    #[test]
    fn early_calls_use_the_first_epoch() {
        let discount = Discount::from((minutes(10), minutes(400)));
        assert_eq!(discount.factor(Duration::from_secs(1)), Some(0.5));
    }
}
