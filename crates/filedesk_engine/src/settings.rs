use std::time::Duration;

/// Smallest step a tick may take, so a run always terminates.
const MIN_INCREMENT: f64 = 0.1;

/// Increment drawn uniformly from `[base, base + spread)` while progress is below `upto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncrementTier {
    pub upto: f64,
    pub base: f64,
    pub spread: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    pub tick: Duration,
    pub settle: Duration,
    /// Checked in order; the last tier also covers anything above its `upto`.
    pub tiers: Vec<IncrementTier>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(200),
            settle: Duration::from_millis(500),
            tiers: vec![
                IncrementTier {
                    upto: 30.0,
                    base: 3.0,
                    spread: 5.0,
                },
                IncrementTier {
                    upto: 70.0,
                    base: 1.0,
                    spread: 3.0,
                },
                IncrementTier {
                    upto: 100.0,
                    base: 0.5,
                    spread: 1.0,
                },
            ],
        }
    }
}

impl SimulationSettings {
    pub fn with_timing(tick: Duration, settle: Duration) -> Self {
        Self {
            tick,
            settle,
            ..Self::default()
        }
    }

    /// Next random step for a file currently at `progress`.
    pub fn increment(&self, progress: f64, rng: &mut fastrand::Rng) -> f64 {
        let tier = self
            .tiers
            .iter()
            .find(|tier| progress < tier.upto)
            .or_else(|| self.tiers.last());
        let step = match tier {
            Some(tier) => tier.base + rng.f64() * tier.spread,
            None => 1.0,
        };
        step.max(MIN_INCREMENT)
    }

    /// Upper bound on ticks a file needs to reach 100%.
    pub fn max_ticks(&self) -> u32 {
        let mut ticks = 0.0;
        let mut from = 0.0_f64;
        for tier in &self.tiers {
            let to = tier.upto.min(100.0);
            if to > from {
                ticks += ((to - from) / tier.base.max(MIN_INCREMENT)).ceil();
                from = to;
            }
        }
        if from < 100.0 {
            let base = self.tiers.last().map_or(1.0, |tier| tier.base);
            ticks += ((100.0 - from) / base.max(MIN_INCREMENT)).ceil();
        }
        ticks as u32
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationSettings;

    #[test]
    fn increments_decelerate_by_tier() {
        let settings = SimulationSettings::default();
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let low = settings.increment(0.0, &mut rng);
            assert!((3.0..8.0).contains(&low), "low tier step {low}");
            let mid = settings.increment(45.0, &mut rng);
            assert!((1.0..4.0).contains(&mid), "mid tier step {mid}");
            let high = settings.increment(85.0, &mut rng);
            assert!((0.5..1.5).contains(&high), "high tier step {high}");
        }
    }

    #[test]
    fn tier_boundaries_belong_to_the_next_tier() {
        let settings = SimulationSettings::default();
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(settings.increment(30.0, &mut rng) < 4.0);
        assert!(settings.increment(70.0, &mut rng) < 1.5);
    }

    #[test]
    fn empty_tiers_still_make_progress() {
        let settings = SimulationSettings {
            tiers: Vec::new(),
            ..SimulationSettings::default()
        };
        let mut rng = fastrand::Rng::with_seed(3);
        assert_eq!(settings.increment(10.0, &mut rng), 1.0);
        assert_eq!(settings.max_ticks(), 100);
    }

    #[test]
    fn default_tick_bound() {
        // 30/3 + 40/1 + 30/0.5
        assert_eq!(SimulationSettings::default().max_ticks(), 110);
    }
}
