use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};

/// Uniform integer recovery time over `[min_days, max_days]`.
#[derive(Debug, Clone)]
pub struct AbsenceSampler {
    min_days: u32,
    max_days: u32,
    dist: Uniform<u32>,
}

impl AbsenceSampler {
    pub fn new(min_days: u32, max_days: u32) -> Result<Self> {
        if min_days > max_days {
            return Err(SimulationError::InvalidAbsenceRange { min: min_days, max: max_days });
        }
        Ok(Self { min_days, max_days, dist: Uniform::new_inclusive(min_days, max_days) })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Self::new(config.min_absence_days, config.max_absence_days)
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min_days, self.max_days)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.dist.sample(rng)
    }
}

/// One-shot draw; prefer [`AbsenceSampler`] when sampling repeatedly.
pub fn sample_absence_days<R: Rng + ?Sized>(rng: &mut R, min_days: u32, max_days: u32) -> Result<u32> {
    Ok(AbsenceSampler::new(min_days, max_days)?.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_samples_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let sampler = AbsenceSampler::new(1, 15).unwrap();
        let mut seen_min = false;
        let mut seen_max = false;

        for _ in 0..10_000 {
            let days = sampler.sample(&mut rng);
            assert!((1..=15).contains(&days), "absence {} not in 1-15", days);
            seen_min |= days == 1;
            seen_max |= days == 15;
        }

        // both ends are reachable
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sample_absence_days(&mut rng, 4, 4).unwrap(), 4);
        }
    }

    #[test]
    fn test_inverted_range_fails() {
        assert!(matches!(
            AbsenceSampler::new(16, 15),
            Err(SimulationError::InvalidAbsenceRange { min: 16, max: 15 })
        ));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(sample_absence_days(&mut rng, 3, 2).is_err());
    }

    #[test]
    fn test_roughly_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let sampler = AbsenceSampler::new(1, 5).unwrap();
        let mut counts = [0u32; 5];
        for _ in 0..10_000 {
            counts[(sampler.sample(&mut rng) - 1) as usize] += 1;
        }
        for count in counts {
            // expected 2000 per bucket
            assert!((1700..=2300).contains(&count), "bucket count {}", count);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_sample_within_bounds(min in 0u32..60, span in 0u32..60, seed in any::<u64>()) {
                let max = min + span;
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let sampler = AbsenceSampler::new(min, max).unwrap();
                for _ in 0..50 {
                    let days = sampler.sample(&mut rng);
                    prop_assert!(days >= min && days <= max);
                }
            }
        }
    }
}
