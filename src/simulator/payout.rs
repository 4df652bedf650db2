//! Payout multiples for a single winning spin.
//!
//! Both samplers are calibrated so the expected payout (before the cap) equals
//! the requested mean. The mixture adds a rare big-hit component for heavier
//! tails.

use super::game::unit_interval;
use super::tuning::*;
use rand::Rng;
use rand_distr::{Distribution, LogNormal};

/// Log-normal with mean `mean`: `mu = ln(mean) - sigma^2 / 2`.
///
/// Returns `None` only if the parameters are not finite.
fn lognormal_with_mean(mean: f64, sigma: f64) -> Option<LogNormal<f64>> {
    let mean = if mean.is_finite() {
        mean.max(MIN_PAYOUT_MEAN)
    } else {
        MIN_PAYOUT_MEAN
    };
    let mu = mean.ln() - 0.5 * sigma * sigma;
    LogNormal::new(mu, sigma).ok()
}

#[derive(Debug, Clone)]
enum Shape {
    Single(Option<LogNormal<f64>>),
    Mixture {
        big_weight: f64,
        small: Option<LogNormal<f64>>,
        big: Option<LogNormal<f64>>,
    },
}

/// Pre-calibrated payout distribution for one game.
#[derive(Debug, Clone)]
pub struct PayoutSampler {
    shape: Shape,
    mean_on_hit: f64,
    max_x: f64,
}

impl PayoutSampler {
    /// Single log-normal with `sigma = 0.5 + 1.5 * volatility`.
    pub fn single(mean_on_hit: f64, volatility: f64, max_x: f64) -> Self {
        let v = unit_interval(volatility);
        let sigma = SINGLE_SIGMA_BASE + SINGLE_SIGMA_SLOPE * v;
        Self {
            shape: Shape::Single(lognormal_with_mean(mean_on_hit, sigma)),
            mean_on_hit,
            max_x,
        }
    }

    /// Small/big two-component mixture with the same overall mean.
    pub fn mixture(mean_on_hit: f64, volatility: f64, max_x: f64) -> Self {
        let v = unit_interval(volatility);
        let big_weight = BIG_HIT_WEIGHT_BASE + BIG_HIT_WEIGHT_SLOPE * v;
        let ratio = BIG_HIT_RATIO_BASE + BIG_HIT_RATIO_SLOPE * v;

        let denom = ((1.0 - big_weight) + big_weight * ratio).max(MIN_MIXTURE_DENOM);
        let small_mean = mean_on_hit / denom;
        let big_mean = ratio * small_mean;

        let sigma = MIXTURE_SIGMA_BASE + MIXTURE_SIGMA_SLOPE * v;
        Self {
            shape: Shape::Mixture {
                big_weight,
                small: lognormal_with_mean(small_mean, sigma),
                big: lognormal_with_mean(big_mean, sigma),
            },
            mean_on_hit,
            max_x,
        }
    }

    /// Draw one payout multiple, clamped to the cap.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let dist = match &self.shape {
            Shape::Single(dist) => dist,
            Shape::Mixture {
                big_weight,
                small,
                big,
            } => {
                if rng.gen_bool(*big_weight) {
                    big
                } else {
                    small
                }
            }
        };
        let x = match dist {
            Some(d) => d.sample(rng),
            None => self.fallback_mean(),
        };
        if x.is_finite() {
            x.min(self.max_x)
        } else {
            self.max_x
        }
    }

    fn fallback_mean(&self) -> f64 {
        if self.mean_on_hit.is_finite() {
            self.mean_on_hit.max(0.0)
        } else {
            0.0
        }
    }
}

/// One draw from the single log-normal sampler.
pub fn draw_payout_single<R: Rng + ?Sized>(
    mean_on_hit: f64,
    volatility: f64,
    max_x: f64,
    rng: &mut R,
) -> f64 {
    PayoutSampler::single(mean_on_hit, volatility, max_x).draw(rng)
}

/// One draw from the small/big mixture sampler.
pub fn draw_payout_mixture<R: Rng + ?Sized>(
    mean_on_hit: f64,
    volatility: f64,
    max_x: f64,
    rng: &mut R,
) -> f64 {
    PayoutSampler::mixture(mean_on_hit, volatility, max_x).draw(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_mean(sampler: &PayoutSampler, n: usize, seed: u64) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| sampler.draw(&mut rng)).sum::<f64>() / n as f64
    }

    #[test]
    fn test_single_mean_is_calibrated() {
        // Low volatility keeps the log-normal tail light enough to converge.
        let sampler = PayoutSampler::single(4.0, 0.0, 1e9);
        let mean = sample_mean(&sampler, 200_000, 7);
        assert!((mean - 4.0).abs() < 0.1, "mean was {mean}");
    }

    #[test]
    fn test_mixture_mean_is_calibrated() {
        let sampler = PayoutSampler::mixture(3.0, 0.0, 1e9);
        let mean = sample_mean(&sampler, 400_000, 11);
        assert!((mean - 3.0).abs() < 0.15, "mean was {mean}");
    }

    #[test]
    fn test_draws_respect_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..10_000 {
            assert!(draw_payout_single(50.0, 1.0, 20.0, &mut rng) <= 20.0);
            assert!(draw_payout_mixture(50.0, 1.0, 20.0, &mut rng) <= 20.0);
        }
    }

    #[test]
    fn test_draws_are_positive() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..10_000 {
            assert!(draw_payout_mixture(2.0, 0.5, 5000.0, &mut rng) > 0.0);
        }
    }

    #[test]
    fn test_degenerate_means_stay_finite() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for mean in [0.0, -3.0, f64::NAN] {
            let a = draw_payout_single(mean, 0.5, 100.0, &mut rng);
            let b = draw_payout_mixture(mean, f64::NAN, 100.0, &mut rng);
            assert!(a.is_finite() && a >= 0.0);
            assert!(b.is_finite() && b >= 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let sampler = PayoutSampler::mixture(2.5, 0.8, 5000.0);
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(sampler.draw(&mut a).to_bits(), sampler.draw(&mut b).to_bits());
        }
    }
}
