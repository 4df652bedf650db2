//! Batched, parallel trial runner.
//!
//! Trials are cut into fixed-size batches. Each batch gets its own ChaCha8 RNG
//! seeded from the caller's RNG, so results depend only on that RNG and the
//! trial count, never on how rayon schedules the batches.

use super::tuning::TRIALS_PER_BATCH;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    pub seed: u64,
    pub trials: usize,
}

/// Split `trials` into batches, drawing one seed per batch in order.
pub fn plan_batches<R: Rng + ?Sized>(trials: usize, rng: &mut R) -> Vec<Batch> {
    let mut batches = Vec::with_capacity(trials.div_ceil(TRIALS_PER_BATCH));
    let mut remaining = trials;
    while remaining > 0 {
        let size = remaining.min(TRIALS_PER_BATCH);
        batches.push(Batch {
            seed: rng.gen(),
            trials: size,
        });
        remaining -= size;
    }
    batches
}

/// Run every trial, folding each batch into its own accumulator.
///
/// `init` receives the batch size. Returns the accumulators in batch order,
/// or `None` if `cancel` was raised before all trials finished.
pub fn run_batches<A, R, I, F>(
    trials: usize,
    rng: &mut R,
    cancel: &AtomicBool,
    init: I,
    run_trial: F,
) -> Option<Vec<A>>
where
    A: Send,
    R: Rng + ?Sized,
    I: Fn(usize) -> A + Sync,
    F: Fn(&mut ChaCha8Rng, &mut A) + Sync,
{
    let batches = plan_batches(trials, rng);
    batches
        .into_par_iter()
        .map(|batch| {
            let mut batch_rng = ChaCha8Rng::seed_from_u64(batch.seed);
            let mut acc = init(batch.trials);
            for _ in 0..batch.trials {
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }
                run_trial(&mut batch_rng, &mut acc);
            }
            Some(acc)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_cover_all_trials() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let batches = plan_batches(1000, &mut rng);
        assert_eq!(batches.len(), 4);
        assert_eq!(batches.iter().map(|b| b.trials).sum::<usize>(), 1000);
        assert_eq!(batches[3].trials, 1000 - 3 * TRIALS_PER_BATCH);
    }

    #[test]
    fn test_no_trials_no_batches() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(plan_batches(0, &mut rng).is_empty());
    }

    #[test]
    fn test_batch_seeds_follow_caller_rng() {
        let a = plan_batches(600, &mut ChaCha8Rng::seed_from_u64(99));
        let b = plan_batches(600, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
        assert_ne!(a[0].seed, a[1].seed);
    }

    #[test]
    fn test_run_batches_counts_every_trial() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let cancel = AtomicBool::new(false);
        let counts = run_batches(700, &mut rng, &cancel, |_| 0usize, |_, n| *n += 1).unwrap();
        assert_eq!(counts.iter().sum::<usize>(), 700);
    }

    #[test]
    fn test_run_batches_is_deterministic() {
        let cancel = AtomicBool::new(false);
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            run_batches(
                900,
                &mut rng,
                &cancel,
                |n| Vec::with_capacity(n),
                |r, acc: &mut Vec<u32>| acc.push(r.gen()),
            )
            .unwrap()
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_cancelled_run_returns_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let cancel = AtomicBool::new(true);
        assert!(run_batches(10, &mut rng, &cancel, |_| (), |_, _| ()).is_none());
    }
}
