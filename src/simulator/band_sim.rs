//! Percentile bands of the bankroll over simulated time.
//!
//! Uses the heavier-tailed mixture payouts and a trailing stop-loss that locks
//! in a quarter of the session's best gain.

use super::config::SessionInput;
use super::game::Game;
use super::payout::PayoutSampler;
use super::percentile::percentile_sorted;
use super::plan::SessionPlan;
use super::report::PathBands;
use super::runner::run_batches;
use super::tuning::{MIN_BAND_TRIALS, TRAILING_STOP_GAIN_SHARE};
use rand::Rng;
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;

const BAND_PERCENTILES: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

/// Stop level once the session has peaked at `peak`: the plan's stop-loss
/// raised by a quarter of the best gain so far. Never decreases as `peak` grows.
pub fn trailing_stop(plan: &SessionPlan, peak: f64) -> f64 {
    let gain = (peak - plan.start_bankroll).max(0.0);
    plan.stop_loss + gain * TRAILING_STOP_GAIN_SHARE
}

/// Append one trial's path (`plan.spins + 1` values) to `out`.
///
/// Once the trial ends, its terminal value fills every remaining index:
/// the bankroll if it could not cover a spin, the take-profit level on a
/// win, and the bankroll floored at the stop-loss when the trailing stop hits.
pub fn simulate_path<R: Rng + ?Sized>(
    plan: &SessionPlan,
    payout: &PayoutSampler,
    rng: &mut R,
    out: &mut Vec<f64>,
) {
    let steps = plan.spins + 1;
    let row_start = out.len();
    let bet = plan.sim_bet();
    let spin_cost = bet * plan.effective.cost_mult;
    let mut bank = plan.start_bankroll;
    let mut peak = bank;

    out.push(bank);
    for _ in 0..plan.spins {
        if bank < spin_cost {
            break;
        }
        bank -= spin_cost;
        if rng.gen_bool(plan.game.hit_rate) {
            bank += bet * payout.draw(rng);
        }
        peak = peak.max(bank);

        if bank >= plan.take_profit {
            out.push(plan.take_profit);
            break;
        }
        if bank <= trailing_stop(plan, peak) {
            out.push(bank.max(plan.stop_loss));
            break;
        }
        out.push(bank);
    }

    let terminal = out[out.len() - 1];
    out.resize(row_start + steps, terminal);
}

/// Run the band Monte Carlo for `game` under `input`.
pub fn simulate_path_bands<R: Rng + ?Sized>(
    game: &Game,
    input: &SessionInput,
    rng: &mut R,
) -> PathBands {
    let never = AtomicBool::new(false);
    simulate_path_bands_cancellable(game, input, rng, &never).unwrap_or_default()
}

/// As [`simulate_path_bands`], returning `None` if `cancel` is raised mid-run.
pub fn simulate_path_bands_cancellable<R: Rng + ?Sized>(
    game: &Game,
    input: &SessionInput,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Option<PathBands> {
    let plan = SessionPlan::for_bands(game, input);
    let payout =
        PayoutSampler::mixture(plan.mean_on_hit, plan.game.volatility, plan.game.max_win_x);
    let trials = input.trials.max(MIN_BAND_TRIALS) as usize;
    let steps = plan.spins + 1;

    // One dense trials x steps buffer per batch, rows in trial order.
    let buffers = run_batches(
        trials,
        rng,
        cancel,
        |batch_trials| Vec::with_capacity(batch_trials * steps),
        |trial_rng, buf| simulate_path(&plan, &payout, trial_rng, buf),
    )?;

    Some(reduce_bands(&buffers, steps, trials))
}

/// Collapse per-batch row buffers into the five percentiles at every index.
fn reduce_bands(buffers: &[Vec<f64>], steps: usize, trials: usize) -> PathBands {
    let per_index: Vec<[f64; 5]> = (0..steps)
        .into_par_iter()
        .map_init(
            || Vec::with_capacity(trials),
            |column: &mut Vec<f64>, i| {
                column.clear();
                for buf in buffers {
                    column.extend(buf.chunks_exact(steps).map(|row| row[i]));
                }
                column.sort_unstable_by(|a, b| a.total_cmp(b));
                let sorted: &[f64] = column;
                BAND_PERCENTILES.map(|p| percentile_sorted(sorted, p))
            },
        )
        .collect();

    let mut bands = PathBands {
        steps,
        p10: Vec::with_capacity(steps),
        p25: Vec::with_capacity(steps),
        p50: Vec::with_capacity(steps),
        p75: Vec::with_capacity(steps),
        p90: Vec::with_capacity(steps),
    };
    for [p10, p25, p50, p75, p90] in per_index {
        bands.p10.push(p10);
        bands.p25.push(p25);
        bands.p50.push(p50);
        bands.p75.push(p75);
        bands.p90.push(p90);
    }
    bands
}
