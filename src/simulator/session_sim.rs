//! Scalar session simulator: how often a session reaches its target or its
//! stop-loss, and where it ends on average.

use super::config::SessionInput;
use super::game::Game;
use super::payout::PayoutSampler;
use super::plan::SessionPlan;
use super::report::SimResult;
use super::runner::run_batches;
use super::tuning::MIN_SESSION_TRIALS;
use rand::Rng;
use std::sync::atomic::AtomicBool;

/// How a single simulated session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    HitTakeProfit,
    HitStopLoss,
    /// Bankroll could not cover the next spin
    Depleted,
    HorizonReached,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    hit_target: u64,
    hit_stop: u64,
    depleted: u64,
    end_sum: f64,
}

impl Tally {
    fn record(&mut self, outcome: TrialOutcome, end: f64) {
        match outcome {
            TrialOutcome::HitTakeProfit => self.hit_target += 1,
            TrialOutcome::HitStopLoss => self.hit_stop += 1,
            TrialOutcome::Depleted => self.depleted += 1,
            TrialOutcome::HorizonReached => {}
        }
        self.end_sum += end;
    }

    fn merge(mut self, other: &Tally) -> Tally {
        self.hit_target += other.hit_target;
        self.hit_stop += other.hit_stop;
        self.depleted += other.depleted;
        self.end_sum += other.end_sum;
        self
    }
}

/// Play one session; returns how it ended and the final bankroll.
pub fn simulate_trial<R: Rng + ?Sized>(
    plan: &SessionPlan,
    payout: &PayoutSampler,
    rng: &mut R,
) -> (TrialOutcome, f64) {
    let bet = plan.sim_bet();
    let spin_cost = bet * plan.effective.cost_mult;
    let mut bank = plan.start_bankroll;

    for _ in 0..plan.spins {
        if bank < spin_cost {
            return (TrialOutcome::Depleted, bank);
        }
        bank -= spin_cost;
        if rng.gen_bool(plan.game.hit_rate) {
            bank += bet * payout.draw(rng);
        }
        if bank >= plan.take_profit {
            return (TrialOutcome::HitTakeProfit, bank);
        }
        if bank <= plan.stop_loss {
            return (TrialOutcome::HitStopLoss, bank);
        }
    }
    (TrialOutcome::HorizonReached, bank)
}

/// Run the scalar Monte Carlo for `game` under `input`.
pub fn simulate_session<R: Rng + ?Sized>(game: &Game, input: &SessionInput, rng: &mut R) -> SimResult {
    let never = AtomicBool::new(false);
    simulate_session_cancellable(game, input, rng, &never).unwrap_or_default()
}

/// As [`simulate_session`], returning `None` if `cancel` is raised mid-run.
pub fn simulate_session_cancellable<R: Rng + ?Sized>(
    game: &Game,
    input: &SessionInput,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Option<SimResult> {
    let plan = SessionPlan::new(game, input);
    let payout = PayoutSampler::single(plan.mean_on_hit, plan.game.volatility, plan.game.max_win_x);
    let trials = input.trials.max(MIN_SESSION_TRIALS);

    let tally = run_batches(
        trials as usize,
        rng,
        cancel,
        |_| Tally::default(),
        |trial_rng, tally| {
            let (outcome, end) = simulate_trial(&plan, &payout, trial_rng);
            tally.record(outcome, end);
        },
    )?
    .iter()
    .fold(Tally::default(), Tally::merge);

    let n = trials as f64;
    Some(SimResult {
        recommended_bet: plan.bet,
        planned_spins: plan.spins,
        prob_ruin: tally.hit_stop as f64 / n,
        prob_hit_target: tally.hit_target as f64 / n,
        prob_depleted: tally.depleted as f64 / n,
        expected_end: tally.end_sum / n,
        stop_loss: plan.stop_loss,
        take_profit: plan.take_profit,
        expected_loss_per_spin: plan.effective.expected_loss_per_spin(),
        trials,
    })
}
