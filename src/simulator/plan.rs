//! Setup shared by both simulators: normalized inputs, effective parameters,
//! horizon, bet and session bounds.

use super::config::SessionInput;
use super::game::{compute_effective, Effective, Game};
use super::sizing::{suggest_bet_size, suggest_stop_loss, suggest_take_profit};
use super::tuning::*;

#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub game: Game,
    pub effective: Effective,
    pub start_bankroll: f64,
    pub spins: usize,
    pub bet: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Mean payout multiple on a hit, so the long-run return matches `effective`
    pub mean_on_hit: f64,
}

impl SessionPlan {
    /// Plan for the scalar session simulator.
    pub fn new(game: &Game, input: &SessionInput) -> Self {
        Self::with_spins(game, input, |_, _| input.planned_spins())
    }

    /// Plan for the band simulator: untimed sessions are shortened to about
    /// 1.2x the spins the bankroll lasts at the expected loss rate.
    pub fn for_bands(game: &Game, input: &SessionInput) -> Self {
        Self::with_spins(game, input, |bankroll, effective| {
            let spins = input.planned_spins();
            if input.has_time_horizon() {
                return spins;
            }
            let loss = effective.expected_loss_per_spin().max(MIN_LOSS_PER_SPIN);
            // `as` saturates, so a huge ratio just leaves `spins` in charge.
            let lasting = (bankroll / loss * BAND_HORIZON_FACTOR) as usize;
            spins.min(lasting.max(MIN_BAND_SPINS))
        })
    }

    fn with_spins<F>(game: &Game, input: &SessionInput, horizon: F) -> Self
    where
        F: FnOnce(f64, &Effective) -> usize,
    {
        let game = game.normalized();
        let effective = compute_effective(&game);
        let start_bankroll = normalize_bankroll(input.start_bankroll);
        let spins = horizon(start_bankroll, &effective).max(1);

        let bet = if input.lock_bet_size {
            if input.user_bet_size.is_finite() {
                input.user_bet_size
            } else {
                MIN_BET
            }
        } else {
            suggest_bet_size(start_bankroll, effective.rtp, input.risk, spins)
        };

        let mean_on_hit =
            effective.rtp * effective.cost_mult / game.hit_rate.max(MIN_HIT_RATE);

        Self {
            effective,
            start_bankroll,
            spins,
            bet,
            stop_loss: suggest_stop_loss(start_bankroll, input.risk),
            take_profit: suggest_take_profit(start_bankroll, input.risk),
            mean_on_hit,
            game,
        }
    }

    /// Total stake per spin, extras included.
    pub fn spin_cost(&self) -> f64 {
        self.bet * self.effective.cost_mult
    }

    /// Bet used inside the trial loop. A locked bet that is not a positive
    /// finite number would never end a session, so it plays at the minimum.
    pub fn sim_bet(&self) -> f64 {
        if self.bet.is_finite() && self.bet > 0.0 {
            self.bet
        } else {
            MIN_BET
        }
    }
}

fn normalize_bankroll(bankroll: f64) -> f64 {
    if bankroll.is_finite() {
        bankroll.clamp(MIN_BANKROLL, MAX_BANKROLL)
    } else {
        MIN_BANKROLL
    }
}
