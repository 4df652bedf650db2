//! Heuristic bet size, stop-loss and take-profit.

use super::config::RiskProfile;
use super::tuning::*;

/// Bet that spreads the expected loss of `spins` spins over a risk-scaled
/// slice of the bankroll.
///
/// Clamped to `[MIN_BET, 10% of bankroll]`; the floor wins for tiny bankrolls.
pub fn suggest_bet_size(bankroll: f64, rtp_eff: f64, risk: RiskProfile, spins: usize) -> f64 {
    let expected_loss = (1.0 - rtp_eff).max(MIN_EXPECTED_LOSS);
    let safety = BET_SAFETY[risk.index()];
    let bet = bankroll / (safety * spins.max(1) as f64 * expected_loss);
    if bet.is_nan() {
        return MIN_BET;
    }
    bet.min(bankroll * MAX_BET_FRACTION).max(MIN_BET)
}

pub fn suggest_stop_loss(bankroll: f64, risk: RiskProfile) -> f64 {
    bankroll * (1.0 - STOP_LOSS_FRACTION[risk.index()])
}

/// Multiplier from [`TAKE_PROFIT_TABLE`] for this bankroll tier and risk.
pub fn take_profit_multiplier(bankroll: f64, risk: RiskProfile) -> f64 {
    let row = TAKE_PROFIT_TABLE
        .iter()
        .find(|(upper, _)| bankroll < *upper)
        .unwrap_or(&TAKE_PROFIT_TABLE[TAKE_PROFIT_TABLE.len() - 1]);
    row.1[risk.index()]
}

pub fn suggest_take_profit(bankroll: f64, risk: RiskProfile) -> f64 {
    bankroll * take_profit_multiplier(bankroll, risk)
}
