//! Monte Carlo session planner.
//!
//! Given a game and a session configuration, recommend a bet size, stop-loss
//! and take-profit, then estimate outcomes by simulation:
//! - `simulate_session`: chance of reaching the target or the stop-loss and
//!   the expected ending bankroll
//! - `simulate_path_bands`: p10..p90 of the bankroll at every spin
//!
//! Every entry point takes the RNG explicitly. Trials run in parallel batches
//! seeded from it, so a seeded RNG gives bit-identical results.

mod band_sim;
mod config;
mod game;
mod payout;
mod percentile;
mod plan;
mod report;
mod runner;
mod session_sim;
pub mod sizing;
pub mod tuning;

pub use band_sim::{
    simulate_path, simulate_path_bands, simulate_path_bands_cancellable, trailing_stop,
};
pub use config::{RiskProfile, SessionInput};
pub use game::{compute_effective, Effective, ExtraBet, Game};
pub use payout::{draw_payout_mixture, draw_payout_single, PayoutSampler};
pub use percentile::{percentile, percentile_sorted};
pub use plan::SessionPlan;
pub use report::{PathBands, SimResult};
pub use runner::{plan_batches, run_batches, Batch};
pub use session_sim::{
    simulate_session, simulate_session_cancellable, simulate_trial, TrialOutcome,
};
pub use sizing::{suggest_bet_size, suggest_stop_loss, suggest_take_profit};
