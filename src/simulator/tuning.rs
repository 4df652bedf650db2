//! Tuning constants shared by the sizing heuristics and both simulators.
//!
//! Every magic number the engine depends on lives here.

// =============================================================================
// NUMERIC GUARDS
// =============================================================================

/// Floor for a payout mean before taking its logarithm.
pub const MIN_PAYOUT_MEAN: f64 = 1e-4;

/// Floor for the per-unit expected loss used by bet sizing.
pub const MIN_EXPECTED_LOSS: f64 = 1e-4;

/// Floor for the hit rate when deriving the mean payout on a hit.
pub const MIN_HIT_RATE: f64 = 0.001;

/// Floor for the expected loss per spin when capping the band horizon.
pub const MIN_LOSS_PER_SPIN: f64 = 0.001;

/// Floor for the mixture normalizer `(1 - w_big) + w_big * r`.
pub const MIN_MIXTURE_DENOM: f64 = 1e-6;

/// Smallest bankroll the engine will simulate.
pub const MIN_BANKROLL: f64 = 0.01;

/// Largest bankroll the engine will simulate. Keeps the take-profit level
/// and every bankroll reachable from it far inside the `f64` range.
pub const MAX_BANKROLL: f64 = 1e15;

/// Ceiling on a game's payout cap, as a multiple of the base bet.
pub const MAX_WIN_X: f64 = 1e7;

/// Ceiling on the combined stake multiplier of all enabled extras.
pub const MAX_EXTRA_COST_MULT: f64 = 1e6;

// =============================================================================
// BET SIZING
// =============================================================================

/// Smallest bet the sizing heuristic recommends.
pub const MIN_BET: f64 = 0.01;

/// Largest bet as a fraction of the bankroll.
pub const MAX_BET_FRACTION: f64 = 0.10;

/// Safety factor per risk profile (Conservative, Balanced, Aggressive).
/// Larger means smaller bets.
pub const BET_SAFETY: [f64; 3] = [12.0, 8.0, 5.0];

/// Fraction of the starting bankroll a session may lose before stopping.
pub const STOP_LOSS_FRACTION: [f64; 3] = [0.30, 0.45, 0.65];

/// Take-profit multipliers keyed by bankroll tier.
///
/// Each row is `(exclusive upper bound, [conservative, balanced, aggressive])`.
/// Small stacks aim for higher multiples.
pub const TAKE_PROFIT_TABLE: [(f64, [f64; 3]); 5] = [
    (25.0, [3.0, 4.0, 6.0]),
    (100.0, [2.0, 2.5, 3.5]),
    (500.0, [1.7, 2.0, 2.7]),
    (1500.0, [1.5, 1.8, 2.2]),
    (f64::INFINITY, [1.4, 1.6, 2.0]),
];

// =============================================================================
// PAYOUT SHAPE
// =============================================================================

/// Log-normal sigma for the single sampler: `base + slope * volatility`.
pub const SINGLE_SIGMA_BASE: f64 = 0.5;
pub const SINGLE_SIGMA_SLOPE: f64 = 1.5;

/// Log-normal sigma for either mixture component.
pub const MIXTURE_SIGMA_BASE: f64 = 0.45;
pub const MIXTURE_SIGMA_SLOPE: f64 = 1.7;

/// Big-hit probability: 5% at zero volatility up to 20% at full volatility.
pub const BIG_HIT_WEIGHT_BASE: f64 = 0.05;
pub const BIG_HIT_WEIGHT_SLOPE: f64 = 0.15;

/// Big-hit mean as a multiple of the small-hit mean: 6x up to 30x.
pub const BIG_HIT_RATIO_BASE: f64 = 6.0;
pub const BIG_HIT_RATIO_SLOPE: f64 = 24.0;

// =============================================================================
// SIMULATION
// =============================================================================

/// Minimum trial count for the scalar session simulator.
pub const MIN_SESSION_TRIALS: u32 = 100;

/// Minimum trial count for the path band simulator.
pub const MIN_BAND_TRIALS: u32 = 200;

/// Smallest horizon the band simulator shrinks an untimed session to.
pub const MIN_BAND_SPINS: usize = 50;

/// Untimed band horizon: this many times the spins the bankroll lasts on average.
pub const BAND_HORIZON_FACTOR: f64 = 1.2;

/// Share of the best gain so far added to the stop-loss by the trailing stop.
pub const TRAILING_STOP_GAIN_SHARE: f64 = 0.25;

/// Trials per independently seeded batch.
pub const TRIALS_PER_BATCH: usize = 256;
