//! Session configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much of the bankroll a player is willing to put at risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl RiskProfile {
    pub fn all() -> [RiskProfile; 3] {
        [
            RiskProfile::Conservative,
            RiskProfile::Balanced,
            RiskProfile::Aggressive,
        ]
    }

    /// Column index into the per-risk tuning tables.
    pub fn index(self) -> usize {
        match self {
            RiskProfile::Conservative => 0,
            RiskProfile::Balanced => 1,
            RiskProfile::Aggressive => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Balanced => "balanced",
            RiskProfile::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conservative" | "c" => Ok(RiskProfile::Conservative),
            "balanced" | "b" => Ok(RiskProfile::Balanced),
            "aggressive" | "a" => Ok(RiskProfile::Aggressive),
            other => Err(format!(
                "unknown risk profile '{other}' (expected conservative, balanced or aggressive)"
            )),
        }
    }
}

/// Configuration for one simulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionInput {
    /// Bankroll at the start of the session
    pub start_bankroll: f64,

    /// Planned play time, used only when `include_time` is set
    pub target_minutes: u32,

    /// Derive the spin count from play time instead of `max_spins_cap`
    pub include_time: bool,

    /// Wagers per minute of play
    pub spins_per_min: u32,

    /// Number of Monte Carlo trials (floored by each simulator)
    pub trials: u32,

    /// Spin horizon when no play time is given
    pub max_spins_cap: u32,

    /// Use `user_bet_size` instead of the heuristic bet
    pub lock_bet_size: bool,

    /// Bet size used when `lock_bet_size` is set
    pub user_bet_size: f64,

    pub risk: RiskProfile,
}

impl Default for SessionInput {
    fn default() -> Self {
        Self {
            start_bankroll: 100.0,
            target_minutes: 0,
            include_time: false,
            spins_per_min: 12,
            trials: 2000,
            max_spins_cap: 2000,
            lock_bet_size: false,
            user_bet_size: 1.0,
            risk: RiskProfile::Balanced,
        }
    }
}

impl SessionInput {
    /// Small trial count for a fast first look.
    pub fn quick_check(start_bankroll: f64) -> Self {
        Self {
            start_bankroll,
            trials: 500,
            max_spins_cap: 500,
            ..Default::default()
        }
    }

    /// Session bounded by play time rather than a spin cap.
    pub fn timed(start_bankroll: f64, minutes: u32) -> Self {
        Self {
            start_bankroll,
            target_minutes: minutes,
            include_time: true,
            ..Default::default()
        }
    }

    /// True when the spin horizon comes from play time.
    pub fn has_time_horizon(&self) -> bool {
        self.include_time && self.target_minutes > 0
    }

    /// Spin horizon before any simulator-specific capping, at least 1.
    pub fn planned_spins(&self) -> usize {
        let spins = if self.has_time_horizon() {
            self.target_minutes as usize * self.spins_per_min.max(1) as usize
        } else {
            self.max_spins_cap as usize
        };
        spins.max(1)
    }
}
