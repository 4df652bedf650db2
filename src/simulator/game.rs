//! Game description and the effective-parameter blend over enabled extras.

use super::tuning::{MAX_EXTRA_COST_MULT, MAX_WIN_X};
use serde::{Deserialize, Serialize};

/// Optional side wager attached to a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraBet {
    pub name: String,
    /// Expected-return ratio of the extra stake
    pub rtp: f64,
    /// Additional stake, as a multiple of the base bet
    pub cost_mult: f64,
    #[serde(default)]
    pub enabled: bool,
}

impl ExtraBet {
    pub fn new(name: impl Into<String>, rtp: f64, cost_mult: f64) -> Self {
        Self {
            name: name.into(),
            rtp,
            cost_mult,
            enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    /// Base expected-return ratio
    pub rtp: f64,
    /// Probability that a single spin pays anything
    pub hit_rate: f64,
    /// Tail heaviness of the payout distribution
    pub volatility: f64,
    /// Payout cap as a multiple of the base bet
    pub max_win_x: f64,
    #[serde(default)]
    pub extras: Vec<ExtraBet>,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            name: "Custom".to_string(),
            rtp: 0.96,
            hit_rate: 0.25,
            volatility: 0.6,
            max_win_x: 5000.0,
            extras: Vec::new(),
        }
    }
}

/// Blended return and cost of a game with its enabled extras.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effective {
    pub rtp: f64,
    pub cost_mult: f64,
}

impl Effective {
    /// Expected loss per spin, per unit of base bet, extras included.
    pub fn expected_loss_per_spin(&self) -> f64 {
        self.cost_mult * (1.0 - self.rtp)
    }
}

/// Running stake-weighted mean of the base rtp (weight 1) and every enabled
/// extra's rtp (weight `cost_mult`).
pub fn compute_effective(game: &Game) -> Effective {
    let mut rtp = game.rtp;
    let mut cost_mult = 1.0;
    for extra in game.extras.iter().filter(|e| e.enabled) {
        let old_cost = cost_mult;
        cost_mult += extra.cost_mult;
        rtp = (rtp * old_cost + extra.cost_mult * extra.rtp) / cost_mult;
    }
    Effective { rtp, cost_mult }
}

impl Game {
    pub fn enabled_extras(&self) -> impl Iterator<Item = &ExtraBet> {
        self.extras.iter().filter(|e| e.enabled)
    }

    /// Toggle the extra called `name`. Returns false if no such extra exists.
    pub fn set_extra_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self
            .extras
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(name))
        {
            Some(extra) => {
                extra.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Append a custom extra, enabled.
    pub fn add_extra(&mut self, name: &str, rtp: f64, cost_mult: f64) -> Result<(), String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Extra bet name cannot be empty".to_string());
        }
        if self.extras.iter().any(|e| e.name.eq_ignore_ascii_case(name)) {
            return Err(format!("{} already has an extra named '{name}'", self.name));
        }
        if !(0.0..=1.0).contains(&rtp) {
            return Err(format!("Extra RTP must be between 0 and 1, got {rtp}"));
        }
        if !cost_mult.is_finite() || cost_mult <= 0.0 {
            return Err(format!("Extra cost must be positive, got {cost_mult}"));
        }
        self.extras.push(ExtraBet {
            name: name.to_string(),
            rtp,
            cost_mult,
            enabled: true,
        });
        Ok(())
    }

    /// Copy with every numeric field forced into its valid range.
    ///
    /// Enabled extras share a stake budget of [`MAX_EXTRA_COST_MULT`]; once it
    /// is spent, later extras count at zero cost.
    pub fn normalized(&self) -> Game {
        let mut budget = MAX_EXTRA_COST_MULT;
        let extras = self
            .extras
            .iter()
            .map(|e| {
                let mut cost_mult = if e.cost_mult.is_finite() {
                    e.cost_mult.clamp(0.0, MAX_EXTRA_COST_MULT)
                } else {
                    0.0
                };
                if e.enabled {
                    cost_mult = cost_mult.min(budget);
                    budget -= cost_mult;
                }
                ExtraBet {
                    name: e.name.clone(),
                    rtp: unit_interval(e.rtp),
                    cost_mult,
                    enabled: e.enabled,
                }
            })
            .collect();

        Game {
            name: self.name.clone(),
            rtp: unit_interval(self.rtp),
            hit_rate: unit_interval(self.hit_rate),
            volatility: unit_interval(self.volatility),
            max_win_x: if self.max_win_x.is_finite() && self.max_win_x > 0.0 {
                self.max_win_x.min(MAX_WIN_X)
            } else {
                1.0
            },
            extras,
        }
    }
}

/// Clamp into [0, 1], mapping NaN to 0.
pub(crate) fn unit_interval(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_game() -> Game {
        Game {
            name: "Test".to_string(),
            rtp: 0.90,
            extras: vec![
                ExtraBet::new("Xbet", 0.97, 0.4),
                ExtraBet::new("Bonus Buy", 1.0, 100.0),
                ExtraBet::new("Side", 0.85, 2.5),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_no_enabled_extras_is_identity() {
        let game = base_game();
        let eff = compute_effective(&game);
        assert_eq!(eff.rtp, 0.90);
        assert_eq!(eff.cost_mult, 1.0);
    }

    #[test]
    fn test_single_extra_blend() {
        let mut game = base_game();
        assert!(game.set_extra_enabled("Bonus Buy", true));
        let eff = compute_effective(&game);
        assert_eq!(eff.cost_mult, 101.0);
        assert!((eff.rtp - (0.90 + 100.0) / 101.0).abs() < 1e-12);
        assert!((eff.rtp - 0.9901).abs() < 1e-4);
    }

    #[test]
    fn test_blend_is_order_independent() {
        let mut game = base_game();
        for e in &mut game.extras {
            e.enabled = true;
        }
        let forward = compute_effective(&game);
        game.extras.reverse();
        let reversed = compute_effective(&game);
        game.extras.swap(0, 1);
        let shuffled = compute_effective(&game);

        for other in [reversed, shuffled] {
            assert!((forward.rtp - other.rtp).abs() < 1e-12);
            assert!((forward.cost_mult - other.cost_mult).abs() < 1e-12);
        }
    }

    #[test]
    fn test_blend_within_convex_hull() {
        let mut game = base_game();
        game.set_extra_enabled("xbet", true);
        game.set_extra_enabled("side", true);
        let eff = compute_effective(&game);
        assert!(eff.cost_mult >= 1.0);
        assert!(eff.rtp >= 0.85 && eff.rtp <= 0.97);
    }

    #[test]
    fn test_expected_loss_per_spin() {
        let eff = Effective {
            rtp: 0.95,
            cost_mult: 2.0,
        };
        assert!((eff.expected_loss_per_spin() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_set_unknown_extra() {
        let mut game = base_game();
        assert!(!game.set_extra_enabled("Nope", true));
    }

    #[test]
    fn test_add_extra_validation() {
        let mut game = base_game();
        assert!(game.add_extra("  ", 0.9, 1.0).is_err());
        assert!(game.add_extra("xbet", 0.9, 1.0).is_err());
        assert!(game.add_extra("Turbo", 1.5, 1.0).is_err());
        assert!(game.add_extra("Turbo", 0.9, 0.0).is_err());

        game.add_extra("Turbo", 0.9, 0.5).unwrap();
        let turbo = game.extras.last().unwrap();
        assert_eq!(turbo.name, "Turbo");
        assert!(turbo.enabled);
    }

    #[test]
    fn test_normalized_clamps_fields() {
        let game = Game {
            rtp: 1.3,
            hit_rate: f64::NAN,
            volatility: -0.2,
            max_win_x: 0.0,
            extras: vec![ExtraBet {
                name: "Bad".to_string(),
                rtp: 2.0,
                cost_mult: f64::INFINITY,
                enabled: true,
            }],
            ..Default::default()
        };
        let n = game.normalized();
        assert_eq!(n.rtp, 1.0);
        assert_eq!(n.hit_rate, 0.0);
        assert_eq!(n.volatility, 0.0);
        assert_eq!(n.max_win_x, 1.0);
        assert_eq!(n.extras[0].rtp, 1.0);
        assert_eq!(n.extras[0].cost_mult, 0.0);
    }

    #[test]
    fn test_normalized_caps_huge_costs() {
        let game = Game {
            max_win_x: 1e300,
            extras: vec![
                ExtraBet {
                    enabled: true,
                    ..ExtraBet::new("A", 0.9, 1e308)
                },
                ExtraBet {
                    enabled: true,
                    ..ExtraBet::new("B", 0.9, 1e308)
                },
                ExtraBet::new("Off", 0.9, 1e308),
            ],
            ..Default::default()
        };
        let n = game.normalized();
        assert_eq!(n.max_win_x, MAX_WIN_X);
        assert_eq!(n.extras[0].cost_mult, MAX_EXTRA_COST_MULT);
        assert_eq!(n.extras[1].cost_mult, 0.0);
        assert_eq!(n.extras[2].cost_mult, MAX_EXTRA_COST_MULT);

        let eff = compute_effective(&n);
        assert_eq!(eff.cost_mult, 1.0 + MAX_EXTRA_COST_MULT);
        assert!(eff.rtp.is_finite());
        assert!(eff.expected_loss_per_spin().is_finite());
    }
}
