//! Simulation outputs and their text, JSON and CSV renderings.

use super::config::SessionInput;
use super::game::Game;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Scalar summary from the session simulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimResult {
    pub recommended_bet: f64,
    pub planned_spins: usize,
    /// Share of trials that reached the stop-loss
    pub prob_ruin: f64,
    pub prob_hit_target: f64,
    /// Share of trials that could no longer cover a spin
    pub prob_depleted: f64,
    /// Mean bankroll at the end of a trial, however it ended
    pub expected_end: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub expected_loss_per_spin: f64,
    /// Trials actually simulated
    pub trials: u32,
}

impl SimResult {
    /// Share of trials that played the whole horizon.
    pub fn prob_horizon(&self) -> f64 {
        (1.0 - self.prob_ruin - self.prob_hit_target - self.prob_depleted).max(0.0)
    }

    /// Plan summary for the terminal.
    pub fn to_text(&self, game: &Game, input: &SessionInput) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SESSION PLAN SUMMARY\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Game: {}\n", game.name));
        report.push_str(&format!(
            "  Base RTP: {:.2}% | Hit: {:.1}% | Vol: {:.2} | Max win: {:.0}x\n\n",
            game.rtp * 100.0,
            game.hit_rate * 100.0,
            game.volatility,
            game.max_win_x
        ));

        report.push_str("── PLAN ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Start bankroll:    {:.2}\n", input.start_bankroll));
        if input.has_time_horizon() {
            report.push_str(&format!(
                "  Planned time:      {} min (~{} spins)\n",
                input.target_minutes, self.planned_spins
            ));
        } else {
            report.push_str(&format!(
                "  Planned spins:     {} (time not specified)\n",
                self.planned_spins
            ));
        }
        report.push_str(&format!("  Risk profile:      {}\n", input.risk));
        report.push_str(&format!(
            "  Recommended bet:   {:.2} per spin{}\n",
            self.recommended_bet,
            if input.lock_bet_size { " (locked)" } else { "" }
        ));
        report.push_str(&format!(
            "  Stop-loss:         {:.2} | Take-profit: {:.2}\n\n",
            self.stop_loss, self.take_profit
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Hit stop-loss before target: {:>5.1}%\n",
            self.prob_ruin * 100.0
        ));
        report.push_str(&format!(
            "  Hit target before stop-loss: {:>5.1}%\n",
            self.prob_hit_target * 100.0
        ));
        report.push_str(&format!(
            "  Ran out of funds:            {:>5.1}%\n",
            self.prob_depleted * 100.0
        ));
        report.push_str(&format!(
            "  Played full horizon:         {:>5.1}%\n",
            self.prob_horizon() * 100.0
        ));
        report.push_str(&format!(
            "  Expected session end:        {:.2}\n",
            self.expected_end
        ));
        report.push_str(&format!(
            "  Expected loss per spin:      {:.3} (per 1x, extras included)\n",
            self.expected_loss_per_spin
        ));
        report.push_str(&format!("  Trials:                      {}\n", self.trials));

        if !game.extras.is_empty() {
            report.push_str("\n── EXTRAS ───────────────────────────────────────────────────────\n");
            let mut any = false;
            for extra in game.enabled_extras() {
                any = true;
                report.push_str(&format!(
                    "  • {} (RTP {:.1}%, cost +{:.0}%)\n",
                    extra.name,
                    extra.rtp * 100.0,
                    extra.cost_mult * 100.0
                ));
            }
            if !any {
                report.push_str("  (none enabled)\n");
            }
        }

        report.push_str("\n── NOTES ────────────────────────────────────────────────────────\n");
        report.push_str("  Bet sizing scales with expected loss and planned spins.\n");
        report.push_str("  Profit targets scale with bankroll (small stacks aim higher).\n");
        report.push_str("  No guarantees. Negative EV.\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n");

        report
    }
}

/// Bankroll percentiles at every spin index, index 0 being the start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathBands {
    pub steps: usize,
    pub p10: Vec<f64>,
    pub p25: Vec<f64>,
    pub p50: Vec<f64>,
    pub p75: Vec<f64>,
    pub p90: Vec<f64>,
}

impl PathBands {
    /// Spin index for every step, for use as a chart x axis.
    pub fn spin_axis(&self) -> Vec<f64> {
        (0..self.steps).map(|i| i as f64).collect()
    }

    /// Range covering p10..p90 padded by `pad_frac` of its span (at least 1).
    pub fn value_range(&self, pad_frac: f64) -> (f64, f64) {
        let (lo, hi) = self
            .p10
            .iter()
            .chain(self.p90.iter())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            return (0.0, 0.0);
        }
        let pad = ((hi - lo) * pad_frac).max(1.0);
        (lo - pad, hi + pad)
    }

    /// Final-spin median, the "typical" session end.
    pub fn final_median(&self) -> f64 {
        self.p50.last().copied().unwrap_or(0.0)
    }

    pub fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "spin,p10,p25,p50,p75,p90")?;
        for i in 0..self.steps {
            writeln!(
                out,
                "{},{:.4},{:.4},{:.4},{:.4},{:.4}",
                i, self.p10[i], self.p25[i], self.p50[i], self.p75[i], self.p90[i]
            )?;
        }
        out.flush()
    }

    /// A few evenly spaced rows of the bands for the terminal.
    pub fn to_text(&self, rows: usize) -> String {
        let mut report = String::new();
        report.push_str("── BANKROLL BANDS ───────────────────────────────────────────────\n");
        report.push_str("   Spin       p10       p25       p50       p75       p90\n");
        if self.steps == 0 {
            return report;
        }
        let rows = rows.max(2).min(self.steps);
        let last = self.steps - 1;
        let mut prev = None;
        for r in 0..rows {
            let i = if rows > 1 { r * last / (rows - 1) } else { 0 };
            if prev == Some(i) {
                continue;
            }
            prev = Some(i);
            report.push_str(&format!(
                "  {:5} {:9.2} {:9.2} {:9.2} {:9.2} {:9.2}\n",
                i, self.p10[i], self.p25[i], self.p50[i], self.p75[i], self.p90[i]
            ));
        }
        report
    }
}
