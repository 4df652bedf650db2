//! Input fingerprints and a single-entry memo for path bands.
//!
//! Band simulation is the expensive call, so a front end keeps the last result
//! and recomputes only when something that feeds the simulation changes.

use crate::simulator::{simulate_path_bands, Game, PathBands, SessionInput};
use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 over the inputs that affect simulation output.
pub type Fingerprint = [u8; 32];

/// Everything that changes simulation output. Names are left out, and only
/// enabled extras count.
#[derive(Serialize)]
struct SimulationKey<'a> {
    rtp: f64,
    hit_rate: f64,
    volatility: f64,
    max_win_x: f64,
    extras: Vec<(f64, f64)>,
    input: &'a SessionInput,
}

pub fn fingerprint(game: &Game, input: &SessionInput) -> Fingerprint {
    let key = SimulationKey {
        rtp: game.rtp,
        hit_rate: game.hit_rate,
        volatility: game.volatility,
        max_win_x: game.max_win_x,
        extras: game.enabled_extras().map(|e| (e.rtp, e.cost_mult)).collect(),
        input,
    };
    // Serializing plain numbers and bools into a Vec cannot fail.
    let bytes = bincode::serialize(&key).unwrap_or_default();
    let mut fp = [0u8; 32];
    fp.copy_from_slice(&Sha256::digest(&bytes));
    fp
}

/// Lowercase hex, for logs and file names.
pub fn to_hex(fp: &Fingerprint) -> String {
    fp.iter().map(|b| format!("{b:02x}")).collect()
}

/// Remembers the bands for the most recent inputs.
#[derive(Debug, Default)]
pub struct BandCache {
    key: Option<Fingerprint>,
    bands: PathBands,
    recomputes: u32,
}

impl BandCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the cached bands were computed for exactly these inputs.
    pub fn is_fresh(&self, game: &Game, input: &SessionInput) -> bool {
        self.key == Some(fingerprint(game, input))
    }

    /// Cached bands, recomputed with `rng` if the inputs changed.
    pub fn get_or_compute<R: Rng + ?Sized>(
        &mut self,
        game: &Game,
        input: &SessionInput,
        rng: &mut R,
    ) -> &PathBands {
        let key = fingerprint(game, input);
        if self.key != Some(key) {
            self.bands = simulate_path_bands(game, input, rng);
            self.key = Some(key);
            self.recomputes += 1;
        }
        &self.bands
    }

    /// Force the next `get_or_compute` to simulate again.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// How many times the bands have been simulated.
    pub fn recomputes(&self) -> u32 {
        self.recomputes
    }
}
