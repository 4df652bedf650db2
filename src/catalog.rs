//! Game catalog: built-in demo games and user catalogs loaded from JSON.

use crate::simulator::{ExtraBet, Game};
use std::fs;
use std::io;
use std::path::Path;

/// Demo games shipped with the planner.
pub fn demo_games() -> Vec<Game> {
    vec![
        Game {
            name: "Mental II".to_string(),
            rtp: 0.9606,
            hit_rate: 0.3141,
            volatility: 0.95,
            max_win_x: 99999.0,
            extras: vec![
                ExtraBet::new("Xbet", 0.9609, 0.40),
                ExtraBet::new("Bloodletting Spins (100x)", 0.9611, 100.0),
            ],
        },
        Game {
            name: "Reactoonz".to_string(),
            rtp: 0.9651,
            hit_rate: 0.42,
            volatility: 0.55,
            max_win_x: 4750.0,
            extras: Vec::new(),
        },
        Game {
            name: "Blood & Shadow 2".to_string(),
            rtp: 0.9609,
            hit_rate: 0.2714,
            volatility: 0.85,
            max_win_x: 16161.0,
            extras: vec![
                ExtraBet::new("Xbet", 0.9605, 1.50),
                ExtraBet::new("Bonus Buy (100x)", 0.9603, 100.0),
            ],
        },
    ]
}

/// Load a JSON array of games.
pub fn load_games(path: &Path) -> io::Result<Vec<Game>> {
    let json = fs::read_to_string(path)?;
    parse_games(&json)
}

pub fn parse_games(json: &str) -> io::Result<Vec<Game>> {
    let games: Vec<Game> =
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if games.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "game catalog is empty",
        ));
    }
    Ok(games)
}

pub fn save_games(path: &Path, games: &[Game]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(games)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Find a game by 0-based index or case-insensitive name.
pub fn find_game<'a>(games: &'a [Game], key: &str) -> Option<&'a Game> {
    if let Ok(index) = key.parse::<usize>() {
        return games.get(index);
    }
    games.iter().find(|g| g.name.eq_ignore_ascii_case(key))
}
