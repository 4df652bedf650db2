//! slotplan command-line planner
//!
//! Builds a session from flags, runs the session simulator (and optionally the
//! band simulator) and prints the plan.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! See `--help` for the option list.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slotplan::catalog;
use slotplan::fingerprint::{fingerprint, to_hex};
use slotplan::simulator::{
    simulate_path_bands, simulate_session, Game, PathBands, RiskProfile, SessionInput,
};
use slotplan::version::version_line;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

// ── CLI Configuration ────────────────────────────────────────────────

#[derive(Debug)]
struct CliConfig {
    game: Option<String>,
    games_path: Option<PathBuf>,
    list_games: bool,
    export_path: Option<PathBuf>,
    enable_extras: Vec<String>,
    custom_extras: Vec<(String, f64, f64)>,
    input: SessionInput,
    seed: Option<u64>,
    bands: bool,
    csv_path: Option<PathBuf>,
    json: bool,
    /// 0 = quiet, 1 = summary, 2 = detailed
    verbosity: u8,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            game: None,
            games_path: None,
            list_games: false,
            export_path: None,
            enable_extras: Vec::new(),
            custom_extras: Vec::new(),
            input: SessionInput::default(),
            seed: None,
            bands: false,
            csv_path: None,
            json: false,
            verbosity: 1,
        }
    }
}

enum Command {
    Run(Box<CliConfig>),
    Help,
    Version,
}

fn next_value<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a str, String> {
    args.next()
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{flag} requires a number, got '{value}'"))
}

/// `NAME:RTP:COST`, splitting from the right so names may contain ':'.
fn parse_custom_extra(value: &str) -> Result<(String, f64, f64), String> {
    let mut parts = value.rsplitn(3, ':');
    let cost = parts.next();
    let rtp = parts.next();
    let name = parts.next();
    match (name, rtp, cost) {
        (Some(name), Some(rtp), Some(cost)) => Ok((
            name.to_string(),
            parse_number(rtp, "--add-extra RTP")?,
            parse_number(cost, "--add-extra COST")?,
        )),
        _ => Err(format!("--add-extra expects NAME:RTP:COST, got '{value}'")),
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut config = CliConfig::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--game" => config.game = Some(next_value(&mut iter, arg)?.to_string()),
            "--games" => config.games_path = Some(PathBuf::from(next_value(&mut iter, arg)?)),
            "--list-games" => config.list_games = true,
            "--export-games" => {
                config.export_path = Some(PathBuf::from(next_value(&mut iter, arg)?))
            }
            "--extra" => config
                .enable_extras
                .push(next_value(&mut iter, arg)?.to_string()),
            "--add-extra" => config
                .custom_extras
                .push(parse_custom_extra(next_value(&mut iter, arg)?)?),
            "--bankroll" => {
                config.input.start_bankroll = parse_number(next_value(&mut iter, arg)?, arg)?
            }
            "--minutes" => {
                config.input.target_minutes = parse_number(next_value(&mut iter, arg)?, arg)?;
                config.input.include_time = true;
            }
            "--spins-per-min" => {
                config.input.spins_per_min = parse_number(next_value(&mut iter, arg)?, arg)?
            }
            "--trials" => config.input.trials = parse_number(next_value(&mut iter, arg)?, arg)?,
            "--max-spins" => {
                config.input.max_spins_cap = parse_number(next_value(&mut iter, arg)?, arg)?
            }
            "--bet" => {
                config.input.user_bet_size = parse_number(next_value(&mut iter, arg)?, arg)?;
                config.input.lock_bet_size = true;
            }
            "--risk" => config.input.risk = next_value(&mut iter, arg)?.parse::<RiskProfile>()?,
            "--seed" => config.seed = Some(parse_number(next_value(&mut iter, arg)?, arg)?),
            "--bands" => config.bands = true,
            "--csv" => {
                config.csv_path = Some(PathBuf::from(next_value(&mut iter, arg)?));
                config.bands = true;
            }
            "--json" => config.json = true,
            "--quiet" => config.verbosity = 0,
            "--verbose" => config.verbosity = 2,
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    if !(config.input.start_bankroll > 0.0) {
        return Err("--bankroll must be positive".to_string());
    }
    if config.input.lock_bet_size && !(config.input.user_bet_size >= 0.01) {
        return Err("--bet must be at least 0.01".to_string());
    }
    Ok(Command::Run(Box::new(config)))
}

fn print_usage() {
    eprintln!(
        "slotplan - session planner\n\
         \n\
         Usage: slotplan [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --game NAME|INDEX       Game from the catalog (default: first)\n\
         \x20 --games FILE            Load the catalog from a JSON array of games\n\
         \x20 --list-games            Print the catalog and exit\n\
         \x20 --export-games FILE     Write the catalog as JSON and exit\n\
         \x20 --extra NAME            Enable an extra bet by name (repeatable)\n\
         \x20 --add-extra N:RTP:COST  Add an enabled custom extra bet\n\
         \x20 --bankroll X            Starting bankroll (default: 100)\n\
         \x20 --minutes N             Plan by play time instead of spin cap\n\
         \x20 --spins-per-min N       Spins per minute (default: 12)\n\
         \x20 --trials N              Monte Carlo trials (default: 2000)\n\
         \x20 --max-spins N           Spin cap without play time (default: 2000)\n\
         \x20 --bet X                 Lock the bet size\n\
         \x20 --risk PROFILE          conservative | balanced | aggressive\n\
         \x20 --seed N                RNG seed (default: random)\n\
         \x20 --bands                 Also simulate bankroll percentile bands\n\
         \x20 --csv FILE              Write the bands as CSV (implies --bands)\n\
         \x20 --json                  Print results as JSON\n\
         \x20 --quiet                 Only a one-line summary\n\
         \x20 --verbose               Extra detail\n\
         \x20 --version, -v           Show version\n\
         \x20 --help, -h              Show this help"
    );
}

// ── Game Selection ───────────────────────────────────────────────────

fn load_catalog(config: &CliConfig) -> Result<Vec<Game>, String> {
    match &config.games_path {
        Some(path) => catalog::load_games(path)
            .map_err(|e| format!("Failed to load {}: {e}", path.display())),
        None => Ok(catalog::demo_games()),
    }
}

fn select_game(config: &CliConfig) -> Result<Game, String> {
    let games = load_catalog(config)?;

    let mut game = match &config.game {
        Some(key) => catalog::find_game(&games, key)
            .cloned()
            .ok_or_else(|| format!("No game matching '{key}'"))?,
        None => games
            .first()
            .cloned()
            .ok_or_else(|| "Game catalog is empty".to_string())?,
    };

    for name in &config.enable_extras {
        if !game.set_extra_enabled(name, true) {
            return Err(format!("{} has no extra bet named '{name}'", game.name));
        }
    }
    for (name, rtp, cost) in &config.custom_extras {
        game.add_extra(name, *rtp, *cost)?;
    }
    Ok(game)
}

fn export_catalog(config: &CliConfig, path: &Path) -> Result<(), String> {
    let games = load_catalog(config)?;
    catalog::save_games(path, &games)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    if config.verbosity >= 1 {
        eprintln!("Wrote {} games to {}", games.len(), path.display());
    }
    Ok(())
}

fn print_catalog(config: &CliConfig) -> Result<(), String> {
    let games = load_catalog(config)?;
    for (i, game) in games.iter().enumerate() {
        println!(
            "{i}: {}  (RTP {:.2}%, hit {:.1}%, vol {:.2}, max {:.0}x)",
            game.name,
            game.rtp * 100.0,
            game.hit_rate * 100.0,
            game.volatility,
            game.max_win_x
        );
        for extra in &game.extras {
            println!(
                "     extra: {} (RTP {:.1}%, cost +{:.0}%)",
                extra.name,
                extra.rtp * 100.0,
                extra.cost_mult * 100.0
            );
        }
    }
    Ok(())
}

// ── Main ─────────────────────────────────────────────────────────────

fn write_csv(path: &Path, bands: &PathBands) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    let mut writer = BufWriter::new(file);
    bands
        .write_csv(&mut writer)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn run(config: &CliConfig) -> Result<(), String> {
    if let Some(path) = &config.export_path {
        return export_catalog(config, path);
    }
    if config.list_games {
        return print_catalog(config);
    }

    let game = select_game(config)?;
    let input = &config.input;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    if config.verbosity >= 2 {
        eprintln!(
            "Simulating '{}' bankroll={:.2} risk={} trials={} seed={} key={}",
            game.name,
            input.start_bankroll,
            input.risk,
            input.trials,
            config
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string()),
            to_hex(&fingerprint(&game, input)),
        );
    }

    let started = Instant::now();
    let result = simulate_session(&game, input, &mut rng);
    if config.verbosity >= 2 {
        eprintln!("Session simulation: {:.2?}", started.elapsed());
    }

    let bands = if config.bands {
        let started = Instant::now();
        let bands = simulate_path_bands(&game, input, &mut rng);
        if config.verbosity >= 2 {
            eprintln!(
                "Band simulation: {} steps in {:.2?}",
                bands.steps,
                started.elapsed()
            );
        }
        Some(bands)
    } else {
        None
    };

    if config.json {
        let output = serde_json::json!({ "result": result, "bands": bands });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?
        );
    } else if config.verbosity == 0 {
        println!(
            "bet={:.2} spins={} sl={:.2} tp={:.2} p_sl={:.3} p_tp={:.3} p_depleted={:.3} end={:.2}",
            result.recommended_bet,
            result.planned_spins,
            result.stop_loss,
            result.take_profit,
            result.prob_ruin,
            result.prob_hit_target,
            result.prob_depleted,
            result.expected_end,
        );
    } else {
        print!("{}", result.to_text(&game, input));
        if let Some(bands) = &bands {
            println!();
            print!("{}", bands.to_text(if config.verbosity >= 2 { 21 } else { 11 }));
            println!("  Median end after {} spins: {:.2}", bands.steps.saturating_sub(1), bands.final_median());
            if config.verbosity >= 2 {
                let (lo, hi) = bands.value_range(0.05);
                println!("  Chart range: {lo:.2} .. {hi:.2}");
            }
        }
    }

    if let (Some(path), Some(bands)) = (&config.csv_path, &bands) {
        write_csv(path, bands)?;
        if config.verbosity >= 1 {
            eprintln!("Wrote {} rows to {}", bands.steps, path.display());
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Ok(Command::Version) => {
            println!("{}", version_line());
            return;
        }
        Err(message) => {
            eprintln!("{message}\n");
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(message) = run(&config) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
