//! Path band integration tests
//!
//! Shape, ordering and reproducibility of the percentile bands, plus the
//! horizon rules for timed and untimed sessions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slotplan::catalog::demo_games;
use slotplan::simulator::{
    simulate_path_bands, ExtraBet, Game, PathBands, RiskProfile, SessionInput,
};

fn scenario_game() -> Game {
    Game {
        name: "Scenario".to_string(),
        rtp: 0.96,
        hit_rate: 0.25,
        volatility: 0.6,
        max_win_x: 5000.0,
        extras: Vec::new(),
    }
}

fn assert_well_formed(bands: &PathBands) {
    for series in [&bands.p10, &bands.p25, &bands.p50, &bands.p75, &bands.p90] {
        assert_eq!(series.len(), bands.steps);
        assert!(series.iter().all(|v| v.is_finite()));
    }
    for i in 0..bands.steps {
        assert!(bands.p10[i] <= bands.p25[i], "p10 > p25 at {i}");
        assert!(bands.p25[i] <= bands.p50[i], "p25 > p50 at {i}");
        assert!(bands.p50[i] <= bands.p75[i], "p50 > p75 at {i}");
        assert!(bands.p75[i] <= bands.p90[i], "p75 > p90 at {i}");
    }
}

#[test]
fn test_bands_shape_and_order() {
    let input = SessionInput {
        start_bankroll: 50.0,
        max_spins_cap: 300,
        trials: 600,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let bands = simulate_path_bands(&scenario_game(), &input, &mut rng);

    // 50 / 0.04 * 1.2 is about 1500, so the 300 cap stands.
    assert_eq!(bands.steps, 301);
    assert_well_formed(&bands);
}

#[test]
fn test_bands_start_at_bankroll() {
    let input = SessionInput {
        start_bankroll: 120.0,
        max_spins_cap: 100,
        trials: 300,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let bands = simulate_path_bands(&scenario_game(), &input, &mut rng);
    for series in [&bands.p10, &bands.p25, &bands.p50, &bands.p75, &bands.p90] {
        assert_eq!(series[0], 120.0);
    }
}

#[test]
fn test_bands_keep_full_precision_start() {
    let input = SessionInput {
        start_bankroll: 1000.37,
        max_spins_cap: 80,
        trials: 200,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let bands = simulate_path_bands(&scenario_game(), &input, &mut rng);
    assert_eq!(bands.p50[0], 1000.37);
    assert_eq!(bands.p10[0], 1000.37);
}

#[test]
fn test_bands_stay_between_stop_and_target() {
    let input = SessionInput {
        start_bankroll: 100.0,
        risk: RiskProfile::Balanced,
        max_spins_cap: 400,
        trials: 400,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let bands = simulate_path_bands(&scenario_game(), &input, &mut rng);
    // Stop-loss 55 and take-profit 200; the suggested bet is too small for
    // one spin to jump far past either.
    assert!(bands.p10.iter().all(|&v| v >= 54.0));
    assert!(bands.p90.iter().all(|&v| v <= 200.0 + 1e-3));
}

#[test]
fn test_timed_session_sets_steps() {
    let input = SessionInput {
        spins_per_min: 10,
        trials: 200,
        ..SessionInput::timed(500.0, 15)
    };
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let bands = simulate_path_bands(&scenario_game(), &input, &mut rng);
    assert_eq!(bands.steps, 151);
    assert_well_formed(&bands);
}

#[test]
fn test_untimed_horizon_is_shortened() {
    let input = SessionInput {
        start_bankroll: 1.0,
        max_spins_cap: 5000,
        trials: 200,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let bands = simulate_path_bands(&scenario_game(), &input, &mut rng);
    // 1 / 0.04 * 1.2 = 30, raised to the floor of 50
    assert_eq!(bands.steps, 51);
}

#[test]
fn test_seeded_bands_are_bit_identical() {
    let input = SessionInput {
        start_bankroll: 60.0,
        max_spins_cap: 250,
        trials: 700,
        ..Default::default()
    };
    let a = simulate_path_bands(&scenario_game(), &input, &mut ChaCha8Rng::seed_from_u64(42));
    let b = simulate_path_bands(&scenario_game(), &input, &mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(a.steps, b.steps);
    for (x, y) in a.p50.iter().zip(&b.p50) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
    assert_eq!(a, b);
}

#[test]
fn test_demo_games_with_all_extras() {
    for mut game in demo_games() {
        for extra in &mut game.extras {
            extra.enabled = true;
        }
        let input = SessionInput {
            start_bankroll: 300.0,
            max_spins_cap: 150,
            trials: 200,
            risk: RiskProfile::Aggressive,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let bands = simulate_path_bands(&game, &input, &mut rng);
        assert_well_formed(&bands);
    }
}

#[test]
fn test_degenerate_game_gives_finite_bands() {
    let game = Game {
        hit_rate: 0.0,
        volatility: f64::NAN,
        max_win_x: 0.0,
        ..scenario_game()
    };
    let input = SessionInput {
        start_bankroll: 0.0,
        trials: 0,
        max_spins_cap: 0,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let bands = simulate_path_bands(&game, &input, &mut rng);
    assert!(bands.steps >= 2);
    assert_well_formed(&bands);
}

#[test]
fn test_extreme_inputs_give_finite_bands() {
    let game = Game {
        max_win_x: 1e300,
        extras: vec![
            ExtraBet {
                enabled: true,
                ..ExtraBet::new("Huge A", 0.95, 1e308)
            },
            ExtraBet {
                enabled: true,
                ..ExtraBet::new("Huge B", 0.95, 1e308)
            },
        ],
        ..scenario_game()
    };
    let input = SessionInput {
        start_bankroll: 1.5e308,
        max_spins_cap: 60,
        trials: 200,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let bands = simulate_path_bands(&game, &input, &mut rng);
    assert_well_formed(&bands);
}
