//! slotplan - session planner for wager-repeating games.
//!
//! Recommends a bet size, stop-loss and take-profit for a game and bankroll,
//! and estimates outcomes by Monte Carlo simulation.

pub mod catalog;
pub mod fingerprint;
pub mod simulator;
pub mod version;
