//! Cube Guesser - hint-reveal card guessing over a Cube Cobra collection
//!
//! A target card is drawn from a loaded cube and revealed one hint at a time
//! while the player spends a limited number of guesses. Several modes share
//! the same engine: endless play, fixed-length challenges, a countdown clock,
//! a three-lives hardcore run, and two multiple-choice quizzes over aggregate
//! statistics of the cube.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod persist;
pub mod quiz;

pub use config::GameConfig;
pub use error::{CubeError, Result};
