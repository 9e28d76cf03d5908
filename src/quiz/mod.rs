//! Quiz modes: aggregate statistics and multiple-choice questions

pub mod question;
pub mod stats;

pub use question::{generate_question, TriviaQuestion, OPTION_COUNT};
pub use stats::{CubeStats, Fact};
