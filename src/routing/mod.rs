//! The routing decision pipeline.
//!
//! Difficulty estimation from question text, difficulty bucketing, and
//! threshold-based tier selection against the accuracy table. Everything in
//! this module is pure and synchronous; the async collaborators (classifier,
//! dispatch) live elsewhere.

mod router;
mod scorer;
mod similarity;
mod table;

pub use router::{ModelRouter, Tier};
pub use scorer::{Difficulty, OptionSet, heuristic_difficulty};
pub use similarity::{numeric_similarity, text_similarity};
pub use table::{AccuracyRow, AccuracyTable};
