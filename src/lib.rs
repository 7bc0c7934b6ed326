//! Cost-aware question router.
//!
//! Receives a question (optionally with multiple-choice answers), estimates
//! its difficulty from the text, asks an external classifier for the topic
//! category, and picks the cheapest LLM tier whose historical accuracy for
//! that (category, difficulty) pair clears a configured threshold. The chosen
//! provider answers the question; the answer is returned unchanged.

pub mod classifier;
pub mod config;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod routing;
pub mod server;
pub mod text_metrics;

pub use error::{Error, Result};
