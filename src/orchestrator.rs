//! Request orchestration: score, classify, route, dispatch.
//!
//! `decide` is the deterministic half: difficulty score and label from the
//! question text, category from the external classifier, tier from the
//! router, plus the rendered dispatch prompt. `answer` adds the one
//! non-deterministic step, a single dispatch attempt against the chosen
//! tier.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classifier::CategoryClassifier;
use crate::error::Error;
use crate::llm::TierDispatcher;
use crate::routing::{Difficulty, ModelRouter, Tier, heuristic_difficulty};

/// An incoming question, optionally multiple-choice.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    #[serde(default)]
    pub answers: Option<Vec<String>>,
}

/// The routing outcome for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    pub tier: Tier,
    /// Provider model identifier served at the chosen tier.
    pub model: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub score: f64,
    /// Prompt rendered for the downstream model.
    pub prompt: String,
}

/// The answer returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub model: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub output: String,
}

/// Composes the scorer, classifier, router, and dispatcher into one
/// per-request decision.
pub struct Orchestrator {
    classifier: Arc<dyn CategoryClassifier>,
    router: ModelRouter,
    dispatcher: TierDispatcher,
}

impl Orchestrator {
    pub fn new(
        classifier: Arc<dyn CategoryClassifier>,
        router: ModelRouter,
        dispatcher: TierDispatcher,
    ) -> Self {
        Self {
            classifier,
            router,
            dispatcher,
        }
    }

    /// Decide which model answers the question.
    ///
    /// Deterministic for fixed inputs and a fixed accuracy table: the only
    /// external call is the classifier, whose failures propagate untouched.
    /// Answer options never reach the classifier.
    pub async fn decide(&self, request: &QuestionRequest) -> Result<RoutingDecision, Error> {
        let score = heuristic_difficulty(&request.question, request.answers.as_deref());
        let difficulty = Difficulty::from_score(score);

        let category = self.classifier.classify(&request.question).await?;

        let tier = self.router.route(&category, difficulty);
        let model = self.dispatcher.model_for(tier)?.to_string();

        tracing::info!(
            category,
            difficulty = difficulty.as_str(),
            score,
            tier = tier.as_str(),
            model,
            "routing decision"
        );

        Ok(RoutingDecision {
            tier,
            model,
            category,
            difficulty,
            score,
            prompt: render_prompt(request),
        })
    }

    /// Decide, dispatch once, and pass the downstream answer through
    /// unchanged.
    pub async fn answer(&self, request: &QuestionRequest) -> Result<AnswerResponse, Error> {
        let decision = self.decide(request).await?;

        let output = self
            .dispatcher
            .dispatch(decision.tier, &decision.prompt)
            .await?;

        Ok(AnswerResponse {
            model: decision.model,
            category: decision.category,
            difficulty: decision.difficulty,
            output,
        })
    }
}

/// Render the dispatch prompt.
///
/// With options the downstream model must pick one of them and answer with
/// only that choice; without, it is asked for a concise free-form answer.
pub fn render_prompt(request: &QuestionRequest) -> String {
    match request.answers.as_deref() {
        Some(answers) if !answers.is_empty() => format!(
            "{}. Choose one of the following answers: {}. Respond with just the answer.",
            request.question,
            answers.join(", ")
        ),
        _ => format!("{}. Respond with a concise answer.", request.question),
    }
}
