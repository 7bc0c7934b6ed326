//! Heuristic difficulty scoring for incoming questions.
//!
//! The score blends question length, reading complexity, and how similar the
//! answer options are to each other (close options mean a harder question).
//! A numeric score maps onto one of five ordered difficulty labels.

use serde::{Deserialize, Serialize};

use super::similarity::{numeric_similarity, text_similarity};
use crate::text_metrics::flesch_reading_ease;

/// Difficulty bucket for a question, ordered easiest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[serde(rename = "Very low")]
    VeryLow,
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very high")]
    VeryHigh,
}

impl Difficulty {
    /// Map a difficulty score onto a label.
    ///
    /// Total over all of `f64`: scores below 0 land in `VeryLow` and scores
    /// above 1 land in `VeryHigh`. Each boundary value belongs to the upper
    /// bucket.
    pub fn from_score(score: f64) -> Self {
        if score < 0.3 {
            Difficulty::VeryLow
        } else if score < 0.45 {
            Difficulty::Low
        } else if score < 0.6 {
            Difficulty::Medium
        } else if score < 0.8 {
            Difficulty::High
        } else {
            Difficulty::VeryHigh
        }
    }

    /// Label as stored in the accuracy table and returned over the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::VeryLow => "Very low",
            Difficulty::Low => "Low",
            Difficulty::Medium => "Medium",
            Difficulty::High => "High",
            Difficulty::VeryHigh => "Very high",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "very low" | "very_low" => Ok(Difficulty::VeryLow),
            "low" => Ok(Difficulty::Low),
            "medium" => Ok(Difficulty::Medium),
            "high" => Ok(Difficulty::High),
            "very high" | "very_high" => Ok(Difficulty::VeryHigh),
            _ => Err(format!(
                "invalid difficulty label '{}', expected one of: Very low, Low, Medium, High, Very high",
                s
            )),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answer-option shape, decided once per request.
///
/// All options parse as bare numbers, or they are treated as text; the two
/// similarity algorithms never mix within one request.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionSet {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl OptionSet {
    /// Classify a list of options as numeric or text.
    pub fn classify(options: &[String]) -> Self {
        let mut values = Vec::with_capacity(options.len());
        for option in options {
            match parse_pure_number(option) {
                Some(v) => values.push(v),
                None => return OptionSet::Text(options.to_vec()),
            }
        }
        OptionSet::Numeric(values)
    }

    /// Average pairwise similarity over all unordered pairs.
    ///
    /// A single option has no pairs and defaults to 0.
    pub fn pairwise_similarity(&self) -> f64 {
        let mut total = 0.0;
        let mut pairs = 0usize;

        match self {
            OptionSet::Numeric(values) => {
                for i in 0..values.len() {
                    for j in (i + 1)..values.len() {
                        total += numeric_similarity(values[i], values[j]);
                        pairs += 1;
                    }
                }
            }
            OptionSet::Text(options) => {
                for i in 0..options.len() {
                    for j in (i + 1)..options.len() {
                        total += text_similarity(&options[i], &options[j]);
                        pairs += 1;
                    }
                }
            }
        }

        if pairs == 0 { 0.0 } else { total / pairs as f64 }
    }
}

/// Parse a value as a bare real number.
///
/// A leading minus sign is allowed; any other hyphen disqualifies the value
/// (ranges like "10-20" are not numbers). Parse failure means "not numeric",
/// never an error.
fn parse_pure_number(text: &str) -> Option<f64> {
    let cleaned = text.trim();
    if cleaned.chars().skip(1).any(|c| c == '-') {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Compute the heuristic difficulty score for a question.
///
/// Without options: `0.4 * length_ratio + 0.6 * (1 - readability)`.
/// With options: `0.2 * length_ratio + 0.4 * (1 - readability) + 0.4 * similarity`.
///
/// `readability` is reading ease normalized by 100 and clamped above at 1,
/// never below: pathological text with negative reading ease pushes
/// `(1 - readability)` past 1 and the score can exceed 1. The label
/// boundaries are defined against the raw value, so this is passed through
/// rather than clamped.
pub fn heuristic_difficulty(text: &str, options: Option<&[String]>) -> f64 {
    let length_ratio = (text.chars().count() as f64 / 100.0).min(1.0);
    let readability = (flesch_reading_ease(text) / 100.0).min(1.0);

    let options = match options {
        Some(opts) if !opts.is_empty() => opts,
        _ => return 0.4 * length_ratio + 0.6 * (1.0 - readability),
    };

    let similarity = OptionSet::classify(options).pairwise_similarity();
    0.2 * length_ratio + 0.4 * (1.0 - readability) + 0.4 * similarity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn label_boundaries_belong_to_upper_bucket() {
        assert_eq!(Difficulty::from_score(0.3), Difficulty::Low);
        assert_eq!(Difficulty::from_score(0.45), Difficulty::Medium);
        assert_eq!(Difficulty::from_score(0.6), Difficulty::High);
        assert_eq!(Difficulty::from_score(0.8), Difficulty::VeryHigh);
    }

    #[test]
    fn label_ranges_partition_the_line() {
        assert_eq!(Difficulty::from_score(-5.0), Difficulty::VeryLow);
        assert_eq!(Difficulty::from_score(0.0), Difficulty::VeryLow);
        assert_eq!(Difficulty::from_score(0.299), Difficulty::VeryLow);
        assert_eq!(Difficulty::from_score(0.44), Difficulty::Low);
        assert_eq!(Difficulty::from_score(0.59), Difficulty::Medium);
        assert_eq!(Difficulty::from_score(0.79), Difficulty::High);
        assert_eq!(Difficulty::from_score(1.0), Difficulty::VeryHigh);
        assert_eq!(Difficulty::from_score(7.0), Difficulty::VeryHigh);
    }

    #[test]
    fn labels_are_ordered() {
        assert!(Difficulty::VeryLow < Difficulty::Low);
        assert!(Difficulty::Low < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::High);
        assert!(Difficulty::High < Difficulty::VeryHigh);
    }

    #[test]
    fn label_round_trips_through_strings() {
        for d in [
            Difficulty::VeryLow,
            Difficulty::Low,
            Difficulty::Medium,
            Difficulty::High,
            Difficulty::VeryHigh,
        ] {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
    }

    #[test]
    fn pure_number_accepts_signed_values() {
        assert_eq!(parse_pure_number("10"), Some(10.0));
        assert_eq!(parse_pure_number("  3.5 "), Some(3.5));
        assert_eq!(parse_pure_number("-42"), Some(-42.0));
    }

    #[test]
    fn pure_number_rejects_ranges_and_text() {
        assert_eq!(parse_pure_number("10-20"), None);
        assert_eq!(parse_pure_number("-10-20"), None);
        assert_eq!(parse_pure_number("paris"), None);
        assert_eq!(parse_pure_number(""), None);
    }

    #[test]
    fn all_numeric_options_take_the_numeric_path() {
        let set = OptionSet::classify(&opts(&["10", "20", "-5"]));
        assert_eq!(set, OptionSet::Numeric(vec![10.0, 20.0, -5.0]));
    }

    #[test]
    fn range_option_forces_text_path() {
        let set = OptionSet::classify(&opts(&["10", "10-20"]));
        assert!(matches!(set, OptionSet::Text(_)));
    }

    #[test]
    fn identical_numeric_options_have_full_similarity() {
        let set = OptionSet::classify(&opts(&["10", "10", "10", "10", "10"]));
        assert_eq!(set.pairwise_similarity(), 1.0);
    }

    #[test]
    fn single_option_has_zero_similarity() {
        let set = OptionSet::classify(&opts(&["42"]));
        assert_eq!(set.pairwise_similarity(), 0.0);
    }

    #[test]
    fn score_in_unit_interval_for_ordinary_text() {
        // Reading ease for this question sits in [0, 100], so the no-options
        // score must stay within [0, 1].
        let score = heuristic_difficulty("What is the capital of France?", None);
        assert!((0.0..=1.0).contains(&score), "got {score}");
    }

    #[test]
    fn empty_options_list_scores_like_no_options() {
        let text = "What is the capital of France?";
        let empty: Vec<String> = vec![];
        assert_eq!(
            heuristic_difficulty(text, Some(&empty)),
            heuristic_difficulty(text, None)
        );
    }

    #[test]
    fn near_identical_options_raise_the_score() {
        let text = "What is the speed of light in a vacuum, expressed in meters per second?";
        let close = opts(&["299792458", "299792459"]);
        let far = opts(&["1", "299792458"]);
        let hard = heuristic_difficulty(text, Some(&close));
        let easy = heuristic_difficulty(text, Some(&far));
        assert!(hard > easy, "hard={hard} easy={easy}");
    }

    #[test]
    fn negative_reading_ease_can_push_score_past_one() {
        // The lower bound of the readability normalization is deliberately
        // open: (1 - readability) exceeds 1 for negative reading ease and the
        // final score is not re-clamped.
        let jargon = "Thermodynamic equilibrium necessitates comprehensive statistical \
                      characterization of microscopic configurational probability \
                      distributions throughout heterogeneous multicomponent systems.";
        let score = heuristic_difficulty(jargon, None);
        assert!(score > 1.0, "got {score}");
        assert_eq!(Difficulty::from_score(score), Difficulty::VeryHigh);
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "Which planet is known as the red planet?";
        let options = opts(&["Mars", "Venus", "Jupiter"]);
        let a = heuristic_difficulty(text, Some(&options));
        let b = heuristic_difficulty(text, Some(&options));
        assert_eq!(a, b);
    }
}
