//! Correctness evaluation
//!
//! One [`ComparisonMode`] is chosen per run. Exact, empty-means-any and
//! numeric comparisons are pure; the external checker spawns a process
//! through the run's [`Invoker`].

use crate::constants::NUMERIC_ROUND_DIGITS;
use crate::error::{HarnessError, HarnessResult};
use crate::invoker::Invoker;
use crate::utils::round_to;

/// How actual output is judged against the expected output
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonMode {
    /// Trimmed texts must be equal
    Exact,
    /// An empty or missing expected output accepts anything
    EmptyMeansAny,
    /// Both sides are one number; accepted within the tolerance
    NumericTolerance(f64),
    /// A checker program decides through its exit status
    ExternalChecker(String),
}

impl ComparisonMode {
    /// Pick the mode of a run.
    ///
    /// Precedence: numeric tolerance, then checker, then exact or
    /// empty-means-any.
    pub fn select(tolerance: Option<f64>, checker: Option<String>, empty_means_any: bool) -> Self {
        if let Some(epsilon) = tolerance {
            ComparisonMode::NumericTolerance(epsilon)
        } else if let Some(command) = checker {
            ComparisonMode::ExternalChecker(command)
        } else if empty_means_any {
            ComparisonMode::EmptyMeansAny
        } else {
            ComparisonMode::Exact
        }
    }

    /// Whether a case without a `.out` file must be rejected up front
    pub fn requires_expected_output(&self) -> bool {
        matches!(self, ComparisonMode::Exact)
    }
}

impl std::fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonMode::Exact => write!(f, "exact"),
            ComparisonMode::EmptyMeansAny => write!(f, "empty-means-any"),
            ComparisonMode::NumericTolerance(epsilon) => write!(f, "numeric (±{})", epsilon),
            ComparisonMode::ExternalChecker(command) => write!(f, "checker `{}`", command),
        }
    }
}

/// Outcome of judging one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: bool,
    /// What the output was judged against, for reporting. In checker mode
    /// this describes the checker's exit status.
    pub expected: String,
}

/// Plain equality of the trimmed texts
pub fn exact_match(expected: &str, actual: &str) -> bool {
    expected == actual
}

/// Equality, unless there is nothing to compare against
pub fn empty_means_any_match(expected: &str, actual: &str) -> bool {
    expected.is_empty() || exact_match(expected, actual)
}

/// Both texts parsed as numbers; the difference is rounded to
/// [`NUMERIC_ROUND_DIGITS`] decimals before being compared to `epsilon`.
pub fn numeric_match(expected: &str, actual: &str, epsilon: f64) -> HarnessResult<bool> {
    let expected = parse_number(expected)?;
    let actual = parse_number(actual)?;
    Ok(round_to((expected - actual).abs(), NUMERIC_ROUND_DIGITS) <= epsilon)
}

fn parse_number(value: &str) -> HarnessResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| HarnessError::NumericParse {
            value: value.to_string(),
        })
}

/// Judges actual output under a [`ComparisonMode`]
pub struct Evaluator<'a> {
    invoker: &'a dyn Invoker,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator that runs checkers through `invoker`
    pub fn new(invoker: &'a dyn Invoker) -> Self {
        Self { invoker }
    }

    /// Judge `actual` for a case with the given `input` and `expected` text.
    pub async fn evaluate(
        &self,
        mode: &ComparisonMode,
        input: &str,
        expected: Option<&str>,
        actual: &str,
    ) -> HarnessResult<Evaluation> {
        let expected = expected.unwrap_or_default();

        match mode {
            ComparisonMode::Exact => Ok(Evaluation {
                correct: exact_match(expected, actual),
                expected: expected.to_string(),
            }),
            ComparisonMode::EmptyMeansAny => Ok(Evaluation {
                correct: empty_means_any_match(expected, actual),
                expected: expected.to_string(),
            }),
            ComparisonMode::NumericTolerance(epsilon) => Ok(Evaluation {
                correct: numeric_match(expected, actual, *epsilon)?,
                expected: expected.to_string(),
            }),
            ComparisonMode::ExternalChecker(command) => {
                let payload = format!("{}\n{}", input, actual);
                let code = self
                    .invoker
                    .invoke_for_status(command, &payload)
                    .await
                    .map_err(|e| HarnessError::Checker {
                        command: command.clone(),
                        reason: e.to_string(),
                    })?;

                Ok(Evaluation {
                    correct: code == 0,
                    expected: format!("[[Got status code {} from {}]]", code, command),
                })
            }
        }
    }
}
