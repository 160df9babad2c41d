//! Parsing of the solver's tagged step-by-step text.
//!
//! The solver answers with free text containing `<STEP>...</STEP>` blocks in
//! order and at most one `<ANSWER>...</ANSWER>` block. Numbers inside may be
//! wrapped in `<NUM>` tags, which are dropped.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static STEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<STEP>(.*?)</STEP>").expect("step pattern is valid"));

static ANSWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<ANSWER>(.*?)</ANSWER>").expect("answer pattern is valid"));

static NUM_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?NUM>").expect("num pattern is valid"));

/// A parsed solution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Steps in the order the solver produced them.
    pub steps: Vec<String>,
    /// Final answer; empty when the solver gave none.
    pub answer: String,
}

impl Solution {
    /// Whether the solver produced neither steps nor an answer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.answer.is_empty()
    }
}

/// Extract steps and answer from the solver's raw result text.
#[must_use]
pub fn parse_solution(raw: &str) -> Solution {
    let steps = STEP_RE
        .captures_iter(raw)
        .map(|caps| clean_text(&caps[1]))
        .collect();
    let answer = ANSWER_RE
        .captures(raw)
        .map(|caps| clean_text(&caps[1]))
        .unwrap_or_default();
    Solution { steps, answer }
}

fn clean_text(text: &str) -> String {
    NUM_TAG_RE.replace_all(text, "").trim().to_string()
}
