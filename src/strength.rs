//! Heuristic password strength scoring.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    pub fn from_score(score: u8) -> StrengthLabel {
        match score {
            0..=29 => StrengthLabel::Weak,
            30..=59 => StrengthLabel::Fair,
            60..=79 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }

    /// A hex color for displaying this label.
    pub fn color(self) -> &'static str {
        match self {
            StrengthLabel::Weak => "#ef4444",
            StrengthLabel::Fair => "#f59e0b",
            StrengthLabel::Good => "#10b981",
            StrengthLabel::Strong => "#22c55e",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of [`score`]. `color` is carried along so that stored results keep their display
/// hint.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct StrengthResult {
    pub score: u8,
    pub label: StrengthLabel,
    pub color: String,
}

impl StrengthResult {
    fn from_score(score: u8) -> StrengthResult {
        let label = StrengthLabel::from_score(score);
        StrengthResult {
            score,
            label,
            color: label.color().to_owned(),
        }
    }
}

const MAX_LENGTH_SCORE: usize = 30;
const VARIETY_STEP: usize = 10;
const UNIQUE_RATIO_WEIGHT: usize = 20;
const MAX_CONSECUTIVE_PENALTY: usize = 10;

/// Score `password` from 0 to 100.
///
/// Points come from length (2 per character, up to 30), variety (10 each for lowercase, uppercase,
/// digits and anything else), and the share of distinct characters (up to 20). Two points are
/// taken off for every adjacent pair whose code points differ by one, up to 10.
pub fn score(password: &str) -> StrengthResult {
    let chars = password.chars().collect::<Vec<_>>();
    if chars.is_empty() {
        return StrengthResult::from_score(0);
    }
    let len = chars.len();

    let length_score = std::cmp::min(len * 2, MAX_LENGTH_SCORE);

    let classes_present = [
        chars.iter().any(char::is_ascii_lowercase),
        chars.iter().any(char::is_ascii_uppercase),
        chars.iter().any(char::is_ascii_digit),
        chars.iter().any(|ch| !ch.is_ascii_alphanumeric()),
    ];
    let variety_score = classes_present.iter().filter(|&&present| present).count() * VARIETY_STEP;

    let distinct = chars.iter().collect::<HashSet<_>>().len();
    let unique_ratio_score = distinct * UNIQUE_RATIO_WEIGHT / len;

    let consecutive = chars
        .windows(2)
        .filter(|pair| (pair[1] as i64 - pair[0] as i64).abs() == 1)
        .count();
    let consecutive_penalty = std::cmp::min(consecutive * 2, MAX_CONSECUTIVE_PENALTY);

    let total =
        (length_score + variety_score + unique_ratio_score).saturating_sub(consecutive_penalty);
    StrengthResult::from_score(total.min(100) as u8)
}
