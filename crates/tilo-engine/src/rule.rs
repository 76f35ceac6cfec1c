//! Session rules — score targets and survival timers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a rule asks the player to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Reach this total score
    Score(i64),
    /// Survive this many seconds
    Time(u32),
}

/// The nine playable rules. Families 1 and 2 chase a score target and
/// differ only in presentation; family 3 is a survival timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleVariant {
    #[serde(rename = "rule_1_2943")]
    Rule1_2943,
    #[serde(rename = "rule_1_8390")]
    Rule1_8390,
    #[serde(rename = "rule_1_37654")]
    Rule1_37654,
    #[serde(rename = "rule_2_2943")]
    Rule2_2943,
    #[serde(rename = "rule_2_8390")]
    Rule2_8390,
    #[serde(rename = "rule_2_37654")]
    Rule2_37654,
    #[serde(rename = "rule_3_0409")]
    Rule3_0409,
    #[serde(rename = "rule_3_2009")]
    Rule3_2009,
    #[serde(rename = "rule_3_6819")]
    Rule3_6819,
}

/// Unknown rule name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown rule: {0}")]
pub struct RuleParseError(String);

impl RuleVariant {
    pub const ALL: [RuleVariant; 9] = [
        RuleVariant::Rule1_2943,
        RuleVariant::Rule1_8390,
        RuleVariant::Rule1_37654,
        RuleVariant::Rule2_2943,
        RuleVariant::Rule2_8390,
        RuleVariant::Rule2_37654,
        RuleVariant::Rule3_0409,
        RuleVariant::Rule3_2009,
        RuleVariant::Rule3_6819,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleVariant::Rule1_2943 => "rule_1_2943",
            RuleVariant::Rule1_8390 => "rule_1_8390",
            RuleVariant::Rule1_37654 => "rule_1_37654",
            RuleVariant::Rule2_2943 => "rule_2_2943",
            RuleVariant::Rule2_8390 => "rule_2_8390",
            RuleVariant::Rule2_37654 => "rule_2_37654",
            RuleVariant::Rule3_0409 => "rule_3_0409",
            RuleVariant::Rule3_2009 => "rule_3_2009",
            RuleVariant::Rule3_6819 => "rule_3_6819",
        }
    }

    pub fn goal(self) -> Goal {
        match self {
            RuleVariant::Rule1_2943 | RuleVariant::Rule2_2943 => Goal::Score(2943),
            RuleVariant::Rule1_8390 | RuleVariant::Rule2_8390 => Goal::Score(8390),
            RuleVariant::Rule1_37654 | RuleVariant::Rule2_37654 => Goal::Score(37654),
            RuleVariant::Rule3_0409 => Goal::Time(60 * 4 + 9),
            RuleVariant::Rule3_2009 => Goal::Time(60 * 20 + 9),
            RuleVariant::Rule3_6819 => Goal::Time(60 * 68 + 19),
        }
    }

    /// Whether the session goal has been met
    pub fn is_achieved(self, elapsed_ms: i64, total_score: i64) -> bool {
        match self.goal() {
            Goal::Score(target) => total_score >= target,
            Goal::Time(limit_secs) => elapsed_ms >= i64::from(limit_secs) * 1000,
        }
    }

    /// Seconds shown on the clock: elapsed time for score rules, time
    /// remaining for survival rules. Never negative.
    pub fn display_time(self, elapsed_secs: i64) -> i64 {
        let shown = match self.goal() {
            Goal::Score(_) => elapsed_secs,
            Goal::Time(limit_secs) => i64::from(limit_secs) - elapsed_secs,
        };
        shown.max(0)
    }
}

impl fmt::Display for RuleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleVariant {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleVariant::ALL
            .iter()
            .copied()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| RuleParseError(s.to_string()))
    }
}
