//! Strategy selectors shared by configuration files and the CLI.
//!
//! Each enum names one interchangeable behaviour of the automaton core. They
//! live here so that `gta-config` can persist them and `gta-core` can
//! dispatch on them without either crate depending on the other.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which learner output format a model file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerFormat {
    /// Guards are alphabet symbols mapped through the configured table.
    #[default]
    Symbol,
    /// Guards are integer-encoded bounds decoded with precision and offset.
    Time,
}

impl std::fmt::Display for LearnerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LearnerFormat::Symbol => write!(f, "symbol"),
            LearnerFormat::Time => write!(f, "time"),
        }
    }
}

/// Token layout accepted when scanning learner output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tokenization {
    /// Exact historical layout (`3 1 [12, 40]->2`); anything else is ignored.
    Legacy,
    /// Whitespace-tolerant layout; declaration-shaped lines with bad fields fail.
    #[default]
    Lenient,
}

impl std::fmt::Display for Tokenization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tokenization::Legacy => write!(f, "legacy"),
            Tokenization::Lenient => write!(f, "lenient"),
        }
    }
}

/// Which observation a re-estimation bucket receives for each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum RestimateRule {
    /// Walk the first `W-1` values; the state reached absorbs the last value.
    #[default]
    NextValue,
    /// Walk all `W` values; the state the last value leads into absorbs it.
    EnteringValue,
}

impl std::fmt::Display for RestimateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestimateRule::NextValue => write!(f, "next_value"),
            RestimateRule::EnteringValue => write!(f, "entering_value"),
        }
    }
}

/// Where prediction traversal starts for each window after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowOrigin {
    /// Replay every window from the start state.
    #[default]
    Restart,
    /// Keep one continuous traversal, advancing once per value.
    Carry,
}

impl std::fmt::Display for WindowOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowOrigin::Restart => write!(f, "restart"),
            WindowOrigin::Carry => write!(f, "carry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&RestimateRule::EnteringValue).unwrap(),
            "\"entering_value\""
        );
        assert_eq!(
            serde_json::from_str::<WindowOrigin>("\"carry\"").unwrap(),
            WindowOrigin::Carry
        );
        assert_eq!(
            serde_json::from_str::<Tokenization>("\"legacy\"").unwrap(),
            Tokenization::Legacy
        );
    }

    #[test]
    fn test_display_matches_serde() {
        for rule in [RestimateRule::NextValue, RestimateRule::EnteringValue] {
            let json = serde_json::to_string(&rule).unwrap();
            assert_eq!(json.trim_matches('"'), rule.to_string());
        }
        assert_eq!(LearnerFormat::Time.to_string(), "time");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(LearnerFormat::default(), LearnerFormat::Symbol);
        assert_eq!(Tokenization::default(), Tokenization::Lenient);
        assert_eq!(RestimateRule::default(), RestimateRule::NextValue);
        assert_eq!(WindowOrigin::default(), WindowOrigin::Restart);
    }
}
