//! Conversion of raw form values into channel readings.

use crate::core::{Channel, ChannelKind, InterferenceFlags, SampleInput};
use crate::utils::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn leading_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|\d+\.?\d*(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?)")
            .expect("count pattern is a valid regex")
    })
}

/// Reads the numeric prefix of a typed value: `"12 colonies"` is 12, an
/// empty or non-numeric value is 0.
pub fn parse_count(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let Some(found) = leading_number().find(trimmed) else {
        return 0.0;
    };

    let digits = found.as_str();
    let value = match digits.trim_start_matches(['+', '-']) {
        "Infinity" if digits.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => digits.parse::<f64>().unwrap_or(0.0),
    };

    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Reads one cell: `x` or `interfered` marks the channel as lost.
pub fn parse_channel(raw: &str) -> Channel {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("x") || trimmed.eq_ignore_ascii_case("interfered") {
        Channel::Interfered
    } else {
        Channel::Measured(parse_count(trimmed))
    }
}

/// A cell that may have been typed as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Text(String::new())
    }
}

impl RawValue {
    pub fn to_channel(&self) -> Channel {
        match self {
            RawValue::Number(value) => Channel::Measured(*value),
            RawValue::Text(text) => parse_channel(text),
        }
    }
}

/// The three values of one sample type as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSampleInput {
    #[serde(default)]
    pub direct: RawValue,
    #[serde(default)]
    pub filtrate_10ml: RawValue,
    #[serde(default)]
    pub filtrate_100ml: RawValue,
}

impl RawSampleInput {
    pub fn from_text(direct: &str, filtrate_10ml: &str, filtrate_100ml: &str) -> Self {
        Self {
            direct: RawValue::Text(direct.to_string()),
            filtrate_10ml: RawValue::Text(filtrate_10ml.to_string()),
            filtrate_100ml: RawValue::Text(filtrate_100ml.to_string()),
        }
    }

    /// Builds the validated input; a disabled channel discards its value.
    pub fn to_input(&self, disabled: &InterferenceFlags) -> Result<SampleInput> {
        let read = |kind: ChannelKind, value: &RawValue| {
            if disabled.is_set(kind) {
                Channel::Interfered
            } else {
                value.to_channel()
            }
        };

        SampleInput::new(
            read(ChannelKind::Direct, &self.direct),
            read(ChannelKind::Filtrate10ml, &self.filtrate_10ml),
            read(ChannelKind::Filtrate100ml, &self.filtrate_100ml),
        )
    }
}
