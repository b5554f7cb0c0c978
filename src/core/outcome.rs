use crate::core::rounding::round_significant;
use crate::domain::model::{ResultKind, SampleResult};

pub const LESS_THAN_10: &str = "<10 UFC/L";
pub const MORE_THAN_1_000: &str = ">1 000 UFC/L";
pub const MORE_THAN_10_000: &str = ">10 000 UFC/L";
pub const MORE_THAN_750_000: &str = ">750 000 UFC/L";

pub const WARNING_PREFIX: &str =
    "Improbable case. Root-cause analysis of this result is recommended (";

pub const UNCLASSIFIED_PREFIX: &str =
    "Unclassified case: no interpretation rule covers these readings";

/// Appended once to a report when any sample had interfering flora.
pub const INTERFERENCE_NOTICE: &str =
    "Presence of interfering flora that may impact the results.";

/// Value cited inside an improbable-case warning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WarningValue {
    Estimate(f64),
    AboveTenThousand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterferenceNotice {
    PreventsDetection,
    ThresholdRaisedTo5000,
    ThresholdRaisedTo100,
    NotDetected,
}

impl InterferenceNotice {
    pub fn message(&self) -> &'static str {
        match self {
            InterferenceNotice::PreventsDetection => {
                "Presence of interfering flora prevents the detection of Legionella."
            }
            InterferenceNotice::ThresholdRaisedTo5000 => {
                "Presence of interfering flora raising the Legionella detection threshold to 5 000 UFC/L. Legionella not detected."
            }
            InterferenceNotice::ThresholdRaisedTo100 => {
                "Presence of interfering flora raising the Legionella detection threshold to 100 UFC/L. Legionella not detected."
            }
            InterferenceNotice::NotDetected => "Legionella not detected.",
        }
    }
}

/// What a matched rule decided for a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Unrounded UFC/L value.
    Concentration(f64),
    Warning(WarningValue),
    Bound(&'static str),
    Interference(InterferenceNotice),
}

impl Outcome {
    pub fn warning(value: f64) -> Self {
        Outcome::Warning(WarningValue::Estimate(value))
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Concentration(value) => concentration_message(round_significant(*value)),
            Outcome::Warning(WarningValue::Estimate(value)) => {
                format!("{}{} UFC/L)", WARNING_PREFIX, value)
            }
            Outcome::Warning(WarningValue::AboveTenThousand) => {
                format!("{}{})", WARNING_PREFIX, MORE_THAN_10_000)
            }
            Outcome::Bound(text) => text.to_string(),
            Outcome::Interference(notice) => notice.message().to_string(),
        }
    }

    pub fn into_result(self, interference_detected: bool) -> SampleResult {
        let message = self.message();
        let (concentration, kind) = match self {
            Outcome::Concentration(value) => {
                (Some(round_significant(value)), ResultKind::Concentration)
            }
            Outcome::Warning(_) => (None, ResultKind::Warning),
            Outcome::Bound(_) => (None, ResultKind::Qualitative),
            Outcome::Interference(_) => (None, ResultKind::Interference),
        };

        SampleResult {
            concentration,
            message,
            interference_detected,
            kind,
        }
    }
}

pub fn concentration_message(rounded: f64) -> String {
    format!("Concentration : {} UFC/L", rounded)
}
