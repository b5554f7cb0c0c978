//! Interpretation table for samples where interfering flora made at least
//! one channel unreadable.

use crate::core::outcome::{InterferenceNotice, Outcome};
use crate::core::rules::{Band, Counts};
use crate::domain::model::{Channel, SampleInput};

/// What a rule expects on one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    Interfered,
    Measured(Band),
}

impl Pattern {
    pub fn accepts(&self, channel: Channel) -> bool {
        match (self, channel) {
            (Pattern::Interfered, Channel::Interfered) => true,
            (Pattern::Measured(band), Channel::Measured(count)) => band.contains(count),
            _ => false,
        }
    }
}

pub struct InterferenceRule {
    pub name: &'static str,
    pub direct: Pattern,
    pub filtrate_10ml: Pattern,
    pub filtrate_100ml: Pattern,
    pub outcome: fn(&Counts) -> Outcome,
}

impl InterferenceRule {
    pub fn matches(&self, input: &SampleInput) -> bool {
        self.direct.accepts(input.direct)
            && self.filtrate_10ml.accepts(input.filtrate_10ml)
            && self.filtrate_100ml.accepts(input.filtrate_100ml)
    }
}

const LOST: Pattern = Pattern::Interfered;
const NONE: Pattern = Pattern::Measured(Band::Zero);
const DIRECT_READABLE: Pattern = Pattern::Measured(Band::Between(0.0, 150.0));
const FILTRATE_READABLE: Pattern = Pattern::Measured(Band::Between(0.0, 100.0));

pub const INTERFERENCE_RULES: &[InterferenceRule] = &[
    InterferenceRule {
        name: "all-channels-lost",
        direct: LOST,
        filtrate_10ml: LOST,
        filtrate_100ml: LOST,
        outcome: prevents_detection,
    },
    InterferenceRule {
        name: "no-direct/filtrates-lost",
        direct: NONE,
        filtrate_10ml: LOST,
        filtrate_100ml: LOST,
        outcome: threshold_5000,
    },
    InterferenceRule {
        name: "direct-lost/no-10ml/100ml-lost",
        direct: LOST,
        filtrate_10ml: NONE,
        filtrate_100ml: LOST,
        outcome: threshold_100,
    },
    InterferenceRule {
        name: "no-direct/no-10ml/100ml-lost",
        direct: NONE,
        filtrate_10ml: NONE,
        filtrate_100ml: LOST,
        outcome: threshold_100,
    },
    InterferenceRule {
        name: "direct-lost/10ml-lost/no-100ml",
        direct: LOST,
        filtrate_10ml: LOST,
        filtrate_100ml: NONE,
        outcome: not_detected,
    },
    InterferenceRule {
        name: "direct-lost/readable-filtrates",
        direct: LOST,
        filtrate_10ml: FILTRATE_READABLE,
        filtrate_100ml: FILTRATE_READABLE,
        outcome: pooled_filtrates,
    },
    InterferenceRule {
        name: "readable-direct/10ml-lost/readable-100ml",
        direct: DIRECT_READABLE,
        filtrate_10ml: LOST,
        filtrate_100ml: FILTRATE_READABLE,
        outcome: from_direct,
    },
    InterferenceRule {
        name: "readable-direct/readable-10ml/100ml-lost",
        direct: DIRECT_READABLE,
        filtrate_10ml: FILTRATE_READABLE,
        filtrate_100ml: LOST,
        outcome: direct_or_10ml,
    },
    InterferenceRule {
        name: "direct-lost/10ml-lost/readable-100ml",
        direct: LOST,
        filtrate_10ml: LOST,
        filtrate_100ml: FILTRATE_READABLE,
        outcome: from_100ml,
    },
    InterferenceRule {
        name: "readable-direct/filtrates-lost",
        direct: DIRECT_READABLE,
        filtrate_10ml: LOST,
        filtrate_100ml: LOST,
        outcome: from_direct,
    },
    InterferenceRule {
        name: "direct-lost/readable-10ml/100ml-lost",
        direct: LOST,
        filtrate_10ml: FILTRATE_READABLE,
        filtrate_100ml: LOST,
        outcome: from_10ml,
    },
];

/// First rule matching `input`, if the table covers it at all.
pub fn match_interference_rule(input: &SampleInput) -> Option<&'static InterferenceRule> {
    INTERFERENCE_RULES.iter().find(|rule| rule.matches(input))
}

fn prevents_detection(_: &Counts) -> Outcome {
    Outcome::Interference(InterferenceNotice::PreventsDetection)
}

fn threshold_5000(_: &Counts) -> Outcome {
    Outcome::Interference(InterferenceNotice::ThresholdRaisedTo5000)
}

fn threshold_100(_: &Counts) -> Outcome {
    Outcome::Interference(InterferenceNotice::ThresholdRaisedTo100)
}

fn not_detected(_: &Counts) -> Outcome {
    Outcome::Interference(InterferenceNotice::NotDetected)
}

fn pooled_filtrates(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.pooled_filtrate_estimate())
}

fn from_direct(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.direct_estimate())
}

fn direct_or_10ml(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.direct_estimate().max(counts.filtrate_10ml_estimate()))
}

fn from_100ml(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.filtrate_100ml_estimate())
}

fn from_10ml(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.filtrate_10ml_estimate())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome_of(direct: f64, filtrate_10ml: f64, filtrate_100ml: f64) -> Option<Outcome> {
        let input = SampleInput::from_sentinels(direct, filtrate_10ml, filtrate_100ml).unwrap();
        let counts = Counts {
            direct: input.direct.count().unwrap_or(0.0),
            filtrate_10ml: input.filtrate_10ml.count().unwrap_or(0.0),
            filtrate_100ml: input.filtrate_100ml.count().unwrap_or(0.0),
        };
        match_interference_rule(&input).map(|rule| (rule.outcome)(&counts))
    }

    #[test]
    fn test_pattern_never_reads_interfered_as_a_count() {
        assert!(!FILTRATE_READABLE.accepts(Channel::Interfered));
        assert!(!LOST.accepts(Channel::Measured(0.0)));
        assert!(NONE.accepts(Channel::Measured(0.0)));
    }

    #[test]
    fn test_qualitative_patterns() {
        assert_eq!(
            outcome_of(-1.0, -1.0, -1.0),
            Some(Outcome::Interference(InterferenceNotice::PreventsDetection))
        );
        assert_eq!(
            outcome_of(0.0, -1.0, -1.0),
            Some(Outcome::Interference(InterferenceNotice::ThresholdRaisedTo5000))
        );
        assert_eq!(
            outcome_of(-1.0, 0.0, -1.0),
            Some(Outcome::Interference(InterferenceNotice::ThresholdRaisedTo100))
        );
        assert_eq!(
            outcome_of(0.0, 0.0, -1.0),
            Some(Outcome::Interference(InterferenceNotice::ThresholdRaisedTo100))
        );
        assert_eq!(
            outcome_of(-1.0, -1.0, 0.0),
            Some(Outcome::Interference(InterferenceNotice::NotDetected))
        );
    }

    #[test]
    fn test_numeric_patterns() {
        assert_eq!(
            outcome_of(-1.0, 20.0, 35.0),
            Some(Outcome::Concentration(55.0 * 1000.0 / 110.0))
        );
        assert_eq!(outcome_of(4.0, -1.0, 80.0), Some(Outcome::Concentration(20_000.0)));
        assert_eq!(outcome_of(5.0, 0.0, -1.0), Some(Outcome::Concentration(25_000.0)));
        assert_eq!(outcome_of(0.0, 70.0, -1.0), Some(Outcome::Concentration(7000.0)));
        assert_eq!(outcome_of(-1.0, -1.0, 50.0), Some(Outcome::Concentration(500.0)));
        assert_eq!(outcome_of(2.0, -1.0, -1.0), Some(Outcome::Concentration(10_000.0)));
        assert_eq!(outcome_of(-1.0, 30.0, -1.0), Some(Outcome::Concentration(3000.0)));
    }

    #[test]
    fn test_uncovered_combinations() {
        assert_eq!(outcome_of(-1.0, 150.0, -1.0), None);
        assert_eq!(outcome_of(200.0, -1.0, -1.0), None);
        assert_eq!(outcome_of(-1.0, 20.0, 300.0), None);
        assert_eq!(outcome_of(3.0, -1.0, 101.0), None);
    }
}
