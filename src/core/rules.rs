//! Interpretation table for samples read on all three channels.
//!
//! Rules are tried in order and the first whose bands contain the direct,
//! 10 ml and 100 ml counts decides the outcome.

use crate::core::outcome::{
    Outcome, WarningValue, LESS_THAN_10, MORE_THAN_10_000, MORE_THAN_1_000, MORE_THAN_750_000,
};

/// Range of counts a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Zero,
    /// `min <= count <= max`
    Between(f64, f64),
    /// `min <= count < max`
    HalfOpen(f64, f64),
    Above(f64),
    AtMost(f64),
    Any,
}

impl Band {
    pub fn contains(&self, count: f64) -> bool {
        match *self {
            Band::Zero => count == 0.0,
            Band::Between(min, max) => min <= count && count <= max,
            Band::HalfOpen(min, max) => min <= count && count < max,
            Band::Above(min) => count > min,
            Band::AtMost(max) => count <= max,
            Band::Any => true,
        }
    }
}

/// Counts of one sample. Interfered channels are never read by the rules
/// that receive them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Counts {
    pub direct: f64,
    pub filtrate_10ml: f64,
    pub filtrate_100ml: f64,
}

impl Counts {
    pub fn direct_estimate(&self) -> f64 {
        self.direct * 5000.0
    }

    pub fn filtrate_10ml_estimate(&self) -> f64 {
        self.filtrate_10ml * 100.0
    }

    pub fn filtrate_100ml_estimate(&self) -> f64 {
        self.filtrate_100ml * 10.0
    }

    /// Pooled estimate of both filtrations (110 ml filtered in total).
    pub fn pooled_filtrate_estimate(&self) -> f64 {
        (self.filtrate_10ml + self.filtrate_100ml) * 1000.0 / 110.0
    }
}

pub struct CountRule {
    pub name: &'static str,
    pub direct: Band,
    pub filtrate_10ml: Band,
    pub filtrate_100ml: Band,
    pub outcome: fn(&Counts) -> Outcome,
}

impl CountRule {
    pub fn matches(&self, counts: &Counts) -> bool {
        self.direct.contains(counts.direct)
            && self.filtrate_10ml.contains(counts.filtrate_10ml)
            && self.filtrate_100ml.contains(counts.filtrate_100ml)
    }
}

const DIRECT_LOW: Band = Band::Between(1.0, 2.0);
const DIRECT_MID: Band = Band::Between(3.0, 150.0);
const COUNTABLE: Band = Band::Between(1.0, 100.0);

pub const COUNT_RULES: &[CountRule] = &[
    // No colony on the direct plate
    CountRule {
        name: "no-direct/no-10ml/no-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::Zero,
        filtrate_100ml: Band::Zero,
        outcome: below_detection,
    },
    CountRule {
        name: "no-direct/no-10ml/countable-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::Zero,
        filtrate_100ml: COUNTABLE,
        outcome: from_100ml,
    },
    CountRule {
        name: "no-direct/no-10ml/saturated-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::Zero,
        filtrate_100ml: Band::Above(100.0),
        outcome: above_1_000,
    },
    CountRule {
        name: "no-direct/few-10ml/no-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::HalfOpen(1.0, 10.0),
        filtrate_100ml: Band::Zero,
        outcome: warn_from_10ml,
    },
    CountRule {
        name: "no-direct/few-10ml/countable-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::HalfOpen(1.0, 10.0),
        filtrate_100ml: COUNTABLE,
        outcome: pooled_filtrates,
    },
    CountRule {
        name: "no-direct/few-10ml/saturated-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::HalfOpen(1.0, 10.0),
        filtrate_100ml: Band::Above(100.0),
        outcome: above_1_000,
    },
    CountRule {
        name: "no-direct/countable-10ml/no-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::Between(10.0, 100.0),
        filtrate_100ml: Band::Zero,
        outcome: warn_from_10ml,
    },
    CountRule {
        name: "no-direct/countable-10ml/countable-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::Between(10.0, 100.0),
        filtrate_100ml: COUNTABLE,
        outcome: pooled_filtrates,
    },
    CountRule {
        name: "no-direct/countable-10ml/saturated-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::Between(10.0, 100.0),
        filtrate_100ml: Band::Above(100.0),
        outcome: from_10ml,
    },
    CountRule {
        name: "no-direct/saturated-10ml/unsaturated-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::Above(100.0),
        filtrate_100ml: Band::AtMost(100.0),
        outcome: warn_above_10_000,
    },
    CountRule {
        name: "no-direct/saturated-10ml/saturated-100ml",
        direct: Band::Zero,
        filtrate_10ml: Band::Above(100.0),
        filtrate_100ml: Band::Above(100.0),
        outcome: above_10_000,
    },
    // One or two colonies on the direct plate
    CountRule {
        name: "few-direct/no-filtrates",
        direct: DIRECT_LOW,
        filtrate_10ml: Band::Zero,
        filtrate_100ml: Band::Zero,
        outcome: warn_from_direct,
    },
    CountRule {
        name: "few-direct/saturated-10ml",
        direct: DIRECT_LOW,
        filtrate_10ml: Band::Above(100.0),
        filtrate_100ml: Band::Any,
        outcome: above_10_000,
    },
    CountRule {
        name: "few-direct/countable-10ml/no-100ml",
        direct: DIRECT_LOW,
        filtrate_10ml: COUNTABLE,
        filtrate_100ml: Band::Zero,
        outcome: warn_direct_or_10ml,
    },
    CountRule {
        name: "few-direct/countable-10ml/countable-100ml",
        direct: DIRECT_LOW,
        filtrate_10ml: COUNTABLE,
        filtrate_100ml: COUNTABLE,
        outcome: direct_or_pooled,
    },
    CountRule {
        name: "few-direct/countable-10ml/saturated-100ml",
        direct: DIRECT_LOW,
        filtrate_10ml: COUNTABLE,
        filtrate_100ml: Band::Above(100.0),
        outcome: direct_or_10ml,
    },
    // Countable direct plate
    CountRule {
        name: "countable-direct/no-10ml",
        direct: DIRECT_MID,
        filtrate_10ml: Band::Zero,
        filtrate_100ml: Band::Any,
        outcome: warn_from_direct,
    },
    CountRule {
        name: "countable-direct/countable-10ml/no-100ml",
        direct: DIRECT_MID,
        filtrate_10ml: COUNTABLE,
        filtrate_100ml: Band::Zero,
        outcome: warn_direct_or_10ml,
    },
    CountRule {
        name: "countable-direct/countable-10ml/countable-100ml",
        direct: DIRECT_MID,
        filtrate_10ml: COUNTABLE,
        filtrate_100ml: COUNTABLE,
        outcome: direct_or_pooled,
    },
    CountRule {
        name: "countable-direct/countable-10ml/saturated-100ml",
        direct: DIRECT_MID,
        filtrate_10ml: COUNTABLE,
        filtrate_100ml: Band::Above(100.0),
        outcome: direct_or_10ml,
    },
    CountRule {
        name: "countable-direct/saturated-10ml/unsaturated-100ml",
        direct: DIRECT_MID,
        filtrate_10ml: Band::Above(100.0),
        filtrate_100ml: Band::AtMost(100.0),
        outcome: warn_direct_above_10_000,
    },
    CountRule {
        name: "countable-direct/saturated-10ml/saturated-100ml",
        direct: DIRECT_MID,
        filtrate_10ml: Band::Above(100.0),
        filtrate_100ml: Band::Above(100.0),
        outcome: direct_above_10_000,
    },
    // Saturated direct plate
    CountRule {
        name: "saturated-direct",
        direct: Band::Above(150.0),
        filtrate_10ml: Band::Any,
        filtrate_100ml: Band::Any,
        outcome: above_750_000,
    },
];

/// First rule of the table matching `counts`.
pub fn match_count_rule(counts: &Counts) -> Option<&'static CountRule> {
    COUNT_RULES.iter().find(|rule| rule.matches(counts))
}

fn below_detection(_: &Counts) -> Outcome {
    Outcome::Bound(LESS_THAN_10)
}

fn above_1_000(_: &Counts) -> Outcome {
    Outcome::Bound(MORE_THAN_1_000)
}

fn above_10_000(_: &Counts) -> Outcome {
    Outcome::Bound(MORE_THAN_10_000)
}

fn above_750_000(_: &Counts) -> Outcome {
    Outcome::Bound(MORE_THAN_750_000)
}

fn from_100ml(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.filtrate_100ml_estimate())
}

fn from_10ml(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.filtrate_10ml_estimate())
}

fn pooled_filtrates(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.pooled_filtrate_estimate())
}

fn direct_or_pooled(counts: &Counts) -> Outcome {
    Outcome::Concentration(
        counts
            .direct_estimate()
            .max(counts.pooled_filtrate_estimate()),
    )
}

fn direct_or_10ml(counts: &Counts) -> Outcome {
    Outcome::Concentration(counts.direct_estimate().max(counts.filtrate_10ml_estimate()))
}

fn warn_from_10ml(counts: &Counts) -> Outcome {
    Outcome::warning(counts.filtrate_10ml_estimate())
}

fn warn_from_direct(counts: &Counts) -> Outcome {
    Outcome::warning(counts.direct_estimate())
}

fn warn_direct_or_10ml(counts: &Counts) -> Outcome {
    Outcome::warning(counts.direct_estimate().max(counts.filtrate_10ml_estimate()))
}

fn warn_above_10_000(_: &Counts) -> Outcome {
    Outcome::Warning(WarningValue::AboveTenThousand)
}

fn warn_direct_above_10_000(counts: &Counts) -> Outcome {
    if counts.direct_estimate() > 10_000.0 {
        Outcome::warning(counts.direct_estimate())
    } else {
        Outcome::Warning(WarningValue::AboveTenThousand)
    }
}

fn direct_above_10_000(counts: &Counts) -> Outcome {
    if counts.direct_estimate() > 10_000.0 {
        Outcome::Concentration(counts.direct_estimate())
    } else {
        Outcome::Bound(MORE_THAN_10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(direct: f64, filtrate_10ml: f64, filtrate_100ml: f64) -> Counts {
        Counts {
            direct,
            filtrate_10ml,
            filtrate_100ml,
        }
    }

    fn outcome_of(direct: f64, filtrate_10ml: f64, filtrate_100ml: f64) -> Outcome {
        let counts = counts(direct, filtrate_10ml, filtrate_100ml);
        let rule = match_count_rule(&counts).expect("rule should match");
        (rule.outcome)(&counts)
    }

    #[test]
    fn test_band_edges() {
        assert!(Band::HalfOpen(1.0, 10.0).contains(9.0));
        assert!(!Band::HalfOpen(1.0, 10.0).contains(10.0));
        assert!(Band::Between(10.0, 100.0).contains(100.0));
        assert!(!Band::Above(100.0).contains(100.0));
        assert!(Band::AtMost(100.0).contains(0.0));
    }

    #[test]
    fn test_rules_partition_whole_counts() {
        let values = [0.0, 1.0, 2.0, 3.0, 9.0, 10.0, 50.0, 100.0, 101.0, 150.0, 151.0, 500.0];
        for direct in values {
            for filtrate_10ml in values {
                for filtrate_100ml in values {
                    let counts = counts(direct, filtrate_10ml, filtrate_100ml);
                    let matching = COUNT_RULES.iter().filter(|rule| rule.matches(&counts)).count();
                    let known_gap = (1.0..=2.0).contains(&direct)
                        && filtrate_10ml == 0.0
                        && filtrate_100ml > 0.0;
                    let expected = if known_gap { 0 } else { 1 };
                    assert_eq!(matching, expected, "{:?}", counts);
                }
            }
        }
    }

    #[test]
    fn test_no_direct_rows() {
        assert_eq!(outcome_of(0.0, 0.0, 0.0), Outcome::Bound("<10 UFC/L"));
        assert_eq!(outcome_of(0.0, 0.0, 50.0), Outcome::Concentration(500.0));
        assert_eq!(outcome_of(0.0, 0.0, 101.0), Outcome::Bound(">1 000 UFC/L"));
        assert_eq!(outcome_of(0.0, 5.0, 0.0), Outcome::warning(500.0));
        assert_eq!(
            outcome_of(0.0, 5.0, 45.0),
            Outcome::Concentration(50.0 * 1000.0 / 110.0)
        );
        assert_eq!(outcome_of(0.0, 9.0, 200.0), Outcome::Bound(">1 000 UFC/L"));
        assert_eq!(outcome_of(0.0, 10.0, 0.0), Outcome::warning(1000.0));
        assert_eq!(outcome_of(0.0, 40.0, 200.0), Outcome::Concentration(4000.0));
        assert_eq!(
            outcome_of(0.0, 101.0, 100.0),
            Outcome::Warning(WarningValue::AboveTenThousand)
        );
        assert_eq!(outcome_of(0.0, 101.0, 101.0), Outcome::Bound(">10 000 UFC/L"));
    }

    #[test]
    fn test_few_direct_rows() {
        assert_eq!(outcome_of(1.0, 0.0, 0.0), Outcome::warning(5000.0));
        assert_eq!(outcome_of(2.0, 150.0, 0.0), Outcome::Bound(">10 000 UFC/L"));
        assert_eq!(outcome_of(1.0, 80.0, 0.0), Outcome::warning(8000.0));
        assert_eq!(outcome_of(1.0, 20.0, 0.0), Outcome::warning(5000.0));
        assert_eq!(outcome_of(2.0, 90.0, 90.0), Outcome::Concentration(10_000.0));
        assert_eq!(
            outcome_of(1.0, 60.0, 50.0),
            Outcome::Concentration(5000.0_f64.max(110.0 * 1000.0 / 110.0))
        );
        assert_eq!(outcome_of(1.0, 70.0, 300.0), Outcome::Concentration(7000.0));
    }

    #[test]
    fn test_countable_direct_rows() {
        assert_eq!(outcome_of(3.0, 0.0, 12.0), Outcome::warning(15_000.0));
        assert_eq!(outcome_of(4.0, 100.0, 0.0), Outcome::warning(20_000.0));
        assert_eq!(outcome_of(10.0, 5.0, 5.0), Outcome::Concentration(50_000.0));
        assert_eq!(outcome_of(3.0, 100.0, 120.0), Outcome::Concentration(15_000.0));
        assert_eq!(outcome_of(5.0, 200.0, 50.0), Outcome::warning(25_000.0));
        assert_eq!(outcome_of(150.0, 200.0, 200.0), Outcome::Concentration(750_000.0));
    }

    #[test]
    fn test_saturated_direct() {
        assert_eq!(outcome_of(200.0, 0.0, 0.0), Outcome::Bound(">750 000 UFC/L"));
        assert_eq!(outcome_of(151.0, 300.0, 12.0), Outcome::Bound(">750 000 UFC/L"));
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<&str> = COUNT_RULES.iter().map(|rule| rule.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COUNT_RULES.len());
    }
}
