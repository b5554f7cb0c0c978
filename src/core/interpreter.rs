use crate::core::interference::match_interference_rule;
use crate::core::outcome::{Outcome, UNCLASSIFIED_PREFIX};
use crate::core::rules::{match_count_rule, Counts};
use crate::domain::model::{
    Report, ReportEntry, ResultKind, SampleInput, SampleResult, SampleSet, SampleType,
};
use crate::utils::error::{Result, UfcError};
use chrono::Utc;

/// Interprets the readings of one sample type.
///
/// Samples without interference go through the count table, the others
/// through the interference table. A combination neither table covers is
/// returned as [`UfcError::UnclassifiedCase`].
pub fn interpret(input: &SampleInput) -> Result<SampleResult> {
    let interfered = input.has_interference();
    let outcome = classify(input)?;
    Ok(outcome.into_result(interfered))
}

/// Decides the outcome of `input` without building the final result.
pub fn classify(input: &SampleInput) -> Result<Outcome> {
    let counts = Counts {
        direct: input.direct.count().unwrap_or(0.0),
        filtrate_10ml: input.filtrate_10ml.count().unwrap_or(0.0),
        filtrate_100ml: input.filtrate_100ml.count().unwrap_or(0.0),
    };

    let matched = if input.has_interference() {
        match_interference_rule(input).map(|rule| (rule.name, rule.outcome))
    } else {
        match_count_rule(&counts).map(|rule| (rule.name, rule.outcome))
    };

    match matched {
        Some((name, outcome)) => {
            tracing::debug!(
                "Rule '{}' matched direct={} 10ml={} 100ml={}",
                name,
                input.direct,
                input.filtrate_10ml,
                input.filtrate_100ml
            );
            Ok(outcome(&counts))
        }
        None => Err(UfcError::UnclassifiedCase {
            direct: input.direct.to_string(),
            filtrate_10ml: input.filtrate_10ml.to_string(),
            filtrate_100ml: input.filtrate_100ml.to_string(),
        }),
    }
}

/// Whether a sample belongs in the final report.
///
/// Samples with no colony on any plate are left out; samples with an
/// interfered channel are always kept.
pub fn is_reportable(input: &SampleInput) -> bool {
    input.has_positive_count() || input.has_interference()
}

/// Result reported for a sample that neither table covers.
pub fn unclassified_result(input: &SampleInput) -> SampleResult {
    SampleResult {
        concentration: None,
        message: format!(
            "{} (direct={}, 10 ml={}, 100 ml={})",
            UNCLASSIFIED_PREFIX, input.direct, input.filtrate_10ml, input.filtrate_100ml
        ),
        interference_detected: input.has_interference(),
        kind: ResultKind::Unclassified,
    }
}

/// Interprets every sample of `set` and collects the reportable ones.
///
/// An unclassified sample is reported as such and does not stop the batch.
pub fn evaluate(set: &SampleSet, batch: Option<&str>) -> Result<Report> {
    let mut entries = Vec::with_capacity(set.len());
    let mut interference_detected = false;

    for (sample_type, input) in set.iter() {
        let result = match interpret(input) {
            Ok(result) => result,
            Err(UfcError::UnclassifiedCase { .. }) => {
                tracing::warn!(
                    "Type {}: no rule matched direct={} 10ml={} 100ml={}",
                    sample_type,
                    input.direct,
                    input.filtrate_10ml,
                    input.filtrate_100ml
                );
                unclassified_result(input)
            }
            Err(e) => return Err(with_sample(*sample_type, e)),
        };
        interference_detected |= result.interference_detected;

        if is_reportable(input) {
            entries.push(ReportEntry {
                sample_type: *sample_type,
                result,
            });
        } else {
            tracing::debug!("Type {} has no colony, left out of the report", sample_type);
        }
    }

    if interference_detected {
        tracing::warn!("Interfering flora detected in at least one sample type");
    }
    tracing::info!(
        "Interpreted {} sample type(s), {} reported",
        set.len(),
        entries.len()
    );

    Ok(Report {
        batch: batch.map(str::to_string),
        generated_at: Utc::now(),
        entries,
        interference_detected,
    })
}

fn with_sample(sample_type: SampleType, error: UfcError) -> UfcError {
    UfcError::SampleError {
        sample: sample_type.to_string(),
        source: Box::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Channel, ResultKind};

    fn sentinels(direct: f64, filtrate_10ml: f64, filtrate_100ml: f64) -> SampleInput {
        SampleInput::from_sentinels(direct, filtrate_10ml, filtrate_100ml).unwrap()
    }

    #[test]
    fn test_interpret_concentration() {
        let result = interpret(&sentinels(0.0, 0.0, 50.0)).unwrap();
        assert_eq!(result.concentration, Some(500.0));
        assert_eq!(result.message, "Concentration : 500 UFC/L");
        assert!(!result.interference_detected);
    }

    #[test]
    fn test_interpret_all_zero_still_yields_message() {
        let input = sentinels(0.0, 0.0, 0.0);
        let result = interpret(&input).unwrap();
        assert_eq!(result.message, "<10 UFC/L");
        assert_eq!(result.kind, ResultKind::Qualitative);
        assert!(!is_reportable(&input));
    }

    #[test]
    fn test_interpret_interference_concentration() {
        let result = interpret(&sentinels(5.0, 0.0, -1.0)).unwrap();
        assert_eq!(result.concentration, Some(25_000.0));
        assert_eq!(result.message, "Concentration : 25000 UFC/L");
        assert!(result.interference_detected);
    }

    #[test]
    fn test_interpret_all_channels_lost() {
        let input = SampleInput::new(Channel::Interfered, Channel::Interfered, Channel::Interfered)
            .unwrap();
        let result = interpret(&input).unwrap();
        assert_eq!(result.concentration, None);
        assert!(result.message.contains("interfering flora prevents the detection"));
        assert!(result.interference_detected);
        assert!(is_reportable(&input));
    }

    #[test]
    fn test_unclassified_cases_are_errors() {
        let err = interpret(&sentinels(-1.0, 150.0, -1.0)).unwrap_err();
        assert!(matches!(err, UfcError::UnclassifiedCase { .. }));

        let err = interpret(&sentinels(1.0, 0.0, 5.0)).unwrap_err();
        assert!(matches!(err, UfcError::UnclassifiedCase { .. }));
    }

    #[test]
    fn test_evaluate_filters_and_flags() {
        let mut set = SampleSet::new();
        set.insert(SampleType::A, sentinels(0.0, 0.0, 50.0)).unwrap();
        set.insert(SampleType::B, sentinels(0.0, 0.0, 0.0)).unwrap();
        set.insert(SampleType::C, sentinels(-1.0, -1.0, -1.0)).unwrap();

        let report = evaluate(&set, Some("Tower 3")).unwrap();

        let reported: Vec<SampleType> = report.entries.iter().map(|e| e.sample_type).collect();
        assert_eq!(reported, vec![SampleType::A, SampleType::C]);
        assert!(report.interference_detected);
        assert_eq!(report.batch.as_deref(), Some("Tower 3"));
    }

    #[test]
    fn test_fractional_readings_follow_the_tables() {
        let result = interpret(&sentinels(0.0, 0.0, 2.5)).unwrap();
        assert_eq!(result.concentration, Some(25.0));
        assert_eq!(result.message, "Concentration : 25 UFC/L");

        let err = interpret(&sentinels(0.5, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, UfcError::UnclassifiedCase { .. }));
    }

    #[test]
    fn test_evaluate_keeps_going_past_unclassified_sample() {
        let mut set = SampleSet::new();
        set.insert(SampleType::A, sentinels(0.0, 0.0, 50.0)).unwrap();
        set.insert(SampleType::D, sentinels(200.0, -1.0, -1.0)).unwrap();

        let report = evaluate(&set, None).unwrap();

        assert_eq!(report.get(SampleType::A).unwrap().concentration, Some(500.0));
        let unclassified = report.get(SampleType::D).unwrap();
        assert_eq!(unclassified.kind, ResultKind::Unclassified);
        assert_eq!(unclassified.concentration, None);
        assert_eq!(
            unclassified.message,
            "Unclassified case: no interpretation rule covers these readings (direct=200, 10 ml=interfered, 100 ml=interfered)"
        );
        assert!(report.interference_detected);
    }
}
