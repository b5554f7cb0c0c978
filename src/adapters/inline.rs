use crate::adapters::raw_input::RawSampleInput;
use crate::core::{InterferenceFlags, SampleSet, SampleSource, SampleType};
use crate::utils::error::{Result, UfcError};

/// Samples given on the command line as `A=direct,10ml,100ml`.
#[derive(Debug, Clone)]
pub struct InlineSamples {
    specs: Vec<String>,
    interference: InterferenceFlags,
}

impl InlineSamples {
    pub fn new(specs: Vec<String>, interference: InterferenceFlags) -> Self {
        Self {
            specs,
            interference,
        }
    }
}

pub fn parse_sample_spec(arg: &str) -> Result<(SampleType, RawSampleInput)> {
    let invalid = |reason: &str| UfcError::InvalidValueError {
        field: "sample".to_string(),
        value: arg.to_string(),
        reason: reason.to_string(),
    };

    let (sample_type, values) = arg
        .split_once('=')
        .ok_or_else(|| invalid("Expected TYPE=direct,10ml,100ml"))?;
    let sample_type: SampleType = sample_type.parse()?;

    let values: Vec<&str> = values.split(',').collect();
    let [direct, filtrate_10ml, filtrate_100ml] = values.as_slice() else {
        return Err(invalid("Expected exactly three comma-separated values"));
    };

    Ok((
        sample_type,
        RawSampleInput::from_text(direct, filtrate_10ml, filtrate_100ml),
    ))
}

impl SampleSource for InlineSamples {
    fn load(&self) -> Result<SampleSet> {
        let mut set = SampleSet::new();
        for arg in &self.specs {
            let (sample_type, raw) = parse_sample_spec(arg)?;
            set.insert(sample_type, raw.to_input(&self.interference)?)?;
        }
        Ok(set)
    }
}
