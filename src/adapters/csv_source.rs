use crate::adapters::raw_input::RawSampleInput;
use crate::core::{InterferenceFlags, SampleSet, SampleSource, SampleType};
use crate::utils::error::Result;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    sample_type: String,
    #[serde(default)]
    direct: String,
    #[serde(default)]
    filtrate_10ml: String,
    #[serde(default)]
    filtrate_100ml: String,
}

/// Samples read from a CSV file with a `type,direct,filtrate_10ml,filtrate_100ml` header.
#[derive(Debug, Clone)]
pub struct CsvSampleSource {
    path: PathBuf,
    interference: InterferenceFlags,
}

impl CsvSampleSource {
    pub fn new(path: impl Into<PathBuf>, interference: InterferenceFlags) -> Self {
        Self {
            path: path.into(),
            interference,
        }
    }
}

impl SampleSource for CsvSampleSource {
    fn load(&self) -> Result<SampleSet> {
        tracing::debug!("Reading samples from CSV file {}", self.path.display());
        let file = std::fs::File::open(&self.path)?;
        read_samples(file, &self.interference)
    }
}

pub fn read_samples<R: Read>(reader: R, interference: &InterferenceFlags) -> Result<SampleSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut set = SampleSet::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        let row = row?;
        let sample_type: SampleType = row.sample_type.parse()?;
        let raw = RawSampleInput::from_text(&row.direct, &row.filtrate_10ml, &row.filtrate_100ml);
        set.insert(sample_type, raw.to_input(interference)?)?;
    }

    Ok(set)
}
