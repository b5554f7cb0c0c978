use crate::adapters::raw_input::RawSampleInput;
use crate::core::{ChannelKind, InterferenceFlags, SampleSet, SampleSource, SampleType};
use crate::utils::error::{Result, UfcError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlBatch {
    pub batch: Option<BatchInfo>,
    #[serde(default)]
    pub interference: InterferenceFlags,
    #[serde(default)]
    pub samples: Vec<SampleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleEntry {
    #[serde(rename = "type")]
    pub sample_type: String,
    #[serde(flatten)]
    pub values: RawSampleInput,
    /// Channels lost to interfering flora for this sample only.
    #[serde(default)]
    pub interfered: Vec<ChannelKind>,
}

impl TomlBatch {
    /// Loads a batch from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Adds channels flagged on the command line to the batch-wide toggles.
    pub fn with_interference(mut self, extra: &InterferenceFlags) -> Self {
        for kind in ChannelKind::ALL {
            if extra.is_set(kind) {
                self.interference.set(kind);
            }
        }
        self
    }

    pub fn to_sample_set(&self) -> Result<SampleSet> {
        let mut set = SampleSet::new();
        for entry in &self.samples {
            let sample_type: SampleType = entry.sample_type.parse()?;

            let mut disabled = self.interference;
            for kind in &entry.interfered {
                disabled.set(*kind);
            }

            let input = entry.values.to_input(&disabled).map_err(|e| UfcError::SampleError {
                sample: sample_type.to_string(),
                source: Box::new(e),
            })?;
            set.insert(sample_type, input)?;
        }
        Ok(set)
    }
}

impl Validate for TomlBatch {
    fn validate(&self) -> Result<()> {
        if let Some(batch) = &self.batch {
            validate_non_empty_string("batch.name", &batch.name)?;
        }
        if self.samples.is_empty() {
            return Err(UfcError::validation("The batch file lists no samples"));
        }
        Ok(())
    }
}

impl SampleSource for TomlBatch {
    fn load(&self) -> Result<SampleSet> {
        self.validate()?;
        self.to_sample_set()
    }

    fn batch_name(&self) -> Option<&str> {
        self.batch.as_ref().map(|batch| batch.name.as_str())
    }
}
