use crate::utils::error::{Result, UfcError};
use crate::utils::validation::validate_count;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reading of one counting channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Measured(f64),
    /// Plate unusable because of interfering flora.
    Interfered,
}

impl Channel {
    /// Converts a legacy value where `-1` flagged interference.
    pub fn from_sentinel(value: f64) -> Self {
        if value == -1.0 {
            Channel::Interfered
        } else {
            Channel::Measured(value)
        }
    }

    pub fn is_interfered(&self) -> bool {
        matches!(self, Channel::Interfered)
    }

    pub fn count(&self) -> Option<f64> {
        match self {
            Channel::Measured(value) => Some(*value),
            Channel::Interfered => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Measured(value) => write!(f, "{}", value),
            Channel::Interfered => write!(f, "interfered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Direct,
    #[serde(rename = "filtrate_10ml", alias = "n1")]
    Filtrate10ml,
    #[serde(rename = "filtrate_100ml", alias = "n2")]
    Filtrate100ml,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [
        ChannelKind::Direct,
        ChannelKind::Filtrate10ml,
        ChannelKind::Filtrate100ml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Direct => "direct",
            ChannelKind::Filtrate10ml => "filtrate_10ml",
            ChannelKind::Filtrate100ml => "filtrate_100ml",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = UfcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "d" => Ok(ChannelKind::Direct),
            "filtrate_10ml" | "10ml" | "n1" | "n_1" => Ok(ChannelKind::Filtrate10ml),
            "filtrate_100ml" | "100ml" | "n2" | "n_2" => Ok(ChannelKind::Filtrate100ml),
            _ => Err(UfcError::InvalidValueError {
                field: "channel".to_string(),
                value: s.to_string(),
                reason: "Expected one of: direct, filtrate_10ml, filtrate_100ml".to_string(),
            }),
        }
    }
}

/// Per-channel interference toggles, applied to every sample of a set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterferenceFlags {
    pub direct: bool,
    pub filtrate_10ml: bool,
    pub filtrate_100ml: bool,
}

impl InterferenceFlags {
    pub fn from_kinds(kinds: &[ChannelKind]) -> Self {
        let mut flags = Self::default();
        for kind in kinds {
            flags.set(*kind);
        }
        flags
    }

    pub fn set(&mut self, kind: ChannelKind) {
        match kind {
            ChannelKind::Direct => self.direct = true,
            ChannelKind::Filtrate10ml => self.filtrate_10ml = true,
            ChannelKind::Filtrate100ml => self.filtrate_100ml = true,
        }
    }

    pub fn is_set(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::Direct => self.direct,
            ChannelKind::Filtrate10ml => self.filtrate_10ml,
            ChannelKind::Filtrate100ml => self.filtrate_100ml,
        }
    }

    pub fn any(&self) -> bool {
        self.direct || self.filtrate_10ml || self.filtrate_100ml
    }
}

/// The three readings of one sample type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleInput {
    pub direct: Channel,
    pub filtrate_10ml: Channel,
    pub filtrate_100ml: Channel,
}

impl SampleInput {
    pub fn new(direct: Channel, filtrate_10ml: Channel, filtrate_100ml: Channel) -> Result<Self> {
        let input = Self {
            direct,
            filtrate_10ml,
            filtrate_100ml,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn measured(direct: f64, filtrate_10ml: f64, filtrate_100ml: f64) -> Result<Self> {
        Self::new(
            Channel::Measured(direct),
            Channel::Measured(filtrate_10ml),
            Channel::Measured(filtrate_100ml),
        )
    }

    /// Builds an input from legacy values where `-1` means interference.
    pub fn from_sentinels(direct: f64, filtrate_10ml: f64, filtrate_100ml: f64) -> Result<Self> {
        Self::new(
            Channel::from_sentinel(direct),
            Channel::from_sentinel(filtrate_10ml),
            Channel::from_sentinel(filtrate_100ml),
        )
    }

    pub fn channel(&self, kind: ChannelKind) -> Channel {
        match kind {
            ChannelKind::Direct => self.direct,
            ChannelKind::Filtrate10ml => self.filtrate_10ml,
            ChannelKind::Filtrate100ml => self.filtrate_100ml,
        }
    }

    pub fn with_interference(mut self, flags: &InterferenceFlags) -> Self {
        if flags.direct {
            self.direct = Channel::Interfered;
        }
        if flags.filtrate_10ml {
            self.filtrate_10ml = Channel::Interfered;
        }
        if flags.filtrate_100ml {
            self.filtrate_100ml = Channel::Interfered;
        }
        self
    }

    pub fn has_interference(&self) -> bool {
        ChannelKind::ALL
            .iter()
            .any(|kind| self.channel(*kind).is_interfered())
    }

    pub fn has_positive_count(&self) -> bool {
        ChannelKind::ALL
            .iter()
            .any(|kind| self.channel(*kind).count().is_some_and(|value| value > 0.0))
    }

    fn validate(&self) -> Result<()> {
        for kind in ChannelKind::ALL {
            if let Channel::Measured(value) = self.channel(kind) {
                validate_count(kind.as_str(), value)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SampleType {
    A,
    B,
    C,
    D,
    E,
}

impl SampleType {
    pub const ALL: [SampleType; 5] = [
        SampleType::A,
        SampleType::B,
        SampleType::C,
        SampleType::D,
        SampleType::E,
    ];
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SampleType::A => "A",
            SampleType::B => "B",
            SampleType::C => "C",
            SampleType::D => "D",
            SampleType::E => "E",
        };
        f.write_str(label)
    }
}

impl FromStr for SampleType {
    type Err = UfcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(SampleType::A),
            "B" => Ok(SampleType::B),
            "C" => Ok(SampleType::C),
            "D" => Ok(SampleType::D),
            "E" => Ok(SampleType::E),
            _ => Err(UfcError::InvalidValueError {
                field: "type".to_string(),
                value: s.to_string(),
                reason: "Sample type must be one of A, B, C, D, E".to_string(),
            }),
        }
    }
}

/// Sample types to evaluate, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    entries: Vec<(SampleType, SampleInput)>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sample_type: SampleType, input: SampleInput) -> Result<()> {
        if self.get(sample_type).is_some() {
            return Err(UfcError::validation(format!(
                "Sample type {} is listed more than once",
                sample_type
            )));
        }
        self.entries.push((sample_type, input));
        Ok(())
    }

    pub fn get(&self, sample_type: SampleType) -> Option<&SampleInput> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == sample_type)
            .map(|(_, input)| input)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SampleType, SampleInput)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply_interference(&mut self, flags: &InterferenceFlags) {
        if !flags.any() {
            return;
        }
        for (_, input) in self.entries.iter_mut() {
            *input = input.with_interference(flags);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Concentration,
    Warning,
    Qualitative,
    Interference,
    /// No interpretation rule covers the readings.
    Unclassified,
}

/// Interpretation of one sample type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// Rounded UFC/L value, present only for [`ResultKind::Concentration`].
    pub concentration: Option<f64>,
    pub message: String,
    pub interference_detected: bool,
    pub kind: ResultKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub sample_type: SampleType,
    pub result: SampleResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub batch: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
    pub interference_detected: bool,
}

impl Report {
    pub fn get(&self, sample_type: SampleType) -> Option<&SampleResult> {
        self.entries
            .iter()
            .find(|entry| entry.sample_type == sample_type)
            .map(|entry| &entry.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_conversion() {
        assert_eq!(Channel::from_sentinel(-1.0), Channel::Interfered);
        assert_eq!(Channel::from_sentinel(0.0), Channel::Measured(0.0));
        assert_eq!(Channel::from_sentinel(42.0), Channel::Measured(42.0));
    }

    #[test]
    fn test_sample_input_rejects_invalid_counts() {
        assert!(SampleInput::measured(-2.0, 0.0, 0.0).is_err());
        assert!(SampleInput::measured(0.0, 0.0, f64::NAN).is_err());
        // -1 is only valid as the legacy sentinel
        assert!(SampleInput::measured(-1.0, 0.0, 0.0).is_err());
        assert!(SampleInput::from_sentinels(-1.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_sample_input_accepts_fractional_readings() {
        let input = SampleInput::measured(0.0, 1.5, 2.5).unwrap();
        assert_eq!(input.filtrate_10ml, Channel::Measured(1.5));
        assert!(input.has_positive_count());
    }

    #[test]
    fn test_positive_count_and_interference() {
        let zeros = SampleInput::measured(0.0, 0.0, 0.0).unwrap();
        assert!(!zeros.has_positive_count());
        assert!(!zeros.has_interference());

        let flagged = SampleInput::from_sentinels(-1.0, 0.0, 3.0).unwrap();
        assert!(flagged.has_positive_count());
        assert!(flagged.has_interference());
    }

    #[test]
    fn test_sample_set_keeps_order_and_rejects_duplicates() {
        let mut set = SampleSet::new();
        let input = SampleInput::measured(0.0, 0.0, 1.0).unwrap();
        set.insert(SampleType::C, input).unwrap();
        set.insert(SampleType::A, input).unwrap();
        assert!(set.insert(SampleType::C, input).is_err());

        let order: Vec<SampleType> = set.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(order, vec![SampleType::C, SampleType::A]);
    }

    #[test]
    fn test_apply_interference_marks_every_sample() {
        let mut set = SampleSet::new();
        set.insert(SampleType::A, SampleInput::measured(1.0, 2.0, 3.0).unwrap())
            .unwrap();
        set.insert(SampleType::B, SampleInput::measured(0.0, 0.0, 0.0).unwrap())
            .unwrap();

        set.apply_interference(&InterferenceFlags::from_kinds(&[ChannelKind::Filtrate10ml]));

        for (_, input) in set.iter() {
            assert_eq!(input.filtrate_10ml, Channel::Interfered);
            assert!(!input.direct.is_interfered());
        }
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("b".parse::<SampleType>().unwrap(), SampleType::B);
        assert!("F".parse::<SampleType>().is_err());
        assert_eq!("n1".parse::<ChannelKind>().unwrap(), ChannelKind::Filtrate10ml);
        assert_eq!("d".parse::<ChannelKind>().unwrap(), ChannelKind::Direct);
        assert!("plate".parse::<ChannelKind>().is_err());
    }
}
