pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::render::OutputFormat;
pub use crate::config::{cli::LocalOutput, toml_config::TomlBatch};
pub use crate::core::interpreter::{evaluate, interpret};
pub use crate::core::rounding::round_significant;
pub use crate::core::{
    engine::UfcEngine, Channel, ChannelKind, InterferenceFlags, Report, SampleInput,
    SampleResult, SampleSet, SampleType,
};
pub use crate::utils::error::{Result, UfcError};
