pub mod engine;
pub mod interference;
pub mod interpreter;
pub mod outcome;
pub mod rounding;
pub mod rules;

pub use crate::domain::model::{
    Channel, ChannelKind, InterferenceFlags, Report, ReportEntry, ResultKind, SampleInput,
    SampleResult, SampleSet, SampleType,
};
pub use crate::domain::ports::{OutputSink, ReportRenderer, SampleSource};
pub use crate::utils::error::Result;
