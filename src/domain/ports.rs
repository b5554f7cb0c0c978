use crate::domain::model::{Report, SampleSet};
use crate::utils::error::Result;

/// Supplies the readings to interpret.
pub trait SampleSource {
    fn load(&self) -> Result<SampleSet>;

    /// Batch label shown in reports.
    fn batch_name(&self) -> Option<&str> {
        None
    }
}

/// Turns a report into its textual representation.
pub trait ReportRenderer {
    fn render(&self, report: &Report) -> Result<String>;
}

/// Destination of a rendered report.
pub trait OutputSink {
    fn write(&self, rendered: &str) -> Result<String>;
}

impl<T: SampleSource + ?Sized> SampleSource for Box<T> {
    fn load(&self) -> Result<SampleSet> {
        (**self).load()
    }

    fn batch_name(&self) -> Option<&str> {
        (**self).batch_name()
    }
}

impl<T: ReportRenderer + ?Sized> ReportRenderer for Box<T> {
    fn render(&self, report: &Report) -> Result<String> {
        (**self).render(report)
    }
}
