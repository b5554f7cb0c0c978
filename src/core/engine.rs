use crate::core::interpreter::evaluate;
use crate::core::{OutputSink, Report, ReportRenderer, SampleSource};
use crate::utils::error::Result;

pub struct UfcEngine<S: SampleSource, R: ReportRenderer, O: OutputSink> {
    source: S,
    renderer: R,
    sink: O,
}

impl<S: SampleSource, R: ReportRenderer, O: OutputSink> UfcEngine<S, R, O> {
    pub fn new(source: S, renderer: R, sink: O) -> Self {
        Self {
            source,
            renderer,
            sink,
        }
    }

    /// Loads and interprets the samples without rendering them.
    pub fn report(&self) -> Result<Report> {
        tracing::debug!("Loading samples...");
        let samples = self.source.load()?;
        tracing::debug!("Loaded {} sample type(s)", samples.len());

        evaluate(&samples, self.source.batch_name())
    }

    pub fn run(&self) -> Result<String> {
        let report = self.report()?;

        tracing::debug!("Rendering report...");
        let rendered = self.renderer.render(&report)?;

        let destination = self.sink.write(&rendered)?;
        tracing::debug!("Report written to {}", destination);

        Ok(destination)
    }
}
