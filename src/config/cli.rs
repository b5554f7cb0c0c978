use crate::core::OutputSink;
use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Writes the rendered report to a file, or to stdout when no path is set.
#[derive(Debug, Clone)]
pub struct LocalOutput {
    path: Option<PathBuf>,
}

impl LocalOutput {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl OutputSink for LocalOutput {
    fn write(&self, rendered: &str) -> Result<String> {
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                fs::write(path, rendered)?;
                Ok(path.display().to_string())
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
                Ok("stdout".to_string())
            }
        }
    }
}
