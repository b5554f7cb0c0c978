use clap::Parser;
use std::path::Path;
use ufc_calc::adapters::{csv_source::CsvSampleSource, inline::InlineSamples};
use ufc_calc::core::SampleSource;
use ufc_calc::utils::error::ErrorSeverity;
use ufc_calc::utils::{logger, validation::Validate};
use ufc_calc::{CliConfig, LocalOutput, Result, TomlBatch, UfcEngine, UfcError};

fn build_source(config: &CliConfig) -> Result<Box<dyn SampleSource>> {
    let flags = config.interference_flags();

    let Some(input) = &config.input else {
        return Ok(Box::new(InlineSamples::new(config.samples.clone(), flags)));
    };

    let extension = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("toml") => Ok(Box::new(TomlBatch::from_file(input)?.with_interference(&flags))),
        Some("csv") => Ok(Box::new(CsvSampleSource::new(input.clone(), flags))),
        _ => Err(UfcError::config(format!(
            "Unsupported batch file '{}': expected a .toml or .csv file",
            display(input)
        ))),
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn exit_code(error: &UfcError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(error: UfcError) -> ! {
    tracing::error!(
        "❌ Interpretation failed: {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());

    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(exit_code(&error));
}

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    let source = build_source(&config).unwrap_or_else(|e| fail(e));
    let engine = UfcEngine::new(
        source,
        config.format.renderer(),
        LocalOutput::new(config.output.clone()),
    );

    match engine.run() {
        Ok(destination) => {
            if config.output.is_some() {
                tracing::info!("📁 Report saved to: {}", destination);
            }
        }
        Err(e) => fail(e),
    }
}
