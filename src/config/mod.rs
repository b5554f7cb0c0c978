pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::adapters::render::OutputFormat;
    use crate::core::{ChannelKind, InterferenceFlags};
    use crate::utils::error::{Result, UfcError};
    use crate::utils::validation::{validate_path, Validate};
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "ufc-calc")]
    #[command(about = "Interprets Legionella plate counts into UFC/L concentrations")]
    pub struct CliConfig {
        /// Batch file to interpret (.toml or .csv)
        #[arg(short, long)]
        pub input: Option<PathBuf>,

        /// Inline sample as TYPE=direct,10ml,100ml (use x for an interfered channel)
        #[arg(short, long = "sample")]
        pub samples: Vec<String>,

        /// Channels lost to interfering flora for every sample
        #[arg(long, value_delimiter = ',')]
        pub interfered: Vec<ChannelKind>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        pub format: OutputFormat,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        pub output: Option<PathBuf>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl CliConfig {
        pub fn interference_flags(&self) -> InterferenceFlags {
            InterferenceFlags::from_kinds(&self.interfered)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            match (&self.input, self.samples.is_empty()) {
                (None, true) => {
                    return Err(UfcError::config(
                        "Provide a batch file with --input or samples with --sample",
                    ))
                }
                (Some(_), false) => {
                    return Err(UfcError::config(
                        "--input and --sample cannot be used together",
                    ))
                }
                _ => {}
            }

            if let Some(input) = &self.input {
                validate_path("input", &input.to_string_lossy())?;
            }
            if let Some(output) = &self.output {
                validate_path("output", &output.to_string_lossy())?;
            }
            Ok(())
        }
    }

}
