use crate::core::outcome::INTERFERENCE_NOTICE;
use crate::core::{Report, ReportRenderer};
use crate::utils::error::{Result, UfcError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn renderer(&self) -> Box<dyn ReportRenderer> {
        match self {
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
            OutputFormat::Csv => Box::new(CsvRenderer),
        }
    }
}

/// One line per reported type, then the interference notice if needed.
pub struct TextRenderer;

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        if let Some(batch) = &report.batch {
            output.push_str(&format!("Batch: {}\n", batch));
        }

        for entry in &report.entries {
            output.push_str(&format!("Type {}: {}\n", entry.sample_type, entry.result.message));
        }

        if report.interference_detected {
            output.push_str(INTERFERENCE_NOTICE);
            output.push('\n');
        }

        Ok(output)
    }
}

pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[derive(Serialize)]
struct CsvLine<'a> {
    #[serde(rename = "type")]
    sample_type: String,
    concentration: Option<f64>,
    message: &'a str,
    interference: bool,
}

pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for entry in &report.entries {
            writer.serialize(CsvLine {
                sample_type: entry.sample_type.to_string(),
                concentration: entry.result.concentration,
                message: &entry.result.message,
                interference: entry.result.interference_detected,
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| UfcError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| UfcError::validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interpreter::evaluate;
    use crate::core::{SampleInput, SampleSet, SampleType};

    fn sample_report() -> Report {
        let mut set = SampleSet::new();
        set.insert(SampleType::A, SampleInput::from_sentinels(0.0, 0.0, 50.0).unwrap())
            .unwrap();
        set.insert(SampleType::B, SampleInput::from_sentinels(-1.0, -1.0, -1.0).unwrap())
            .unwrap();
        evaluate(&set, None).unwrap()
    }

    #[test]
    fn test_text_renderer() {
        let text = TextRenderer.render(&sample_report()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Type A: Concentration : 500 UFC/L");
        assert!(lines[1].starts_with("Type B: Presence of interfering flora"));
        assert_eq!(lines[2], INTERFERENCE_NOTICE);
    }

    #[test]
    fn test_text_renderer_without_interference_has_no_notice() {
        let mut set = SampleSet::new();
        set.insert(SampleType::E, SampleInput::from_sentinels(200.0, 0.0, 0.0).unwrap())
            .unwrap();
        let report = evaluate(&set, Some("Tower 1")).unwrap();

        let text = TextRenderer.render(&report).unwrap();
        assert_eq!(text, "Batch: Tower 1\nType E: >750 000 UFC/L\n");
    }

    #[test]
    fn test_csv_renderer() {
        let csv = CsvRenderer.render(&sample_report()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("type,concentration,message,interference"));
        assert_eq!(lines.next(), Some("A,500.0,Concentration : 500 UFC/L,false"));
        assert!(lines.next().unwrap().starts_with("B,,"));
    }

    #[test]
    fn test_json_renderer() {
        let json = JsonRenderer.render(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["interference_detected"], serde_json::json!(true));
        assert_eq!(value["entries"][0]["sample_type"], serde_json::json!("A"));
        assert_eq!(
            value["entries"][0]["result"]["concentration"],
            serde_json::json!(500.0)
        );
        assert_eq!(value["entries"][1]["result"]["kind"], serde_json::json!("interference"));
    }
}
