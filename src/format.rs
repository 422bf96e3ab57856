//! Formatting utilities for the payments CLI client.
//!
//! Resources are rendered as JSON, or as CSV built from their flattened
//! dot paths.

use serde_json::Value;
use std::str::FromStr;

use crate::request_tree::{flatten, FlatFieldMap};

pub const JSON: &str = "json";
pub const CSV: &str = "csv";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),
    /// Error specific to CSV operations
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Error when converting bytes to UTF-8 string
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("CSV writer into inner error: {0}")]
    CsvIntoInnerError(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
}

#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
pub struct OutputFormatOptions {
    pub with_headers: bool,
    pub pretty: bool,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum OutputFormat {
    /// CSV (Comma-Separated Values) format
    Csv(OutputFormatOptions),
    /// JSON (JavaScript Object Notation) format
    Json(OutputFormatOptions),
}

impl OutputFormat {
    /// Returns a vector of all supported format names as strings
    pub fn names() -> Vec<&'static str> {
        vec![JSON, CSV]
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        match format_str.to_lowercase().as_str() {
            JSON => Ok(OutputFormat::Json(options)),
            CSV => Ok(OutputFormat::Csv(options)),
            other => Err(FormattingError::UnsupportedOutputFormat(other.to_string())),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json(OutputFormatOptions::default())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Csv(_) => write!(f, "{}", CSV),
            OutputFormat::Json(_) => write!(f, "{}", JSON),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

pub trait Formattable {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError>;
}

impl Formattable for Value {
    /// A list response (`{"items": [...]}`) renders one CSV row per item;
    /// anything else renders as `PATH,VALUE` rows.
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Csv(options) => match self.get("items").and_then(Value::as_array) {
                Some(items) => items_to_csv(items, options.with_headers),
                None => value_to_csv(self, options.with_headers),
            },
        }
    }
}

fn flatten_value(value: &Value) -> FlatFieldMap {
    match value {
        Value::Object(map) => flatten(map),
        Value::Null => FlatFieldMap::new(),
        Value::String(s) => std::iter::once(("value", s.as_str())).collect(),
        other => std::iter::once(("value".to_string(), other.to_string())).collect(),
    }
}

fn value_to_csv(value: &Value, with_headers: bool) -> Result<String, FormattingError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if with_headers {
        wtr.write_record(["PATH", "VALUE"])?;
    }
    for (path, value) in flatten_value(value).iter() {
        wtr.write_record([path, value])?;
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn items_to_csv(items: &[Value], with_headers: bool) -> Result<String, FormattingError> {
    let rows: Vec<FlatFieldMap> = items.iter().map(flatten_value).collect();

    let mut columns: Vec<&str> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
    }

    let mut wtr = csv::Writer::from_writer(vec![]);
    if with_headers {
        wtr.write_record(columns.iter().map(|c| c.to_uppercase()))?;
    }
    for row in &rows {
        wtr.write_record(columns.iter().map(|c| row.get(c).unwrap_or("")))?;
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn csv_with_headers() -> OutputFormat {
        OutputFormat::Csv(OutputFormatOptions {
            with_headers: true,
            pretty: false,
        })
    }

    #[test]
    fn test_format_names() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap().to_string(), "json");
        assert!("tree".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_single_resource_csv() {
        let value = json!({"id": "b-1", "beneficiary": {"entity_type": "COMPANY"}});
        let output = value.format(&csv_with_headers()).unwrap();
        assert_eq!(output, "PATH,VALUE\nid,b-1\nbeneficiary.entity_type,COMPANY\n");
    }

    #[test]
    fn test_list_csv_unions_columns() {
        let value = json!({"items": [
            {"id": "b-1", "nickname": "a"},
            {"id": "b-2", "beneficiary": {"entity_type": "PERSONAL"}}
        ]});
        let output = value.format(&csv_with_headers()).unwrap();
        assert_eq!(
            output,
            "ID,NICKNAME,BENEFICIARY.ENTITY_TYPE\nb-1,a,\nb-2,,PERSONAL\n"
        );
    }

    #[test]
    fn test_json_output() {
        let value = json!({"id": "t-1"});
        assert_eq!(value.format(&OutputFormat::default()).unwrap(), r#"{"id":"t-1"}"#);
    }
}
