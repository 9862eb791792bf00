//! Output formatting utilities for CLI operations

use std::io::{self, Write};
use std::str::FromStr;

use serde_json::json;

use crate::error::FerroError;
use crate::feature::GenomicFeature;
use crate::overlap::OverlapReport;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_overlap::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

/// Write an extracted feature (or its absence) for one input
///
/// Text output is the `(start, end, is_complement)` tuple, or `None`.
///
/// # Examples
///
/// ```
/// use ferro_overlap::cli::{output_feature, OutputFormat};
/// use ferro_overlap::feature::GenomicFeature;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let feature = GenomicFeature::new(265624, 265833, true);
/// output_feature(&mut buffer, "AAC21905", Some(&feature), OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert_eq!(result, "AAC21905\t(265624, 265833, True)\n");
/// ```
pub fn output_feature<W: Write>(
    writer: &mut W,
    input: &str,
    feature: Option<&GenomicFeature>,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({ "input": input, "feature": feature, "status": "ok" });
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => match feature {
            Some(feature) => writeln!(writer, "{}\t{}", input, feature),
            None => writeln!(writer, "{}\tNone", input),
        },
    }
}

/// Write an overlap report
pub fn output_overlap<W: Write>(
    writer: &mut W,
    report: &OverlapReport,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::to_string(report).map_err(io::Error::other)?;
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => writeln!(
            writer,
            "{}\t{}\t{}",
            report.left.id, report.right.id, report.overlap
        ),
    }
}

/// Write a list of identifiers, one per line in text mode
pub fn output_ids<W: Write, I: AsRef<str>>(
    writer: &mut W,
    input: &str,
    ids: &[I],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
            writeln!(writer, "{}", json!({ "input": input, "ids": ids }))
        }
        OutputFormat::Text => {
            for id in ids {
                writeln!(writer, "{}\t{}", input, id.as_ref())?;
            }
            Ok(())
        }
    }
}

/// Write an error to the output
///
/// # Examples
///
/// ```
/// use ferro_overlap::cli::{output_error, OutputFormat};
/// use ferro_overlap::FerroError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = FerroError::PatternMismatch { location: "order(x)".to_string() };
/// output_error(&mut buffer, "bad.xml", &error, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.starts_with("ERROR: bad.xml"));
/// ```
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &FerroError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "input": input,
                "error": error.to_string(),
                "code": error.code().as_str(),
                "status": "error",
            });
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => writeln!(writer, "ERROR: {}: {}", input, error.detailed_message()),
    }
}
