//! Error types for ferro-overlap
//!
//! Errors fall into three groups:
//! - Parse errors: the XML is malformed or a CDS location uses an unknown grammar
//! - Lookup errors: a required feature is absent or a remote lookup failed
//! - IO errors: file, JSON and configuration failures
//!
//! A document without any CDS feature is *not* an error at extraction time;
//! extractors return `Ok(None)` and the overlap evaluator treats that as
//! "no data". [`FerroError::FeatureNotFound`] exists for callers that need a
//! feature to proceed (see [`require_feature`]).

use std::fmt;
use thiserror::Error;

use crate::feature::GenomicFeature;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Parse errors (E1xxx)
    /// Input is not well-formed XML
    MalformedXml = 1001,
    /// CDS location matches none of the supported grammars
    PatternMismatch = 1002,
    /// Coordinate value is not a valid integer
    InvalidCoordinates = 1003,

    // Lookup errors (E2xxx)
    /// No CDS feature in the document
    FeatureNotFound = 2001,
    /// Remote database answered with a non-success status
    HttpStatus = 2002,
    /// No nucleotide sequence in a FASTA response
    SequenceNotFound = 2003,

    // IO errors (E9xxx)
    /// File or transport IO error
    IoError = 9001,
    /// JSON serialization error
    JsonError = 9002,
    /// Configuration file error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::MalformedXml => "malformed XML input",
            ErrorCode::PatternMismatch => "unsupported CDS location format",
            ErrorCode::InvalidCoordinates => "invalid coordinate value",
            ErrorCode::FeatureNotFound => "no CDS feature found",
            ErrorCode::HttpStatus => "remote lookup failed",
            ErrorCode::SequenceNotFound => "no sequence found",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON error",
            ErrorCode::ConfigError => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-overlap operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FerroError {
    /// Input is not well-formed XML
    #[error("Malformed XML at byte {pos}: {msg}")]
    MalformedXml { pos: u64, msg: String },

    /// A CDS location string matched none of the supported grammars
    #[error("Unsupported CDS location: '{location}'")]
    PatternMismatch { location: String },

    /// A coordinate could not be read as an integer
    #[error("Invalid coordinates: {msg}")]
    InvalidCoordinates { msg: String },

    /// No CDS feature was present where one was required
    #[error("No CDS feature found in {origin}")]
    FeatureNotFound { origin: String },

    /// FASTA input held no sequence record
    #[error("No sequence found in {origin}")]
    SequenceNotFound { origin: String },

    /// Remote database returned a non-success status
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    /// IO error (file access or transport)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON serialization error
    #[error("JSON error: {msg}")]
    Json { msg: String },

    /// Configuration error
    #[error("Config error: {msg}")]
    Config { msg: String },
}

impl FerroError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            FerroError::MalformedXml { .. } => ErrorCode::MalformedXml,
            FerroError::PatternMismatch { .. } => ErrorCode::PatternMismatch,
            FerroError::InvalidCoordinates { .. } => ErrorCode::InvalidCoordinates,
            FerroError::FeatureNotFound { .. } => ErrorCode::FeatureNotFound,
            FerroError::SequenceNotFound { .. } => ErrorCode::SequenceNotFound,
            FerroError::Http { .. } => ErrorCode::HttpStatus,
            FerroError::Io { .. } => ErrorCode::IoError,
            FerroError::Json { .. } => ErrorCode::JsonError,
            FerroError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Whether this error came from the shape of the input document
    /// rather than from the environment.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            FerroError::MalformedXml { .. }
                | FerroError::PatternMismatch { .. }
                | FerroError::InvalidCoordinates { .. }
        )
    }

    /// Message prefixed with the error code, e.g. `[E1001] Malformed XML ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

/// Turn an absent feature into [`FerroError::FeatureNotFound`].
///
/// `source` names the file or accession the feature was read from.
pub fn require_feature(
    feature: Option<GenomicFeature>,
    source: &str,
) -> Result<GenomicFeature, FerroError> {
    feature.ok_or_else(|| FerroError::FeatureNotFound {
        origin: source.to_string(),
    })
}

impl From<std::io::Error> for FerroError {
    fn from(err: std::io::Error) -> Self {
        FerroError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FerroError {
    fn from(err: serde_json::Error) -> Self {
        FerroError::Json {
            msg: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for FerroError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => FerroError::Io { msg: e.to_string() },
            other => FerroError::MalformedXml {
                pos: 0,
                msg: other.to_string(),
            },
        }
    }
}
