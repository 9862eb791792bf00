// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-overlap: CDS coordinates and opposite-strand gene overlap
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Extracts the coordinates and strand of the first coding sequence in an
//! ENA XML record, and reports how many positions two such coding sequences
//! share when they sit on opposite strands of the same sequence.
//!
//! # Example
//!
//! ```
//! use ferro_overlap::{overlap_len, parse_str};
//!
//! let arfa = parse_str(r#"<ROOT><feature name="CDS" location="100..200"/></ROOT>"#)
//!     .unwrap();
//! let mscl = parse_str(r#"<ROOT><feature name="CDS" location="complement(X:150..250)"/></ROOT>"#)
//!     .unwrap();
//!
//! assert_eq!(overlap_len(arfa.as_ref(), mscl.as_ref()), 50);
//! ```

#[cfg(feature = "remote")]
pub mod client;
pub mod cli;
pub mod config;
pub mod coords;
pub mod error;
pub mod feature;
pub mod overlap;
pub mod sequence;
pub mod source;
pub mod uniprot;
mod xml;

// Re-export commonly used types
pub use error::{require_feature, ErrorCode, FerroError};
pub use feature::{parse_bytes, parse_file, parse_reader, parse_str, GenomicFeature, Strand};
pub use overlap::{overlap_len, overlaps, OverlapReport};
pub use source::{extract_all, FeatureSource, MockFeatureSource, SequenceSource};

/// Result type alias for ferro-overlap operations
pub type Result<T> = std::result::Result<T, FerroError>;
