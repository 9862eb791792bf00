//! Feature sources and batch extraction
//!
//! A [`FeatureSource`] turns an accession into ENA feature XML, and a
//! [`SequenceSource`] turns one into FASTA. The network client, a directory
//! of saved records and an in-memory mock all implement both, and the batch
//! helpers work with any of them.
//!
//! Batch extraction runs in parallel with rayon. Each accession is
//! independent: a failure is logged and kept in the results, and the rest
//! of the batch carries on.
//!
//! # Example
//!
//! ```
//! use ferro_overlap::source::{extract_all, MockFeatureSource};
//!
//! let mut source = MockFeatureSource::new();
//! source.add_xml("A1", r#"<ROOT><feature name="CDS" location="10..40"/></ROOT>"#);
//!
//! let results = extract_all(&source, &["A1", "MISSING"]);
//! assert_eq!(results.len(), 2);
//! assert!(results[0].1.is_ok());
//! assert!(results[1].1.is_err());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::FerroError;
use crate::feature::{parse_bytes, GenomicFeature};
use crate::overlap::OverlapReport;
use crate::sequence::{flanked_cds, read_first_fasta, FlankedSequence};

/// Something that can supply ENA feature XML by accession
pub trait FeatureSource {
    /// Raw XML for `accession`
    fn feature_xml(&self, accession: &str) -> Result<Vec<u8>, FerroError>;

    /// First CDS feature for `accession`, `None` if the record has none
    fn feature(&self, accession: &str) -> Result<Option<GenomicFeature>, FerroError> {
        parse_bytes(&self.feature_xml(accession)?)
    }
}

/// Something that can supply nucleotide FASTA by accession
pub trait SequenceSource {
    /// Raw FASTA for `accession`
    fn sequence_fasta(&self, accession: &str) -> Result<Vec<u8>, FerroError>;

    /// Sequence of the first FASTA record for `accession`
    fn sequence(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        read_first_fasta(self.sequence_fasta(accession)?.as_slice(), accession)
    }
}

/// In-memory source for tests and offline runs
#[derive(Debug, Clone, Default)]
pub struct MockFeatureSource {
    records: HashMap<String, Vec<u8>>,
    sequences: HashMap<String, Vec<u8>>,
}

impl MockFeatureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the XML returned for `accession`.
    pub fn add_xml(&mut self, accession: impl Into<String>, xml: impl Into<Vec<u8>>) {
        self.records.insert(accession.into(), xml.into());
    }

    /// Register the FASTA returned for `accession`.
    pub fn add_fasta(&mut self, accession: impl Into<String>, fasta: impl Into<Vec<u8>>) {
        self.sequences.insert(accession.into(), fasta.into());
    }

    /// Number of registered XML records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FeatureSource for MockFeatureSource {
    fn feature_xml(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        self.records
            .get(accession)
            .cloned()
            .ok_or_else(|| FerroError::Io {
                msg: format!("No record for accession {}", accession),
            })
    }
}

impl SequenceSource for MockFeatureSource {
    fn sequence_fasta(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        self.sequences
            .get(accession)
            .cloned()
            .ok_or_else(|| FerroError::Io {
                msg: format!("No sequence for accession {}", accession),
            })
    }
}

/// Reads `{dir}/{accession}.xml` and `{dir}/{accession}.fasta`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn record_path(&self, accession: &str) -> PathBuf {
        self.dir.join(format!("{}.xml", safe_name(accession)))
    }

    pub fn sequence_path(&self, accession: &str) -> PathBuf {
        self.dir.join(format!("{}.fasta", safe_name(accession)))
    }
}

fn safe_name(accession: &str) -> String {
    accession.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}

impl FeatureSource for DirectorySource {
    fn feature_xml(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        read_path(&self.record_path(accession))
    }
}

impl SequenceSource for DirectorySource {
    fn sequence_fasta(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        read_path(&self.sequence_path(accession))
    }
}

fn read_path(path: &Path) -> Result<Vec<u8>, FerroError> {
    fs::read(path).map_err(|e| FerroError::Io {
        msg: format!("Failed to read {}: {}", path.display(), e),
    })
}

/// Extract the first CDS feature for every accession in parallel.
///
/// Results keep the input order. Failures are logged and returned, never
/// propagated.
pub fn extract_all<S, A>(
    source: &S,
    accessions: &[A],
) -> Vec<(String, Result<Option<GenomicFeature>, FerroError>)>
where
    S: FeatureSource + Sync,
    A: AsRef<str> + Sync,
{
    accessions
        .par_iter()
        .map(|accession| {
            let accession = accession.as_ref();
            let result = source.feature(accession);
            if let Err(e) = &result {
                warn!(accession, error = %e, "feature extraction failed");
            }
            (accession.to_string(), result)
        })
        .collect()
}

/// Compare each `(left, right)` accession pair.
///
/// A side that fails to extract is treated as absent, giving an overlap of 0.
pub fn pairwise_overlaps<S, A>(source: &S, pairs: &[(A, A)]) -> Vec<OverlapReport>
where
    S: FeatureSource + Sync,
    A: AsRef<str> + Sync,
{
    pairs
        .par_iter()
        .map(|(left, right)| {
            let (left, right) = (left.as_ref(), right.as_ref());
            OverlapReport::new(
                left,
                feature_or_absent(source, left),
                right,
                feature_or_absent(source, right),
            )
        })
        .collect()
}

/// Cut the flanked CDS for every `(embl_id, protein_id)` cross-reference.
///
/// The CDS location comes from the feature record of the protein id, and
/// the bases from the sequence record of the EMBL id. `Ok(None)` means the
/// protein record has no CDS or the CDS falls outside the sequence. Results
/// keep the map's order.
pub fn flanked_sequences<S>(
    source: &S,
    cross_refs: &BTreeMap<String, String>,
    extension: u64,
) -> Vec<(String, Result<Option<FlankedSequence>, FerroError>)>
where
    S: FeatureSource + SequenceSource + Sync,
{
    let pairs: Vec<(&String, &String)> = cross_refs.iter().collect();
    pairs
        .par_iter()
        .map(|(embl_id, protein_id)| {
            let result = flanked_sequence(source, embl_id, protein_id, extension);
            if let Err(e) = &result {
                warn!(
                    embl_id = %embl_id,
                    protein_id = %protein_id,
                    error = %e,
                    "sequence extraction failed"
                );
            }
            (embl_id.to_string(), result)
        })
        .collect()
}

fn flanked_sequence<S>(
    source: &S,
    embl_id: &str,
    protein_id: &str,
    extension: u64,
) -> Result<Option<FlankedSequence>, FerroError>
where
    S: FeatureSource + SequenceSource,
{
    let Some(feature) = source.feature(protein_id)? else {
        debug!(protein_id, "no CDS feature for protein id");
        return Ok(None);
    };
    let sequence = source.sequence(embl_id)?;
    Ok(flanked_cds(&sequence, &feature, extension).map(|seq| FlankedSequence {
        id: embl_id.to_string(),
        seq,
    }))
}

fn feature_or_absent<S: FeatureSource>(source: &S, accession: &str) -> Option<GenomicFeature> {
    source.feature(accession).unwrap_or_else(|e| {
        warn!(accession, error = %e, "treating feature as absent");
        None
    })
}
