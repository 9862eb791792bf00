//! Coding sequences with flanking context
//!
//! A CDS is cut from its parent nucleotide sequence together with
//! `extension` bases downstream of it. On the reverse strand the flank is
//! taken before `start` and the cut is reverse complemented, so every
//! result reads 5' to 3' in the coding direction.
//!
//! Feature coordinates are 1-based and inclusive (`265624..265833`); the
//! cut covers 0-based `[start - 1, end)` plus the flank, clamped to the
//! sequence.
//!
//! # Examples
//!
//! ```
//! use ferro_overlap::feature::GenomicFeature;
//! use ferro_overlap::sequence::flanked_cds;
//!
//! let parent = b"AACCGGTTAA";
//! let forward = GenomicFeature::new(3, 6, false);
//! assert_eq!(flanked_cds(parent, &forward, 2).unwrap(), b"CCGGTT");
//!
//! let reverse = GenomicFeature::new(3, 6, true);
//! assert_eq!(flanked_cds(parent, &reverse, 2).unwrap(), b"CCGGTT");
//! ```

use std::io::{Read, Write};

use bio::alphabets::dna::revcomp;
use bio::io::fasta;
use serde::{Deserialize, Serialize};

use crate::error::FerroError;
use crate::feature::GenomicFeature;

/// A flanked CDS ready to be written as FASTA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlankedSequence {
    /// Accession of the parent nucleotide record
    pub id: String,
    pub seq: Vec<u8>,
}

/// Cut `feature` plus `extension` downstream bases out of `sequence`.
///
/// Returns `None` when the feature lies entirely outside the sequence.
pub fn flanked_cds(
    sequence: &[u8],
    feature: &GenomicFeature,
    extension: u64,
) -> Option<Vec<u8>> {
    let len = sequence.len() as u64;
    let start = feature.start().saturating_sub(1);

    let (lo, hi) = if feature.is_complement() {
        (start.saturating_sub(extension), feature.end())
    } else {
        (start, feature.end().saturating_add(extension))
    };
    let (lo, hi) = (lo.min(len) as usize, hi.min(len) as usize);
    if lo >= hi {
        return None;
    }

    let cut = &sequence[lo..hi];
    Some(if feature.is_complement() {
        revcomp(cut)
    } else {
        cut.to_vec()
    })
}

/// Sequence of the first record in FASTA input.
///
/// `origin` names the input in the error raised when it holds no record.
pub fn read_first_fasta<R: Read>(reader: R, origin: &str) -> Result<Vec<u8>, FerroError> {
    match fasta::Reader::new(reader).records().next() {
        Some(record) => Ok(record?.seq().to_vec()),
        None => Err(FerroError::SequenceNotFound {
            origin: origin.to_string(),
        }),
    }
}

/// Write sequences as FASTA, one `>id` header per record.
pub fn write_fasta<W: Write>(writer: W, records: &[FlankedSequence]) -> Result<(), FerroError> {
    let mut writer = fasta::Writer::new(writer);
    for record in records {
        writer.write(&record.id, None, &record.seq)?;
    }
    writer.flush()?;
    Ok(())
}
