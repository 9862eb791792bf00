//! UniProt entry and search-table parsing
//!
//! A UniProt entry links a protein to the nucleotide records that encode it
//! through EMBL cross-references:
//!
//! ```xml
//! <dbReference type="EMBL" id="U41765">
//!   <property type="protein sequence ID" value="AAC50125.1"/>
//!   <property type="molecule type" value="Genomic_DNA"/>
//! </dbReference>
//! ```
//!
//! The protein sequence ids of `Genomic_DNA` references are the ENA
//! accessions whose CDS coordinates feed the overlap evaluator.

mod table;

pub use table::UniprotTable;

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use quick_xml::events::Event;
use serde::{Deserialize, Serialize};

use crate::error::FerroError;
use crate::xml::{attr, fold_events, local_name};

const GENOMIC_DNA: &str = "Genomic_DNA";

/// One `<dbReference type="EMBL">` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmblCrossRef {
    pub embl_id: String,
    pub protein_id: Option<String>,
    pub molecule_type: Option<String>,
}

impl EmblCrossRef {
    pub fn is_genomic_dna(&self) -> bool {
        self.molecule_type.as_deref() == Some(GENOMIC_DNA)
    }
}

/// EMBL cross-references of a UniProt entry, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniprotEntry {
    pub cross_refs: Vec<EmblCrossRef>,
}

impl UniprotEntry {
    /// Protein sequence ids of the genomic DNA cross-references
    pub fn genomic_dna_ids(&self) -> BTreeSet<String> {
        self.genomic_refs()
            .filter_map(|r| r.protein_id.clone())
            .collect()
    }

    /// EMBL id to protein sequence id for the genomic DNA cross-references
    pub fn embl_ids(&self) -> BTreeMap<String, String> {
        self.genomic_refs()
            .filter_map(|r| r.protein_id.clone().map(|p| (r.embl_id.clone(), p)))
            .collect()
    }

    fn genomic_refs(&self) -> impl Iterator<Item = &EmblCrossRef> {
        self.cross_refs.iter().filter(|r| r.is_genomic_dna())
    }
}

/// Fold state: finished references plus the one currently open, if any
#[derive(Default)]
struct EntryScan {
    done: Vec<EmblCrossRef>,
    open: Option<EmblCrossRef>,
}

impl EntryScan {
    fn step(self, event: &Event<'_>, pos: u64) -> Result<Self, FerroError> {
        let EntryScan { mut done, open } = self;
        let open = match (open, event) {
            (None, Event::Start(tag)) if local_name(tag) == b"dbReference" => {
                match (attr(tag, "type", pos)?.as_deref(), attr(tag, "id", pos)?) {
                    (Some("EMBL"), Some(embl_id)) => Some(EmblCrossRef {
                        embl_id,
                        ..Default::default()
                    }),
                    _ => None,
                }
            }
            (Some(current), Event::Start(tag) | Event::Empty(tag))
                if local_name(tag) == b"property" =>
            {
                let value = attr(tag, "value", pos)?;
                match attr(tag, "type", pos)?.as_deref() {
                    Some("protein sequence ID") => Some(EmblCrossRef {
                        protein_id: value,
                        ..current
                    }),
                    Some("molecule type") => Some(EmblCrossRef {
                        molecule_type: value,
                        ..current
                    }),
                    _ => Some(current),
                }
            }
            (Some(current), Event::End(tag)) if tag.local_name().as_ref() == b"dbReference" => {
                done.push(current);
                None
            }
            (open, _) => open,
        };
        Ok(EntryScan { done, open })
    }
}

/// Read the EMBL cross-references from a UniProt entry XML document.
pub fn parse_entry_reader<R: BufRead>(reader: R) -> Result<UniprotEntry, FerroError> {
    let scan = fold_events(reader, EntryScan::default(), EntryScan::step)?;
    Ok(UniprotEntry {
        cross_refs: scan.done,
    })
}

/// Read the EMBL cross-references from UniProt entry XML bytes.
pub fn parse_entry(xml: &[u8]) -> Result<UniprotEntry, FerroError> {
    parse_entry_reader(xml)
}
