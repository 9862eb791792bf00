//! ENA browser client

use super::{trim_base, ClientConfig, HttpClient};
use crate::error::FerroError;
use crate::feature::{parse_bytes, GenomicFeature};
use crate::source::{FeatureSource, SequenceSource};

/// Fetches ENA records as XML
#[derive(Debug, Clone)]
pub struct EnaClient {
    http: HttpClient,
    base_url: String,
}

impl EnaClient {
    pub fn new(config: &ClientConfig) -> Result<Self, FerroError> {
        Ok(Self {
            http: HttpClient::new(config)?,
            base_url: trim_base(&config.ena_base_url),
        })
    }

    /// URL of the XML view of an ENA record
    ///
    /// The accession is placed verbatim in the path; ENA's view endpoint
    /// takes the display options after an `&` rather than a `?`.
    pub fn feature_url(&self, accession: &str) -> String {
        format!(
            "{}/data/view/{}&display=xml&download=xml",
            self.base_url, accession
        )
    }

    /// URL of the FASTA view of an ENA record
    pub fn sequence_url(&self, accession: &str) -> String {
        format!("{}/data/view/{}&display=fasta", self.base_url, accession)
    }

    /// Fetch the raw FASTA for an ENA nucleotide record.
    pub fn fetch_sequence_fasta(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        self.http.get_bytes(&self.sequence_url(accession))
    }

    /// Fetch the raw XML for an ENA record.
    pub fn fetch_feature_xml(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        self.http.get_bytes(&self.feature_url(accession))
    }

    /// Fetch an ENA record and extract its first CDS feature.
    pub fn get_start_end_comp(&self, accession: &str) -> Result<Option<GenomicFeature>, FerroError> {
        parse_bytes(&self.fetch_feature_xml(accession)?)
    }
}

impl FeatureSource for EnaClient {
    fn feature_xml(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        self.fetch_feature_xml(accession)
    }
}

impl SequenceSource for EnaClient {
    fn sequence_fasta(&self, accession: &str) -> Result<Vec<u8>, FerroError> {
        self.fetch_sequence_fasta(accession)
    }
}
