//! UniProt REST client

use std::collections::{BTreeMap, BTreeSet};

use super::{trim_base, ClientConfig, HttpClient};
use crate::error::FerroError;
use crate::uniprot::{parse_entry, UniprotEntry, UniprotTable};

/// Fetches UniProt entries and tab-separated search results
#[derive(Debug, Clone)]
pub struct UniprotClient {
    http: HttpClient,
    base_url: String,
}

impl UniprotClient {
    pub fn new(config: &ClientConfig) -> Result<Self, FerroError> {
        Ok(Self {
            http: HttpClient::new(config)?,
            base_url: trim_base(&config.uniprot_base_url),
        })
    }

    /// URL of a UniProt entry in XML
    pub fn entry_url(&self, uniprot_id: &str) -> String {
        format!(
            "{}/uniprot/{}.xml",
            self.base_url,
            urlencoding::encode(uniprot_id)
        )
    }

    /// URL of a tab-separated search, e.g. query `database:(type:pfam id:PF01741)`
    pub fn table_url(&self, query: &str, columns: &[&str]) -> String {
        format!(
            "{}/uniprot/?query={}&format=tab&columns={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&columns.join(","))
        )
    }

    pub fn fetch_uniprot_entry_xml(&self, uniprot_id: &str) -> Result<Vec<u8>, FerroError> {
        self.http.get_bytes(&self.entry_url(uniprot_id))
    }

    pub fn fetch_uniprot_table(
        &self,
        query: &str,
        columns: &[&str],
    ) -> Result<UniprotTable, FerroError> {
        let body = self.http.get_bytes(&self.table_url(query, columns))?;
        Ok(UniprotTable::parse(&String::from_utf8_lossy(&body)))
    }

    /// Fetch an entry and read its EMBL cross-references.
    pub fn get_entry(&self, uniprot_id: &str) -> Result<UniprotEntry, FerroError> {
        parse_entry(&self.fetch_uniprot_entry_xml(uniprot_id)?)
    }

    /// Genomic DNA protein sequence ids for an entry
    pub fn get_gen_dna_ids(&self, uniprot_id: &str) -> Result<BTreeSet<String>, FerroError> {
        Ok(self.get_entry(uniprot_id)?.genomic_dna_ids())
    }

    /// EMBL id to protein sequence id for an entry's genomic DNA references
    pub fn get_embl_ids(&self, uniprot_id: &str) -> Result<BTreeMap<String, String>, FerroError> {
        Ok(self.get_entry(uniprot_id)?.embl_ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UniprotClient {
        UniprotClient::new(&ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_entry_url() {
        assert_eq!(
            client().entry_url("P43699"),
            "https://www.uniprot.org/uniprot/P43699.xml"
        );
    }

    #[test]
    fn test_table_url_encodes_query() {
        let url = client().table_url(
            "database:(type:pfam id:PF01741)",
            &["id", "entry name", "organism", "organism-id"],
        );
        assert_eq!(
            url,
            "https://www.uniprot.org/uniprot/?query=database%3A%28type%3Apfam%20id%3APF01741%29\
             &format=tab&columns=id%2Centry%20name%2Corganism%2Corganism-id"
        );
    }

    #[test]
    #[ignore = "requires network access to UniProt"]
    fn test_get_gen_dna_ids_remote() {
        let ids = client().get_gen_dna_ids("P43699").unwrap();
        assert!(ids.contains("AAC50125.1"));
    }
}
