//! Streaming extraction of the first CDS feature
//!
//! The document is read in one forward pass. Only the first
//! `<feature name="CDS">` element is decoded; later CDS features are
//! skipped, but the rest of the document is still read so malformed input
//! is always reported.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use super::location::FeatureAttributes;
use super::GenomicFeature;
use crate::error::FerroError;
use crate::xml::{attr, fold_events, local_name};

const FEATURE_TAG: &[u8] = b"feature";
const CDS_NAME: &str = "CDS";

/// Extract the first CDS feature from an XML document.
///
/// Returns `Ok(None)` if the document is well-formed but has no CDS feature.
///
/// # Errors
///
/// - [`FerroError::MalformedXml`] if the document is not well-formed
/// - [`FerroError::PatternMismatch`] if the CDS location uses an unknown format
/// - [`FerroError::InvalidCoordinates`] if a coordinate is not an integer
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Option<GenomicFeature>, FerroError> {
    let found = fold_events(reader, None, |found, event, pos| match (found, event) {
        (None, Event::Start(tag) | Event::Empty(tag)) => cds_feature(tag, pos),
        (found, _) => Ok(found),
    })?;

    match &found {
        Some(feature) => debug!(%feature, "extracted CDS feature"),
        None => debug!("document has no CDS feature"),
    }
    Ok(found)
}

/// Extract the first CDS feature from an XML string.
pub fn parse_str(xml: &str) -> Result<Option<GenomicFeature>, FerroError> {
    parse_reader(xml.as_bytes())
}

/// Extract the first CDS feature from raw XML bytes (e.g. an HTTP body).
pub fn parse_bytes(xml: &[u8]) -> Result<Option<GenomicFeature>, FerroError> {
    parse_reader(xml)
}

/// Extract the first CDS feature from an XML file on disk.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Option<GenomicFeature>, FerroError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FerroError::Io {
        msg: format!("Failed to open {}: {}", path.display(), e),
    })?;
    parse_reader(BufReader::new(file))
}

/// Decode `tag` if it is a CDS feature element.
fn cds_feature(tag: &BytesStart<'_>, pos: u64) -> Result<Option<GenomicFeature>, FerroError> {
    if local_name(tag) != FEATURE_TAG || attr(tag, "name", pos)?.as_deref() != Some(CDS_NAME) {
        return Ok(None);
    }

    let attrs = FeatureAttributes {
        location: attr(tag, "location", pos)?,
        start: attr(tag, "start", pos)?,
        end: attr(tag, "end", pos)?,
        complement: attr(tag, "complement", pos)?,
    };
    attrs.decode().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LABELLED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ROOT>
<entry accession="AAC21905" version="1" dataClass="STD" moleculeType="genomic DNA">
    <feature name="source" location="L42023.1:1..1830138"/>
    <feature name="CDS" location="complement(L42023.1:265624..265833)">
        <qualifier name="protein_id"><value>AAC21905.1</value></qualifier>
    </feature>
</entry>
</ROOT>"#;

    #[test]
    fn test_parse_labelled() {
        let feature = parse_str(LABELLED).unwrap().unwrap();
        assert_eq!(feature.as_tuple(), (265624, 265833, true));
    }

    #[test]
    fn test_non_cds_features_ignored() {
        let xml = r#"<ROOT><feature name="gene" location="1..50"/>
            <feature name="CDS" location="10..40"/></ROOT>"#;
        assert_eq!(parse_str(xml).unwrap().unwrap().as_tuple(), (10, 40, false));
    }

    #[test]
    fn test_no_cds_is_none() {
        let xml = r#"<ROOT><feature name="source" location="1..500"/></ROOT>"#;
        assert_eq!(parse_str(xml).unwrap(), None);
    }

    #[test]
    fn test_first_cds_wins() {
        let xml = r#"<ROOT>
            <feature name="CDS" location="100..200"/>
            <feature name="CDS" location="complement(300..400)"/>
        </ROOT>"#;
        assert_eq!(parse_str(xml).unwrap().unwrap().as_tuple(), (100, 200, false));
    }

    #[test]
    fn test_second_cds_with_bad_location_is_ignored() {
        let xml = r#"<ROOT>
            <feature name="CDS" location="100..200"/>
            <feature name="CDS" location="order(foo)"/>
        </ROOT>"#;
        assert!(parse_str(xml).unwrap().is_some());
    }

    #[test]
    fn test_malformed_after_cds_still_fails() {
        let xml = r#"<ROOT><feature name="CDS" location="100..200"/><entry>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }));
    }

    #[test]
    fn test_unterminated_tag() {
        let xml = r#"<ROOT><feature name="CDS" location="100..200""#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }));
    }

    #[test]
    fn test_two_root_elements() {
        let xml = r#"<A/><B><feature name="CDS" location="1..2"/></B>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }), "{:?}", err);
    }

    #[test]
    fn test_text_after_root() {
        let xml = r#"<ROOT><feature name="CDS" location="1..2"/></ROOT>junk"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }), "{:?}", err);
    }

    #[test]
    fn test_bare_ampersand_in_text() {
        let xml = r#"<ROOT>a & b<feature name="CDS" location="1..2"/></ROOT>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }), "{:?}", err);
    }

    #[test]
    fn test_duplicate_attribute_reports_tag_offset() {
        let xml = r#"<ROOT><feature name="CDS" name="CDS" location="1..2"/></ROOT>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { pos: 6, .. }), "{:?}", err);
    }

    #[test]
    fn test_unsupported_location() {
        let xml = r#"<ROOT><feature name="CDS" location="order(foo)"/></ROOT>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, FerroError::PatternMismatch { .. }));
    }

    #[test]
    fn test_idempotent() {
        let first = parse_str(LABELLED).unwrap();
        let second = parse_str(LABELLED).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_bytes_matches_parse_str() {
        assert_eq!(
            parse_bytes(LABELLED.as_bytes()).unwrap(),
            parse_str(LABELLED).unwrap()
        );
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LABELLED.as_bytes()).unwrap();
        let feature = parse_file(file.path()).unwrap().unwrap();
        assert_eq!(feature.as_tuple(), (265624, 265833, true));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("/nonexistent/ena/missing.xml").unwrap_err();
        assert!(matches!(err, FerroError::Io { .. }));
    }
}
