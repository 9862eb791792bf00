//! Single-pass XML event folding
//!
//! Both the ENA feature extractor and the UniProt cross-reference extractor
//! read one document front to back and keep only a handful of values. This
//! module drives quick-xml over a reader and threads a caller-provided state
//! value through every event, returning the final state.
//!
//! Well-formedness is checked here so every extractor reports malformed input
//! the same way: syntax errors, mismatched end tags, elements still open at
//! end of input and documents without a root element all become
//! [`FerroError::MalformedXml`].

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::FerroError;

/// Fold `step` over every event of the XML document read from `reader`.
///
/// `step` receives the state by value along with the byte offset at which
/// the event starts, and returns the next state, so the extractors never
/// hold mutable handler fields. The whole document is consumed even after
/// the caller has what it needs; a malformed tail still fails the parse.
pub(crate) fn fold_events<R, S, F>(reader: R, init: S, mut step: F) -> Result<S, FerroError>
where
    R: BufRead,
    F: FnMut(S, &Event<'_>, u64) -> Result<S, FerroError>,
{
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut state = init;
    let mut depth: usize = 0;
    let mut root = Root::Pending;

    loop {
        let pos = reader.buffer_position() as u64;
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| malformed(reader.error_position() as u64, e))?;

        match &event {
            Event::Eof => break,
            Event::Start(_) | Event::Empty(_) if root == Root::Closed => {
                return Err(FerroError::MalformedXml {
                    pos,
                    msg: "element after the root element".to_string(),
                });
            }
            Event::Start(_) => {
                depth += 1;
                root = Root::Open;
            }
            Event::Empty(_) if depth == 0 => root = Root::Closed,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root = Root::Closed;
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| malformed(pos, e.into()))?;
                if depth == 0 && !text.trim().is_empty() {
                    return Err(FerroError::MalformedXml {
                        pos,
                        msg: "text outside the root element".to_string(),
                    });
                }
            }
            _ => {}
        }

        state = step(state, &event, pos)?;
        buf.clear();
    }

    if depth > 0 {
        return Err(FerroError::MalformedXml {
            pos: reader.buffer_position() as u64,
            msg: format!("{} element(s) not closed at end of input", depth),
        });
    }
    if root == Root::Pending {
        return Err(FerroError::MalformedXml {
            pos: reader.buffer_position() as u64,
            msg: "no element found".to_string(),
        });
    }

    Ok(state)
}

/// Progress through the single root element of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    Pending,
    Open,
    Closed,
}

/// Local name of a start or empty element tag.
pub(crate) fn local_name<'a>(tag: &'a BytesStart<'_>) -> &'a [u8] {
    tag.local_name().into_inner()
}

/// Unescaped value of the attribute `key`, if present.
///
/// `pos` is the offset of the tag, reported if its attributes are malformed.
pub(crate) fn attr(
    tag: &BytesStart<'_>,
    key: &str,
    pos: u64,
) -> Result<Option<String>, FerroError> {
    for attribute in tag.attributes() {
        let attribute = attribute.map_err(|e| malformed(pos, e.into()))?;
        if attribute.key.local_name().as_ref() == key.as_bytes() {
            let value = attribute
                .unescape_value()
                .map_err(|e| malformed(pos, e.into()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn malformed(pos: u64, err: quick_xml::Error) -> FerroError {
    match err {
        quick_xml::Error::Io(e) => FerroError::Io { msg: e.to_string() },
        other => FerroError::MalformedXml {
            pos,
            msg: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_starts(xml: &str) -> Result<usize, FerroError> {
        fold_events(xml.as_bytes(), 0usize, |n, event, _| {
            Ok(match event {
                Event::Start(_) | Event::Empty(_) => n + 1,
                _ => n,
            })
        })
    }

    #[test]
    fn test_fold_counts_elements() {
        assert_eq!(count_starts("<a><b/><c></c></a>").unwrap(), 3);
    }

    #[test]
    fn test_unclosed_element_is_malformed() {
        let err = count_starts("<a><b/>").unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }));
    }

    #[test]
    fn test_unterminated_tag_is_malformed() {
        let err = count_starts("<a><feature name=\"CDS\"").unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }));
    }

    #[test]
    fn test_mismatched_end_tag_is_malformed() {
        let err = count_starts("<a><b></c></a>").unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }));
    }

    #[test]
    fn test_empty_document_is_malformed() {
        let err = count_starts("").unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }));
    }

    #[test]
    fn test_attr_unescapes_value() {
        let xml = r#"<f name="CDS" note="a &amp; b"/>"#;
        let value = fold_events(xml.as_bytes(), None, |found, event, pos| match event {
            Event::Empty(tag) => attr(tag, "note", pos),
            _ => Ok(found),
        })
        .unwrap();
        assert_eq!(value.as_deref(), Some("a & b"));
    }

    #[test]
    fn test_attr_missing() {
        let xml = r#"<f name="CDS"/>"#;
        let value = fold_events(xml.as_bytes(), Some("x".to_string()), |found, event, pos| {
            match event {
                Event::Empty(tag) => attr(tag, "location", pos),
                _ => Ok(found),
            }
        })
        .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_second_root_element_is_malformed() {
        let err = count_starts("<a/><b></b>").unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { pos: 4, .. }), "{:?}", err);
    }

    #[test]
    fn test_text_after_root_is_malformed() {
        let err = count_starts("<a></a>junk").unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }));
    }

    #[test]
    fn test_whitespace_around_root_is_allowed() {
        let xml = "<?xml version=\"1.0\"?>\n<a><b/></a>\n  \n";
        assert_eq!(count_starts(xml).unwrap(), 2);
    }

    #[test]
    fn test_bare_ampersand_in_text_is_malformed() {
        let err = count_starts("<a>x & y</a>").unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { .. }));
        assert_eq!(count_starts("<a>x &amp; y</a>").unwrap(), 1);
    }

    #[test]
    fn test_attribute_error_carries_tag_offset() {
        let xml = r#"<a><f name="CDS" name="gene"/></a>"#;
        let err = fold_events(xml.as_bytes(), (), |_, event, pos| match event {
            Event::Empty(tag) => attr(tag, "location", pos).map(|_| ()),
            _ => Ok(()),
        })
        .unwrap_err();
        assert!(matches!(err, FerroError::MalformedXml { pos: 3, .. }), "{:?}", err);
    }
}
