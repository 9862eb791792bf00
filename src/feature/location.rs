//! CDS location grammars
//!
//! ENA has published CDS coordinates in three shapes over time:
//!
//! | Grammar | Example |
//! |---------|---------|
//! | [`LocationGrammar::Attributes`] | `<feature name="CDS" start="265624" end="265833" complement="true"/>` |
//! | [`LocationGrammar::Labelled`] | `location="complement(L42023.1:265624..265833)"` |
//! | [`LocationGrammar::RangeString`] | `location="complement(265624..265833)"` |
//!
//! The grammar is chosen from the attributes present on the element, and
//! every grammar yields the same [`GenomicFeature`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::GenomicFeature;
use crate::error::FerroError;

/// `TOKEN(ACCESSION:START..END`, partial markers `<`/`>` tolerated
static LABELLED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\w+)\(([^:()]+):[<>]?(\d+)\.\.[<>]?(\d+)").unwrap()
});

/// First `START..END` anywhere in the string
static RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[<>]?(\d+)\.\.[<>]?(\d+)").unwrap());

const COMPLEMENT_TOKEN: &str = "complement";

/// Attributes of a `<feature>` element relevant to coordinate extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureAttributes {
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub complement: Option<String>,
}

/// The encoding used for a CDS location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationGrammar {
    /// Explicit `start`, `end` and `complement` attributes
    Attributes,
    /// `[complement(]START..END[)]` with the range anywhere in the string
    RangeString,
    /// `TOKEN(ACCESSION:START..END)`; reverse strand when `TOKEN` is `complement`
    Labelled,
}

impl LocationGrammar {
    /// Pick the grammar for a feature by inspecting which attributes it carries.
    ///
    /// Returns `None` when no grammar applies.
    pub fn select(attrs: &FeatureAttributes) -> Option<Self> {
        match &attrs.location {
            Some(location) if LABELLED_PATTERN.is_match(location) => Some(Self::Labelled),
            Some(location) if RANGE_PATTERN.is_match(location) => Some(Self::RangeString),
            Some(_) => None,
            None if attrs.start.is_some() && attrs.end.is_some() => Some(Self::Attributes),
            None => None,
        }
    }
}

impl FeatureAttributes {
    /// Decode the feature's coordinates with the grammar its attributes call for.
    pub fn decode(&self) -> Result<GenomicFeature, FerroError> {
        let grammar = LocationGrammar::select(self).ok_or_else(|| self.mismatch())?;
        trace!(?grammar, location = ?self.location, "decoding CDS location");

        match grammar {
            LocationGrammar::Attributes => self.decode_attributes(),
            LocationGrammar::Labelled => self.decode_labelled(),
            LocationGrammar::RangeString => self.decode_range_string(),
        }
    }

    fn decode_attributes(&self) -> Result<GenomicFeature, FerroError> {
        let (Some(start), Some(end)) = (&self.start, &self.end) else {
            return Err(self.mismatch());
        };
        let is_complement = self.complement.as_deref().is_some_and(parse_flag);
        Ok(GenomicFeature::new(
            parse_coordinate(start)?,
            parse_coordinate(end)?,
            is_complement,
        ))
    }

    fn decode_labelled(&self) -> Result<GenomicFeature, FerroError> {
        let location = self.location.as_deref().unwrap_or_default();
        let caps = LABELLED_PATTERN
            .captures(location)
            .ok_or_else(|| self.mismatch())?;
        Ok(GenomicFeature::new(
            parse_coordinate(&caps[3])?,
            parse_coordinate(&caps[4])?,
            &caps[1] == COMPLEMENT_TOKEN,
        ))
    }

    fn decode_range_string(&self) -> Result<GenomicFeature, FerroError> {
        let location = self.location.as_deref().unwrap_or_default();
        let caps = RANGE_PATTERN
            .captures(location)
            .ok_or_else(|| self.mismatch())?;
        Ok(GenomicFeature::new(
            parse_coordinate(&caps[1])?,
            parse_coordinate(&caps[2])?,
            location.trim_start().starts_with(COMPLEMENT_TOKEN),
        ))
    }

    fn mismatch(&self) -> FerroError {
        let location = match (&self.location, &self.start, &self.end) {
            (Some(location), _, _) => location.clone(),
            (None, start, end) => format!(
                "start={} end={}",
                start.as_deref().unwrap_or("<missing>"),
                end.as_deref().unwrap_or("<missing>")
            ),
        };
        FerroError::PatternMismatch { location }
    }
}

fn parse_coordinate(value: &str) -> Result<u64, FerroError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| FerroError::InvalidCoordinates {
            msg: format!("'{}': {}", value, e),
        })
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn with_location(location: &str) -> FeatureAttributes {
        FeatureAttributes {
            location: Some(location.to_string()),
            ..Default::default()
        }
    }

    fn with_attributes(start: &str, end: &str, complement: Option<&str>) -> FeatureAttributes {
        FeatureAttributes {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            complement: complement.map(str::to_string),
            ..Default::default()
        }
    }

    #[rstest]
    #[case("complement(L42023.1:265624..265833)", LocationGrammar::Labelled)]
    #[case("join(L42023.1:265624..265833)", LocationGrammar::Labelled)]
    #[case("265624..265833", LocationGrammar::RangeString)]
    #[case("complement(265624..265833)", LocationGrammar::RangeString)]
    #[case("complement(join(265624..265833,266000..266100))", LocationGrammar::RangeString)]
    fn test_select_from_location(#[case] location: &str, #[case] expected: LocationGrammar) {
        assert_eq!(LocationGrammar::select(&with_location(location)), Some(expected));
    }

    #[test]
    fn test_select_attributes() {
        let attrs = with_attributes("1", "2", None);
        assert_eq!(LocationGrammar::select(&attrs), Some(LocationGrammar::Attributes));
    }

    #[test]
    fn test_select_none() {
        assert_eq!(LocationGrammar::select(&FeatureAttributes::default()), None);
        assert_eq!(LocationGrammar::select(&with_location("order(foo)")), None);
    }

    #[rstest]
    #[case("complement(L42023.1:265624..265833)", true)]
    #[case("join(L42023.1:265624..265833)", false)]
    #[case("L42023.1:265624..265833", false)]
    #[case("265624..265833", false)]
    #[case("complement(265624..265833)", true)]
    #[case("complement(join(265624..265833,266000..266100))", true)]
    fn test_all_grammars_agree(#[case] location: &str, #[case] is_complement: bool) {
        let feature = with_location(location).decode().unwrap();
        assert_eq!(feature, GenomicFeature::new(265624, 265833, is_complement));
    }

    #[test]
    fn test_decode_attributes() {
        let feature = with_attributes("265624", "265833", Some("true"))
            .decode()
            .unwrap();
        assert_eq!(feature, GenomicFeature::new(265624, 265833, true));

        let feature = with_attributes("265624", "265833", Some("false"))
            .decode()
            .unwrap();
        assert!(!feature.is_complement());

        let feature = with_attributes("265624", "265833", None).decode().unwrap();
        assert!(!feature.is_complement());
    }

    #[test]
    fn test_partial_markers() {
        let feature = with_location("complement(L42023.1:<265624..>265833)")
            .decode()
            .unwrap();
        assert_eq!(feature, GenomicFeature::new(265624, 265833, true));
    }

    #[test]
    fn test_first_range_wins() {
        let feature = with_location("join(100..200,300..400)").decode().unwrap();
        assert_eq!(feature.as_tuple(), (100, 200, false));
    }

    #[test]
    fn test_pattern_mismatch() {
        let err = with_location("order(foo)").decode().unwrap_err();
        assert_eq!(
            err,
            FerroError::PatternMismatch {
                location: "order(foo)".to_string()
            }
        );
    }

    #[test]
    fn test_missing_end_attribute_is_mismatch() {
        let attrs = FeatureAttributes {
            start: Some("10".to_string()),
            ..Default::default()
        };
        let err = attrs.decode().unwrap_err();
        assert!(matches!(err, FerroError::PatternMismatch { .. }));
        assert!(err.to_string().contains("end=<missing>"));
    }

    #[test]
    fn test_non_numeric_attribute() {
        let err = with_attributes("abc", "20", None).decode().unwrap_err();
        assert!(matches!(err, FerroError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_overflowing_coordinate() {
        let err = with_location("1..99999999999999999999999").decode().unwrap_err();
        assert!(matches!(err, FerroError::InvalidCoordinates { .. }));
    }
}
