//! Fragment parsers: element tree -> typed model.
//!
//! # Responsibility
//! - Check the fragment root against each parser's whitelist.
//! - Read models tolerantly: missing optional children are absence, unknown
//!   children are skipped with a warning.
//!
//! # Invariants
//! - A root outside the whitelist is the only fatal parse outcome for a tree.
//! - Parsers never mutate the input tree.
//!
//! # See also
//! - `crate::sync` for the inverse direction.

mod coverage;
mod domain;
mod party;

pub use coverage::{parse_geo_coverage, parse_geo_coverage_str};
pub use domain::{parse_non_numeric_domain, parse_non_numeric_domain_str, ParsedDomains};
pub(crate) use domain::{is_supported_domain, scale_element, supported_domain};
pub use party::{parse_party, parse_party_str};
pub(crate) use party::parse_address;

use crate::xml::names::{
    ASSOCIATED_PARTY, CONTACT, CREATOR, GEOGRAPHIC_COVERAGE, MEASUREMENT_SCALE,
    METADATA_PROVIDER, NOMINAL, ORDINAL, PERSONNEL, PUBLISHER, RESPONSIBLE_PARTY,
};
use crate::xml::{Element, XmlError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Roots accepted by the non-numeric domain parser.
pub const DOMAIN_ROOTS: &[&str] = &[MEASUREMENT_SCALE, NOMINAL, ORDINAL];
/// Scale elements accepted inside a `measurementScale` wrapper.
pub const SCALE_ROOTS: &[&str] = &[NOMINAL, ORDINAL];
/// Roots accepted by the geographic coverage parser.
pub const COVERAGE_ROOTS: &[&str] = &[GEOGRAPHIC_COVERAGE];
/// Roots accepted by the party parser.
pub const PARTY_ROOTS: &[&str] = &[
    CREATOR,
    CONTACT,
    ASSOCIATED_PARTY,
    METADATA_PROVIDER,
    PUBLISHER,
    PERSONNEL,
    RESPONSIBLE_PARTY,
];

pub type ParseResult<T> = Result<T, ParseError>;

/// Fatal parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fragment root (or scale child) is not one of the accepted names.
    SchemaViolation {
        expected: &'static [&'static str],
        found: String,
    },
    /// Raw text could not be read into an element tree.
    Xml(XmlError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SchemaViolation { expected, found } => write!(
                f,
                "element `{found}` is not one of: {}",
                expected.join(", ")
            ),
            Self::Xml(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Xml(err) => Some(err),
            Self::SchemaViolation { .. } => None,
        }
    }
}

impl From<XmlError> for ParseError {
    fn from(value: XmlError) -> Self {
        Self::Xml(value)
    }
}

/// Fails with `SchemaViolation` unless `element` has one of `expected` names.
pub(crate) fn require_root(element: &Element, expected: &'static [&'static str]) -> ParseResult<()> {
    if expected.iter().any(|name| element.is_named(name)) {
        Ok(())
    } else {
        Err(ParseError::SchemaViolation {
            expected,
            found: element.name().to_string(),
        })
    }
}

/// Trimmed text of the first child named `name`; empty when absent.
pub(crate) fn trimmed_child_text(element: &Element, name: &str) -> String {
    element
        .child_text(name)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Trimmed text of the first child named `name`; `None` when absent or blank.
pub(crate) fn optional_child_text(element: &Element, name: &str) -> Option<String> {
    Some(trimmed_child_text(element, name)).filter(|text| !text.is_empty())
}

/// Trimmed, non-blank texts of every child named `name`.
pub(crate) fn trimmed_children_text(element: &Element, name: &str) -> Vec<String> {
    element
        .children_named(name)
        .map(|child| child.text().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{require_root, ParseError, DOMAIN_ROOTS};
    use crate::xml::{Element, XmlError};
    use std::error::Error;

    #[test]
    fn require_root_accepts_case_variants() {
        let root = Element::new("measurementScale");
        assert!(require_root(&root, DOMAIN_ROOTS).is_ok());
    }

    #[test]
    fn schema_violation_names_the_found_root() {
        let err = require_root(&Element::new("interval"), DOMAIN_ROOTS)
            .expect_err("interval is not a domain root");
        assert_eq!(
            err.to_string(),
            "element `interval` is not one of: measurementscale, nominal, ordinal"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn xml_errors_are_chained() {
        let err = ParseError::from(XmlError::NoRootElement);
        assert!(err.source().is_some());
    }
}
