//! Synchronizers: typed model + previous fragment -> updated fragment.
//!
//! # Responsibility
//! - Merge model values into a private clone of the previous fragment.
//! - Keep sibling content the model does not own.
//! - Place new children at their schema position.
//!
//! # Invariants
//! - The caller's fragment is never mutated; output is always a fresh tree.
//! - Synchronizers do not emit change signals.
//! - Element names written here are the lower-case canonical names from
//!   `crate::xml::names`.
//!
//! # See also
//! - `matcher` for the identifier-then-position lookup.

mod coverage;
mod domain;
mod matcher;
mod party;

pub use coverage::synchronize_geo_coverage;
pub use domain::synchronize_non_numeric_domain;
pub use matcher::{DomainMatch, DomainMatcher};
pub use party::synchronize_party;

use crate::xml::names::{
    ADDRESS, ADMINISTRATIVE_AREA, BOUNDING_COORDINATES, CITY, CODE, COUNTRY, DATASET_G_POLYGON,
    DEFINITION, DELIVERY_POINT, ELECTRONIC_MAIL_ADDRESS, GEOGRAPHIC_DESCRIPTION, GIVEN_NAME,
    INDIVIDUAL_NAME, ONLINE_URL, ORGANIZATION_NAME, PATTERN, PHONE, POSITION_NAME, POSTAL_CODE,
    ROLE, SALUTATION, SOURCE, SUR_NAME, USER_ID,
};
use crate::xml::Element;

/// Child order inside `textDomain`.
pub const TEXT_DOMAIN_ORDER: &[&str] = &[DEFINITION, PATTERN, SOURCE];
/// Child order inside `codeDefinition`.
pub const CODE_DEFINITION_ORDER: &[&str] = &[CODE, DEFINITION, SOURCE];
/// Child order inside `geographicCoverage`.
pub const GEO_COVERAGE_ORDER: &[&str] =
    &[GEOGRAPHIC_DESCRIPTION, BOUNDING_COORDINATES, DATASET_G_POLYGON];
/// Child order of the fields a party record owns.
pub const PARTY_ORDER: &[&str] = &[
    INDIVIDUAL_NAME,
    ORGANIZATION_NAME,
    POSITION_NAME,
    ADDRESS,
    PHONE,
    ELECTRONIC_MAIL_ADDRESS,
    ONLINE_URL,
    USER_ID,
    ROLE,
];

/// Child order inside `individualName`.
pub const INDIVIDUAL_NAME_ORDER: &[&str] = &[SALUTATION, GIVEN_NAME, SUR_NAME];
/// Child order inside `address`.
pub const ADDRESS_ORDER: &[&str] =
    &[DELIVERY_POINT, CITY, ADMINISTRATIVE_AREA, POSTAL_CODE, COUNTRY];

/// Writes `value` into the first child named `name`, or removes every such
/// child when `value` is blank.
pub(crate) fn set_or_remove_child(element: &mut Element, name: &str, value: &str, order: &[&str]) {
    if value.trim().is_empty() {
        element.remove_children_named(name);
    } else {
        element.set_child_text_ordered(name, value, order);
    }
}
