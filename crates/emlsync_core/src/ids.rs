//! Durable identifiers for metadata fragments.
//!
//! # Invariants
//! - Minted ids are valid XML `id` values (NCName) and never reused.
//! - A non-blank `id` read from a document is kept verbatim, even when it is
//!   not an NCName; only blank or missing ids are minted.

use crate::xml::names::ID_ATTRIBUTE;
use crate::xml::Element;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Prefix of every minted identifier.
pub const MINTED_ID_PREFIX: &str = "urn-uuid-";

static XML_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9._\-]*$").expect("valid xml id regex"));

/// Mints a fresh identifier of the form `urn-uuid-<uuid v4>`.
pub fn mint_id() -> String {
    format!("{MINTED_ID_PREFIX}{}", Uuid::new_v4())
}

/// Returns whether `value` can be written as an XML `id` attribute.
pub fn is_valid_xml_id(value: &str) -> bool {
    XML_ID_RE.is_match(value)
}

/// Reads the element's `id` as written, minting one when absent or blank.
pub(crate) fn resolve_id(element: &Element, module: &str) -> String {
    match element.attribute(ID_ATTRIBUTE) {
        Some(raw) if !raw.trim().is_empty() => {
            if !is_valid_xml_id(raw) {
                warn!(
                    "event=id_not_ncname module={} status=kept element={}",
                    module,
                    element.local_name()
                );
            }
            raw.to_string()
        }
        _ => mint_id(),
    }
}
