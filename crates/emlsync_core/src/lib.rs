//! Model <-> XML synchronization core for EML metadata fragments.
//! This crate owns parsing, in-place XML updates, validation and change
//! signalling; callers only hand it fragments and edits.

pub mod change;
pub mod ids;
pub mod logging;
pub mod model;
pub mod parse;
pub mod service;
pub mod sync;
pub mod validate;
pub mod xml;

pub use change::{ChangeListener, ChangeNotifier, PackageDirtyFlag};
pub use ids::{is_valid_xml_id, mint_id};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::coverage::BoundingBox;
pub use model::domain::{
    CodeDefinition, DomainFragment, DomainKind, EnumeratedDomain, MeasurementScaleKind,
    TextDomain,
};
pub use model::party::{PartyRecord, PartyType};
pub use parse::{
    parse_geo_coverage, parse_non_numeric_domain, parse_party, ParseError, ParseResult,
    ParsedDomains,
};
pub use service::geo_coverage::GeoCoverage;
pub use service::non_numeric_domain::NonNumericDomain;
pub use service::party::Party;
pub use sync::{
    synchronize_geo_coverage, synchronize_non_numeric_domain, synchronize_party, DomainMatch,
};
pub use validate::{
    validate_geo_coverage, validate_non_numeric_domain, validate_party, ErrorSet,
    ValidationEvent, ValidationState,
};
pub use xml::{Element, XmlError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
