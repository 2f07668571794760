//! Canonical element names and the lower-case -> schema name table.
//!
//! Core code creates elements with the lower-case canonical names below. The
//! writer maps them back to the case-sensitive EML names through
//! [`SCHEMA_NAMES`]. Every multi-word constant must have a table entry.

pub const ID_ATTRIBUTE: &str = "id";

// Measurement scale / non-numeric domain.
pub const MEASUREMENT_SCALE: &str = "measurementscale";
pub const NOMINAL: &str = "nominal";
pub const ORDINAL: &str = "ordinal";
pub const NON_NUMERIC_DOMAIN: &str = "nonnumericdomain";
pub const TEXT_DOMAIN: &str = "textdomain";
pub const ENUMERATED_DOMAIN: &str = "enumerateddomain";
pub const REFERENCES: &str = "references";
pub const DEFINITION: &str = "definition";
pub const PATTERN: &str = "pattern";
pub const SOURCE: &str = "source";
pub const CODE_DEFINITION: &str = "codedefinition";
pub const CODE: &str = "code";
pub const EXTERNAL_CODE_SET: &str = "externalcodeset";
pub const CODESET_NAME: &str = "codesetname";
pub const CITATION: &str = "citation";
pub const CODESET_URL: &str = "codeseturl";
pub const ENTITY_CODE_LIST: &str = "entitycodelist";
pub const ENTITY_REFERENCE: &str = "entityreference";
pub const VALUE_ATTRIBUTE_REFERENCE: &str = "valueattributereference";
pub const DEFINITION_ATTRIBUTE_REFERENCE: &str = "definitionattributereference";
pub const ORDER_ATTRIBUTE_REFERENCE: &str = "orderattributereference";

// Geographic coverage.
pub const GEOGRAPHIC_COVERAGE: &str = "geographiccoverage";
pub const GEOGRAPHIC_DESCRIPTION: &str = "geographicdescription";
pub const BOUNDING_COORDINATES: &str = "boundingcoordinates";
pub const WEST_BOUNDING_COORDINATE: &str = "westboundingcoordinate";
pub const EAST_BOUNDING_COORDINATE: &str = "eastboundingcoordinate";
pub const NORTH_BOUNDING_COORDINATE: &str = "northboundingcoordinate";
pub const SOUTH_BOUNDING_COORDINATE: &str = "southboundingcoordinate";
pub const BOUNDING_ALTITUDES: &str = "boundingaltitudes";
pub const ALTITUDE_MINIMUM: &str = "altitudeminimum";
pub const ALTITUDE_MAXIMUM: &str = "altitudemaximum";
pub const ALTITUDE_UNITS: &str = "altitudeunits";
pub const DATASET_G_POLYGON: &str = "datasetgpolygon";

// Parties.
pub const CREATOR: &str = "creator";
pub const CONTACT: &str = "contact";
pub const ASSOCIATED_PARTY: &str = "associatedparty";
pub const METADATA_PROVIDER: &str = "metadataprovider";
pub const PUBLISHER: &str = "publisher";
pub const PERSONNEL: &str = "personnel";
pub const RESPONSIBLE_PARTY: &str = "responsibleparty";
pub const INDIVIDUAL_NAME: &str = "individualname";
pub const SALUTATION: &str = "salutation";
pub const GIVEN_NAME: &str = "givenname";
pub const SUR_NAME: &str = "surname";
pub const ORGANIZATION_NAME: &str = "organizationname";
pub const POSITION_NAME: &str = "positionname";
pub const ADDRESS: &str = "address";
pub const DELIVERY_POINT: &str = "deliverypoint";
pub const CITY: &str = "city";
pub const ADMINISTRATIVE_AREA: &str = "administrativearea";
pub const POSTAL_CODE: &str = "postalcode";
pub const COUNTRY: &str = "country";
pub const PHONE: &str = "phone";
pub const PHONE_TYPE_ATTRIBUTE: &str = "phonetype";
pub const ELECTRONIC_MAIL_ADDRESS: &str = "electronicmailaddress";
pub const ONLINE_URL: &str = "onlineurl";
pub const USER_ID: &str = "userid";
pub const DIRECTORY_ATTRIBUTE: &str = "directory";
pub const ROLE: &str = "role";

/// Lower-case canonical name -> schema (camelCase) name.
///
/// Single-word names (`code`, `pattern`, `nominal`, ...) are identical in both
/// forms and are not listed.
pub const SCHEMA_NAMES: &[(&str, &str)] = &[
    (MEASUREMENT_SCALE, "measurementScale"),
    (NON_NUMERIC_DOMAIN, "nonNumericDomain"),
    (TEXT_DOMAIN, "textDomain"),
    (ENUMERATED_DOMAIN, "enumeratedDomain"),
    (CODE_DEFINITION, "codeDefinition"),
    (EXTERNAL_CODE_SET, "externalCodeSet"),
    (CODESET_NAME, "codesetName"),
    (CODESET_URL, "codesetURL"),
    (ENTITY_CODE_LIST, "entityCodeList"),
    (ENTITY_REFERENCE, "entityReference"),
    (VALUE_ATTRIBUTE_REFERENCE, "valueAttributeReference"),
    (DEFINITION_ATTRIBUTE_REFERENCE, "definitionAttributeReference"),
    (ORDER_ATTRIBUTE_REFERENCE, "orderAttributeReference"),
    (GEOGRAPHIC_COVERAGE, "geographicCoverage"),
    (GEOGRAPHIC_DESCRIPTION, "geographicDescription"),
    (BOUNDING_COORDINATES, "boundingCoordinates"),
    (WEST_BOUNDING_COORDINATE, "westBoundingCoordinate"),
    (EAST_BOUNDING_COORDINATE, "eastBoundingCoordinate"),
    (NORTH_BOUNDING_COORDINATE, "northBoundingCoordinate"),
    (SOUTH_BOUNDING_COORDINATE, "southBoundingCoordinate"),
    (BOUNDING_ALTITUDES, "boundingAltitudes"),
    (ALTITUDE_MINIMUM, "altitudeMinimum"),
    (ALTITUDE_MAXIMUM, "altitudeMaximum"),
    (ALTITUDE_UNITS, "altitudeUnits"),
    (DATASET_G_POLYGON, "datasetGPolygon"),
    (ASSOCIATED_PARTY, "associatedParty"),
    (METADATA_PROVIDER, "metadataProvider"),
    (RESPONSIBLE_PARTY, "responsibleParty"),
    (INDIVIDUAL_NAME, "individualName"),
    (GIVEN_NAME, "givenName"),
    (SUR_NAME, "surName"),
    (ORGANIZATION_NAME, "organizationName"),
    (POSITION_NAME, "positionName"),
    (DELIVERY_POINT, "deliveryPoint"),
    (ADMINISTRATIVE_AREA, "administrativeArea"),
    (POSTAL_CODE, "postalCode"),
    (ELECTRONIC_MAIL_ADDRESS, "electronicMailAddress"),
    (ONLINE_URL, "onlineUrl"),
    (USER_ID, "userId"),
];

/// Maps a tag name to its schema spelling.
///
/// Prefixed names and names missing from the table are returned unchanged,
/// so tags read from a document keep the case they arrived with.
pub fn to_schema_name(name: &str) -> &str {
    if name.contains(':') {
        return name;
    }
    SCHEMA_NAMES
        .iter()
        .find(|(canonical, _)| canonical.eq_ignore_ascii_case(name))
        .map(|(_, schema)| *schema)
        .unwrap_or(name)
}
