use super::{require_root, trimmed_child_text, ParseResult, COVERAGE_ROOTS};
use crate::model::coverage::BoundingBox;
use crate::xml::names::{
    BOUNDING_COORDINATES, EAST_BOUNDING_COORDINATE, GEOGRAPHIC_DESCRIPTION,
    NORTH_BOUNDING_COORDINATE, SOUTH_BOUNDING_COORDINATE, WEST_BOUNDING_COORDINATE,
};
use crate::xml::Element;
use log::debug;

/// Reads a `geographicCoverage` fragment into a bounding box.
///
/// Coordinates are kept as strings; only surrounding whitespace and an
/// explicit leading `+` are removed.
pub fn parse_geo_coverage(fragment: &Element) -> ParseResult<BoundingBox> {
    require_root(fragment, COVERAGE_ROOTS)?;

    let mut bounding_box = BoundingBox {
        description: trimmed_child_text(fragment, GEOGRAPHIC_DESCRIPTION),
        ..BoundingBox::default()
    };
    if let Some(bounds) = fragment.child(BOUNDING_COORDINATES) {
        bounding_box.west = coordinate(bounds, WEST_BOUNDING_COORDINATE);
        bounding_box.east = coordinate(bounds, EAST_BOUNDING_COORDINATE);
        bounding_box.north = coordinate(bounds, NORTH_BOUNDING_COORDINATE);
        bounding_box.south = coordinate(bounds, SOUTH_BOUNDING_COORDINATE);
    }
    debug!("event=coverage_parse module=parse_coverage status=ok");
    Ok(bounding_box)
}

/// Parses raw XML text, then reads it like [`parse_geo_coverage`].
pub fn parse_geo_coverage_str(input: &str) -> ParseResult<BoundingBox> {
    parse_geo_coverage(&Element::parse_str(input)?)
}

fn coordinate(bounds: &Element, name: &str) -> String {
    let value = trimmed_child_text(bounds, name);
    match value.strip_prefix('+') {
        Some(unsigned) => unsigned.to_string(),
        None => value,
    }
}
