use super::GEO_COVERAGE_ORDER;
use crate::model::coverage::BoundingBox;
use crate::parse::{require_root, ParseResult, COVERAGE_ROOTS};
use crate::xml::names::{
    BOUNDING_COORDINATES, EAST_BOUNDING_COORDINATE, GEOGRAPHIC_COVERAGE, GEOGRAPHIC_DESCRIPTION,
    NORTH_BOUNDING_COORDINATE, SOUTH_BOUNDING_COORDINATE, WEST_BOUNDING_COORDINATE,
};
use crate::xml::{Element, XmlNode};
use log::debug;

/// Writes a bounding box into a clone of `previous` (or a new
/// `geographicCoverage`).
///
/// The single-point mirror is applied first. The four coordinates are
/// replaced wholesale and written first inside `boundingCoordinates`, in
/// west, east, north, south order; other children survive.
///
/// # Errors
/// - `SchemaViolation` when `previous` is not a `geographicCoverage`.
pub fn synchronize_geo_coverage(
    bounding_box: &BoundingBox,
    previous: Option<&Element>,
) -> ParseResult<Element> {
    if let Some(fragment) = previous {
        require_root(fragment, COVERAGE_ROOTS)?;
    }
    let mut root = previous
        .cloned()
        .unwrap_or_else(|| Element::new(GEOGRAPHIC_COVERAGE));
    let bounding_box = bounding_box.mirrored();

    match root.child_mut(GEOGRAPHIC_DESCRIPTION) {
        Some(description) => description.set_text(&bounding_box.description),
        None => root.prepend_child(Element::with_text(
            GEOGRAPHIC_DESCRIPTION,
            &bounding_box.description,
        )),
    }

    if root.child(BOUNDING_COORDINATES).is_none() {
        root.insert_ordered(Element::new(BOUNDING_COORDINATES), GEO_COVERAGE_ORDER);
    }
    if let Some(bounds) = root.child_mut(BOUNDING_COORDINATES) {
        write_coordinates(bounds, &bounding_box);
    }
    debug!("event=coverage_sync module=sync_coverage status=ok");
    Ok(root)
}

fn write_coordinates(bounds: &mut Element, bounding_box: &BoundingBox) {
    let coordinates = [
        (WEST_BOUNDING_COORDINATE, &bounding_box.west),
        (EAST_BOUNDING_COORDINATE, &bounding_box.east),
        (NORTH_BOUNDING_COORDINATE, &bounding_box.north),
        (SOUTH_BOUNDING_COORDINATE, &bounding_box.south),
    ];
    for (name, _) in coordinates {
        bounds.remove_children_named(name);
    }
    for (offset, (name, value)) in coordinates.into_iter().enumerate() {
        bounds.insert_node(offset, XmlNode::Element(Element::with_text(name, value)));
    }
}
