use super::ErrorSet;
use crate::model::coverage::BoundingBox;

pub const DESCRIPTION_MESSAGE: &str = "Each location must have a description.";
pub const COORDINATE_PAIR_MESSAGE: &str =
    "Each location description must have at least one coordinate pair.";
pub const COORDINATE_MISSING_MESSAGE: &str =
    "Each coordinate must include a latitude AND longitude.";
pub const NORTH_MESSAGE: &str = "The Northwest latitude must be between -90 and 90.";
pub const WEST_MESSAGE: &str = "The Northwest longitude must be between -180 and 180.";
pub const SOUTH_MESSAGE: &str = "The Southeast latitude must be between -90 and 90.";
pub const EAST_MESSAGE: &str = "The Southeast longitude must be between -180 and 180.";

/// Runs every bounding box rule; none short-circuits another.
///
/// Entries are inserted in message order: description, pair, missing, then
/// north/west/south/east range checks.
pub fn validate_geo_coverage(bounding_box: &BoundingBox) -> ErrorSet {
    let mut errors = ErrorSet::new();
    let status = bounding_box.coordinate_status();

    if bounding_box.description.trim().is_empty() {
        errors.insert("description", DESCRIPTION_MESSAGE);
    }
    if !status.any_set() {
        errors.insert("coordinatePair", COORDINATE_PAIR_MESSAGE);
    }
    if status.has_unpaired_coordinate() {
        errors.insert("coordinateMissing", COORDINATE_MISSING_MESSAGE);
    }
    let ranges = [
        ("north", status.north, NORTH_MESSAGE),
        ("west", status.west, WEST_MESSAGE),
        ("south", status.south, SOUTH_MESSAGE),
        ("east", status.east, EAST_MESSAGE),
    ];
    for (field, axis, message) in ranges {
        if axis.is_out_of_range() {
            errors.insert(field, message);
        }
    }
    errors
}
