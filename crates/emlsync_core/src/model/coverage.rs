//! Geographic coverage model: a description and a bounding box.
//!
//! # Invariants
//! - Coordinates stay strings until validated; a leading `+` is stripped at
//!   parse time, nothing else is normalized.
//! - The single-point mirror is applied at the serialization boundary
//!   (`mirrored`), never on construction.

use serde::{Deserialize, Serialize};

/// Inclusive latitude range.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Inclusive longitude range.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub description: String,
    pub north: String,
    pub south: String,
    pub east: String,
    pub west: String,
}

impl BoundingBox {
    /// Copy with the missing corner filled when only one corner is set.
    ///
    /// North+west without south+east models a single point, and the other way
    /// around. Any other combination is returned unchanged.
    pub fn mirrored(&self) -> Self {
        let mut mirrored = self.clone();
        let north_west = is_set(&self.north) && is_set(&self.west);
        let south_east = is_set(&self.south) && is_set(&self.east);
        let no_south_east = !is_set(&self.south) && !is_set(&self.east);
        let no_north_west = !is_set(&self.north) && !is_set(&self.west);

        if north_west && no_south_east {
            mirrored.south = self.north.clone();
            mirrored.east = self.west.clone();
        } else if south_east && no_north_west {
            mirrored.north = self.south.clone();
            mirrored.west = self.east.clone();
        }
        mirrored
    }

    /// Set/valid state of each coordinate against its axis range.
    pub fn coordinate_status(&self) -> CoordinateStatus {
        CoordinateStatus {
            north: AxisStatus::of(&self.north, LATITUDE_RANGE),
            east: AxisStatus::of(&self.east, LONGITUDE_RANGE),
            south: AxisStatus::of(&self.south, LATITUDE_RANGE),
            west: AxisStatus::of(&self.west, LONGITUDE_RANGE),
        }
    }
}

/// Derived per-coordinate state; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateStatus {
    pub north: AxisStatus,
    pub east: AxisStatus,
    pub south: AxisStatus,
    pub west: AxisStatus,
}

impl CoordinateStatus {
    pub fn any_set(&self) -> bool {
        [self.north, self.east, self.south, self.west]
            .iter()
            .any(|axis| axis.is_set)
    }

    /// A latitude without its longitude (or the reverse) on either corner.
    pub fn has_unpaired_coordinate(&self) -> bool {
        self.north.is_set != self.west.is_set || self.south.is_set != self.east.is_set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisStatus {
    pub is_set: bool,
    pub is_valid: bool,
}

impl AxisStatus {
    fn of(value: &str, (min, max): (f64, f64)) -> Self {
        Self {
            is_set: is_set(value),
            is_valid: validate_coordinate(value, min, max),
        }
    }

    /// Set but unparsable or out of range.
    pub fn is_out_of_range(&self) -> bool {
        self.is_set && !self.is_valid
    }
}

/// Returns whether `value` is a finite number within `[min, max]`.
///
/// Surrounding whitespace is ignored; an empty value is never valid.
pub fn validate_coordinate(value: &str, min: f64, max: f64) -> bool {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed >= min && parsed <= max,
        _ => false,
    }
}

fn is_set(value: &str) -> bool {
    !value.is_empty()
}
