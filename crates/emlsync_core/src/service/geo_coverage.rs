//! Edit session for one geographic coverage entry.

use crate::change::ChangeNotifier;
use crate::model::coverage::{BoundingBox, CoordinateStatus};
use crate::parse::{parse_geo_coverage, ParseResult};
use crate::sync::synchronize_geo_coverage;
use crate::validate::{validate_geo_coverage, ValidationEvent, ValidationState, ValidationTracker};
use crate::xml::Element;

#[derive(Debug)]
pub struct GeoCoverage {
    bounding_box: BoundingBox,
    fragment: Option<Element>,
    notifier: ChangeNotifier,
    validation: ValidationTracker,
}

impl GeoCoverage {
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self {
            bounding_box: BoundingBox::default(),
            fragment: None,
            notifier,
            validation: ValidationTracker::new(),
        }
    }

    pub fn from_fragment(fragment: Element, notifier: ChangeNotifier) -> ParseResult<Self> {
        let bounding_box = parse_geo_coverage(&fragment)?;
        Ok(Self {
            bounding_box,
            fragment: Some(fragment),
            notifier,
            validation: ValidationTracker::new(),
        })
    }

    pub fn from_xml_str(input: &str, notifier: ChangeNotifier) -> ParseResult<Self> {
        Self::from_fragment(Element::parse_str(input)?, notifier)
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn fragment(&self) -> Option<&Element> {
        self.fragment.as_ref()
    }

    pub fn validation_state(&self) -> &ValidationState {
        self.validation.state()
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.bounding_box.description = value.into();
        self.notifier.notify_changed();
    }

    pub fn set_north(&mut self, value: impl Into<String>) {
        self.bounding_box.north = value.into();
        self.notifier.notify_changed();
    }

    pub fn set_south(&mut self, value: impl Into<String>) {
        self.bounding_box.south = value.into();
        self.notifier.notify_changed();
    }

    pub fn set_east(&mut self, value: impl Into<String>) {
        self.bounding_box.east = value.into();
        self.notifier.notify_changed();
    }

    pub fn set_west(&mut self, value: impl Into<String>) {
        self.bounding_box.west = value.into();
        self.notifier.notify_changed();
    }

    pub fn coordinate_status(&self) -> CoordinateStatus {
        self.bounding_box.coordinate_status()
    }

    /// Builds the updated fragment without adopting it. The model itself is
    /// not mirrored; only the output is.
    pub fn synchronize(&self) -> ParseResult<Element> {
        synchronize_geo_coverage(&self.bounding_box, self.fragment.as_ref())
    }

    pub fn commit(&mut self) -> ParseResult<&Element> {
        let updated = self.synchronize()?;
        let baseline: &Element = self.fragment.insert(updated);
        Ok(baseline)
    }

    pub fn validate(&mut self) -> ValidationEvent {
        self.validation.record(validate_geo_coverage(&self.bounding_box))
    }

    /// All current validation messages joined by a single space; empty when
    /// valid. Does not record a validation outcome.
    pub fn error_message(&self) -> String {
        validate_geo_coverage(&self.bounding_box).summary()
    }
}

#[cfg(test)]
mod tests {
    use super::GeoCoverage;
    use crate::change::PackageDirtyFlag;
    use crate::validate::{COORDINATE_PAIR_MESSAGE, DESCRIPTION_MESSAGE};

    #[test]
    fn every_setter_fires_one_signal() {
        let flag = PackageDirtyFlag::new();
        let mut coverage = GeoCoverage::new(flag.notifier());

        coverage.set_description("Ridge");
        coverage.set_north("1");
        coverage.set_south("1");
        coverage.set_east("2");
        coverage.set_west("2");

        assert_eq!(flag.signal_count(), 5);
        assert!(coverage.validate().is_valid());
    }

    #[test]
    fn error_message_joins_in_rule_order() {
        let coverage = GeoCoverage::new(PackageDirtyFlag::new().notifier());
        assert_eq!(
            coverage.error_message(),
            format!("{DESCRIPTION_MESSAGE} {COORDINATE_PAIR_MESSAGE}")
        );
    }
}
