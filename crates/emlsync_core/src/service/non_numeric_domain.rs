//! Edit session for the non-numeric domain of one attribute.

use crate::change::ChangeNotifier;
use crate::model::domain::{
    CodeDefinition, DomainFragment, DomainKind, EnumeratedDomain, MeasurementScaleKind,
    TextDomain,
};
use crate::parse::{parse_non_numeric_domain, ParseResult};
use crate::sync::synchronize_non_numeric_domain;
use crate::validate::{validate_non_numeric_domain, ValidationEvent, ValidationState, ValidationTracker};
use crate::xml::Element;

/// Non-numeric domain aggregate.
///
/// Editing helpers always act on the first domain, which is the one an
/// attribute editor works on.
#[derive(Debug)]
pub struct NonNumericDomain {
    measurement_scale: Option<MeasurementScaleKind>,
    domains: Vec<DomainFragment>,
    fragment: Option<Element>,
    notifier: ChangeNotifier,
    validation: ValidationTracker,
}

impl NonNumericDomain {
    /// Empty aggregate for authoring new content.
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self {
            measurement_scale: None,
            domains: Vec::new(),
            fragment: None,
            notifier,
            validation: ValidationTracker::new(),
        }
    }

    /// Parses `fragment` and keeps it as the baseline for synchronization.
    ///
    /// # Errors
    /// - `SchemaViolation` when the root is not a measurement-scale element.
    pub fn from_fragment(fragment: Element, notifier: ChangeNotifier) -> ParseResult<Self> {
        let parsed = parse_non_numeric_domain(&fragment)?;
        Ok(Self {
            measurement_scale: parsed.measurement_scale,
            domains: parsed.domains,
            fragment: Some(fragment),
            notifier,
            validation: ValidationTracker::new(),
        })
    }

    /// Parses raw XML text, then behaves like [`Self::from_fragment`].
    pub fn from_xml_str(input: &str, notifier: ChangeNotifier) -> ParseResult<Self> {
        Self::from_fragment(Element::parse_str(input)?, notifier)
    }

    pub fn measurement_scale(&self) -> Option<MeasurementScaleKind> {
        self.measurement_scale
    }

    pub fn domains(&self) -> &[DomainFragment] {
        &self.domains
    }

    /// Baseline fragment: the parsed input or the last committed output.
    pub fn fragment(&self) -> Option<&Element> {
        self.fragment.as_ref()
    }

    pub fn validation_state(&self) -> &ValidationState {
        self.validation.state()
    }

    pub fn set_measurement_scale(&mut self, kind: MeasurementScaleKind) {
        self.measurement_scale = Some(kind);
        self.notifier.notify_changed();
    }

    pub fn set_domains(&mut self, domains: Vec<DomainFragment>) {
        self.domains = domains;
        self.notifier.notify_changed();
    }

    /// Makes the first domain a text domain, keeping its identifier.
    pub fn set_text_domain(&mut self, domain: TextDomain) {
        self.replace_first(DomainKind::Text(domain));
        self.notifier.notify_changed();
    }

    /// Makes the first domain accept any text.
    pub fn set_any_text(&mut self) {
        self.set_text_domain(TextDomain::any_text());
    }

    /// Edits row `index` of the first domain's code list.
    ///
    /// # Contract
    /// - Whitespace-only input counts as empty.
    /// - A first domain that is not a code list is replaced by a new code
    ///   list holding this row.
    /// - Both values empty removes the row.
    /// - An index at or past the end appends a row.
    /// - Fires one change signal.
    pub fn update_code_definition(&mut self, index: usize, code: &str, definition: &str) {
        let code = normalize(code);
        let definition = normalize(definition);

        match self.first_code_rows_mut() {
            Some(rows) => {
                if code.is_empty() && definition.is_empty() {
                    if index < rows.len() {
                        rows.remove(index);
                    }
                } else if let Some(row) = rows.get_mut(index) {
                    row.code = code;
                    row.definition = definition;
                } else {
                    rows.push(CodeDefinition::new(code, definition));
                }
            }
            None => self.replace_first(DomainKind::Enumerated(EnumeratedDomain::CodeDefinitions(
                vec![CodeDefinition::new(code, definition)],
            ))),
        }
        self.notifier.notify_changed();
    }

    /// Removes row `index` of the first domain's code list, if present.
    pub fn remove_code_definition(&mut self, index: usize) -> Option<CodeDefinition> {
        let rows = self.first_code_rows_mut()?;
        if index >= rows.len() {
            return None;
        }
        let removed = rows.remove(index);
        self.notifier.notify_changed();
        Some(removed)
    }

    /// Builds the updated fragment without adopting it.
    pub fn synchronize(&self) -> ParseResult<Element> {
        synchronize_non_numeric_domain(
            self.measurement_scale,
            &self.domains,
            self.fragment.as_ref(),
        )
    }

    /// Synchronizes and adopts the result as the new baseline.
    pub fn commit(&mut self) -> ParseResult<&Element> {
        let updated = self.synchronize()?;
        let baseline: &Element = self.fragment.insert(updated);
        Ok(baseline)
    }

    /// Validates the first domain and records the outcome.
    pub fn validate(&mut self) -> ValidationEvent {
        self.validation
            .record(validate_non_numeric_domain(&self.domains))
    }

    fn replace_first(&mut self, kind: DomainKind) {
        match self.domains.first_mut() {
            Some(first) => first.kind = kind,
            None => self.domains.push(DomainFragment::new(kind)),
        }
    }

    fn first_code_rows_mut(&mut self) -> Option<&mut Vec<CodeDefinition>> {
        match self.domains.first_mut().map(|domain| &mut domain.kind) {
            Some(DomainKind::Enumerated(EnumeratedDomain::CodeDefinitions(rows))) => Some(rows),
            _ => None,
        }
    }
}

fn normalize(value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::NonNumericDomain;
    use crate::change::{ChangeNotifier, PackageDirtyFlag};
    use crate::model::domain::MeasurementScaleKind;
    use crate::validate::ValidationEvent;

    #[test]
    fn update_code_definition_creates_appends_and_removes() {
        let flag = PackageDirtyFlag::new();
        let mut domain = NonNumericDomain::new(flag.notifier());

        domain.update_code_definition(0, "A", "Alpha");
        domain.update_code_definition(5, "B", "Beta");
        domain.update_code_definition(0, " ", "");

        let rows = domain.domains()[0].code_rows().expect("code list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "B");
        assert_eq!(flag.signal_count(), 3);
    }

    #[test]
    fn update_replaces_text_domain_with_code_list_keeping_id() {
        let mut domain = NonNumericDomain::from_xml_str(
            "<nominal><nonNumericDomain><textDomain id=\"d1\"><definition>x</definition>\
             </textDomain></nonNumericDomain></nominal>",
            ChangeNotifier::detached(),
        )
        .expect("parse");
        domain.update_code_definition(0, "A", "Alpha");

        assert_eq!(domain.domains()[0].id, "d1");
        assert!(domain.domains()[0].code_rows().is_some());
    }

    #[test]
    fn remove_out_of_range_row_is_silent() {
        let flag = PackageDirtyFlag::new();
        let mut domain = NonNumericDomain::new(flag.notifier());
        assert!(domain.remove_code_definition(0).is_none());
        assert_eq!(flag.signal_count(), 0);
    }

    #[test]
    fn commit_adopts_baseline_and_validate_reports_transition() {
        let mut domain = NonNumericDomain::new(ChangeNotifier::detached());
        assert!(!domain.validate().is_valid());

        domain.set_any_text();
        domain.set_measurement_scale(MeasurementScaleKind::Ordinal);
        assert_eq!(domain.validate(), ValidationEvent::BecameValid);

        let committed = domain.commit().expect("commit").clone();
        assert!(committed.is_named("ordinal"));
        assert_eq!(domain.fragment(), Some(&committed));
    }
}
