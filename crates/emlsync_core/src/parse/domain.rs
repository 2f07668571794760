use super::{
    optional_child_text, require_root, trimmed_child_text, ParseResult, DOMAIN_ROOTS,
    SCALE_ROOTS,
};
use crate::ids::resolve_id;
use crate::model::domain::{
    CodeDefinition, CodesetReference, DomainFragment, DomainKind, EntityCodeList,
    EnumeratedDomain, ExternalCodeSet, MeasurementScaleKind, TextDomain,
};
use crate::xml::names::{
    CITATION, CODESET_NAME, CODESET_URL, CODE, CODE_DEFINITION, DEFINITION,
    DEFINITION_ATTRIBUTE_REFERENCE, ENTITY_CODE_LIST, ENTITY_REFERENCE, ENUMERATED_DOMAIN,
    EXTERNAL_CODE_SET, MEASUREMENT_SCALE, NON_NUMERIC_DOMAIN, ORDER_ATTRIBUTE_REFERENCE,
    PATTERN, REFERENCES, SOURCE, TEXT_DOMAIN, VALUE_ATTRIBUTE_REFERENCE,
};
use crate::xml::Element;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const MODULE: &str = "parse_domain";

/// Result of reading a measurement-scale fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDomains {
    /// `None` only for an empty `measurementScale` wrapper.
    pub measurement_scale: Option<MeasurementScaleKind>,
    /// One entry per `nonNumericDomain` holding a text or enumerated domain.
    pub domains: Vec<DomainFragment>,
}

/// Reads the non-numeric domains of a `measurementScale`, `nominal` or
/// `ordinal` fragment.
///
/// # Errors
/// - `SchemaViolation` when the root, or the child of a `measurementScale`
///   wrapper, is not an accepted name.
pub fn parse_non_numeric_domain(fragment: &Element) -> ParseResult<ParsedDomains> {
    require_root(fragment, DOMAIN_ROOTS)?;
    let Some(scale) = scale_element(fragment)? else {
        debug!("event=domain_parse module={MODULE} status=ok scale=none count=0");
        return Ok(ParsedDomains::default());
    };

    let domains: Vec<DomainFragment> = scale
        .children_named(NON_NUMERIC_DOMAIN)
        .filter_map(parse_wrapper)
        .collect();
    debug!(
        "event=domain_parse module={MODULE} status=ok scale={} count={}",
        scale.local_name(),
        domains.len()
    );
    Ok(ParsedDomains {
        measurement_scale: MeasurementScaleKind::from_element_name(scale.local_name()),
        domains,
    })
}

/// Parses raw XML text, then reads it like [`parse_non_numeric_domain`].
pub fn parse_non_numeric_domain_str(input: &str) -> ParseResult<ParsedDomains> {
    parse_non_numeric_domain(&Element::parse_str(input)?)
}

/// The scale element: the root itself, or the child of a wrapper.
///
/// An empty wrapper has no scale element.
pub(crate) fn scale_element(fragment: &Element) -> ParseResult<Option<&Element>> {
    if !fragment.is_named(MEASUREMENT_SCALE) {
        return Ok(Some(fragment));
    }
    match fragment.first_element() {
        Some(scale) => {
            require_root(scale, SCALE_ROOTS)?;
            Ok(Some(scale))
        }
        None => Ok(None),
    }
}

/// Whether `element` is a domain the model can represent.
pub(crate) fn is_supported_domain(element: &Element) -> bool {
    element.is_named(TEXT_DOMAIN) || element.is_named(ENUMERATED_DOMAIN)
}

/// First supported domain inside a `nonNumericDomain` wrapper.
pub(crate) fn supported_domain(wrapper: &Element) -> Option<&Element> {
    wrapper.elements().find(|child| is_supported_domain(child))
}

fn parse_wrapper(wrapper: &Element) -> Option<DomainFragment> {
    let mut parsed: Option<DomainFragment> = None;
    for child in wrapper.elements() {
        if !is_supported_domain(child) {
            let reason = if child.is_named(REFERENCES) {
                "references"
            } else {
                "unrecognized"
            };
            warn!(
                "event=unsupported_construct module={MODULE} status=skip element={} reason={}",
                child.local_name(),
                reason
            );
            continue;
        }
        if parsed.is_some() {
            warn!(
                "event=unsupported_construct module={MODULE} status=skip element={} reason=extra_domain",
                child.local_name()
            );
            continue;
        }
        parsed = Some(parse_domain(child));
    }
    parsed
}

fn parse_domain(domain: &Element) -> DomainFragment {
    let id = resolve_id(domain, MODULE);
    let kind = if domain.is_named(TEXT_DOMAIN) {
        DomainKind::Text(parse_text_domain(domain))
    } else {
        DomainKind::Enumerated(parse_enumerated_domain(domain))
    };
    DomainFragment::with_id(id, kind)
}

fn parse_text_domain(domain: &Element) -> TextDomain {
    TextDomain {
        definition: trimmed_child_text(domain, DEFINITION),
        // Patterns are regular expressions; only blank ones are dropped.
        pattern: domain
            .children_text(PATTERN)
            .into_iter()
            .filter(|pattern| !pattern.trim().is_empty())
            .collect(),
        source: optional_child_text(domain, SOURCE),
    }
}

fn parse_enumerated_domain(domain: &Element) -> EnumeratedDomain {
    if domain.child(CODE_DEFINITION).is_some() {
        return EnumeratedDomain::CodeDefinitions(
            domain
                .children_named(CODE_DEFINITION)
                .map(parse_code_definition)
                .collect(),
        );
    }
    if let Some(code_set) = domain.child(EXTERNAL_CODE_SET) {
        return EnumeratedDomain::ExternalCodeSet(parse_external_code_set(code_set));
    }
    if let Some(code_list) = domain.child(ENTITY_CODE_LIST) {
        return EnumeratedDomain::EntityCodeList(parse_entity_code_list(code_list));
    }
    EnumeratedDomain::CodeDefinitions(Vec::new())
}

fn parse_code_definition(row: &Element) -> CodeDefinition {
    CodeDefinition {
        code: trimmed_child_text(row, CODE),
        definition: trimmed_child_text(row, DEFINITION),
        source: optional_child_text(row, SOURCE),
    }
}

fn parse_external_code_set(code_set: &Element) -> ExternalCodeSet {
    let references = code_set
        .elements()
        .filter_map(|child| {
            if child.is_named(CITATION) {
                Some(CodesetReference::Citation(child.clone()))
            } else if child.is_named(CODESET_URL) {
                Some(CodesetReference::Url(child.text().trim().to_string()))
            } else {
                None
            }
        })
        .collect();
    ExternalCodeSet {
        codeset_name: trimmed_child_text(code_set, CODESET_NAME),
        references,
    }
}

fn parse_entity_code_list(code_list: &Element) -> EntityCodeList {
    EntityCodeList {
        entity_reference: trimmed_child_text(code_list, ENTITY_REFERENCE),
        value_attribute_reference: trimmed_child_text(code_list, VALUE_ATTRIBUTE_REFERENCE),
        definition_attribute_reference: trimmed_child_text(
            code_list,
            DEFINITION_ATTRIBUTE_REFERENCE,
        ),
        order_attribute_reference: optional_child_text(code_list, ORDER_ATTRIBUTE_REFERENCE),
    }
}
