use super::matcher::{DomainMatch, DomainMatcher};
use super::{set_or_remove_child, CODE_DEFINITION_ORDER, TEXT_DOMAIN_ORDER};
use crate::model::domain::{
    CodeDefinition, CodesetReference, DomainFragment, DomainKind, EntityCodeList,
    EnumeratedDomain, ExternalCodeSet, MeasurementScaleKind, TextDomain,
};
use crate::parse::{
    is_supported_domain, require_root, scale_element, supported_domain, ParseResult,
    DOMAIN_ROOTS,
};
use crate::xml::names::{
    CODE, CODESET_NAME, CODESET_URL, CODE_DEFINITION, DEFINITION, DEFINITION_ATTRIBUTE_REFERENCE,
    ENTITY_CODE_LIST, ENTITY_REFERENCE, EXTERNAL_CODE_SET, ID_ATTRIBUTE, MEASUREMENT_SCALE,
    NON_NUMERIC_DOMAIN, ORDER_ATTRIBUTE_REFERENCE, PATTERN, SOURCE, VALUE_ATTRIBUTE_REFERENCE,
};
use crate::xml::{Element, NodePath, XmlNode};
use log::{debug, info, warn};
use std::collections::HashSet;

const MODULE: &str = "sync_domain";

/// Merges `domains` into a clone of `previous` (or a new scale element).
///
/// Each entry is placed by identifier, then by position, else appended as a
/// new `nonNumericDomain`. Wrappers holding a text or enumerated domain that
/// no entry claimed are removed afterwards; wrappers holding anything else
/// are kept.
///
/// `scale` `None` falls back to the previous scale element, then to nominal.
///
/// # Errors
/// - `SchemaViolation` when `previous` is not a measurement-scale fragment.
pub fn synchronize_non_numeric_domain(
    scale: Option<MeasurementScaleKind>,
    domains: &[DomainFragment],
    previous: Option<&Element>,
) -> ParseResult<Element> {
    let previous_scale = match previous {
        Some(fragment) => {
            require_root(fragment, DOMAIN_ROOTS)?;
            scale_element(fragment)?
                .and_then(|element| MeasurementScaleKind::from_element_name(element.local_name()))
        }
        None => None,
    };
    let kind = match scale.or(previous_scale) {
        Some(kind) => kind,
        None => {
            info!(
                "event=scale_defaulted module={MODULE} status=ok scale={}",
                MeasurementScaleKind::Nominal.element_name()
            );
            MeasurementScaleKind::Nominal
        }
    };

    let mut root = previous
        .cloned()
        .unwrap_or_else(|| Element::new(kind.element_name()));
    if root.is_named(MEASUREMENT_SCALE) {
        if root.first_element().is_none() {
            root.append_child(Element::new(kind.element_name()));
        }
        if let Some(scale_node) = root.first_element_mut() {
            write_scale(scale_node, kind, domains);
        }
    } else {
        write_scale(&mut root, kind, domains);
    }
    Ok(root)
}

/// Renames `scale_node` to `kind`, then places every domain in it.
fn write_scale(scale_node: &mut Element, kind: MeasurementScaleKind, domains: &[DomainFragment]) {
    if !scale_node.is_named(kind.element_name()) {
        scale_node.rename(kind.element_name());
    }

    let matcher = DomainMatcher::new(scale_node, domains);
    for (position, fragment) in domains.iter().enumerate() {
        let matched = matcher.match_domain(scale_node, position, fragment);
        debug!(
            "event=domain_match module={MODULE} status=ok position={} strategy={}",
            position,
            strategy_name(&matched)
        );
        match matched {
            DomainMatch::ById(path) => apply_at_path(scale_node, &path, fragment),
            DomainMatch::ByPosition(index) => {
                if let Some(wrapper) = scale_node.element_at_index_mut(index) {
                    apply_in_wrapper(wrapper, fragment);
                }
            }
            DomainMatch::None => scale_node.append_child(build_wrapper(fragment)),
        }
    }
    remove_stale_wrappers(scale_node, domains);
}

fn strategy_name(matched: &DomainMatch) -> &'static str {
    match matched {
        DomainMatch::ById(_) => "by_id",
        DomainMatch::ByPosition(_) => "by_position",
        DomainMatch::None => "append",
    }
}

fn apply_at_path(scale: &mut Element, path: &NodePath, fragment: &DomainFragment) {
    match scale.element_at_mut(path) {
        Some(target) => convert_or_update(target, fragment),
        None => warn!("event=domain_match module={MODULE} status=error reason=stale_path"),
    }
}

fn apply_in_wrapper(wrapper: &mut Element, fragment: &DomainFragment) {
    let existing = wrapper
        .nodes()
        .iter()
        .position(|node| node.as_element().is_some_and(is_supported_domain));
    match existing.and_then(|index| wrapper.element_at_index_mut(index)) {
        Some(target) => convert_or_update(target, fragment),
        None => wrapper.append_child(build_domain(fragment)),
    }
}

/// Updates `target` in place, or swaps it for a freshly built element when
/// the model kind differs from the tree kind.
fn convert_or_update(target: &mut Element, fragment: &DomainFragment) {
    if target.is_named(fragment.kind.element_name()) {
        update_domain(target, fragment);
    } else {
        debug!(
            "event=domain_convert module={MODULE} status=ok from={} to={}",
            target.local_name(),
            fragment.kind.element_name()
        );
        *target = build_domain(fragment);
    }
}

fn build_wrapper(fragment: &DomainFragment) -> Element {
    let mut wrapper = Element::new(NON_NUMERIC_DOMAIN);
    wrapper.append_child(build_domain(fragment));
    wrapper
}

fn build_domain(fragment: &DomainFragment) -> Element {
    let mut domain = Element::new(fragment.kind.element_name());
    update_domain(&mut domain, fragment);
    domain
}

fn update_domain(domain: &mut Element, fragment: &DomainFragment) {
    domain.set_attribute(ID_ATTRIBUTE, fragment.id.as_str());
    match &fragment.kind {
        DomainKind::Text(text) => sync_text_domain(domain, text),
        DomainKind::Enumerated(enumerated) => sync_enumerated_domain(domain, enumerated),
    }
}

fn sync_text_domain(domain: &mut Element, text: &TextDomain) {
    set_or_remove_child(domain, DEFINITION, &text.definition, TEXT_DOMAIN_ORDER);

    domain.remove_children_named(PATTERN);
    for pattern in text.pattern.iter().filter(|pattern| !pattern.trim().is_empty()) {
        domain.insert_before_named(Element::with_text(PATTERN, pattern), SOURCE);
    }

    set_or_remove_child(
        domain,
        SOURCE,
        text.source.as_deref().unwrap_or_default(),
        TEXT_DOMAIN_ORDER,
    );
}

fn sync_enumerated_domain(domain: &mut Element, enumerated: &EnumeratedDomain) {
    match enumerated {
        EnumeratedDomain::CodeDefinitions(rows) => {
            domain.remove_children_named(EXTERNAL_CODE_SET);
            domain.remove_children_named(ENTITY_CODE_LIST);
            sync_code_rows(domain, rows);
        }
        EnumeratedDomain::ExternalCodeSet(code_set) => {
            remove_enumerated_variants(domain);
            domain.append_child(build_external_code_set(code_set));
        }
        EnumeratedDomain::EntityCodeList(code_list) => {
            remove_enumerated_variants(domain);
            domain.append_child(build_entity_code_list(code_list));
        }
    }
}

fn remove_enumerated_variants(domain: &mut Element) {
    for name in [CODE_DEFINITION, EXTERNAL_CODE_SET, ENTITY_CODE_LIST] {
        domain.remove_children_named(name);
    }
}

/// Row `j` of the tree follows row `j` of the model; surplus tree rows go.
fn sync_code_rows(domain: &mut Element, rows: &[CodeDefinition]) {
    for (index, row) in rows.iter().enumerate() {
        match domain.nth_child_named_mut(CODE_DEFINITION, index) {
            Some(existing) => sync_code_row(existing, row),
            None => {
                let mut created = Element::new(CODE_DEFINITION);
                sync_code_row(&mut created, row);
                domain.append_child(created);
            }
        }
    }
    let removed = domain.truncate_children_named(CODE_DEFINITION, rows.len());
    if removed > 0 {
        debug!("event=code_rows_trimmed module={MODULE} status=ok removed={removed}");
    }
}

fn sync_code_row(element: &mut Element, row: &CodeDefinition) {
    set_or_remove_child(element, CODE, &row.code, CODE_DEFINITION_ORDER);
    set_or_remove_child(element, DEFINITION, &row.definition, CODE_DEFINITION_ORDER);
    set_or_remove_child(
        element,
        SOURCE,
        row.source.as_deref().unwrap_or_default(),
        CODE_DEFINITION_ORDER,
    );
}

fn build_external_code_set(code_set: &ExternalCodeSet) -> Element {
    let mut element = Element::new(EXTERNAL_CODE_SET);
    if !code_set.codeset_name.trim().is_empty() {
        element.append_child(Element::with_text(CODESET_NAME, &code_set.codeset_name));
    }
    for reference in &code_set.references {
        match reference {
            CodesetReference::Url(url) if url.trim().is_empty() => {}
            CodesetReference::Url(url) => element.append_child(Element::with_text(CODESET_URL, url)),
            CodesetReference::Citation(citation) => element.append_child(citation.clone()),
        }
    }
    element
}

fn build_entity_code_list(code_list: &EntityCodeList) -> Element {
    let mut element = Element::new(ENTITY_CODE_LIST);
    let fields = [
        (ENTITY_REFERENCE, code_list.entity_reference.as_str()),
        (VALUE_ATTRIBUTE_REFERENCE, code_list.value_attribute_reference.as_str()),
        (
            DEFINITION_ATTRIBUTE_REFERENCE,
            code_list.definition_attribute_reference.as_str(),
        ),
        (
            ORDER_ATTRIBUTE_REFERENCE,
            code_list.order_attribute_reference.as_deref().unwrap_or_default(),
        ),
    ];
    for (name, value) in fields {
        if !value.trim().is_empty() {
            element.append_child(Element::with_text(name, value));
        }
    }
    element
}

/// Removes wrappers whose text/enumerated domain carries no model id.
fn remove_stale_wrappers(scale: &mut Element, domains: &[DomainFragment]) {
    let claimed: HashSet<&str> = domains.iter().map(|domain| domain.id.as_str()).collect();
    let stale: Vec<usize> = scale
        .positions_named(NON_NUMERIC_DOMAIN)
        .into_iter()
        .filter(|index| {
            scale
                .element_at_index(*index)
                .and_then(supported_domain)
                .is_some_and(|domain| {
                    !domain
                        .attribute(ID_ATTRIBUTE)
                        .is_some_and(|id| claimed.contains(id))
                })
        })
        .collect();
    for index in stale.iter().rev() {
        if let Some(XmlNode::Element(removed)) = scale.remove_node(*index) {
            debug!(
                "event=stale_domain_removed module={MODULE} status=ok id={}",
                supported_domain(&removed)
                    .and_then(|domain| domain.attribute(ID_ATTRIBUTE))
                    .unwrap_or("none")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::synchronize_non_numeric_domain;
    use crate::model::domain::{
        CodeDefinition, DomainFragment, DomainKind, EnumeratedDomain, MeasurementScaleKind,
        TextDomain,
    };
    use crate::xml::Element;

    fn text_domain(id: &str, definition: &str) -> DomainFragment {
        DomainFragment::with_id(id, DomainKind::Text(TextDomain::new(definition)))
    }

    #[test]
    fn creates_nominal_scale_when_nothing_exists() {
        let out = synchronize_non_numeric_domain(None, &[text_domain("d1", "Plot")], None)
            .expect("sync without previous fragment");
        assert_eq!(
            out.to_xml_string().expect("write"),
            "<nominal><nonNumericDomain><textDomain id=\"d1\"><definition>Plot</definition>\
             </textDomain></nonNumericDomain></nominal>"
        );
    }

    #[test]
    fn keeps_measurement_scale_wrapper_and_renames_scale() {
        let previous = Element::parse_str(
            "<measurementScale><nominal><nonNumericDomain><textDomain id=\"d1\">\
             <definition>old</definition></textDomain></nonNumericDomain></nominal></measurementScale>",
        )
        .expect("parse");
        let out = synchronize_non_numeric_domain(
            Some(MeasurementScaleKind::Ordinal),
            &[text_domain("d1", "new")],
            Some(&previous),
        )
        .expect("sync");

        assert!(out.is_named("measurementScale"));
        let scale = out.first_element().expect("scale child");
        assert!(scale.is_named("ordinal"));
        assert!(previous.to_xml_string().expect("write").contains("old"));
    }

    #[test]
    fn patterns_are_rebuilt_before_source() {
        let previous = Element::parse_str(
            "<nominal><nonNumericDomain><textDomain id=\"d1\"><definition>d</definition>\
             <pattern>old</pattern><source>book</source></textDomain></nonNumericDomain></nominal>",
        )
        .expect("parse");
        let fragment = DomainFragment::with_id(
            "d1",
            DomainKind::Text(TextDomain {
                definition: "d".to_string(),
                pattern: vec!["a".to_string(), " ".to_string(), "b".to_string()],
                source: Some("book".to_string()),
            }),
        );
        let out = synchronize_non_numeric_domain(None, &[fragment], Some(&previous)).expect("sync");
        let domain = out
            .child("nonNumericDomain")
            .and_then(|wrapper| wrapper.child("textDomain"))
            .expect("text domain");
        let names: Vec<&str> = domain.elements().map(Element::name).collect();

        assert_eq!(names, ["definition", "pattern", "pattern", "source"]);
        assert_eq!(domain.children_text("pattern"), ["a", "b"]);
    }

    #[test]
    fn converts_text_domain_to_code_list_in_place() {
        let previous = Element::parse_str(
            "<nominal><nonNumericDomain><textDomain id=\"old\"><definition>d</definition>\
             </textDomain></nonNumericDomain></nominal>",
        )
        .expect("parse");
        let fragment = DomainFragment::with_id(
            "new",
            DomainKind::Enumerated(EnumeratedDomain::CodeDefinitions(vec![CodeDefinition::new(
                "A", "Alpha",
            )])),
        );
        let out = synchronize_non_numeric_domain(None, &[fragment], Some(&previous)).expect("sync");
        let wrappers: Vec<&Element> = out.children_named("nonNumericDomain").collect();

        assert_eq!(wrappers.len(), 1);
        let domain = wrappers[0].child("enumeratedDomain").expect("converted");
        assert_eq!(domain.attribute("id"), Some("new"));
        assert!(wrappers[0].child("textDomain").is_none());
    }

    #[test]
    fn empty_measurement_scale_gets_a_scale_child() {
        let previous = Element::parse_str("<measurementScale/>").expect("parse");
        let out = synchronize_non_numeric_domain(
            Some(MeasurementScaleKind::Ordinal),
            &[text_domain("d1", "rank")],
            Some(&previous),
        )
        .expect("sync");

        assert_eq!(
            out.to_xml_string().expect("write"),
            "<measurementScale><ordinal><nonNumericDomain><textDomain id=\"d1\">\
             <definition>rank</definition></textDomain></nonNumericDomain></ordinal>\
             </measurementScale>"
        );
    }

    #[test]
    fn rejects_non_scale_previous_fragment() {
        let previous = Element::new("geographicCoverage");
        assert!(synchronize_non_numeric_domain(None, &[], Some(&previous)).is_err());
    }
}
