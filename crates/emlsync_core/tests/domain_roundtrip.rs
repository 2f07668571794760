use emlsync_core::model::domain::{CodesetReference, EntityCodeList, ExternalCodeSet};
use emlsync_core::{
    parse_non_numeric_domain, synchronize_non_numeric_domain, DomainFragment, DomainKind, Element,
    EnumeratedDomain, MeasurementScaleKind, ParseError, TextDomain,
};

const TEXT_FRAGMENT: &str = r#"<nominal>
    <nonNumericDomain>
        <textDomain id="site-name">
            <definition>Name of the sampling site</definition>
            <pattern>[A-Z]{3}-\d+</pattern>
            <source>Field notebook</source>
        </textDomain>
    </nonNumericDomain>
</nominal>"#;

const ENUMERATED_FRAGMENT: &str = r#"<measurementScale>
    <ordinal>
        <nonNumericDomain>
            <enumeratedDomain id="cover-class">
                <codeDefinition><code>1</code><definition>Sparse</definition></codeDefinition>
                <codeDefinition><code>2</code><definition>Dense</definition><source>Survey</source></codeDefinition>
            </enumeratedDomain>
        </nonNumericDomain>
    </ordinal>
</measurementScale>"#;

fn parse(input: &str) -> Element {
    Element::parse_str(input).expect("fixture should be well-formed")
}

fn assert_round_trip(input: &str) {
    let fragment = parse(input);
    let parsed = parse_non_numeric_domain(&fragment).expect("first parse");

    let synced =
        synchronize_non_numeric_domain(parsed.measurement_scale, &parsed.domains, Some(&fragment))
            .expect("sync with unmodified model");
    let reparsed = parse_non_numeric_domain(&synced).expect("second parse");

    assert_eq!(reparsed, parsed);
}

#[test]
fn text_domain_round_trip_is_stable() {
    assert_round_trip(TEXT_FRAGMENT);

    let parsed = parse_non_numeric_domain(&parse(TEXT_FRAGMENT)).expect("parse");
    let text = parsed.domains[0].as_text().expect("text domain");
    assert_eq!(text.definition, "Name of the sampling site");
    assert_eq!(text.pattern, vec![r"[A-Z]{3}-\d+".to_string()]);
    assert_eq!(text.source.as_deref(), Some("Field notebook"));
}

#[test]
fn enumerated_domain_round_trip_is_stable() {
    assert_round_trip(ENUMERATED_FRAGMENT);

    let parsed = parse_non_numeric_domain(&parse(ENUMERATED_FRAGMENT)).expect("parse");
    assert_eq!(parsed.measurement_scale, Some(MeasurementScaleKind::Ordinal));
    let rows = parsed.domains[0].code_rows().expect("code rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].source.as_deref(), Some("Survey"));
}

#[test]
fn external_code_set_survives_synchronization() {
    let input = r#"<nominal><nonNumericDomain><enumeratedDomain id="taxa">
        <externalCodeSet>
            <codesetName>ITIS</codesetName>
            <citation><title>Integrated Taxonomic Information System</title></citation>
            <codesetURL>https://www.itis.gov</codesetURL>
        </externalCodeSet>
    </enumeratedDomain></nonNumericDomain></nominal>"#;
    assert_round_trip(input);

    let parsed = parse_non_numeric_domain(&parse(input)).expect("parse");
    match parsed.domains[0].as_enumerated() {
        Some(EnumeratedDomain::ExternalCodeSet(code_set)) => {
            assert_eq!(code_set.codeset_name, "ITIS");
            assert_eq!(code_set.references.len(), 2);
            assert!(matches!(code_set.references[0], CodesetReference::Citation(_)));
            assert_eq!(
                code_set.references[1],
                CodesetReference::Url("https://www.itis.gov".to_string())
            );
        }
        other => panic!("expected external code set, got {other:?}"),
    }
}

#[test]
fn entity_code_list_is_written_from_model() {
    let domain = DomainFragment::with_id(
        "species",
        DomainKind::Enumerated(EnumeratedDomain::EntityCodeList(EntityCodeList {
            entity_reference: "species-table".to_string(),
            value_attribute_reference: "code".to_string(),
            definition_attribute_reference: "name".to_string(),
            order_attribute_reference: None,
        })),
    );

    let out = synchronize_non_numeric_domain(None, &[domain], None).expect("sync");
    assert_eq!(
        out.to_xml_string().expect("write"),
        "<nominal><nonNumericDomain><enumeratedDomain id=\"species\"><entityCodeList>\
         <entityReference>species-table</entityReference>\
         <valueAttributeReference>code</valueAttributeReference>\
         <definitionAttributeReference>name</definitionAttributeReference>\
         </entityCodeList></enumeratedDomain></nonNumericDomain></nominal>"
    );
}

#[test]
fn non_ncname_id_is_kept_as_written() {
    let fragment = parse(
        r#"<nominal>
            <nonNumericDomain><textDomain id="urn:uuid:1234"><definition>Plot</definition></textDomain></nonNumericDomain>
            <nonNumericDomain><textDomain id=" padded "><definition>Depth</definition></textDomain></nonNumericDomain>
        </nominal>"#,
    );
    let parsed = parse_non_numeric_domain(&fragment).expect("parse");
    assert_eq!(parsed.domains[0].id, "urn:uuid:1234");
    assert_eq!(parsed.domains[1].id, " padded ");

    let mut model = parsed.domains.clone();
    model.truncate(1);
    let out = synchronize_non_numeric_domain(parsed.measurement_scale, &model, Some(&fragment))
        .expect("sync");

    let wrappers: Vec<&Element> = out.children_named("nonNumericDomain").collect();
    assert_eq!(wrappers.len(), 1);
    assert_eq!(
        wrappers[0].child("textDomain").and_then(|domain| domain.attribute("id")),
        Some("urn:uuid:1234")
    );
    assert!(out.find_by_id("urn:uuid:1234").is_some());
}

#[test]
fn permuted_model_updates_nodes_in_place_by_id() {
    let previous = parse(
        r#"<nominal>
            <nonNumericDomain><textDomain id="a"><definition>first</definition></textDomain></nonNumericDomain>
            <nonNumericDomain><textDomain id="b"><definition>second</definition></textDomain></nonNumericDomain>
        </nominal>"#,
    );
    let model = vec![
        DomainFragment::with_id("b", DomainKind::Text(TextDomain::new("second, edited"))),
        DomainFragment::with_id("a", DomainKind::Text(TextDomain::new("first, edited"))),
    ];

    let out = synchronize_non_numeric_domain(None, &model, Some(&previous)).expect("sync");
    let definitions: Vec<(String, String)> = out
        .children_named("nonNumericDomain")
        .filter_map(|wrapper| wrapper.child("textDomain"))
        .map(|domain| {
            (
                domain.attribute("id").unwrap_or_default().to_string(),
                domain.child_text("definition").unwrap_or_default(),
            )
        })
        .collect();

    assert_eq!(
        definitions,
        vec![
            ("a".to_string(), "first, edited".to_string()),
            ("b".to_string(), "second, edited".to_string()),
        ]
    );
}

#[test]
fn references_wrapper_is_skipped_and_kept() {
    let input = parse(
        r#"<nominal>
            <nonNumericDomain><references>shared-domain</references></nonNumericDomain>
            <nonNumericDomain><textDomain id="t"><definition>Notes</definition></textDomain></nonNumericDomain>
        </nominal>"#,
    );

    let parsed = parse_non_numeric_domain(&input).expect("references must not fail parsing");
    assert_eq!(parsed.domains.len(), 1);
    assert_eq!(parsed.domains[0].id, "t");

    let out = synchronize_non_numeric_domain(parsed.measurement_scale, &parsed.domains, Some(&input))
        .expect("sync");
    assert_eq!(out.count_children_named("nonNumericDomain"), 2);
    assert!(out
        .to_xml_string()
        .expect("write")
        .contains("<references>shared-domain</references>"));
}

#[test]
fn removed_model_entry_drops_its_wrapper() {
    let previous = parse(
        r#"<nominal>
            <nonNumericDomain><textDomain id="keep"><definition>k</definition></textDomain></nonNumericDomain>
            <nonNumericDomain><textDomain id="drop"><definition>d</definition></textDomain></nonNumericDomain>
        </nominal>"#,
    );
    let model = vec![DomainFragment::with_id(
        "keep",
        DomainKind::Text(TextDomain::new("k")),
    )];

    let out = synchronize_non_numeric_domain(None, &model, Some(&previous)).expect("sync");
    assert_eq!(out.count_children_named("nonNumericDomain"), 1);
    assert!(out.find_by_id("drop").is_none());
}

#[test]
fn unknown_root_is_a_schema_violation() {
    let error = parse_non_numeric_domain(&parse("<ratio/>")).expect_err("ratio is not handled");
    match error {
        ParseError::SchemaViolation { found, .. } => assert_eq!(found, "ratio"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn external_code_set_model_can_be_built_from_scratch() {
    let domain = DomainFragment::with_id(
        "codes",
        DomainKind::Enumerated(EnumeratedDomain::ExternalCodeSet(ExternalCodeSet {
            codeset_name: "FIPS".to_string(),
            references: vec![CodesetReference::Url("https://example.org/fips".to_string())],
        })),
    );

    let out = synchronize_non_numeric_domain(Some(MeasurementScaleKind::Nominal), &[domain], None)
        .expect("sync");
    let xml = out.to_xml_string().expect("write");
    assert!(xml.contains("<codesetName>FIPS</codesetName>"));
    assert!(xml.contains("<codesetURL>https://example.org/fips</codesetURL>"));
}
