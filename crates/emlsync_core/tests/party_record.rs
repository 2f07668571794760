use emlsync_core::model::party::{Phone, UserId};
use emlsync_core::validate::{EMAIL_MESSAGE, NAME_MESSAGE};
use emlsync_core::xml::names::to_schema_name;
use emlsync_core::{
    parse_party, synchronize_party, validate_party, ChangeNotifier, Element, Party, PartyRecord,
    PartyType,
};

const RESPONSIBLE_PARTY: &str = r#"<responsibleParty>
    <individualName>
        <salutation>Dr.</salutation>
        <givenName>John</givenName>
        <surName>Doe</surName>
    </individualName>
    <organizationName>Environmental Research Institute</organizationName>
    <positionName>Lead Research Scientist</positionName>
    <electronicMailAddress>john.doe@eri.org</electronicMailAddress>
    <phone phonetype="voice">123-456-7890</phone>
    <address>
        <deliveryPoint>123 Green Street</deliveryPoint>
        <city>Ecotown</city>
        <administrativeArea>Greenland</administrativeArea>
        <postalCode>12345</postalCode>
        <country>USA</country>
    </address>
    <role>originator</role>
</responsibleParty>"#;

fn fixture() -> Element {
    Element::parse_str(RESPONSIBLE_PARTY).expect("fixture should be well-formed")
}

#[test]
fn parses_every_party_field() {
    let record = parse_party(&fixture()).expect("parse");

    assert_eq!(record.party_type, PartyType::ResponsibleParty);
    assert_eq!(record.individual_name.salutation, vec!["Dr.".to_string()]);
    assert_eq!(record.individual_name.given_name, vec!["John".to_string()]);
    assert_eq!(record.individual_name.sur_name, "Doe");
    assert_eq!(record.organization_name, "Environmental Research Institute");
    assert_eq!(record.position_name, "Lead Research Scientist");
    assert_eq!(record.email, vec!["john.doe@eri.org".to_string()]);
    assert_eq!(
        record.phone,
        vec![Phone {
            number: "123-456-7890".to_string(),
            phone_type: Some("voice".to_string()),
        }]
    );
    let address = &record.address[0];
    assert_eq!(address.delivery_point, vec!["123 Green Street".to_string()]);
    assert_eq!(address.city, "Ecotown");
    assert_eq!(address.administrative_area, "Greenland");
    assert_eq!(address.postal_code, "12345");
    assert_eq!(address.country, "USA");
    assert_eq!(record.role, vec!["originator".to_string()]);
    assert!(validate_party(&record).is_empty());
}

#[test]
fn missing_id_is_minted_and_written_back() {
    let fragment = fixture();
    let record = parse_party(&fragment).expect("parse");
    assert!(emlsync_core::is_valid_xml_id(&record.id));

    let out = synchronize_party(&record, Some(&fragment)).expect("sync");
    assert_eq!(out.attribute("id"), Some(record.id.as_str()));
}

#[test]
fn sync_reorders_fields_into_schema_order() {
    let fragment = fixture();
    let record = parse_party(&fragment).expect("parse");

    let out = synchronize_party(&record, Some(&fragment)).expect("sync");
    let order: Vec<&str> = out
        .elements()
        .map(|child| to_schema_name(child.name()))
        .collect();
    assert_eq!(
        order,
        vec![
            "individualName",
            "organizationName",
            "positionName",
            "address",
            "phone",
            "electronicMailAddress",
            "role",
        ]
    );
    assert_eq!(parse_party(&out).expect("re-parse"), record);
}

#[test]
fn non_ncname_party_id_is_kept_as_written() {
    let fragment = Element::parse_str(
        r#"<contact id="urn:uuid:1234"><organizationName>ERI</organizationName></contact>"#,
    )
    .expect("fixture");
    let record = parse_party(&fragment).expect("parse");
    assert_eq!(record.id, "urn:uuid:1234");

    let out = synchronize_party(&record, Some(&fragment)).expect("sync");
    assert_eq!(out.attribute("id"), Some("urn:uuid:1234"));
}

#[test]
fn unchanged_sync_keeps_nested_attributes() {
    let input = r#"<creator id="c1">
        <individualName lang="en"><givenName>Ana</givenName><surName>Ruiz</surName></individualName>
        <address id="addr-1" system="x"><city>Town</city></address>
    </creator>"#;
    let fragment = Element::parse_str(input).expect("fixture");
    let record = parse_party(&fragment).expect("parse");

    let out = synchronize_party(&record, Some(&fragment)).expect("sync");
    assert_eq!(out, fragment);
    assert_eq!(
        out.child("individualName").and_then(|name| name.attribute("lang")),
        Some("en")
    );
    let address = out.child("address").expect("address kept");
    assert_eq!(address.attribute("id"), Some("addr-1"));
    assert_eq!(address.attribute("system"), Some("x"));
}

#[test]
fn aggregate_edits_keep_unknown_children() {
    let input = r#"<creator id="c.1">
        <organizationName>ERI</organizationName>
        <references>shared-creator</references>
    </creator>"#;
    let mut party = Party::from_xml_str(input, ChangeNotifier::detached()).expect("parse");

    party.set_user_ids(vec![UserId {
        value: "0000-0002-1825-0097".to_string(),
        directory: Some("https://orcid.org".to_string()),
    }]);
    party.set_organization_name("");
    let committed = party.commit().expect("commit").clone();

    assert!(committed.child("organizationName").is_none());
    assert_eq!(
        committed.child("userId").and_then(|id| id.attribute("directory")),
        Some("https://orcid.org")
    );
    assert_eq!(committed.child_text("references").as_deref(), Some("shared-creator"));
}

#[test]
fn validation_needs_a_name_and_well_formed_email() {
    let mut record = PartyRecord::new(PartyType::Contact);
    record.email = vec!["not-an-address".to_string()];

    let errors = validate_party(&record);
    assert_eq!(errors.get("name"), Some(NAME_MESSAGE));
    assert_eq!(errors.get("email"), Some(EMAIL_MESSAGE));
}

#[test]
fn unknown_party_root_is_rejected() {
    let fragment = Element::parse_str("<author/>").expect("fixture");
    assert!(parse_party(&fragment).is_err());
}
