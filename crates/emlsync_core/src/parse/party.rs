use super::{require_root, trimmed_child_text, trimmed_children_text, ParseResult, PARTY_ROOTS};
use crate::ids::resolve_id;
use crate::model::party::{Address, IndividualName, PartyRecord, PartyType, Phone, UserId};
use crate::xml::names::{
    ADDRESS, ADMINISTRATIVE_AREA, CITY, COUNTRY, DELIVERY_POINT, DIRECTORY_ATTRIBUTE,
    ELECTRONIC_MAIL_ADDRESS, GIVEN_NAME, INDIVIDUAL_NAME, ONLINE_URL, ORGANIZATION_NAME,
    PHONE, PHONE_TYPE_ATTRIBUTE, POSITION_NAME, POSTAL_CODE, ROLE, SALUTATION, SUR_NAME,
    USER_ID,
};
use crate::xml::Element;
use log::debug;

const MODULE: &str = "parse_party";

/// Reads a party fragment (`creator`, `contact`, `associatedParty`, ...).
pub fn parse_party(fragment: &Element) -> ParseResult<PartyRecord> {
    require_root(fragment, PARTY_ROOTS)?;
    let party_type = PartyType::from_element_name(fragment.local_name()).ok_or_else(|| {
        super::ParseError::SchemaViolation {
            expected: PARTY_ROOTS,
            found: fragment.name().to_string(),
        }
    })?;

    let record = PartyRecord {
        id: resolve_id(fragment, MODULE),
        party_type,
        individual_name: fragment
            .child(INDIVIDUAL_NAME)
            .map(parse_individual_name)
            .unwrap_or_default(),
        organization_name: trimmed_child_text(fragment, ORGANIZATION_NAME),
        position_name: trimmed_child_text(fragment, POSITION_NAME),
        address: fragment
            .children_named(ADDRESS)
            .map(parse_address)
            .filter(|address| !address.is_empty())
            .collect(),
        phone: fragment
            .children_named(PHONE)
            .filter_map(|phone| {
                let number = phone.text().trim().to_string();
                (!number.is_empty()).then(|| Phone {
                    number,
                    phone_type: phone.attribute(PHONE_TYPE_ATTRIBUTE).map(str::to_string),
                })
            })
            .collect(),
        email: trimmed_children_text(fragment, ELECTRONIC_MAIL_ADDRESS),
        online_url: trimmed_children_text(fragment, ONLINE_URL),
        user_id: fragment
            .children_named(USER_ID)
            .filter_map(|user_id| {
                let value = user_id.text().trim().to_string();
                (!value.is_empty()).then(|| UserId {
                    value,
                    directory: user_id.attribute(DIRECTORY_ATTRIBUTE).map(str::to_string),
                })
            })
            .collect(),
        role: trimmed_children_text(fragment, ROLE),
    };
    debug!(
        "event=party_parse module={MODULE} status=ok type={}",
        party_type.element_name()
    );
    Ok(record)
}

/// Parses raw XML text, then reads it like [`parse_party`].
pub fn parse_party_str(input: &str) -> ParseResult<PartyRecord> {
    parse_party(&Element::parse_str(input)?)
}

fn parse_individual_name(name: &Element) -> IndividualName {
    IndividualName {
        salutation: trimmed_children_text(name, SALUTATION),
        given_name: trimmed_children_text(name, GIVEN_NAME),
        sur_name: trimmed_child_text(name, SUR_NAME),
    }
}

pub(crate) fn parse_address(address: &Element) -> Address {
    Address {
        delivery_point: trimmed_children_text(address, DELIVERY_POINT),
        city: trimmed_child_text(address, CITY),
        administrative_area: trimmed_child_text(address, ADMINISTRATIVE_AREA),
        postal_code: trimmed_child_text(address, POSTAL_CODE),
        country: trimmed_child_text(address, COUNTRY),
    }
}
