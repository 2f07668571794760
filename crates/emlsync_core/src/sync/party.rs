use super::{ADDRESS_ORDER, INDIVIDUAL_NAME_ORDER, PARTY_ORDER};
use crate::model::party::{Address, IndividualName, PartyRecord};
use crate::parse::{parse_address, require_root, ParseResult, PARTY_ROOTS};
use crate::xml::names::{
    ADDRESS, ADMINISTRATIVE_AREA, CITY, COUNTRY, DELIVERY_POINT, DIRECTORY_ATTRIBUTE,
    ELECTRONIC_MAIL_ADDRESS, GIVEN_NAME, ID_ATTRIBUTE, INDIVIDUAL_NAME, ONLINE_URL,
    ORGANIZATION_NAME, PHONE, PHONE_TYPE_ATTRIBUTE, POSITION_NAME, POSTAL_CODE, ROLE,
    SALUTATION, SUR_NAME, USER_ID,
};
use crate::xml::Element;
use log::debug;

/// Writes a party record into a clone of `previous` (or a new element named
/// after the party type).
///
/// Owned fields are written at their schema position; blank values are left
/// out. The n-th value of a field updates the n-th previous element that
/// carried one, so that element keeps its attributes and any children the
/// record does not own. Surplus previous elements are dropped. Children the
/// record does not own are kept where they are.
///
/// # Errors
/// - `SchemaViolation` when `previous` is not a party fragment.
pub fn synchronize_party(record: &PartyRecord, previous: Option<&Element>) -> ParseResult<Element> {
    if let Some(fragment) = previous {
        require_root(fragment, PARTY_ROOTS)?;
    }
    let tag = record.party_type.element_name();
    let mut root = previous.cloned().unwrap_or_else(|| Element::new(tag));
    if !root.is_named(tag) {
        root.rename(tag);
    }
    root.set_attribute(ID_ATTRIBUTE, record.id.as_str());

    let mut fields: Vec<Element> = Vec::new();
    if !record.individual_name.is_empty() {
        let base = root.child(INDIVIDUAL_NAME).cloned();
        fields.push(merge_individual_name(base, &record.individual_name));
    }
    push_texts(&mut fields, &root, ORGANIZATION_NAME, [&record.organization_name]);
    push_texts(&mut fields, &root, POSITION_NAME, [&record.position_name]);

    let mut addresses = carried(&root, ADDRESS, |address| !parse_address(address).is_empty());
    for address in record.address.iter().filter(|address| !address.is_empty()) {
        fields.push(merge_address(addresses.next(), address));
    }

    let mut phones = carried(&root, PHONE, has_text);
    for phone in record.phone.iter().filter(|phone| !phone.number.trim().is_empty()) {
        let mut element = leaf(phones.next(), PHONE, &phone.number);
        set_optional_attribute(&mut element, PHONE_TYPE_ATTRIBUTE, phone.phone_type.as_deref());
        fields.push(element);
    }
    push_texts(&mut fields, &root, ELECTRONIC_MAIL_ADDRESS, &record.email);
    push_texts(&mut fields, &root, ONLINE_URL, &record.online_url);

    let mut user_ids = carried(&root, USER_ID, has_text);
    for user_id in record.user_id.iter().filter(|user| !user.value.trim().is_empty()) {
        let mut element = leaf(user_ids.next(), USER_ID, &user_id.value);
        set_optional_attribute(&mut element, DIRECTORY_ATTRIBUTE, user_id.directory.as_deref());
        fields.push(element);
    }
    push_texts(&mut fields, &root, ROLE, &record.role);

    for name in PARTY_ORDER {
        root.remove_children_named(name);
    }
    for field in fields {
        root.insert_ordered(field, PARTY_ORDER);
    }
    debug!(
        "event=party_sync module=sync_party status=ok type={}",
        record.party_type.element_name()
    );
    Ok(root)
}

/// Clones of the children named `name` that hold a value, in document order.
fn carried(
    root: &Element,
    name: &str,
    holds_value: impl Fn(&Element) -> bool,
) -> std::vec::IntoIter<Element> {
    root.children_named(name)
        .filter(|element| holds_value(element))
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
}

fn has_text(element: &Element) -> bool {
    !element.text().trim().is_empty()
}

/// `base` with its text replaced, or a new element when there is no base.
fn leaf(base: Option<Element>, name: &str, value: &str) -> Element {
    match base {
        Some(mut element) => {
            element.set_text(value);
            element
        }
        None => Element::with_text(name, value),
    }
}

fn push_texts<'a>(
    fields: &mut Vec<Element>,
    root: &Element,
    name: &str,
    values: impl IntoIterator<Item = &'a String>,
) {
    let mut previous = carried(root, name, has_text);
    for value in values {
        if !value.trim().is_empty() {
            fields.push(leaf(previous.next(), name, value));
        }
    }
}

fn set_optional_attribute(element: &mut Element, name: &str, value: Option<&str>) {
    match value.filter(|value| !value.is_empty()) {
        Some(value) => element.set_attribute(name, value),
        None => {
            element.remove_attribute(name);
        }
    }
}

fn merge_individual_name(base: Option<Element>, name: &IndividualName) -> Element {
    let mut element = base.unwrap_or_else(|| Element::new(INDIVIDUAL_NAME));
    let order = INDIVIDUAL_NAME_ORDER;
    write_parts(&mut element, SALUTATION, &name.salutation, order);
    write_parts(&mut element, GIVEN_NAME, &name.given_name, order);
    write_parts(&mut element, SUR_NAME, [&name.sur_name], order);
    element
}

fn merge_address(base: Option<Element>, address: &Address) -> Element {
    let mut element = base.unwrap_or_else(|| Element::new(ADDRESS));
    let order = ADDRESS_ORDER;
    write_parts(&mut element, DELIVERY_POINT, &address.delivery_point, order);
    write_parts(&mut element, CITY, [&address.city], order);
    write_parts(&mut element, ADMINISTRATIVE_AREA, [&address.administrative_area], order);
    write_parts(&mut element, POSTAL_CODE, [&address.postal_code], order);
    write_parts(&mut element, COUNTRY, [&address.country], order);
    element
}

/// Writes the non-blank `values` into the children named `name`, reusing
/// existing ones in document order and dropping the surplus.
fn write_parts<'a>(
    element: &mut Element,
    name: &str,
    values: impl IntoIterator<Item = &'a String>,
    order: &[&str],
) {
    let mut written = 0;
    for value in values.into_iter().filter(|value| !value.trim().is_empty()) {
        match element.nth_child_named_mut(name, written) {
            Some(existing) => existing.set_text(value),
            None => {
                element.insert_ordered(Element::with_text(name, value), order);
            }
        }
        written += 1;
    }
    element.truncate_children_named(name, written);
}
