//! Edit session for one party record.

use crate::change::ChangeNotifier;
use crate::model::party::{Address, IndividualName, PartyRecord, PartyType, Phone, UserId};
use crate::parse::{parse_party, ParseResult};
use crate::sync::synchronize_party;
use crate::validate::{validate_party, ValidationEvent, ValidationState, ValidationTracker};
use crate::xml::Element;

#[derive(Debug)]
pub struct Party {
    record: PartyRecord,
    fragment: Option<Element>,
    notifier: ChangeNotifier,
    validation: ValidationTracker,
}

impl Party {
    pub fn new(party_type: PartyType, notifier: ChangeNotifier) -> Self {
        Self {
            record: PartyRecord::new(party_type),
            fragment: None,
            notifier,
            validation: ValidationTracker::new(),
        }
    }

    pub fn from_fragment(fragment: Element, notifier: ChangeNotifier) -> ParseResult<Self> {
        let record = parse_party(&fragment)?;
        Ok(Self {
            record,
            fragment: Some(fragment),
            notifier,
            validation: ValidationTracker::new(),
        })
    }

    pub fn from_xml_str(input: &str, notifier: ChangeNotifier) -> ParseResult<Self> {
        Self::from_fragment(Element::parse_str(input)?, notifier)
    }

    pub fn record(&self) -> &PartyRecord {
        &self.record
    }

    pub fn fragment(&self) -> Option<&Element> {
        self.fragment.as_ref()
    }

    pub fn validation_state(&self) -> &ValidationState {
        self.validation.state()
    }

    pub fn set_individual_name(&mut self, name: IndividualName) {
        self.record.individual_name = name;
        self.notifier.notify_changed();
    }

    pub fn set_organization_name(&mut self, value: impl Into<String>) {
        self.record.organization_name = value.into();
        self.notifier.notify_changed();
    }

    pub fn set_position_name(&mut self, value: impl Into<String>) {
        self.record.position_name = value.into();
        self.notifier.notify_changed();
    }

    pub fn set_addresses(&mut self, addresses: Vec<Address>) {
        self.record.address = addresses;
        self.notifier.notify_changed();
    }

    pub fn set_phones(&mut self, phones: Vec<Phone>) {
        self.record.phone = phones;
        self.notifier.notify_changed();
    }

    pub fn set_emails(&mut self, emails: Vec<String>) {
        self.record.email = emails;
        self.notifier.notify_changed();
    }

    pub fn set_online_urls(&mut self, urls: Vec<String>) {
        self.record.online_url = urls;
        self.notifier.notify_changed();
    }

    pub fn set_user_ids(&mut self, user_ids: Vec<UserId>) {
        self.record.user_id = user_ids;
        self.notifier.notify_changed();
    }

    pub fn set_roles(&mut self, roles: Vec<String>) {
        self.record.role = roles;
        self.notifier.notify_changed();
    }

    pub fn synchronize(&self) -> ParseResult<Element> {
        synchronize_party(&self.record, self.fragment.as_ref())
    }

    pub fn commit(&mut self) -> ParseResult<&Element> {
        let updated = self.synchronize()?;
        let baseline: &Element = self.fragment.insert(updated);
        Ok(baseline)
    }

    pub fn validate(&mut self) -> ValidationEvent {
        self.validation.record(validate_party(&self.record))
    }
}
