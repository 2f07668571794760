//! Party record model (people and organizations tied to a dataset).
//!
//! # Invariants
//! - Empty strings and empty lists mean "not recorded"; they are never
//!   written as empty elements.
//! - `party_type` decides the root tag the record is written as.

use crate::ids::mint_id;
use crate::xml::names::{
    ASSOCIATED_PARTY, CONTACT, CREATOR, METADATA_PROVIDER, PERSONNEL, PUBLISHER,
    RESPONSIBLE_PARTY,
};
use serde::{Deserialize, Serialize};

/// Role slot the party occupies in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyType {
    Creator,
    Contact,
    AssociatedParty,
    MetadataProvider,
    Publisher,
    Personnel,
    ResponsibleParty,
}

impl PartyType {
    pub const ALL: [PartyType; 7] = [
        Self::Creator,
        Self::Contact,
        Self::AssociatedParty,
        Self::MetadataProvider,
        Self::Publisher,
        Self::Personnel,
        Self::ResponsibleParty,
    ];

    pub fn element_name(self) -> &'static str {
        match self {
            Self::Creator => CREATOR,
            Self::Contact => CONTACT,
            Self::AssociatedParty => ASSOCIATED_PARTY,
            Self::MetadataProvider => METADATA_PROVIDER,
            Self::Publisher => PUBLISHER,
            Self::Personnel => PERSONNEL,
            Self::ResponsibleParty => RESPONSIBLE_PARTY,
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.element_name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRecord {
    pub id: String,
    pub party_type: PartyType,
    #[serde(default)]
    pub individual_name: IndividualName,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub position_name: String,
    #[serde(default)]
    pub address: Vec<Address>,
    #[serde(default)]
    pub phone: Vec<Phone>,
    #[serde(default, rename = "electronicMailAddress")]
    pub email: Vec<String>,
    #[serde(default)]
    pub online_url: Vec<String>,
    #[serde(default)]
    pub user_id: Vec<UserId>,
    #[serde(default)]
    pub role: Vec<String>,
}

impl PartyRecord {
    /// Empty record with a freshly minted identifier.
    pub fn new(party_type: PartyType) -> Self {
        Self {
            id: mint_id(),
            party_type,
            individual_name: IndividualName::default(),
            organization_name: String::new(),
            position_name: String::new(),
            address: Vec::new(),
            phone: Vec::new(),
            email: Vec::new(),
            online_url: Vec::new(),
            user_id: Vec::new(),
            role: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualName {
    #[serde(default)]
    pub salutation: Vec<String>,
    #[serde(default)]
    pub given_name: Vec<String>,
    #[serde(default)]
    pub sur_name: String,
}

impl IndividualName {
    pub fn is_empty(&self) -> bool {
        self.sur_name.trim().is_empty()
            && all_blank(&self.salutation)
            && all_blank(&self.given_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub delivery_point: Vec<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub administrative_area: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        all_blank(&self.delivery_point)
            && [
                &self.city,
                &self.administrative_area,
                &self.postal_code,
                &self.country,
            ]
            .iter()
            .all(|value| value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub number: String,
    /// `phonetype` attribute, e.g. `voice` or `facsimile`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserId {
    pub value: String,
    /// `directory` attribute, e.g. `https://orcid.org`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

fn all_blank(values: &[String]) -> bool {
    values.iter().all(|value| value.trim().is_empty())
}
