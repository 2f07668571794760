//! Non-numeric domain model.
//!
//! # Responsibility
//! - Represent one `nonNumericDomain` occurrence as a text domain or one of
//!   the three enumerated domain variants.
//!
//! # Invariants
//! - A fragment is never text and enumerated at the same time.
//! - `DomainFragment::id` is stable across parse/synchronize cycles.
//! - Code definition order is display and round-trip order.

use crate::ids::mint_id;
use crate::xml::names::{NOMINAL, ORDINAL};
use crate::xml::Element;
use serde::{Deserialize, Serialize};

/// Durable identifier written as the domain element's `id` attribute.
pub type DomainId = String;

/// Pattern value meaning "any text is allowed".
pub const ANY_VALUE_PATTERN: &str = "*";

/// Discriminator recorded from the scale element around the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasurementScaleKind {
    #[default]
    Nominal,
    Ordinal,
}

impl MeasurementScaleKind {
    /// Canonical element name of the scale.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Nominal => NOMINAL,
            Self::Ordinal => ORDINAL,
        }
    }

    /// Resolves a scale element name, case-insensitively.
    pub fn from_element_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case(NOMINAL) {
            Some(Self::Nominal)
        } else if name.eq_ignore_ascii_case(ORDINAL) {
            Some(Self::Ordinal)
        } else {
            None
        }
    }
}

/// One `nonNumericDomain` entry of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainFragment {
    pub id: DomainId,
    pub kind: DomainKind,
}

impl DomainFragment {
    /// Creates a fragment with a freshly minted identifier.
    pub fn new(kind: DomainKind) -> Self {
        Self {
            id: mint_id(),
            kind,
        }
    }

    pub fn with_id(id: impl Into<DomainId>, kind: DomainKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn text(domain: TextDomain) -> Self {
        Self::new(DomainKind::Text(domain))
    }

    pub fn code_definitions(rows: Vec<CodeDefinition>) -> Self {
        Self::new(DomainKind::Enumerated(EnumeratedDomain::CodeDefinitions(rows)))
    }

    pub fn as_text(&self) -> Option<&TextDomain> {
        match &self.kind {
            DomainKind::Text(text) => Some(text),
            DomainKind::Enumerated(_) => None,
        }
    }

    pub fn as_enumerated(&self) -> Option<&EnumeratedDomain> {
        match &self.kind {
            DomainKind::Enumerated(enumerated) => Some(enumerated),
            DomainKind::Text(_) => None,
        }
    }

    /// Code rows when this is a code-definition list.
    pub fn code_rows(&self) -> Option<&[CodeDefinition]> {
        match &self.kind {
            DomainKind::Enumerated(EnumeratedDomain::CodeDefinitions(rows)) => Some(rows),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainKind {
    #[serde(rename = "textDomain")]
    Text(TextDomain),
    #[serde(rename = "enumeratedDomain")]
    Enumerated(EnumeratedDomain),
}

impl DomainKind {
    /// Canonical name of the element this kind is written as.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Text(_) => crate::xml::names::TEXT_DOMAIN,
            Self::Enumerated(_) => crate::xml::names::ENUMERATED_DOMAIN,
        }
    }
}

/// Free text constrained by a description and optional patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDomain {
    pub definition: String,
    /// Regular expressions in document order; may hold [`ANY_VALUE_PATTERN`].
    #[serde(default)]
    pub pattern: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TextDomain {
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            ..Self::default()
        }
    }

    /// Text domain that accepts any value.
    pub fn any_text() -> Self {
        Self {
            definition: "Any text".to_string(),
            pattern: vec![ANY_VALUE_PATTERN.to_string()],
            source: None,
        }
    }

    pub fn is_any_text(&self) -> bool {
        self.pattern.iter().any(|pattern| pattern == ANY_VALUE_PATTERN)
    }
}

/// The three mutually exclusive enumerated domain shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumeratedDomain {
    CodeDefinitions(Vec<CodeDefinition>),
    ExternalCodeSet(ExternalCodeSet),
    EntityCodeList(EntityCodeList),
}

impl Default for EnumeratedDomain {
    fn default() -> Self {
        Self::CodeDefinitions(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDefinition {
    pub code: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl CodeDefinition {
    pub fn new(code: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            definition: definition.into(),
            source: None,
        }
    }

    /// Neither code nor definition has been filled in.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty() && self.definition.trim().is_empty()
    }

    /// Exactly one of code and definition is filled in.
    pub fn is_half_filled(&self) -> bool {
        self.code.trim().is_empty() != self.definition.trim().is_empty()
    }
}

/// Codes defined outside the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCodeSet {
    pub codeset_name: String,
    pub references: Vec<CodesetReference>,
}

/// One pointer to the external code set definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodesetReference {
    #[serde(rename = "codesetURL")]
    Url(String),
    /// Citation subtree kept verbatim.
    #[serde(rename = "citation")]
    Citation(Element),
}

/// Codes taken from columns of another entity in the package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCodeList {
    pub entity_reference: String,
    pub value_attribute_reference: String,
    pub definition_attribute_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_attribute_reference: Option<String>,
}
