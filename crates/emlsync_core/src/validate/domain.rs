use super::ErrorSet;
use crate::model::domain::{
    CodeDefinition, CodesetReference, DomainFragment, DomainKind, EntityCodeList,
    EnumeratedDomain, ExternalCodeSet,
};

pub const CHOOSE_DOMAIN_MESSAGE: &str = "Choose a possible value type.";
pub const CODE_PAIR_MESSAGE: &str = "Provide both a code and definition in each row.";
pub const NO_CODES_MESSAGE: &str = "Define at least one code and definition.";
pub const TEXT_DEFINITION_MESSAGE: &str = "Provide a description of the kind of text allowed.";
pub const EXTERNAL_CODE_SET_MESSAGE: &str =
    "Provide a code set name and at least one citation or URL.";
pub const ENTITY_CODE_LIST_MESSAGE: &str =
    "Provide the entity reference and its value and definition attribute references.";

/// Validates the actively edited domain (index 0) of an attribute.
pub fn validate_non_numeric_domain(domains: &[DomainFragment]) -> ErrorSet {
    let mut errors = ErrorSet::new();
    let Some(domain) = domains.first() else {
        errors.insert("nonNumericDomain", CHOOSE_DOMAIN_MESSAGE);
        return errors;
    };

    match &domain.kind {
        DomainKind::Text(text) => {
            if text.definition.trim().is_empty() {
                errors.insert("definition", TEXT_DEFINITION_MESSAGE);
            }
        }
        DomainKind::Enumerated(EnumeratedDomain::CodeDefinitions(rows)) => {
            check_code_rows(rows, &mut errors);
        }
        DomainKind::Enumerated(EnumeratedDomain::ExternalCodeSet(code_set)) => {
            if !is_complete_code_set(code_set) {
                errors.insert("externalCodeSet", EXTERNAL_CODE_SET_MESSAGE);
            }
        }
        DomainKind::Enumerated(EnumeratedDomain::EntityCodeList(code_list)) => {
            if !is_complete_code_list(code_list) {
                errors.insert("entityCodeList", ENTITY_CODE_LIST_MESSAGE);
            }
        }
    }
    errors
}

fn check_code_rows(rows: &[CodeDefinition], errors: &mut ErrorSet) {
    if rows.iter().any(CodeDefinition::is_half_filled) {
        errors.insert("enumeratedDomain", CODE_PAIR_MESSAGE);
    }
    // A lone blank row is a list nobody has filled in yet.
    let nothing_defined = match rows {
        [] => true,
        [only] => only.is_blank(),
        _ => false,
    };
    if nothing_defined {
        errors.insert("enumeratedDomain", NO_CODES_MESSAGE);
    }
}

fn is_complete_code_set(code_set: &ExternalCodeSet) -> bool {
    let has_reference = code_set.references.iter().any(|reference| match reference {
        CodesetReference::Url(url) => !url.trim().is_empty(),
        CodesetReference::Citation(_) => true,
    });
    !code_set.codeset_name.trim().is_empty() && has_reference
}

fn is_complete_code_list(code_list: &EntityCodeList) -> bool {
    [
        &code_list.entity_reference,
        &code_list.value_attribute_reference,
        &code_list.definition_attribute_reference,
    ]
    .iter()
    .all(|value| !value.trim().is_empty())
}
