use super::ErrorSet;
use crate::model::party::PartyRecord;
use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME_MESSAGE: &str =
    "Either a last name, position name, or organization name must be provided.";
pub const SUR_NAME_MESSAGE: &str = "Provide a last name.";
pub const EMAIL_MESSAGE: &str = "Provide a valid email address.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Validates the naming and contact rules of a party record.
pub fn validate_party(record: &PartyRecord) -> ErrorSet {
    let mut errors = ErrorSet::new();
    let name = &record.individual_name;
    let has_sur_name = !name.sur_name.trim().is_empty();

    if !has_sur_name
        && record.organization_name.trim().is_empty()
        && record.position_name.trim().is_empty()
    {
        errors.insert("name", NAME_MESSAGE);
    }
    if !has_sur_name && !name.is_empty() {
        errors.insert("surName", SUR_NAME_MESSAGE);
    }
    let bad_email = record
        .email
        .iter()
        .map(|email| email.trim())
        .any(|email| !email.is_empty() && !EMAIL_RE.is_match(email));
    if bad_email {
        errors.insert("email", EMAIL_MESSAGE);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::{validate_party, EMAIL_MESSAGE, NAME_MESSAGE, SUR_NAME_MESSAGE};
    use crate::model::party::{PartyRecord, PartyType};

    #[test]
    fn requires_some_name() {
        let record = PartyRecord::new(PartyType::Creator);
        assert_eq!(validate_party(&record).get("name"), Some(NAME_MESSAGE));
    }

    #[test]
    fn given_name_without_surname_is_flagged() {
        let mut record = PartyRecord::new(PartyType::Creator);
        record.organization_name = "ERI".to_string();
        record.individual_name.given_name = vec!["John".to_string()];

        let errors = validate_party(&record);
        assert!(!errors.contains("name"));
        assert_eq!(errors.get("surName"), Some(SUR_NAME_MESSAGE));
    }

    #[test]
    fn email_needs_an_at_sign() {
        let mut record = PartyRecord::new(PartyType::Contact);
        record.position_name = "Data manager".to_string();
        record.email = vec!["john.doe@eri.org".to_string()];
        assert!(validate_party(&record).is_empty());

        record.email.push("john.doe".to_string());
        assert_eq!(validate_party(&record).get("email"), Some(EMAIL_MESSAGE));
    }
}
