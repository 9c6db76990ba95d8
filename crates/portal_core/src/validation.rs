//! Field validation for the application wizard. Pure functions: the same
//! snapshot of values always yields the same error map.

use std::collections::BTreeMap;

use shared::protocol::BrokerSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub full_name: String,
    pub email: String,
    pub broker_id: String,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    FullName,
    Email,
    Broker,
    Details,
}

pub type ValidationErrors = BTreeMap<Field, String>;

/// Computes the full error map for a snapshot of form values. Fields that
/// pass have no entry. The broker rule checks membership in the currently
/// loaded broker list, so an id that stops existing fails validation again.
pub fn validate(values: &FormValues, brokers: &[BrokerSummary]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if values.full_name.trim().chars().count() < 2 {
        errors.insert(Field::FullName, "Please enter your full name".to_string());
    }
    if !is_well_formed_email(&values.email) {
        errors.insert(Field::Email, "Please enter a valid email".to_string());
    }
    if !is_known_broker(&values.broker_id, brokers) {
        errors.insert(Field::Broker, "Please select a broker".to_string());
    }
    if values.details.trim().chars().count() < 10 {
        errors.insert(Field::Details, "Please provide more details".to_string());
    }

    errors
}

/// `local@domain.tld`: non-empty local part, a single `@`, and a dot in the
/// domain with characters on both sides. No whitespace anywhere.
fn is_well_formed_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn is_known_broker(broker_id: &str, brokers: &[BrokerSummary]) -> bool {
    if broker_id.is_empty() {
        return false;
    }
    let Ok(id) = broker_id.parse::<i64>() else {
        return false;
    };
    brokers.iter().any(|broker| broker.id.0 == id)
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
