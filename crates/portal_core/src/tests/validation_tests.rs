use super::*;
use crate::fakes::sample_broker;

fn brokers() -> Vec<shared::protocol::BrokerSummary> {
    vec![sample_broker(9), sample_broker(12)]
}

fn valid_values() -> FormValues {
    FormValues {
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        broker_id: "9".to_string(),
        details: "Transfer of ownership for a used two wheeler".to_string(),
    }
}

#[test]
fn all_valid_values_produce_no_errors() {
    let errors = validate(&valid_values(), &brokers());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn short_full_name_is_rejected() {
    let mut values = valid_values();
    values.full_name = "J".to_string();
    let errors = validate(&values, &brokers());
    assert!(errors.contains_key(&Field::FullName));

    // Whitespace padding does not rescue a short name.
    values.full_name = "  J  ".to_string();
    assert!(validate(&values, &brokers()).contains_key(&Field::FullName));
}

#[test]
fn empty_full_name_is_rejected() {
    let mut values = valid_values();
    values.full_name = String::new();
    assert!(validate(&values, &brokers()).contains_key(&Field::FullName));
}

#[test]
fn well_formed_emails_pass() {
    let mut values = valid_values();
    for email in ["x@y.z", "jane.doe@example.co.in", "a+b@mail.example.com"] {
        values.email = email.to_string();
        let errors = validate(&values, &brokers());
        assert!(!errors.contains_key(&Field::Email), "rejected {email}");
    }
}

#[test]
fn malformed_emails_are_rejected() {
    let mut values = valid_values();
    for email in [
        "not-an-email",
        "",
        "@y.z",
        "x@",
        "x@y",
        "x@.z",
        "x@y.",
        "x y@z.a",
        "x@@y.z",
    ] {
        values.email = email.to_string();
        let errors = validate(&values, &brokers());
        assert!(errors.contains_key(&Field::Email), "accepted {email:?}");
    }
}

#[test]
fn broker_must_come_from_the_loaded_list() {
    let mut values = valid_values();
    for broker_id in ["", "77", "abc"] {
        values.broker_id = broker_id.to_string();
        let errors = validate(&values, &brokers());
        assert!(errors.contains_key(&Field::Broker), "accepted {broker_id:?}");
    }

    values.broker_id = "12".to_string();
    assert!(!validate(&values, &brokers()).contains_key(&Field::Broker));
}

#[test]
fn details_require_ten_significant_characters() {
    let mut values = valid_values();
    values.details = "too short".to_string();
    assert!(validate(&values, &brokers()).contains_key(&Field::Details));

    values.details = "   padded out   ".to_string();
    assert!(validate(&values, &brokers()).contains_key(&Field::Details));

    values.details = "ten chars!".to_string();
    assert!(!validate(&values, &brokers()).contains_key(&Field::Details));
}

#[test]
fn validation_is_idempotent() {
    let mut values = valid_values();
    values.email = "broken".to_string();
    values.details = "no".to_string();
    let first = validate(&values, &brokers());
    let second = validate(&values, &brokers());
    assert_eq!(first, second);
}
