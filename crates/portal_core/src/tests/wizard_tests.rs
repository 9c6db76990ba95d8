use std::sync::Arc;

use super::*;
use crate::fakes::FakeApi;

async fn wizard_with(api: Arc<FakeApi>) -> ApplicationWizard {
    ApplicationWizard::initialize(api)
        .await
        .expect("wizard init")
}

fn fill_valid(wizard: &mut ApplicationWizard) {
    wizard.set_full_name("Jane Doe");
    wizard.set_email("jane@example.com");
    wizard.set_broker_id("9");
    wizard.set_details("Transfer of ownership for a used two wheeler");
}

async fn wizard_at_review(api: Arc<FakeApi>) -> ApplicationWizard {
    let mut wizard = wizard_with(api).await;
    fill_valid(&mut wizard);
    wizard.next();
    wizard.next();
    wizard.next();
    assert_eq!(wizard.step(), WizardStep::Review);
    wizard
}

#[tokio::test]
async fn initialization_fetches_the_broker_list_once() {
    let api = Arc::new(FakeApi::new());
    let wizard = wizard_with(api.clone()).await;
    assert_eq!(wizard.brokers().len(), 2);
    assert_eq!(api.call_count("list_brokers").await, 1);
}

#[tokio::test]
async fn short_name_blocks_forward_navigation() {
    let api = Arc::new(FakeApi::new());
    let mut wizard = wizard_with(api).await;
    wizard.set_full_name("J");
    wizard.set_email("jane@example.com");

    assert!(wizard.errors().contains_key(&Field::FullName));
    assert!(!wizard.can_continue());
    wizard.next();
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
}

#[tokio::test]
async fn each_step_gates_on_its_own_fields() {
    let api = Arc::new(FakeApi::new());
    let mut wizard = wizard_with(api).await;

    wizard.set_full_name("Jane Doe");
    wizard.set_email("jane@example.com");
    wizard.next();
    assert_eq!(wizard.step(), WizardStep::Broker);

    // No broker chosen yet.
    wizard.next();
    assert_eq!(wizard.step(), WizardStep::Broker);

    wizard.set_broker_id("9");
    wizard.next();
    assert_eq!(wizard.step(), WizardStep::Details);

    wizard.set_details("Transfer of ownership for a used two wheeler");
    wizard.next();
    assert_eq!(wizard.step(), WizardStep::Review);

    // Terminal: next is a no-op at Review.
    wizard.next();
    assert_eq!(wizard.step(), WizardStep::Review);
}

#[tokio::test]
async fn prev_is_a_no_op_at_the_first_step() {
    let api = Arc::new(FakeApi::new());
    let mut wizard = wizard_with(api).await;
    wizard.prev();
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
}

#[tokio::test]
async fn backward_navigation_is_always_permitted() {
    let api = Arc::new(FakeApi::new());
    let mut wizard = wizard_at_review(api).await;
    wizard.prev();
    assert_eq!(wizard.step(), WizardStep::Details);
    wizard.prev();
    assert_eq!(wizard.step(), WizardStep::Broker);
    wizard.prev();
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
}

#[tokio::test]
async fn submit_creates_citizen_then_application_exactly_once() {
    let api = Arc::new(FakeApi::new());
    let mut wizard = wizard_at_review(api.clone()).await;

    wizard.submit().await;

    let calls = api.calls.lock().await.clone();
    let citizen_pos = calls
        .iter()
        .position(|op| *op == "create_citizen")
        .expect("citizen created");
    let application_pos = calls
        .iter()
        .position(|op| *op == "create_application")
        .expect("application created");
    assert!(citizen_pos < application_pos, "citizen must come first");
    assert_eq!(api.call_count("create_citizen").await, 1);
    assert_eq!(api.call_count("create_application").await, 1);

    let applications = api.captured.applications.lock().await;
    assert_eq!(applications[0].citizen_id.0, 101);
    assert_eq!(applications[0].broker_id.0, 9);
    assert_eq!(
        applications[0].application_type,
        shared::domain::ApplicationType::NewRegistration
    );

    // Success resets the form and returns to the first step.
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
    assert_eq!(wizard.values(), &FormValues::default());
    assert_eq!(
        wizard.status_message(),
        Some("Application submitted successfully.")
    );
}

#[tokio::test]
async fn fraud_flagged_application_changes_the_status_message() {
    let mut api = FakeApi::new();
    api.application_is_fraud = true;
    let mut wizard = wizard_at_review(Arc::new(api)).await;

    wizard.submit().await;

    assert_eq!(
        wizard.status_message(),
        Some("Application flagged for review. Our team will contact you soon.")
    );
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
}

#[tokio::test]
async fn submit_navigates_back_to_the_earliest_failing_step() {
    let api = Arc::new(FakeApi::new());
    let mut wizard = wizard_at_review(api.clone()).await;

    // Invalidate fields owned by two different steps after reaching Review;
    // the earlier step wins the tie-break.
    wizard.set_broker_id("77");
    wizard.set_details("no");

    wizard.submit().await;

    assert_eq!(wizard.step(), WizardStep::Broker);
    assert_eq!(api.call_count("create_citizen").await, 0);
}

#[tokio::test]
async fn submit_with_invalid_personal_info_returns_to_the_first_step() {
    let api = Arc::new(FakeApi::new());
    let mut wizard = wizard_at_review(api.clone()).await;
    wizard.set_email("broken");

    wizard.submit().await;

    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
    assert_eq!(api.call_count("create_citizen").await, 0);
    assert_eq!(api.call_count("create_application").await, 0);
}

#[tokio::test]
async fn network_failure_keeps_values_for_retry() {
    let api = Arc::new(FakeApi::new());
    api.fail_operation("create_application").await;
    let mut wizard = wizard_at_review(api.clone()).await;
    let before = wizard.values().clone();

    wizard.submit().await;

    assert_eq!(wizard.step(), WizardStep::Review);
    assert_eq!(wizard.values(), &before);
    assert!(!wizard.is_submitting());
    assert_eq!(
        wizard.status_message(),
        Some("Something went wrong. Please try again.")
    );

    // Retry without re-entering data succeeds once the backend recovers.
    api.clear_failures().await;
    wizard.submit().await;
    assert_eq!(wizard.step(), WizardStep::PersonalInfo);
    assert_eq!(
        wizard.status_message(),
        Some("Application submitted successfully.")
    );
}

#[tokio::test]
async fn citizen_failure_never_creates_an_application() {
    let api = Arc::new(FakeApi::new());
    api.fail_operation("create_citizen").await;
    let mut wizard = wizard_at_review(api.clone()).await;

    wizard.submit().await;

    assert_eq!(api.call_count("create_application").await, 0);
    assert_eq!(wizard.step(), WizardStep::Review);
}
