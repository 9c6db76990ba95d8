//! The multi-step application wizard: step gating on validation, staged
//! citizen-then-application submission, and a single status line for the
//! outcome.

use std::sync::Arc;

use anyhow::{Context, Result};
use gateway::RegistryApi;
use shared::{
    domain::{ApplicationType, BrokerId},
    protocol::{BrokerSummary, NewApplication, NewCitizen},
};
use tracing::{info, warn};

use crate::validation::{validate, Field, FormValues, ValidationErrors};

const SUBMITTED_MESSAGE: &str = "Application submitted successfully.";
const FLAGGED_MESSAGE: &str = "Application flagged for review. Our team will contact you soon.";
const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

// The citizen record requires contact fields the wizard does not collect.
const PLACEHOLDER_PHONE: &str = "0000000000";
const PLACEHOLDER_ADDRESS: &str = "Not provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    PersonalInfo,
    Broker,
    Details,
    Review,
}

impl WizardStep {
    pub const ORDER: [WizardStep; 4] = [
        WizardStep::PersonalInfo,
        WizardStep::Broker,
        WizardStep::Details,
        WizardStep::Review,
    ];

    /// Fields whose validation gates forward navigation out of this step.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            WizardStep::PersonalInfo => &[Field::FullName, Field::Email],
            WizardStep::Broker => &[Field::Broker],
            WizardStep::Details => &[Field::Details],
            WizardStep::Review => &[],
        }
    }

    fn next(&self) -> WizardStep {
        match self {
            WizardStep::PersonalInfo => WizardStep::Broker,
            WizardStep::Broker => WizardStep::Details,
            WizardStep::Details | WizardStep::Review => WizardStep::Review,
        }
    }

    fn prev(&self) -> WizardStep {
        match self {
            WizardStep::PersonalInfo | WizardStep::Broker => WizardStep::PersonalInfo,
            WizardStep::Details => WizardStep::Broker,
            WizardStep::Review => WizardStep::Details,
        }
    }
}

pub struct ApplicationWizard {
    api: Arc<dyn RegistryApi>,
    brokers: Vec<BrokerSummary>,
    values: FormValues,
    errors: ValidationErrors,
    step: WizardStep,
    submitting: bool,
    status_message: Option<String>,
}

impl ApplicationWizard {
    /// Fetches the broker list once; it is a read dependency for validation
    /// and rendering for the lifetime of the wizard.
    pub async fn initialize(api: Arc<dyn RegistryApi>) -> Result<Self> {
        let brokers = api.list_brokers().await?;
        Ok(Self {
            api,
            brokers,
            values: FormValues::default(),
            errors: ValidationErrors::new(),
            step: WizardStep::PersonalInfo,
            submitting: false,
            status_message: None,
        })
    }

    pub fn brokers(&self) -> &[BrokerSummary] {
        &self.brokers
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_full_name(&mut self, value: &str) {
        self.values.full_name = value.to_string();
        self.refresh_errors();
    }

    pub fn set_email(&mut self, value: &str) {
        self.values.email = value.to_string();
        self.refresh_errors();
    }

    pub fn set_broker_id(&mut self, value: &str) {
        self.values.broker_id = value.to_string();
        self.refresh_errors();
    }

    pub fn set_details(&mut self, value: &str) {
        self.values.details = value.to_string();
        self.refresh_errors();
    }

    fn refresh_errors(&mut self) {
        self.errors = validate(&self.values, &self.brokers);
    }

    /// Whether forward navigation out of the current step is allowed.
    pub fn can_continue(&self) -> bool {
        let errors = validate(&self.values, &self.brokers);
        self.step
            .fields()
            .iter()
            .all(|field| !errors.contains_key(field))
    }

    /// Advances one step when the current step's fields validate. No-op at
    /// Review.
    pub fn next(&mut self) {
        if self.step == WizardStep::Review || !self.can_continue() {
            return;
        }
        self.step = self.step.next();
    }

    /// Always permitted; no-op at the first step.
    pub fn prev(&mut self) {
        self.step = self.step.prev();
    }

    /// Submits from Review. Revalidates everything; on failure navigates back
    /// to the earliest failing step and aborts. On success creates the citizen
    /// record, then the application that references it, resets the form, and
    /// returns to the first step. A network failure leaves the wizard on
    /// Review with values intact so the user can retry.
    pub async fn submit(&mut self) {
        if self.step != WizardStep::Review || self.submitting {
            return;
        }
        self.status_message = None;
        self.refresh_errors();
        if !self.errors.is_empty() {
            self.step = earliest_failing_step(&self.errors);
            return;
        }

        self.submitting = true;
        let outcome = self.create_records().await;
        self.submitting = false;

        match outcome {
            Ok(is_fraud) => {
                self.status_message = Some(
                    if is_fraud {
                        FLAGGED_MESSAGE
                    } else {
                        SUBMITTED_MESSAGE
                    }
                    .to_string(),
                );
                self.values = FormValues::default();
                self.errors.clear();
                self.step = WizardStep::PersonalInfo;
            }
            Err(err) => {
                warn!(error = %err, "application submission failed");
                self.status_message = Some(FAILURE_MESSAGE.to_string());
            }
        }
    }

    async fn create_records(&self) -> Result<bool> {
        let broker_id = self
            .values
            .broker_id
            .parse::<i64>()
            .map(BrokerId)
            .context("selected broker id is not numeric")?;

        let citizen = self
            .api
            .create_citizen(NewCitizen {
                name: self.values.full_name.clone(),
                email: self.values.email.clone(),
                phone: PLACEHOLDER_PHONE.to_string(),
                aadhaar: derive_aadhaar(&self.values.full_name, &self.values.email),
                address: PLACEHOLDER_ADDRESS.to_string(),
            })
            .await?;

        let application = self
            .api
            .create_application(NewApplication {
                citizen_id: citizen.id,
                broker_id,
                application_type: ApplicationType::NewRegistration,
                documents: self.values.details.clone(),
            })
            .await?;

        info!(
            application_id = application.id.0,
            is_fraud = application.is_fraud,
            "application submitted"
        );
        Ok(application.is_fraud)
    }
}

/// Tie-break order for failed submission: PersonalInfo > Broker > Details.
fn earliest_failing_step(errors: &ValidationErrors) -> WizardStep {
    for step in WizardStep::ORDER {
        if step.fields().iter().any(|field| errors.contains_key(field)) {
            return step;
        }
    }
    WizardStep::Review
}

/// The backend requires a 12-digit aadhaar the wizard never asks for; derive
/// one deterministically from the applicant's identity fields.
fn derive_aadhaar(name: &str, email: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    email.hash(&mut hasher);
    format!("{:012}", hasher.finish() % 1_000_000_000_000)
}

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod tests;
