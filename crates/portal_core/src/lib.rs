//! Controllers for the vehicle-registration portal: the application wizard,
//! the broker dashboard workflow, the chat widget, and the session context
//! they share. Everything network-facing goes through the
//! [`gateway::RegistryApi`] seam.

use std::sync::Arc;

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use gateway::RegistryApi;
use shared::{
    domain::{
        ApplicationId, ApplicationType, BrokerId, ComplaintId, ComplaintType, PaymentMethod,
        VehicleClass,
    },
    protocol::{
        ApplicationRecord, ApproveRequest, BrokerLoginRequest, BrokerSummary, Complaint,
        ComplaintRequest, FeeBreakdown, FeeEstimateRequest, ForgeryReport, ForgeryRequest,
        PaymentRequest, RejectRequest, StartJobRequest, SupportInfo, VerifyOtpRequest,
    },
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod chat;
pub mod session;
pub mod validation;
pub mod wizard;

pub use chat::{ChatMessage, ChatRole, ChatThread};
pub use session::{BrokerSession, SessionContext};
pub use wizard::{ApplicationWizard, WizardStep};

const OTP_SLOTS: usize = 6;

const INVALID_LICENSE_MESSAGE: &str = "Invalid license number";
const CONNECT_FAILURE_MESSAGE: &str = "Failed to connect to server. Please try again.";
const PAYMENT_FAILURE_ALERT: &str = "Payment failed. Please try again.";

#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    LoggedIn(BrokerId),
    LoggedOut,
    DashboardReloaded,
    JobStarted {
        application_id: Option<ApplicationId>,
    },
    OtpVerified,
    FeeEstimated {
        application_id: ApplicationId,
    },
    PaymentCompleted {
        transaction_id: String,
    },
    ComplaintFiled {
        complaint_id: ComplaintId,
    },
    ForgeryReportReady {
        is_forged: bool,
    },
    Error(String),
}

struct WorkflowState {
    session: Option<BrokerSession>,
    logging_in: bool,
    login_error: Option<String>,

    // Dashboard snapshot, fetched once per activation and treated as
    // immutable until an explicit reload.
    profile: Option<BrokerSummary>,
    applications: Vec<ApplicationRecord>,
    complaints: Vec<Complaint>,
    support: Option<SupportInfo>,
    dashboard_loading: bool,

    start_job_open: bool,
    vehicle_number: String,
    job_starting: bool,
    job_notice: Option<String>,
    active_application: Option<ApplicationId>,

    otp_open: bool,
    phone_number: String,
    otp_slots: [String; OTP_SLOTS],
    otp_focus: usize,
    verifying: bool,
    otp_notice: Option<String>,

    fee_open: bool,
    fee_target: Option<ApplicationId>,
    application_type: ApplicationType,
    vehicle_class: VehicleClass,
    fee_estimate: Option<FeeBreakdown>,
    estimating: bool,

    payment_open: bool,
    payment_target: Option<ApplicationId>,
    payment_method: PaymentMethod,
    paying: bool,
    transaction_id: Option<String>,
    payment_alert: Option<String>,

    complaint_open: bool,
    complaint_application: Option<ApplicationId>,
    complaint_type: Option<ComplaintType>,
    complaint_description: String,
    complaint_submitting: bool,

    analyzing: bool,
    forgery_report: Option<ForgeryReport>,
    forgery_seq: u64,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            session: None,
            logging_in: false,
            login_error: None,
            profile: None,
            applications: Vec::new(),
            complaints: Vec::new(),
            support: None,
            dashboard_loading: false,
            start_job_open: false,
            vehicle_number: String::new(),
            job_starting: false,
            job_notice: None,
            active_application: None,
            otp_open: false,
            phone_number: String::new(),
            otp_slots: Default::default(),
            otp_focus: 0,
            verifying: false,
            otp_notice: None,
            fee_open: false,
            fee_target: None,
            application_type: ApplicationType::NewRegistration,
            vehicle_class: VehicleClass::TwoWheeler,
            fee_estimate: None,
            estimating: false,
            payment_open: false,
            payment_target: None,
            payment_method: PaymentMethod::Upi,
            paying: false,
            transaction_id: None,
            payment_alert: None,
            complaint_open: false,
            complaint_application: None,
            complaint_type: None,
            complaint_description: String::new(),
            complaint_submitting: false,
            analyzing: false,
            forgery_report: None,
            forgery_seq: 0,
        }
    }
}

/// Orchestrates the broker dashboard: a strictly ordered job → OTP → fee →
/// payment chain, plus the independent complaint and document-check
/// sub-flows. Each sub-flow has its own modal flag and processing flag; the
/// flags never block each other.
pub struct BrokerWorkflow {
    api: Arc<dyn RegistryApi>,
    session: SessionContext,
    inner: Mutex<WorkflowState>,
    events: broadcast::Sender<WorkflowEvent>,
}

impl BrokerWorkflow {
    pub fn new(api: Arc<dyn RegistryApi>, session: SessionContext) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            session,
            inner: Mutex::new(WorkflowState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: WorkflowEvent) {
        let _ = self.events.send(event);
    }

    /// Reads the persisted session at page activation. Returns `false` when
    /// no broker is logged in, so callers can redirect to the login screen.
    pub async fn activate(&self) -> Result<bool> {
        let Some(session) = self.session.load().await? else {
            return Ok(false);
        };
        let broker_id = session.broker_id;
        {
            let mut state = self.inner.lock().await;
            state.session = Some(session);
        }
        if let Err(err) = self.load_dashboard(broker_id).await {
            warn!(error = %err, "dashboard load failed");
            self.emit(WorkflowEvent::Error(err.to_string()));
        }
        Ok(true)
    }

    /// Logs in by license number. A `success:false` response or a transport
    /// failure surfaces as an inline message and writes no session state.
    pub async fn login(&self, license_number: &str) -> Result<bool> {
        let license = license_number.trim().to_string();
        {
            let mut state = self.inner.lock().await;
            if state.logging_in {
                return Ok(false);
            }
            state.logging_in = true;
            state.login_error = None;
        }

        let result = self
            .api
            .broker_login(BrokerLoginRequest {
                license_number: license,
            })
            .await;

        let mut state = self.inner.lock().await;
        state.logging_in = false;
        match result {
            Ok(response) if response.success => {
                let Some(profile) = response.broker else {
                    state.login_error = Some(INVALID_LICENSE_MESSAGE.to_string());
                    return Ok(false);
                };
                let broker_id = profile.id;
                state.session = Some(BrokerSession {
                    broker_id,
                    profile: profile.clone(),
                });
                drop(state);

                self.session.set(&profile).await?;
                if let Err(err) = self.load_dashboard(broker_id).await {
                    warn!(error = %err, "dashboard load after login failed");
                    self.emit(WorkflowEvent::Error(err.to_string()));
                }
                info!(broker_id = broker_id.0, "broker logged in");
                self.emit(WorkflowEvent::LoggedIn(broker_id));
                Ok(true)
            }
            Ok(response) => {
                state.login_error = Some(
                    response
                        .message
                        .unwrap_or_else(|| INVALID_LICENSE_MESSAGE.to_string()),
                );
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "broker login failed");
                state.login_error = Some(CONNECT_FAILURE_MESSAGE.to_string());
                Ok(false)
            }
        }
    }

    /// Clears the persisted session and resets every sub-flow.
    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await?;
        {
            let mut state = self.inner.lock().await;
            *state = WorkflowState::default();
        }
        self.emit(WorkflowEvent::LoggedOut);
        Ok(())
    }

    pub async fn reload_dashboard(&self) -> Result<()> {
        let broker_id = {
            let state = self.inner.lock().await;
            state.session.as_ref().map(|session| session.broker_id)
        };
        let Some(broker_id) = broker_id else {
            return Ok(());
        };
        self.load_dashboard(broker_id).await
    }

    async fn load_dashboard(&self, broker_id: BrokerId) -> Result<()> {
        {
            let mut state = self.inner.lock().await;
            if state.dashboard_loading {
                return Ok(());
            }
            state.dashboard_loading = true;
        }

        let outcome = tokio::try_join!(
            self.api.broker(broker_id),
            self.api.list_applications(),
            self.api.list_complaints(Some(broker_id), None),
            self.api.support_info(),
        );

        let mut state = self.inner.lock().await;
        state.dashboard_loading = false;
        match outcome {
            Ok((profile, applications, complaints, support)) => {
                state.profile = Some(profile);
                state.applications = applications
                    .into_iter()
                    .filter(|app| app.broker_id == broker_id)
                    .collect();
                state.complaints = complaints;
                state.support = Some(support);
                drop(state);
                self.emit(WorkflowEvent::DashboardReloaded);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn refresh_after_mutation(&self) {
        if let Err(err) = self.reload_dashboard().await {
            warn!(error = %err, "dashboard reload failed");
            self.emit(WorkflowEvent::Error(err.to_string()));
        }
    }

    // ---- start job ----

    pub async fn open_start_job(&self) {
        let mut state = self.inner.lock().await;
        state.start_job_open = true;
        state.job_notice = None;
    }

    pub async fn close_start_job(&self) {
        let mut state = self.inner.lock().await;
        state.start_job_open = false;
        state.job_notice = None;
    }

    /// Vehicle numbers are normalized to uppercase as they are typed.
    pub async fn set_vehicle_number(&self, input: &str) {
        let mut state = self.inner.lock().await;
        state.vehicle_number = input.to_uppercase();
    }

    /// Submits the vehicle number. Success opens the OTP sub-flow and clears
    /// the input; failure leaves the modal open for a manual retry.
    pub async fn start_job(&self) {
        let (broker_id, vehicle_number) = {
            let mut state = self.inner.lock().await;
            let Some(broker_id) = state.session.as_ref().map(|s| s.broker_id) else {
                return;
            };
            if state.job_starting || state.vehicle_number.trim().is_empty() {
                return;
            }
            state.job_starting = true;
            state.job_notice = None;
            (broker_id, state.vehicle_number.clone())
        };

        let result = self
            .api
            .start_job(broker_id, StartJobRequest { vehicle_number })
            .await;

        let mut state = self.inner.lock().await;
        state.job_starting = false;
        match result {
            Ok(response) if response.success => {
                state.start_job_open = false;
                state.otp_open = true;
                state.vehicle_number.clear();
                state.active_application = response.application_id;
                let application_id = state.active_application;
                drop(state);
                self.emit(WorkflowEvent::JobStarted { application_id });
            }
            Ok(response) => {
                state.job_notice = response.message;
            }
            Err(err) => {
                warn!(error = %err, "start job failed");
                drop(state);
                self.emit(WorkflowEvent::Error(err.to_string()));
            }
        }
    }

    // ---- OTP ----

    /// Closing the OTP modal abandons the chain: phone, code, and the job's
    /// application id are all discarded.
    pub async fn close_otp(&self) {
        let mut state = self.inner.lock().await;
        state.otp_open = false;
        state.phone_number.clear();
        state.otp_slots = Default::default();
        state.otp_focus = 0;
        state.otp_notice = None;
        state.active_application = None;
    }

    pub async fn set_phone_number(&self, input: &str) {
        let mut state = self.inner.lock().await;
        state.phone_number = input.to_string();
    }

    /// Writes one slot of the 6-digit code. A non-empty single character at
    /// slot `i < 5` advances focus to slot `i + 1`; inputs longer than one
    /// character are ignored.
    pub async fn input_otp_slot(&self, index: usize, value: &str) {
        if index >= OTP_SLOTS || value.chars().count() > 1 {
            return;
        }
        let mut state = self.inner.lock().await;
        state.otp_slots[index] = value.to_string();
        if !value.is_empty() && index < OTP_SLOTS - 1 {
            state.otp_focus = index + 1;
        }
    }

    pub async fn otp_focus(&self) -> usize {
        self.inner.lock().await.otp_focus
    }

    /// Attempts verification once all six slots and the phone number are
    /// filled; otherwise a no-op. Success closes the modal, clears the OTP
    /// state, and reloads the dashboard.
    pub async fn verify_otp(&self) {
        let (phone, otp) = {
            let mut state = self.inner.lock().await;
            if state.verifying {
                return;
            }
            let filled = state.otp_slots.iter().all(|slot| !slot.is_empty());
            if !filled || state.phone_number.is_empty() {
                return;
            }
            state.verifying = true;
            state.otp_notice = None;
            (state.phone_number.clone(), state.otp_slots.concat())
        };

        let result = self.api.verify_otp(VerifyOtpRequest { phone, otp }).await;

        let mut state = self.inner.lock().await;
        state.verifying = false;
        match result {
            Ok(response) if response.success => {
                state.otp_open = false;
                state.phone_number.clear();
                state.otp_slots = Default::default();
                state.otp_focus = 0;
                drop(state);
                self.refresh_after_mutation().await;
                self.emit(WorkflowEvent::OtpVerified);
            }
            Ok(response) => {
                state.otp_notice = Some(response.message);
            }
            Err(err) => {
                warn!(error = %err, "OTP verification failed");
                drop(state);
                self.emit(WorkflowEvent::Error(err.to_string()));
            }
        }
    }

    // ---- fee estimation ----

    /// Opens the estimator for an explicit application. The estimate and the
    /// eventual payment both target this id.
    pub async fn open_fee_estimator(&self, application_id: ApplicationId) {
        let mut state = self.inner.lock().await;
        state.fee_open = true;
        state.fee_target = Some(application_id);
    }

    /// Closing the estimator discards the estimate; reopening requires
    /// recomputing it.
    pub async fn close_fee_estimator(&self) {
        let mut state = self.inner.lock().await;
        state.fee_open = false;
        state.fee_target = None;
        state.fee_estimate = None;
    }

    pub async fn set_application_type(&self, application_type: ApplicationType) {
        let mut state = self.inner.lock().await;
        state.application_type = application_type;
    }

    pub async fn set_vehicle_class(&self, vehicle_class: VehicleClass) {
        let mut state = self.inner.lock().await;
        state.vehicle_class = vehicle_class;
    }

    /// Delegates the computation to the backend and stores the returned
    /// breakdown verbatim; the client never does fee arithmetic.
    pub async fn calculate_fee(&self) {
        let (target, request) = {
            let mut state = self.inner.lock().await;
            if state.estimating {
                return;
            }
            let Some(target) = state.fee_target else {
                return;
            };
            state.estimating = true;
            (
                target,
                FeeEstimateRequest {
                    application_type: state.application_type,
                    vehicle_class: state.vehicle_class,
                },
            )
        };

        let result = self.api.calculate_fee(target, request).await;

        let mut state = self.inner.lock().await;
        state.estimating = false;
        match result {
            Ok(response) => {
                state.fee_estimate = Some(response.breakdown);
                drop(state);
                self.emit(WorkflowEvent::FeeEstimated {
                    application_id: target,
                });
            }
            Err(err) => {
                warn!(error = %err, "fee calculation failed");
                drop(state);
                self.emit(WorkflowEvent::Error(err.to_string()));
            }
        }
    }

    pub async fn fee_estimate(&self) -> Option<FeeBreakdown> {
        self.inner.lock().await.fee_estimate.clone()
    }

    // ---- payment ----

    /// Only enabled once an estimate exists; carries the estimate's target
    /// application into the payment sub-flow.
    pub async fn proceed_to_payment(&self) -> bool {
        let mut state = self.inner.lock().await;
        if state.fee_estimate.is_none() {
            return false;
        }
        let Some(target) = state.fee_target else {
            return false;
        };
        state.payment_open = true;
        state.payment_target = Some(target);
        true
    }

    pub async fn set_payment_method(&self, method: PaymentMethod) {
        let mut state = self.inner.lock().await;
        state.payment_method = method;
    }

    /// Submits the payment. On success the sub-flow locks with the
    /// transaction id on display until the modal is dismissed; on failure an
    /// alert is surfaced and the modal stays open for retry.
    pub async fn process_payment(&self) {
        let request = {
            let mut state = self.inner.lock().await;
            if !state.payment_open || state.paying || state.transaction_id.is_some() {
                return;
            }
            let (Some(target), Some(breakdown)) =
                (state.payment_target, state.fee_estimate.clone())
            else {
                return;
            };
            let fee_breakdown = match serde_json::to_string(&breakdown) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(error = %err, "fee breakdown serialization failed");
                    state.payment_alert = Some(PAYMENT_FAILURE_ALERT.to_string());
                    return;
                }
            };
            state.paying = true;
            state.payment_alert = None;
            PaymentRequest {
                application_id: target,
                amount: breakdown.total,
                payment_method: state.payment_method,
                fee_breakdown,
            }
        };

        let result = self.api.process_payment(request).await;

        let mut state = self.inner.lock().await;
        state.paying = false;
        match result {
            Ok(receipt) if receipt.success => {
                state.transaction_id = Some(receipt.transaction_id.clone());
                drop(state);
                info!(transaction_id = %receipt.transaction_id, "payment completed");
                self.emit(WorkflowEvent::PaymentCompleted {
                    transaction_id: receipt.transaction_id,
                });
            }
            Ok(receipt) => {
                state.payment_alert = Some(receipt.message);
            }
            Err(err) => {
                warn!(error = %err, "payment failed");
                state.payment_alert = Some(PAYMENT_FAILURE_ALERT.to_string());
                drop(state);
                self.emit(WorkflowEvent::Error(err.to_string()));
            }
        }
    }

    /// Dismissing the payment modal discards the whole chain (target
    /// application, fee estimate, transaction id) and reloads the dependent
    /// dashboard data. Paying again requires a fresh estimate.
    pub async fn close_payment(&self) {
        {
            let mut state = self.inner.lock().await;
            state.payment_open = false;
            state.payment_target = None;
            state.transaction_id = None;
            state.payment_alert = None;
            state.fee_open = false;
            state.fee_target = None;
            state.fee_estimate = None;
            state.active_application = None;
        }
        self.refresh_after_mutation().await;
    }

    pub async fn transaction_id(&self) -> Option<String> {
        self.inner.lock().await.transaction_id.clone()
    }

    pub async fn payment_alert(&self) -> Option<String> {
        self.inner.lock().await.payment_alert.clone()
    }

    // ---- complaints ----

    pub async fn open_complaint(&self) {
        let mut state = self.inner.lock().await;
        state.complaint_open = true;
    }

    pub async fn close_complaint(&self) {
        let mut state = self.inner.lock().await;
        state.complaint_open = false;
    }

    pub async fn set_complaint_application(&self, application_id: ApplicationId) {
        let mut state = self.inner.lock().await;
        state.complaint_application = Some(application_id);
    }

    pub async fn set_complaint_type(&self, complaint_type: ComplaintType) {
        let mut state = self.inner.lock().await;
        state.complaint_type = Some(complaint_type);
    }

    pub async fn set_complaint_description(&self, description: &str) {
        let mut state = self.inner.lock().await;
        state.complaint_description = description.to_string();
    }

    /// Requires a selected application, a type, and a description. Success
    /// closes the modal, clears the fields, and reloads the dashboard.
    pub async fn submit_complaint(&self) {
        let request = {
            let mut state = self.inner.lock().await;
            if state.complaint_submitting {
                return;
            }
            let Some(session) = state.session.as_ref() else {
                return;
            };
            let (Some(application_id), Some(complaint_type)) =
                (state.complaint_application, state.complaint_type)
            else {
                return;
            };
            if state.complaint_description.trim().is_empty() {
                return;
            }
            let request = ComplaintRequest {
                broker_id: session.broker_id,
                application_id,
                complaint_type,
                description: state.complaint_description.clone(),
            };
            state.complaint_submitting = true;
            request
        };

        let result = self.api.submit_complaint(request).await;

        let mut state = self.inner.lock().await;
        state.complaint_submitting = false;
        match result {
            Ok(receipt) => {
                state.complaint_open = false;
                state.complaint_application = None;
                state.complaint_type = None;
                state.complaint_description.clear();
                drop(state);
                self.refresh_after_mutation().await;
                self.emit(WorkflowEvent::ComplaintFiled {
                    complaint_id: receipt.complaint_id,
                });
            }
            Err(err) => {
                warn!(error = %err, "complaint submission failed");
                drop(state);
                self.emit(WorkflowEvent::Error(err.to_string()));
            }
        }
    }

    // ---- document check ----

    /// Runs the forgery check for an uploaded document. Fire-and-forget from
    /// the caller's perspective: spawn this future and let the report arrive
    /// whenever it does. Selecting a new file does not cancel an in-flight
    /// check; each check carries a token and only the newest one may publish
    /// its result.
    pub async fn analyze_document(&self, image_bytes: Vec<u8>) {
        let token = {
            let mut state = self.inner.lock().await;
            state.forgery_seq += 1;
            state.analyzing = true;
            state.forgery_seq
        };

        let image = STANDARD.encode(&image_bytes);
        let result = self.api.detect_forgery(ForgeryRequest { image }).await;

        let mut state = self.inner.lock().await;
        if token != state.forgery_seq {
            debug!(token, newest = state.forgery_seq, "discarding stale forgery result");
            return;
        }
        state.analyzing = false;
        match result {
            Ok(report) => {
                let is_forged = report.is_forged;
                state.forgery_report = Some(report);
                drop(state);
                self.emit(WorkflowEvent::ForgeryReportReady { is_forged });
            }
            Err(err) => {
                warn!(error = %err, "forgery check failed");
                drop(state);
                self.emit(WorkflowEvent::Error(err.to_string()));
            }
        }
    }

    pub async fn forgery_report(&self) -> Option<ForgeryReport> {
        self.inner.lock().await.forgery_report.clone()
    }

    pub async fn is_analyzing(&self) -> bool {
        self.inner.lock().await.analyzing
    }

    // ---- review queue ----

    pub async fn approve_application(&self, application_id: ApplicationId) {
        let Some(broker_id) = self.session_broker_id().await else {
            return;
        };
        let result = self
            .api
            .approve_application(application_id, ApproveRequest {
                approved_by: broker_id,
            })
            .await;
        match result {
            Ok(_) => self.refresh_after_mutation().await,
            Err(err) => {
                warn!(error = %err, "approval failed");
                self.emit(WorkflowEvent::Error(err.to_string()));
            }
        }
    }

    pub async fn reject_application(&self, application_id: ApplicationId, reason: &str) {
        let Some(broker_id) = self.session_broker_id().await else {
            return;
        };
        let result = self
            .api
            .reject_application(application_id, RejectRequest {
                rejected_by: broker_id,
                reason: reason.to_string(),
            })
            .await;
        match result {
            Ok(_) => self.refresh_after_mutation().await,
            Err(err) => {
                warn!(error = %err, "rejection failed");
                self.emit(WorkflowEvent::Error(err.to_string()));
            }
        }
    }

    // ---- read accessors ----

    async fn session_broker_id(&self) -> Option<BrokerId> {
        let state = self.inner.lock().await;
        state.session.as_ref().map(|session| session.broker_id)
    }

    pub async fn current_session(&self) -> Option<BrokerSession> {
        self.inner.lock().await.session.clone()
    }

    pub async fn profile(&self) -> Option<BrokerSummary> {
        let state = self.inner.lock().await;
        state
            .profile
            .clone()
            .or_else(|| state.session.as_ref().map(|s| s.profile.clone()))
    }

    pub async fn applications(&self) -> Vec<ApplicationRecord> {
        self.inner.lock().await.applications.clone()
    }

    pub async fn complaints(&self) -> Vec<Complaint> {
        self.inner.lock().await.complaints.clone()
    }

    pub async fn support_info(&self) -> Option<SupportInfo> {
        self.inner.lock().await.support.clone()
    }

    pub async fn login_error(&self) -> Option<String> {
        self.inner.lock().await.login_error.clone()
    }

    pub async fn job_notice(&self) -> Option<String> {
        self.inner.lock().await.job_notice.clone()
    }

    pub async fn otp_notice(&self) -> Option<String> {
        self.inner.lock().await.otp_notice.clone()
    }

    pub async fn is_start_job_open(&self) -> bool {
        self.inner.lock().await.start_job_open
    }

    pub async fn is_otp_open(&self) -> bool {
        self.inner.lock().await.otp_open
    }

    pub async fn is_fee_estimator_open(&self) -> bool {
        self.inner.lock().await.fee_open
    }

    pub async fn is_payment_open(&self) -> bool {
        self.inner.lock().await.payment_open
    }

    pub async fn is_complaint_open(&self) -> bool {
        self.inner.lock().await.complaint_open
    }
}

#[cfg(test)]
#[path = "tests/fakes.rs"]
pub(crate) mod fakes;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
