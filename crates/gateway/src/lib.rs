//! Typed HTTP gateway to the vehicle-registration backend.
//!
//! Every backend capability is one method. Any non-success status or transport
//! failure collapses into a [`GatewayError`] naming only the operation; callers
//! decide how to surface it. Business-rule rejections arrive as `success:false`
//! response bodies and are returned to the caller untouched.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

use shared::{
    domain::{ApplicationId, BrokerId, ComplaintStatus},
    protocol::{
        AnalyticsSnapshot, ApplicationRecord, ApproveRequest, BrokerLoginRequest,
        BrokerLoginResponse, BrokerSummary, ChatRequest, ChatResponse, CitizenRecord, Complaint,
        ComplaintReceipt, ComplaintRequest, FeeEstimateRequest, FeeEstimateResponse,
        ForgeryReport, ForgeryRequest, NewApplication, NewCitizen, PaymentReceipt, PaymentRequest,
        RejectRequest, StartJobRequest, StartJobResponse, StatusChangeResponse, SupportInfo,
        VerifyOtpRequest, VerifyOtpResponse,
    },
};

#[derive(Debug, Error)]
#[error("failed to {operation}")]
pub struct GatewayError {
    operation: &'static str,
    #[source]
    source: reqwest::Error,
}

impl GatewayError {
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// The backend surface the controllers depend on. Implemented by
/// [`PortalGateway`] and by recording fakes in tests.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    async fn list_brokers(&self) -> Result<Vec<BrokerSummary>>;
    async fn broker(&self, broker_id: BrokerId) -> Result<BrokerSummary>;
    async fn broker_login(&self, request: BrokerLoginRequest) -> Result<BrokerLoginResponse>;
    async fn start_job(
        &self,
        broker_id: BrokerId,
        request: StartJobRequest,
    ) -> Result<StartJobResponse>;
    async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<VerifyOtpResponse>;
    async fn calculate_fee(
        &self,
        application_id: ApplicationId,
        request: FeeEstimateRequest,
    ) -> Result<FeeEstimateResponse>;
    async fn submit_complaint(&self, request: ComplaintRequest) -> Result<ComplaintReceipt>;
    async fn list_complaints(
        &self,
        broker_id: Option<BrokerId>,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<Complaint>>;
    async fn support_info(&self) -> Result<SupportInfo>;
    async fn process_payment(&self, request: PaymentRequest) -> Result<PaymentReceipt>;
    async fn approve_application(
        &self,
        application_id: ApplicationId,
        request: ApproveRequest,
    ) -> Result<StatusChangeResponse>;
    async fn reject_application(
        &self,
        application_id: ApplicationId,
        request: RejectRequest,
    ) -> Result<StatusChangeResponse>;
    async fn create_citizen(&self, request: NewCitizen) -> Result<CitizenRecord>;
    async fn create_application(&self, request: NewApplication) -> Result<ApplicationRecord>;
    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>>;
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse>;
    async fn detect_forgery(&self, request: ForgeryRequest) -> Result<ForgeryReport>;
    async fn analytics(&self) -> Result<AnalyticsSnapshot>;
}

pub struct PortalGateway {
    http: Client,
    base_url: String,
}

impl PortalGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<T, GatewayError> {
        let fail = |source: reqwest::Error| {
            warn!(operation, error = %source, "portal api request failed");
            GatewayError { operation, source }
        };

        let response = request
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(&fail)?;
        response.json().await.map_err(&fail)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &'static str,
    ) -> Result<T, GatewayError> {
        Self::execute(self.http.get(self.endpoint(path)), operation).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        operation: &'static str,
    ) -> Result<T, GatewayError> {
        Self::execute(self.http.post(self.endpoint(path)).json(body), operation).await
    }

    pub async fn list_brokers(&self) -> Result<Vec<BrokerSummary>, GatewayError> {
        self.get_json("/brokers/", "fetch brokers").await
    }

    pub async fn broker(&self, broker_id: BrokerId) -> Result<BrokerSummary, GatewayError> {
        self.get_json(&format!("/brokers/{}", broker_id.0), "fetch broker")
            .await
    }

    pub async fn broker_login(
        &self,
        request: BrokerLoginRequest,
    ) -> Result<BrokerLoginResponse, GatewayError> {
        self.post_json("/brokers/login", &request, "log in broker")
            .await
    }

    pub async fn start_job(
        &self,
        broker_id: BrokerId,
        request: StartJobRequest,
    ) -> Result<StartJobResponse, GatewayError> {
        self.post_json(
            &format!("/brokers/{}/start-job", broker_id.0),
            &request,
            "start job",
        )
        .await
    }

    pub async fn verify_otp(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<VerifyOtpResponse, GatewayError> {
        self.post_json("/brokers/verify-otp", &request, "verify OTP")
            .await
    }

    pub async fn calculate_fee(
        &self,
        application_id: ApplicationId,
        request: FeeEstimateRequest,
    ) -> Result<FeeEstimateResponse, GatewayError> {
        self.post_json(
            &format!("/applications/{}/calculate-fee", application_id.0),
            &request,
            "calculate fee",
        )
        .await
    }

    pub async fn submit_complaint(
        &self,
        request: ComplaintRequest,
    ) -> Result<ComplaintReceipt, GatewayError> {
        self.post_json("/complaints", &request, "submit complaint")
            .await
    }

    pub async fn list_complaints(
        &self,
        broker_id: Option<BrokerId>,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<Complaint>, GatewayError> {
        let operation = "fetch complaints";
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(broker_id) = broker_id {
            query.push(("broker_id", broker_id.0.to_string()));
        }
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        Self::execute(
            self.http.get(self.endpoint("/complaints")).query(&query),
            operation,
        )
        .await
    }

    pub async fn support_info(&self) -> Result<SupportInfo, GatewayError> {
        self.get_json("/support/info", "fetch support info").await
    }

    pub async fn process_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentReceipt, GatewayError> {
        self.post_json("/payments/", &request, "process payment")
            .await
    }

    pub async fn approve_application(
        &self,
        application_id: ApplicationId,
        request: ApproveRequest,
    ) -> Result<StatusChangeResponse, GatewayError> {
        self.post_json(
            &format!("/applications/{}/approve", application_id.0),
            &request,
            "approve application",
        )
        .await
    }

    pub async fn reject_application(
        &self,
        application_id: ApplicationId,
        request: RejectRequest,
    ) -> Result<StatusChangeResponse, GatewayError> {
        self.post_json(
            &format!("/applications/{}/reject", application_id.0),
            &request,
            "reject application",
        )
        .await
    }

    pub async fn create_citizen(&self, request: NewCitizen) -> Result<CitizenRecord, GatewayError> {
        self.post_json("/citizens/", &request, "create citizen")
            .await
    }

    pub async fn create_application(
        &self,
        request: NewApplication,
    ) -> Result<ApplicationRecord, GatewayError> {
        self.post_json("/applications/", &request, "create application")
            .await
    }

    pub async fn list_applications(&self) -> Result<Vec<ApplicationRecord>, GatewayError> {
        self.get_json("/applications/", "fetch applications").await
    }

    pub async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse, GatewayError> {
        self.post_json("/chat/", &request, "send chat message")
            .await
    }

    pub async fn detect_forgery(
        &self,
        request: ForgeryRequest,
    ) -> Result<ForgeryReport, GatewayError> {
        self.post_json("/detect-forgery/", &request, "detect forgery")
            .await
    }

    pub async fn analytics(&self) -> Result<AnalyticsSnapshot, GatewayError> {
        self.get_json("/analytics/", "fetch analytics").await
    }
}

#[async_trait]
impl RegistryApi for PortalGateway {
    async fn list_brokers(&self) -> Result<Vec<BrokerSummary>> {
        Ok(PortalGateway::list_brokers(self).await?)
    }

    async fn broker(&self, broker_id: BrokerId) -> Result<BrokerSummary> {
        Ok(PortalGateway::broker(self, broker_id).await?)
    }

    async fn broker_login(&self, request: BrokerLoginRequest) -> Result<BrokerLoginResponse> {
        Ok(PortalGateway::broker_login(self, request).await?)
    }

    async fn start_job(
        &self,
        broker_id: BrokerId,
        request: StartJobRequest,
    ) -> Result<StartJobResponse> {
        Ok(PortalGateway::start_job(self, broker_id, request).await?)
    }

    async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<VerifyOtpResponse> {
        Ok(PortalGateway::verify_otp(self, request).await?)
    }

    async fn calculate_fee(
        &self,
        application_id: ApplicationId,
        request: FeeEstimateRequest,
    ) -> Result<FeeEstimateResponse> {
        Ok(PortalGateway::calculate_fee(self, application_id, request).await?)
    }

    async fn submit_complaint(&self, request: ComplaintRequest) -> Result<ComplaintReceipt> {
        Ok(PortalGateway::submit_complaint(self, request).await?)
    }

    async fn list_complaints(
        &self,
        broker_id: Option<BrokerId>,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<Complaint>> {
        Ok(PortalGateway::list_complaints(self, broker_id, status).await?)
    }

    async fn support_info(&self) -> Result<SupportInfo> {
        Ok(PortalGateway::support_info(self).await?)
    }

    async fn process_payment(&self, request: PaymentRequest) -> Result<PaymentReceipt> {
        Ok(PortalGateway::process_payment(self, request).await?)
    }

    async fn approve_application(
        &self,
        application_id: ApplicationId,
        request: ApproveRequest,
    ) -> Result<StatusChangeResponse> {
        Ok(PortalGateway::approve_application(self, application_id, request).await?)
    }

    async fn reject_application(
        &self,
        application_id: ApplicationId,
        request: RejectRequest,
    ) -> Result<StatusChangeResponse> {
        Ok(PortalGateway::reject_application(self, application_id, request).await?)
    }

    async fn create_citizen(&self, request: NewCitizen) -> Result<CitizenRecord> {
        Ok(PortalGateway::create_citizen(self, request).await?)
    }

    async fn create_application(&self, request: NewApplication) -> Result<ApplicationRecord> {
        Ok(PortalGateway::create_application(self, request).await?)
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>> {
        Ok(PortalGateway::list_applications(self).await?)
    }

    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        Ok(PortalGateway::send_chat(self, request).await?)
    }

    async fn detect_forgery(&self, request: ForgeryRequest) -> Result<ForgeryReport> {
        Ok(PortalGateway::detect_forgery(self, request).await?)
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot> {
        Ok(PortalGateway::analytics(self).await?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
