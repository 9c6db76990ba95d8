//! Recording fake for the `RegistryApi` seam, shared by the controller tests.

use std::{
    collections::{HashSet, VecDeque},
    sync::Arc,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use gateway::RegistryApi;
use shared::{
    domain::{
        ApplicationId, ApplicationType, BrokerId, CitizenId, ComplaintId, ComplaintStatus,
        ComplaintType, PaymentId,
    },
    protocol::{
        AnalyticsSnapshot, ApplicationRecord, ApproveRequest, BrokerLoginRequest,
        BrokerLoginResponse, BrokerSummary, ChatRequest, ChatResponse, CitizenRecord, Complaint,
        ComplaintReceipt, ComplaintRequest, FeeBreakdown, FeeEstimateRequest, FeeEstimateResponse,
        ForgeryReport, ForgeryRequest, NewApplication, NewCitizen, PaymentReceipt, PaymentRequest,
        RejectRequest, StartJobRequest, StartJobResponse, StatusChangeResponse, SupportInfo,
        VerifyOtpRequest, VerifyOtpResponse,
    },
};
use tokio::sync::{Mutex, Notify};

pub fn sample_broker(id: i64) -> BrokerSummary {
    BrokerSummary {
        id: BrokerId(id),
        name: format!("Broker {id}"),
        license_number: format!("39725621{id:02}"),
        phone: "9876543210".to_string(),
        email: format!("broker{id}@example.com"),
        specialization: "Commercial".to_string(),
        avg_punctuality: Some(4.2),
        avg_quality: Some(4.5),
        avg_compliance: Some(4.1),
        avg_communication: Some(4.4),
        avg_overall: Some(4.3),
    }
}

pub fn sample_application(id: i64, broker_id: i64) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId(id),
        citizen_id: CitizenId(1),
        broker_id: BrokerId(broker_id),
        application_type: ApplicationType::NewRegistration,
        status: "Pending".to_string(),
        submission_date: NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date"),
        documents: "RC transfer paperwork".to_string(),
        is_fraud: false,
    }
}

pub fn sample_breakdown() -> FeeBreakdown {
    FeeBreakdown {
        base_fee: 1500.0,
        service_fee: 1500.0,
        broker_commission: 225.0,
        tax_gst: 270.0,
        total: 1995.0,
    }
}

#[derive(Default)]
pub struct CapturedRequests {
    pub citizens: Mutex<Vec<NewCitizen>>,
    pub applications: Mutex<Vec<NewApplication>>,
    pub jobs: Mutex<Vec<(BrokerId, StartJobRequest)>>,
    pub otp: Mutex<Vec<VerifyOtpRequest>>,
    pub fees: Mutex<Vec<(ApplicationId, FeeEstimateRequest)>>,
    pub payments: Mutex<Vec<PaymentRequest>>,
    pub complaints: Mutex<Vec<ComplaintRequest>>,
    pub forgery_images: Mutex<Vec<String>>,
}

pub struct FakeApi {
    pub calls: Mutex<Vec<&'static str>>,
    pub fail: Mutex<HashSet<&'static str>>,
    pub brokers: Vec<BrokerSummary>,
    pub applications: Vec<ApplicationRecord>,
    pub complaints: Vec<Complaint>,
    pub login_response: BrokerLoginResponse,
    pub start_job_response: StartJobResponse,
    pub verify_otp_response: VerifyOtpResponse,
    pub fee_breakdown: FeeBreakdown,
    pub payment_receipt: PaymentReceipt,
    pub application_is_fraud: bool,
    pub chat_reply: String,
    /// Queued forgery responses; an attached `Notify` gates the response so
    /// tests can control completion order of concurrent checks.
    pub forgery_queue: Mutex<VecDeque<(ForgeryReport, Option<Arc<Notify>>)>>,
    pub captured: CapturedRequests,
}

impl FakeApi {
    pub fn new() -> Self {
        let broker = sample_broker(9);
        Self {
            calls: Mutex::new(Vec::new()),
            fail: Mutex::new(HashSet::new()),
            brokers: vec![sample_broker(9), sample_broker(12)],
            applications: vec![sample_application(17, 9), sample_application(21, 12)],
            complaints: vec![Complaint {
                id: ComplaintId(3),
                broker_id: BrokerId(9),
                application_id: ApplicationId(17),
                complaint_type: ComplaintType::Delay,
                description: "Registration pending for three weeks".to_string(),
                status: ComplaintStatus::Pending,
                submitted_date: NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date"),
                resolved_date: None,
            }],
            login_response: BrokerLoginResponse {
                success: true,
                broker: Some(broker),
                message: None,
            },
            start_job_response: StartJobResponse {
                success: true,
                message: None,
                application_id: Some(ApplicationId(17)),
                vehicle_details: None,
            },
            verify_otp_response: VerifyOtpResponse {
                success: true,
                message: "OTP verified successfully".to_string(),
                session_token: Some("mock_token_4821".to_string()),
            },
            fee_breakdown: sample_breakdown(),
            payment_receipt: PaymentReceipt {
                success: true,
                payment_id: PaymentId(31),
                transaction_id: "TXN4F2C9A1B7D3E".to_string(),
                amount: 1995.0,
                status: "Success".to_string(),
                message: "Payment processed successfully".to_string(),
            },
            application_is_fraud: false,
            chat_reply: "You can track your application from the dashboard.".to_string(),
            forgery_queue: Mutex::new(VecDeque::new()),
            captured: CapturedRequests::default(),
        }
    }

    pub async fn fail_operation(&self, op: &'static str) {
        self.fail.lock().await.insert(op);
    }

    pub async fn clear_failures(&self) {
        self.fail.lock().await.clear();
    }

    pub async fn call_count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|name| **name == op)
            .count()
    }

    async fn begin(&self, op: &'static str) -> Result<()> {
        self.calls.lock().await.push(op);
        if self.fail.lock().await.contains(op) {
            return Err(anyhow!("failed to {op}"));
        }
        Ok(())
    }
}

#[async_trait]
impl RegistryApi for FakeApi {
    async fn list_brokers(&self) -> Result<Vec<BrokerSummary>> {
        self.begin("list_brokers").await?;
        Ok(self.brokers.clone())
    }

    async fn broker(&self, broker_id: BrokerId) -> Result<BrokerSummary> {
        self.begin("broker").await?;
        self.brokers
            .iter()
            .find(|broker| broker.id == broker_id)
            .cloned()
            .ok_or_else(|| anyhow!("no broker {}", broker_id.0))
    }

    async fn broker_login(&self, request: BrokerLoginRequest) -> Result<BrokerLoginResponse> {
        self.begin("broker_login").await?;
        let _ = request;
        Ok(self.login_response.clone())
    }

    async fn start_job(
        &self,
        broker_id: BrokerId,
        request: StartJobRequest,
    ) -> Result<StartJobResponse> {
        self.begin("start_job").await?;
        self.captured.jobs.lock().await.push((broker_id, request));
        Ok(self.start_job_response.clone())
    }

    async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<VerifyOtpResponse> {
        self.begin("verify_otp").await?;
        self.captured.otp.lock().await.push(request);
        Ok(self.verify_otp_response.clone())
    }

    async fn calculate_fee(
        &self,
        application_id: ApplicationId,
        request: FeeEstimateRequest,
    ) -> Result<FeeEstimateResponse> {
        self.begin("calculate_fee").await?;
        self.captured
            .fees
            .lock()
            .await
            .push((application_id, request));
        Ok(FeeEstimateResponse {
            breakdown: self.fee_breakdown.clone(),
        })
    }

    async fn submit_complaint(&self, request: ComplaintRequest) -> Result<ComplaintReceipt> {
        self.begin("submit_complaint").await?;
        self.captured.complaints.lock().await.push(request);
        Ok(ComplaintReceipt {
            success: true,
            complaint_id: ComplaintId(88),
            message: "Complaint submitted successfully. Ticket ID: 88".to_string(),
        })
    }

    async fn list_complaints(
        &self,
        _broker_id: Option<BrokerId>,
        _status: Option<ComplaintStatus>,
    ) -> Result<Vec<Complaint>> {
        self.begin("list_complaints").await?;
        Ok(self.complaints.clone())
    }

    async fn support_info(&self) -> Result<SupportInfo> {
        self.begin("support_info").await?;
        Ok(SupportInfo {
            toll_free: "1800-000-0000".to_string(),
            emergency_contact: "+91-000-000-0000".to_string(),
            email: "support@example.gov".to_string(),
            working_hours: "Monday - Saturday, 9:00 AM - 6:00 PM".to_string(),
            helpdesk: "For urgent assistance, call our 24/7 helpline".to_string(),
        })
    }

    async fn process_payment(&self, request: PaymentRequest) -> Result<PaymentReceipt> {
        self.begin("process_payment").await?;
        self.captured.payments.lock().await.push(request);
        Ok(self.payment_receipt.clone())
    }

    async fn approve_application(
        &self,
        _application_id: ApplicationId,
        _request: ApproveRequest,
    ) -> Result<StatusChangeResponse> {
        self.begin("approve_application").await?;
        Ok(StatusChangeResponse {
            success: true,
            message: "Application approved successfully".to_string(),
        })
    }

    async fn reject_application(
        &self,
        _application_id: ApplicationId,
        _request: RejectRequest,
    ) -> Result<StatusChangeResponse> {
        self.begin("reject_application").await?;
        Ok(StatusChangeResponse {
            success: true,
            message: "Application rejected".to_string(),
        })
    }

    async fn create_citizen(&self, request: NewCitizen) -> Result<CitizenRecord> {
        self.begin("create_citizen").await?;
        let record = CitizenRecord {
            id: CitizenId(101),
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            aadhaar: request.aadhaar.clone(),
            address: request.address.clone(),
        };
        self.captured.citizens.lock().await.push(request);
        Ok(record)
    }

    async fn create_application(&self, request: NewApplication) -> Result<ApplicationRecord> {
        self.begin("create_application").await?;
        let record = ApplicationRecord {
            id: ApplicationId(555),
            citizen_id: request.citizen_id,
            broker_id: request.broker_id,
            application_type: request.application_type,
            status: "Pending".to_string(),
            submission_date: NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date"),
            documents: request.documents.clone(),
            is_fraud: self.application_is_fraud,
        };
        self.captured.applications.lock().await.push(request);
        Ok(record)
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>> {
        self.begin("list_applications").await?;
        Ok(self.applications.clone())
    }

    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.begin("send_chat").await?;
        let _ = request;
        Ok(ChatResponse {
            response: self.chat_reply.clone(),
        })
    }

    async fn detect_forgery(&self, request: ForgeryRequest) -> Result<ForgeryReport> {
        self.begin("detect_forgery").await?;
        self.captured.forgery_images.lock().await.push(request.image);
        let next = self.forgery_queue.lock().await.pop_front();
        match next {
            Some((report, Some(gate))) => {
                gate.notified().await;
                Ok(report)
            }
            Some((report, None)) => Ok(report),
            None => Ok(ForgeryReport {
                is_forged: false,
                confidence: 0.97,
                issues: Vec::new(),
            }),
        }
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot> {
        self.begin("analytics").await?;
        Ok(AnalyticsSnapshot {
            total_citizens: 120,
            total_brokers: 8,
            total_applications: 64,
            approved_applications: 40,
        })
    }
}
