use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApplicationId, ApplicationType, BrokerId, CitizenId, ComplaintId, ComplaintStatus,
    ComplaintType, PaymentId, PaymentMethod, VehicleClass,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerSummary {
    pub id: BrokerId,
    pub name: String,
    pub license_number: String,
    pub phone: String,
    pub email: String,
    pub specialization: String,
    #[serde(default)]
    pub avg_punctuality: Option<f64>,
    #[serde(default)]
    pub avg_quality: Option<f64>,
    #[serde(default)]
    pub avg_compliance: Option<f64>,
    #[serde(default)]
    pub avg_communication: Option<f64>,
    #[serde(default)]
    pub avg_overall: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCitizen {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub aadhaar: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitizenRecord {
    pub id: CitizenId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub aadhaar: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub citizen_id: CitizenId,
    pub broker_id: BrokerId,
    pub application_type: ApplicationType,
    pub documents: String,
}

/// Application status strings ("Pending", "Approved", "Payment Completed", ...)
/// are an open set owned by the backend and stay untyped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub citizen_id: CitizenId,
    pub broker_id: BrokerId,
    pub application_type: ApplicationType,
    pub status: String,
    pub submission_date: NaiveDate,
    pub documents: String,
    #[serde(default)]
    pub is_fraud: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerLoginRequest {
    pub license_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerLoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker: Option<BrokerSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartJobRequest {
    pub vehicle_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub vehicle_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartJobResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_details: Option<VehicleDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEstimateRequest {
    pub application_type: ApplicationType,
    pub vehicle_class: VehicleClass,
}

/// Server-computed decomposition of the total charge. The client renders
/// these numbers verbatim and never recomputes the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub base_fee: f64,
    pub service_fee: f64,
    pub broker_commission: f64,
    pub tax_gst: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEstimateResponse {
    pub breakdown: FeeBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintRequest {
    pub broker_id: BrokerId,
    pub application_id: ApplicationId,
    pub complaint_type: ComplaintType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintReceipt {
    pub success: bool,
    pub complaint_id: ComplaintId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub broker_id: BrokerId,
    pub application_id: ApplicationId,
    pub complaint_type: ComplaintType,
    pub description: String,
    pub status: ComplaintStatus,
    pub submitted_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub application_id: ApplicationId,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    /// The fee breakdown the payment was made against, serialized as a JSON
    /// string. The backend stores it opaquely.
    pub fee_breakdown: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub success: bool,
    pub payment_id: PaymentId,
    pub transaction_id: String,
    pub amount: f64,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequest {
    pub approved_by: BrokerId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    pub rejected_by: BrokerId,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeryRequest {
    /// Base64-encoded document image, without a data-URL prefix.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeryReport {
    pub is_forged: bool,
    pub confidence: f64,
    #[serde(default)]
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub total_citizens: i64,
    pub total_brokers: i64,
    pub total_applications: i64,
    pub approved_applications: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportInfo {
    pub toll_free: String,
    pub emergency_contact: String,
    pub email: String,
    pub working_hours: String,
    pub helpdesk: String,
}
