use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(CitizenId);
id_newtype!(BrokerId);
id_newtype!(ApplicationId);
id_newtype!(ComplaintId);
id_newtype!(PaymentId);

/// Registration service categories accepted by the fee and application
/// endpoints. Wire values are the display strings the backend keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationType {
    #[serde(rename = "New Registration")]
    NewRegistration,
    Renewal,
    Transfer,
}

impl ApplicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::NewRegistration => "New Registration",
            ApplicationType::Renewal => "Renewal",
            ApplicationType::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleClass {
    #[serde(rename = "Two Wheeler")]
    TwoWheeler,
    #[serde(rename = "Four Wheeler")]
    FourWheeler,
    Commercial,
    #[serde(rename = "Heavy Vehicle")]
    HeavyVehicle,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::TwoWheeler => "Two Wheeler",
            VehicleClass::FourWheeler => "Four Wheeler",
            VehicleClass::Commercial => "Commercial",
            VehicleClass::HeavyVehicle => "Heavy Vehicle",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "UPI")]
    Upi,
    Card,
    NetBanking,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::NetBanking => "NetBanking",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintType {
    #[serde(rename = "Document Issue")]
    DocumentIssue,
    #[serde(rename = "Payment Issue")]
    PaymentIssue,
    Delay,
    Other,
}

/// Complaint lifecycle is owned entirely by the backend; the client only
/// observes these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }
}
