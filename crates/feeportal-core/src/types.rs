//! Basic types shared by the payment models

use serde::{Deserialize, Serialize};

/// Transaction status as reported by the payments backend
///
/// Statuses the portal does not know about are kept verbatim so they can
/// still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(untagged)]
    Other(String),
}

impl TransactionStatus {
    /// The statuses offered in the filter select
    pub const FILTERABLE: [TransactionStatus; 3] = [
        TransactionStatus::Success,
        TransactionStatus::Pending,
        TransactionStatus::Failed,
    ];

    /// Wire value, e.g. `SUCCESS`
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Other(s) => s,
        }
    }

    /// Human label, e.g. `Success`
    pub fn label(&self) -> &str {
        match self {
            TransactionStatus::Success => "Success",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Other(s) if s.is_empty() => "-",
            TransactionStatus::Other(s) => s,
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SUCCESS" => Ok(TransactionStatus::Success),
            "PENDING" => Ok(TransactionStatus::Pending),
            "FAILED" => Ok(TransactionStatus::Failed),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
