//! Billing records: invoices and the payments settling them.
//!
//! An invoice references a patient by name only; the server owns
//! referential integrity, the client renders whatever it returns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MedideskError, Result};
use crate::types::Resource;

use super::Entity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub id: String,
    pub patient_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub issued_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl Entity for Invoice {
    const RESOURCE: Resource = Resource::Invoices;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status_label(&self) -> String {
        self.status.to_string()
    }

    fn search_haystacks(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.patient_name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<&str> {
        Some(&self.issued_at)
    }

    fn metric(&self) -> Option<f64> {
        Some(self.amount)
    }

    fn validate(&self) -> Result<()> {
        if self.patient_name.trim().is_empty() {
            return Err(MedideskError::Validation(
                "patient name is required".to_string(),
            ));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(MedideskError::Validation(format!(
                "invalid invoice amount {}",
                self.amount
            )));
        }
        Ok(())
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Patient", "Amount", "Status", "Issued"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.patient_name.clone(),
            format!("{:.2}", self.amount),
            self.status.to_string(),
            self.issued_at.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub id: String,
    pub invoice_id: String,
    pub patient_name: String,
    pub amount: f64,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    pub paid_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Insurance,
    Transfer,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Insurance => write!(f, "insurance"),
            PaymentMethod::Transfer => write!(f, "transfer"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = MedideskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "insurance" => Ok(PaymentMethod::Insurance),
            "transfer" => Ok(PaymentMethod::Transfer),
            _ => Err(MedideskError::InvalidInput(format!(
                "unknown payment method '{}'",
                s
            ))),
        }
    }
}

/// Exactly three states; statistics rely on them partitioning the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Success => write!(f, "success"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

impl Entity for Payment {
    const RESOURCE: Resource = Resource::Payments;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status_label(&self) -> String {
        self.status.to_string()
    }

    fn search_haystacks(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.invoice_id.as_str(),
            self.patient_name.as_str(),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.to_string()),
            "method" => Some(self.method.to_string()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<&str> {
        Some(&self.paid_at)
    }

    fn metric(&self) -> Option<f64> {
        Some(self.amount)
    }

    fn validate(&self) -> Result<()> {
        if self.invoice_id.trim().is_empty() {
            return Err(MedideskError::Validation(
                "invoice id is required".to_string(),
            ));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(MedideskError::Validation(format!(
                "invalid payment amount {}",
                self.amount
            )));
        }
        Ok(())
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Invoice", "Patient", "Amount", "Method", "Status", "Paid"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.invoice_id.clone(),
            self.patient_name.clone(),
            format!("{:.2}", self.amount),
            self.method.to_string(),
            self.status.to_string(),
            self.paid_at.clone(),
        ]
    }
}
