//! Audit trail records.
//!
//! Audit events are append-style: they are never edited, only deleted,
//! and bulk deletion is refused outright when any selected event carries
//! High severity. The server is expected to mirror that rule; the client
//! enforces it regardless.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MedideskError, Result};
use crate::types::Resource;

use super::Entity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditEvent {
    #[serde(default)]
    pub id: String,
    pub action: String,
    pub module: String,
    pub performed_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub status: AuditStatus,
    #[serde(default)]
    pub severity: Severity,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    #[default]
    Success,
    Failed,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditStatus::Success => write!(f, "success"),
            AuditStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl FromStr for Severity {
    type Err = MedideskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(MedideskError::InvalidInput(format!(
                "unknown severity '{}'",
                s
            ))),
        }
    }
}

pub const VALID_SEVERITIES: &[&str] = &["low", "medium", "high"];

impl Entity for AuditEvent {
    const RESOURCE: Resource = Resource::Audit;

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
            self.performed_by.as_str(),
            self.action.as_str(),
            self.module.as_str(),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.to_string()),
            "severity" => Some(self.severity.to_string()),
            "module" => Some(self.module.clone()),
            "role" => self.role.clone(),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<&str> {
        Some(&self.timestamp)
    }

    fn delete_protected(&self) -> bool {
        self.severity == Severity::High
    }

    fn validate(&self) -> Result<()> {
        if self.action.trim().is_empty() || self.module.trim().is_empty() {
            return Err(MedideskError::Validation(
                "action and module are required".to_string(),
            ));
        }
        Ok(())
    }

    fn columns() -> &'static [&'static str] {
        &[
            "ID",
            "Timestamp",
            "Action",
            "Module",
            "By",
            "Status",
            "Severity",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.timestamp.clone(),
            self.action.clone(),
            self.module.clone(),
            self.performed_by.clone(),
            self.status.to_string(),
            self.severity.to_string(),
        ]
    }
}
