use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MedideskError, Result};
use crate::types::Resource;

use super::Entity;

/// A scheduled visit. Stored under the legacy `schedules` snapshot key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default)]
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub scheduled_at: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl Entity for Appointment {
    const RESOURCE: Resource = Resource::Appointments;

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
        vec![self.patient_name.as_str(), self.doctor_name.as_str()]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.to_string()),
            "department" => self.department.clone(),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<&str> {
        Some(&self.scheduled_at)
    }

    fn validate(&self) -> Result<()> {
        if self.patient_name.trim().is_empty() || self.doctor_name.trim().is_empty() {
            return Err(MedideskError::Validation(
                "patient and doctor names are required".to_string(),
            ));
        }
        if self.scheduled_at.trim().is_empty() {
            return Err(MedideskError::Validation(
                "scheduled time is required".to_string(),
            ));
        }
        Ok(())
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Patient", "Doctor", "Department", "Scheduled", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.patient_name.clone(),
            self.doctor_name.clone(),
            self.department.clone().unwrap_or_default(),
            self.scheduled_at.clone(),
            self.status.to_string(),
        ]
    }
}
