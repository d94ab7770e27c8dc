use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MedideskError, Result};
use crate::types::Resource;

use super::Entity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub specialization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: DoctorStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DoctorStatus {
    #[default]
    Active,
    OnLeave,
    Retired,
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorStatus::Active => write!(f, "active"),
            DoctorStatus::OnLeave => write!(f, "on_leave"),
            DoctorStatus::Retired => write!(f, "retired"),
        }
    }
}

impl Entity for Doctor {
    const RESOURCE: Resource = Resource::Doctors;

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
        let mut fields = vec![self.name.as_str(), self.specialization.as_str()];
        if let Some(email) = &self.email {
            fields.push(email);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.to_string()),
            "specialization" => Some(self.specialization.clone()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<&str> {
        self.joined_at.as_deref()
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MedideskError::Validation(
                "doctor name is required".to_string(),
            ));
        }
        if self.specialization.trim().is_empty() {
            return Err(MedideskError::Validation(
                "specialization is required".to_string(),
            ));
        }
        if let Some(email) = &self.email
            && !super::EMAIL_RE.is_match(email)
        {
            return Err(MedideskError::Validation(format!(
                "invalid email address '{}'",
                email
            )));
        }
        Ok(())
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Specialization", "Status", "Email"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.specialization.clone(),
            self.status.to_string(),
            self.email.clone().unwrap_or_default(),
        ]
    }
}
