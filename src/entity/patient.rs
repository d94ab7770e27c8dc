use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MedideskError, Result};
use crate::types::Resource;

use super::Entity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub status: PatientStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admitted_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Outpatient,
    Admitted,
    Discharged,
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientStatus::Outpatient => write!(f, "outpatient"),
            PatientStatus::Admitted => write!(f, "admitted"),
            PatientStatus::Discharged => write!(f, "discharged"),
        }
    }
}

impl FromStr for PatientStatus {
    type Err = MedideskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "outpatient" => Ok(PatientStatus::Outpatient),
            "admitted" => Ok(PatientStatus::Admitted),
            "discharged" => Ok(PatientStatus::Discharged),
            _ => Err(MedideskError::InvalidStatus(s.to_string())),
        }
    }
}

impl Entity for Patient {
    const RESOURCE: Resource = Resource::Patients;

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
        let mut fields = vec![self.name.as_str()];
        if let Some(phone) = &self.phone {
            fields.push(phone);
        }
        if let Some(email) = &self.email {
            fields.push(email);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.to_string()),
            "gender" => self.gender.clone(),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<&str> {
        self.admitted_at.as_deref()
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MedideskError::Validation(
                "patient name is required".to_string(),
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
        &["ID", "Name", "Age", "Gender", "Status", "Admitted"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.age.map(|a| a.to_string()).unwrap_or_default(),
            self.gender.clone().unwrap_or_default(),
            self.status.to_string(),
            self.admitted_at.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name() {
        let patient = Patient::default();
        assert!(patient.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let patient = Patient {
            name: "Jane Doe".to_string(),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(patient.validate().is_err());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            PatientStatus::Outpatient,
            PatientStatus::Admitted,
            PatientStatus::Discharged,
        ] {
            assert_eq!(status.to_string().parse::<PatientStatus>().unwrap(), status);
        }
    }
}
