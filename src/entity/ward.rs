use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MedideskError, Result};
use crate::types::Resource;

use super::Entity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardAllocation {
    #[serde(default)]
    pub id: String,
    pub ward: String,
    pub bed_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub status: WardStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocated_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WardStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

impl fmt::Display for WardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WardStatus::Available => write!(f, "available"),
            WardStatus::Occupied => write!(f, "occupied"),
            WardStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl Entity for WardAllocation {
    const RESOURCE: Resource = Resource::Wards;

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
        let mut fields = vec![self.ward.as_str()];
        if let Some(patient) = &self.patient_name {
            fields.push(patient);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.to_string()),
            "ward" => Some(self.ward.clone()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<&str> {
        self.allocated_at.as_deref()
    }

    fn validate(&self) -> Result<()> {
        if self.ward.trim().is_empty() {
            return Err(MedideskError::Validation(
                "ward name is required".to_string(),
            ));
        }
        if self.status == WardStatus::Occupied && self.patient_name.is_none() {
            return Err(MedideskError::Validation(
                "occupied beds must name a patient".to_string(),
            ));
        }
        Ok(())
    }

    fn seed() -> Vec<Self> {
        vec![
            WardAllocation {
                id: "ward-a-01".to_string(),
                ward: "General A".to_string(),
                bed_number: 1,
                patient_name: None,
                status: WardStatus::Available,
                allocated_at: None,
            },
            WardAllocation {
                id: "ward-a-02".to_string(),
                ward: "General A".to_string(),
                bed_number: 2,
                patient_name: None,
                status: WardStatus::Available,
                allocated_at: None,
            },
            WardAllocation {
                id: "ward-icu-01".to_string(),
                ward: "ICU".to_string(),
                bed_number: 1,
                patient_name: None,
                status: WardStatus::Maintenance,
                allocated_at: None,
            },
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Ward", "Bed", "Patient", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.ward.clone(),
            self.bed_number.to_string(),
            self.patient_name.clone().unwrap_or_default(),
            self.status.to_string(),
        ]
    }
}
