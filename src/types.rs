use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MedideskError;

pub const MEDIDESK_DIR: &str = ".medidesk";
pub const CACHE_DIR: &str = ".medidesk/cache";

/// The resources the hospital API exposes.
///
/// Every resource is served from its own collection endpoint and cached
/// under its own snapshot key. The key names mirror the browser client
/// this tool replaced, so an operator can recognize them on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Patients,
    Doctors,
    Appointments,
    Invoices,
    Payments,
    Users,
    Wards,
    Audit,
}

impl Resource {
    pub const ALL: &'static [Resource] = &[
        Resource::Patients,
        Resource::Doctors,
        Resource::Appointments,
        Resource::Invoices,
        Resource::Payments,
        Resource::Users,
        Resource::Wards,
        Resource::Audit,
    ];

    /// Collection path on the API server
    pub fn api_path(&self) -> &'static str {
        match self {
            Resource::Patients => "patients",
            Resource::Doctors => "doctors",
            Resource::Appointments => "appointments",
            Resource::Invoices => "invoices",
            Resource::Payments => "payments",
            Resource::Users => "users",
            Resource::Wards => "wards",
            Resource::Audit => "audit-logs",
        }
    }

    /// Snapshot cache key, kept compatible with the legacy browser client
    pub fn cache_key(&self) -> &'static str {
        match self {
            Resource::Patients => "triagePatients",
            Resource::Doctors => "hospitalDoctors",
            Resource::Appointments => "schedules",
            Resource::Invoices => "invoices",
            Resource::Payments => "payments",
            Resource::Users => "hospitalUsers",
            Resource::Wards => "wardAllocations",
            Resource::Audit => "auditLogs",
        }
    }

    /// Human-readable singular name for messages
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Patients => "patient",
            Resource::Doctors => "doctor",
            Resource::Appointments => "appointment",
            Resource::Invoices => "invoice",
            Resource::Payments => "payment",
            Resource::Users => "user",
            Resource::Wards => "ward allocation",
            Resource::Audit => "audit event",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Patients => write!(f, "patients"),
            Resource::Doctors => write!(f, "doctors"),
            Resource::Appointments => write!(f, "appointments"),
            Resource::Invoices => write!(f, "invoices"),
            Resource::Payments => write!(f, "payments"),
            Resource::Users => write!(f, "users"),
            Resource::Wards => write!(f, "wards"),
            Resource::Audit => write!(f, "audit"),
        }
    }
}

impl FromStr for Resource {
    type Err = MedideskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patients" | "patient" => Ok(Resource::Patients),
            "doctors" | "doctor" => Ok(Resource::Doctors),
            "appointments" | "appointment" => Ok(Resource::Appointments),
            "invoices" | "invoice" => Ok(Resource::Invoices),
            "payments" | "payment" => Ok(Resource::Payments),
            "users" | "user" => Ok(Resource::Users),
            "wards" | "ward" => Ok(Resource::Wards),
            "audit" | "audit-logs" => Ok(Resource::Audit),
            _ => Err(MedideskError::UnknownResource(s.to_string())),
        }
    }
}

pub const VALID_RESOURCES: &[&str] = &[
    "patients",
    "doctors",
    "appointments",
    "invoices",
    "payments",
    "users",
    "wards",
    "audit",
];

/// Pagination metadata mirrored from the server's list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current: 1,
            page_size: 20,
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_from_str() {
        assert_eq!("patients".parse::<Resource>().unwrap(), Resource::Patients);
        assert_eq!("Patient".parse::<Resource>().unwrap(), Resource::Patients);
        assert_eq!("audit-logs".parse::<Resource>().unwrap(), Resource::Audit);
        assert!("pharmacy2".parse::<Resource>().is_err());
    }

    #[test]
    fn test_resource_roundtrip() {
        for r in Resource::ALL {
            let parsed: Resource = r.to_string().parse().unwrap();
            assert_eq!(parsed, *r);
        }
    }

    #[test]
    fn test_cache_keys_are_unique() {
        let mut keys: Vec<&str> = Resource::ALL.iter().map(|r| r.cache_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Resource::ALL.len());
    }
}
