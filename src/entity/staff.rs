use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MedideskError, Result};
use crate::types::Resource;

use super::Entity;

/// A staff account on the hospital system. Cached under the legacy
/// `hospitalUsers` key, which also ships a small seed dataset so the
/// admin screens are usable before the first successful sync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl Entity for StaffUser {
    const RESOURCE: Resource = Resource::Users;

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
        vec![self.name.as_str(), self.email.as_str(), self.role.as_str()]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.to_string()),
            "role" => Some(self.role.clone()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MedideskError::Validation("name is required".to_string()));
        }
        if !super::EMAIL_RE.is_match(&self.email) {
            return Err(MedideskError::Validation(format!(
                "invalid email address '{}'",
                self.email
            )));
        }
        if self.role.trim().is_empty() {
            return Err(MedideskError::Validation("role is required".to_string()));
        }
        Ok(())
    }

    fn seed() -> Vec<Self> {
        vec![
            StaffUser {
                id: "usr-admin".to_string(),
                name: "System Administrator".to_string(),
                email: "admin@hospital.local".to_string(),
                role: "Admin".to_string(),
                status: UserStatus::Active,
                created_at: Some("2024-01-01T00:00:00Z".to_string()),
            },
            StaffUser {
                id: "usr-frontdesk".to_string(),
                name: "Front Desk".to_string(),
                email: "frontdesk@hospital.local".to_string(),
                role: "Receptionist".to_string(),
                status: UserStatus::Active,
                created_at: Some("2024-01-01T00:00:00Z".to_string()),
            },
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Role", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
            self.status.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_well_formed_user() {
        let user = StaffUser {
            name: "Dr. Test".to_string(),
            email: "t@h.com".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        };
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let user = StaffUser {
            name: "Dr. Test".to_string(),
            email: "t@h".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        };
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_seed_is_nonempty() {
        assert!(!StaffUser::seed().is_empty());
    }
}
