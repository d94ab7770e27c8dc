//! Typed records for each hospital resource.
//!
//! The legacy browser client kept every record as an untyped object; here
//! each resource gets an explicit shape with serde validation at the API
//! boundary, plus the `Entity` trait the generic list core is written
//! against.

pub mod appointment;
pub mod audit;
pub mod billing;
pub mod doctor;
pub mod patient;
pub mod staff;
pub mod ward;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::types::Resource;

pub use appointment::{Appointment, AppointmentStatus};
pub use audit::{AuditEvent, AuditStatus, Severity};
pub use billing::{Invoice, InvoiceStatus, Payment, PaymentMethod, PaymentStatus};
pub use doctor::{Doctor, DoctorStatus};
pub use patient::{Patient, PatientStatus};
pub use staff::{StaffUser, UserStatus};
pub use ward::{WardAllocation, WardStatus};

pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// One record in a resource collection.
///
/// The generic core (list state, filtering, sync, mutation, snapshots,
/// statistics) only talks to records through this trait. Adding a new
/// resource means one record type and one `Entity` impl.
pub trait Entity:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const RESOURCE: Resource;

    /// Record identity. Uniqueness is assumed, not enforced.
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Status label used for counting and coloring
    fn status_label(&self) -> String;

    /// String fields the free-text search runs over (1-4 fields)
    fn search_haystacks(&self) -> Vec<&str>;

    /// Categorical field lookup for equality filters.
    /// Returns `None` for fields this resource does not define.
    fn field(&self, name: &str) -> Option<String>;

    /// ISO 8601 timestamp used for date-range filters, if the resource
    /// carries one
    fn timestamp(&self) -> Option<&str>;

    /// Monetary value summed by statistics, if the resource carries one
    fn metric(&self) -> Option<f64> {
        None
    }

    /// Records for which bulk delete must be refused
    fn delete_protected(&self) -> bool {
        false
    }

    /// Client-side validation run before any create or update is sent
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Built-in dataset substituted when no usable snapshot exists
    fn seed() -> Vec<Self> {
        Vec::new()
    }

    /// Table header for this resource
    fn columns() -> &'static [&'static str];

    /// Table cells, in `columns()` order
    fn cells(&self) -> Vec<String>;
}
