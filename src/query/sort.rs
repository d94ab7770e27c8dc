//! Sort helpers for list views.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::entity::Entity;
use crate::error::MedideskError;
use crate::query::parse_record_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Date,
    Status,
}

impl FromStr for SortField {
    type Err = MedideskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "date" => Ok(SortField::Date),
            "status" => Ok(SortField::Status),
            _ => Err(MedideskError::InvalidInput(format!(
                "unknown sort field '{}', expected id, date or status",
                s
            ))),
        }
    }
}

/// Sort records in place. Ties break by id so output is deterministic.
pub fn sort_records_by<T: Entity>(records: &mut [T], field: SortField) {
    records.sort_by(|a, b| {
        let ordering = match field {
            SortField::Id => Ordering::Equal,
            SortField::Date => {
                let da = a.timestamp().and_then(parse_record_date);
                let db = b.timestamp().and_then(parse_record_date);
                // Newest first; records without a date sink to the bottom
                match (da, db) {
                    (Some(da), Some(db)) => db.cmp(&da),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
            SortField::Status => a.status_label().cmp(&b.status_label()),
        };
        ordering.then_with(|| a.id().cmp(b.id()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Invoice;

    fn invoice(id: &str, issued_at: &str) -> Invoice {
        Invoice {
            id: id.to_string(),
            patient_name: "Jane Doe".to_string(),
            amount: 10.0,
            issued_at: issued_at.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let mut invoices = vec![
            invoice("inv-1", "2026-01-01"),
            invoice("inv-2", "2026-03-01"),
            invoice("inv-3", "2026-02-01"),
        ];
        sort_records_by(&mut invoices, SortField::Date);
        let ids: Vec<&str> = invoices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["inv-2", "inv-3", "inv-1"]);
    }

    #[test]
    fn test_sort_by_id_is_stable_fallback() {
        let mut invoices = vec![invoice("inv-b", "2026-01-01"), invoice("inv-a", "2026-01-01")];
        sort_records_by(&mut invoices, SortField::Id);
        assert_eq!(invoices[0].id, "inv-a");
    }
}
