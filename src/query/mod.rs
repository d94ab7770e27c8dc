//! Filtering of resource collections for display.
//!
//! Filters are pure: given the same collection and criteria the output is
//! identical, and criteria combine conjunctively. An empty dimension
//! always means "match all", never "match none". The server remains the
//! authoritative filter (criteria are also sent as query parameters);
//! this predicate is re-applied to whatever the server returned so fields
//! the server does not index still narrow the view.

pub mod sort;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use jiff::civil::Date;
use unicase::UniCase;

use crate::entity::Entity;

pub use sort::{SortField, sort_records_by};

/// Filter criteria for one list view. Ephemeral, never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Free-text needle matched against the record's search haystacks
    pub search: Option<String>,
    /// Use fuzzy matching instead of substring matching for `search`
    pub fuzzy: bool,
    /// Categorical equality constraints, all of which must hold
    pub fields: Vec<(String, String)>,
    /// Inclusive date-range bounds against the record's timestamp
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.fields.is_empty()
            && self.from.is_none()
            && self.to.is_none()
    }

    /// Merge two criteria into their conjunction
    pub fn and(mut self, other: FilterCriteria) -> FilterCriteria {
        if other.search.is_some() {
            self.search = other.search;
            self.fuzzy = other.fuzzy;
        }
        self.fields.extend(other.fields);
        if other.from.is_some() {
            self.from = other.from;
        }
        if other.to.is_some() {
            self.to = other.to;
        }
        self
    }

    pub fn matches<T: Entity>(&self, record: &T) -> bool {
        self.build::<T>().matches(record)
    }

    /// Select the matching subset, preserving order
    pub fn apply<'a, T: Entity>(&self, records: &'a [T]) -> Vec<&'a T> {
        let set = self.build::<T>();
        records.iter().filter(|r| set.matches(r)).collect()
    }

    fn build<T: Entity>(&self) -> FilterSet<T> {
        let mut set = FilterSet::new();
        if let Some(needle) = self.search.as_deref()
            && !needle.trim().is_empty()
        {
            set.push(TextFilter::new(needle, self.fuzzy));
        }
        for (name, value) in &self.fields {
            set.push(FieldFilter::new(name, value));
        }
        if self.from.is_some() || self.to.is_some() {
            set.push(DateRangeFilter::new(self.from, self.to));
        }
        set
    }
}

/// Trait for record filters
pub trait RecordFilter<T: Entity>: Send + Sync {
    fn matches(&self, record: &T) -> bool;
}

/// Conjunction of filters; empty set matches everything
pub struct FilterSet<T: Entity> {
    filters: Vec<Box<dyn RecordFilter<T>>>,
}

impl<T: Entity> FilterSet<T> {
    pub fn new() -> Self {
        FilterSet {
            filters: Vec::new(),
        }
    }

    pub fn push(&mut self, filter: impl RecordFilter<T> + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn matches(&self, record: &T) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

impl<T: Entity> Default for FilterSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-text filter over the record's designated search fields.
///
/// Substring mode is case-insensitive; fuzzy mode delegates to the skim
/// matcher used by the search commands.
pub struct TextFilter {
    needle: String,
    fuzzy: bool,
}

impl TextFilter {
    pub fn new(needle: &str, fuzzy: bool) -> Self {
        TextFilter {
            needle: needle.trim().to_lowercase(),
            fuzzy,
        }
    }
}

impl<T: Entity> RecordFilter<T> for TextFilter {
    fn matches(&self, record: &T) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        if self.fuzzy {
            let matcher = SkimMatcherV2::default().smart_case();
            record
                .search_haystacks()
                .iter()
                .any(|haystack| matcher.fuzzy_match(haystack, &self.needle).is_some())
        } else {
            record
                .search_haystacks()
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(&self.needle))
        }
    }
}

/// Case-insensitive equality against one categorical field.
///
/// A record that does not define the field never matches.
pub struct FieldFilter {
    name: String,
    value: String,
}

impl FieldFilter {
    pub fn new(name: &str, value: &str) -> Self {
        FieldFilter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl<T: Entity> RecordFilter<T> for FieldFilter {
    fn matches(&self, record: &T) -> bool {
        match record.field(&self.name) {
            Some(actual) => UniCase::new(actual.as_str()) == UniCase::new(self.value.as_str()),
            None => false,
        }
    }
}

/// Inclusive date-range containment against the record's timestamp.
///
/// Records without a parsable timestamp never match a set range.
pub struct DateRangeFilter {
    from: Option<Date>,
    to: Option<Date>,
}

impl DateRangeFilter {
    pub fn new(from: Option<Date>, to: Option<Date>) -> Self {
        DateRangeFilter { from, to }
    }
}

impl<T: Entity> RecordFilter<T> for DateRangeFilter {
    fn matches(&self, record: &T) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(date) = record.timestamp().and_then(parse_record_date) else {
            return false;
        };
        if let Some(from) = self.from
            && date < from
        {
            return false;
        }
        if let Some(to) = self.to
            && date > to
        {
            return false;
        }
        true
    }
}

/// Parse the date part of an ISO timestamp ("2026-01-15T10:30:00Z" or
/// plain "2026-01-15")
pub fn parse_record_date(timestamp: &str) -> Option<Date> {
    let prefix = timestamp.get(..10)?;
    prefix.parse::<Date>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{AuditEvent, StaffUser};

    fn event(id: &str, by: &str, timestamp: &str) -> AuditEvent {
        AuditEvent {
            id: id.to_string(),
            action: "login".to_string(),
            module: "auth".to_string(),
            performed_by: by.to_string(),
            timestamp: timestamp.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_criteria_matches_all() {
        let events = vec![
            event("a-1", "Alice Smith", "2026-01-01T08:00:00Z"),
            event("a-2", "Bob Jones", "2026-02-01T08:00:00Z"),
        ];
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(criteria.apply(&events).len(), events.len());
    }

    #[test]
    fn test_search_substring_is_case_insensitive() {
        let events = vec![
            event("a-1", "Alice Smith", "2026-01-01T08:00:00Z"),
            event("a-2", "Bob Jones", "2026-02-01T08:00:00Z"),
        ];
        let criteria = FilterCriteria {
            search: Some("smith".to_string()),
            ..Default::default()
        };
        let hits = criteria.apply(&events);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].performed_by, "Alice Smith");
    }

    #[test]
    fn test_filters_compose() {
        let events = vec![
            event("a-1", "Alice Smith", "2026-01-01T08:00:00Z"),
            event("a-2", "Alice Smith", "2026-03-01T08:00:00Z"),
            event("a-3", "Bob Jones", "2026-01-02T08:00:00Z"),
        ];
        let by_name = FilterCriteria {
            search: Some("alice".to_string()),
            ..Default::default()
        };
        let by_date = FilterCriteria {
            to: Some("2026-01-31".parse().unwrap()),
            ..Default::default()
        };

        // Sequential application equals the merged conjunction
        let step1: Vec<AuditEvent> = by_name.apply(&events).into_iter().cloned().collect();
        let sequential: Vec<&AuditEvent> = by_date.apply(&step1);
        let merged = by_name.clone().and(by_date.clone());
        let combined = merged.apply(&events);

        assert_eq!(sequential.len(), 1);
        assert_eq!(combined.len(), 1);
        assert_eq!(sequential[0].id, combined[0].id);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let events = vec![event("a-1", "Alice Smith", "2026-01-15T23:59:00Z")];
        let criteria = FilterCriteria {
            from: Some("2026-01-15".parse().unwrap()),
            to: Some("2026-01-15".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(criteria.apply(&events).len(), 1);
    }

    #[test]
    fn test_unparsable_timestamp_fails_date_filter() {
        let events = vec![event("a-1", "Alice Smith", "yesterday")];
        let criteria = FilterCriteria {
            from: Some("2026-01-01".parse().unwrap()),
            ..Default::default()
        };
        assert!(criteria.apply(&events).is_empty());
    }

    #[test]
    fn test_field_filter_unknown_field_matches_nothing() {
        let users = vec![StaffUser {
            id: "u-1".to_string(),
            name: "Dr. Test".to_string(),
            email: "t@h.com".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        }];
        let criteria = FilterCriteria {
            fields: vec![("ward".to_string(), "ICU".to_string())],
            ..Default::default()
        };
        assert!(criteria.apply(&users).is_empty());
    }

    #[test]
    fn test_field_filter_equality_ignores_case() {
        let users = vec![StaffUser {
            id: "u-1".to_string(),
            name: "Dr. Test".to_string(),
            email: "t@h.com".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        }];
        let criteria = FilterCriteria {
            fields: vec![("role".to_string(), "doctor".to_string())],
            ..Default::default()
        };
        assert_eq!(criteria.apply(&users).len(), 1);
    }

    #[test]
    fn test_fuzzy_search() {
        let events = vec![
            event("a-1", "Alice Smith", "2026-01-01T08:00:00Z"),
            event("a-2", "Bob Jones", "2026-02-01T08:00:00Z"),
        ];
        let criteria = FilterCriteria {
            search: Some("alsmh".to_string()),
            fuzzy: true,
            ..Default::default()
        };
        let hits = criteria.apply(&events);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].performed_by, "Alice Smith");
    }
}
