//! HTTP resource API collaborator.
//!
//! Every endpoint answers with the same envelope shape
//! `{ data, total, error }`; any backend implementing that contract is
//! interchangeable. The transport is dyn-dispatched so tests can stand
//! in a mock for the reqwest client.

pub mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::{MedideskError, Result};
use crate::query::FilterCriteria;

pub use rest::RestClient;

/// The JSON envelope every API response is wrapped in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Unwrap the payload, converting a server-reported error into a
    /// typed one
    pub fn into_data(self) -> Result<(Value, Option<u64>)> {
        if let Some(message) = self.error {
            return Err(MedideskError::Api(message));
        }
        Ok((self.data.unwrap_or(Value::Null), self.total))
    }
}

/// Server-side list parameters: page, limit and the filter criteria the
/// server can apply itself
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub criteria: FilterCriteria,
}

impl ListQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(search) = self.criteria.search.as_deref()
            && !search.trim().is_empty()
        {
            pairs.push(("search".to_string(), search.trim().to_string()));
        }
        for (name, value) in &self.criteria.fields {
            pairs.push((name.clone(), value.clone()));
        }
        if let Some(from) = self.criteria.from {
            pairs.push(("from".to_string(), from.to_string()));
        }
        if let Some(to) = self.criteria.to {
            pairs.push(("to".to_string(), to.to_string()));
        }
        pairs
    }
}

/// Low-level transport for the resource API
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Envelope>;
    async fn post(&self, path: &str, body: Value) -> Result<Envelope>;
    async fn put(&self, path: &str, body: Value) -> Result<Envelope>;
    async fn delete(&self, path: &str) -> Result<Envelope>;
}

/// Typed client for one resource collection
pub struct ResourceClient<T: Entity> {
    transport: Arc<dyn ApiTransport>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        ResourceClient {
            transport: Arc::clone(&self.transport),
            _record: PhantomData,
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        ResourceClient {
            transport,
            _record: PhantomData,
        }
    }

    fn collection_path() -> String {
        T::RESOURCE.api_path().to_string()
    }

    fn record_path(id: &str) -> String {
        format!("{}/{}", T::RESOURCE.api_path(), id)
    }

    /// Fetch one page of the collection
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<T>, Option<u64>)> {
        let envelope = self
            .transport
            .get(&Self::collection_path(), &query.to_query_pairs())
            .await?;
        let (data, total) = envelope.into_data()?;
        let records: Vec<T> = match data {
            Value::Null => Vec::new(),
            value => serde_json::from_value(value)?,
        };
        Ok((records, total))
    }

    pub async fn fetch(&self, id: &str) -> Result<T> {
        let envelope = self.transport.get(&Self::record_path(id), &[]).await?;
        let (data, _) = envelope.into_data()?;
        if data.is_null() {
            return Err(MedideskError::RecordNotFound {
                resource: T::RESOURCE.singular(),
                id: id.to_string(),
            });
        }
        Ok(serde_json::from_value(data)?)
    }

    /// Create a record. The server's canonical copy wins when it returns
    /// one; otherwise the submitted record is echoed back.
    pub async fn create(&self, record: &T) -> Result<T> {
        let body = serde_json::to_value(record)?;
        let envelope = self.transport.post(&Self::collection_path(), body).await?;
        let (data, _) = envelope.into_data()?;
        match data {
            Value::Null => Ok(record.clone()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    /// Replace a record wholesale (no deep merge)
    pub async fn update(&self, record: &T) -> Result<T> {
        let body = serde_json::to_value(record)?;
        let envelope = self
            .transport
            .put(&Self::record_path(record.id()), body)
            .await?;
        let (data, _) = envelope.into_data()?;
        match data {
            Value::Null => Ok(record.clone()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let envelope = self.transport.delete(&Self::record_path(id)).await?;
        envelope.into_data()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_error_wins() {
        let envelope = Envelope {
            data: Some(Value::Array(vec![])),
            total: Some(3),
            error: Some("boom".to_string()),
        };
        assert!(envelope.into_data().is_err());
    }

    #[test]
    fn test_envelope_missing_data_is_null() {
        let envelope = Envelope::default();
        let (data, total) = envelope.into_data().unwrap();
        assert!(data.is_null());
        assert_eq!(total, None);
    }

    #[test]
    fn test_query_pairs() {
        let query = ListQuery {
            page: Some(2),
            limit: Some(50),
            criteria: FilterCriteria {
                search: Some("smith".to_string()),
                fields: vec![("status".to_string(), "active".to_string())],
                ..Default::default()
            },
        };
        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "50".to_string())));
        assert!(pairs.contains(&("search".to_string(), "smith".to_string())));
        assert!(pairs.contains(&("status".to_string(), "active".to_string())));
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let query = ListQuery {
            criteria: FilterCriteria {
                search: Some("   ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(query.to_query_pairs().is_empty());
    }
}
