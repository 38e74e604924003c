//! Data service port - generic row operations against named collections.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// Equality filter on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Ordering by a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub field: String,
    pub descending: bool,
}

/// Embedded relation: attach the row of `relation` referenced by the local
/// `foreign_key` column under the relation's name, restricted to `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub relation: String,
    pub foreign_key: String,
    pub columns: Vec<String>,
}

/// A row query against a named collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub embeds: Vec<Embed>,
}

impl SelectQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order: None,
            embeds: Vec::new(),
        }
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(field, value));
        self
    }

    pub fn order_asc(mut self, field: impl Into<String>) -> Self {
        self.order = Some(Order {
            field: field.into(),
            descending: false,
        });
        self
    }

    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order = Some(Order {
            field: field.into(),
            descending: true,
        });
        self
    }

    pub fn embed(
        mut self,
        relation: impl Into<String>,
        foreign_key: impl Into<String>,
        columns: &[&str],
    ) -> Self {
        self.embeds.push(Embed {
            relation: relation.into(),
            foreign_key: foreign_key.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        });
        self
    }
}

/// Row store operations the hosted backend exposes. Every call returns a
/// payload or an error descriptor; partial success is never assumed.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Query rows, with optional equality filters, ordering, and embedded
    /// foreign rows.
    async fn select(&self, query: SelectQuery) -> Result<Vec<Value>, DataError>;

    /// Exact row count for a collection under the given filters.
    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, DataError>;

    /// Insert rows into a collection.
    async fn insert(&self, collection: &str, rows: Vec<Value>) -> Result<(), DataError>;

    /// Update fields of the row matched by `id`.
    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> Result<(), DataError>;

    /// Delete the row matched by `id`.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), DataError>;
}

/// Data service errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    #[error("backend request failed: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("malformed row: {0}")]
    Decode(String),
}
