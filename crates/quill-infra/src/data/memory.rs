//! In-memory data service - used by tests and when no backend is configured.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::ports::{DataError, DataService, Embed, Filter, SelectQuery};

/// Collection store backed by a HashMap of JSON rows.
///
/// Mirrors the hosted backend closely enough for the controllers to be
/// exercised against it: equality filters, single-field ordering, embedded
/// foreign rows, exact counts, and column defaults (id, timestamps) filled
/// in on insert. Data is lost on process restart.
pub struct InMemoryDataService {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryDataService {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Seed a collection for tests and demo mode; applies the same column
    /// defaults as `insert`.
    pub async fn seed(&self, collection: &str, rows: Vec<Value>) {
        let mut store = self.collections.write().await;
        let list = store.entry(collection.to_string()).or_default();
        for mut row in rows {
            fill_defaults(&mut row);
            list.push(row);
        }
    }
}

impl Default for InMemoryDataService {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_defaults(row: &mut Value) {
    if let Some(obj) = row.as_object_mut() {
        obj.entry("id").or_insert_with(|| json!(Uuid::new_v4()));
        let now = json!(Utc::now());
        obj.entry("created_at").or_insert_with(|| now.clone());
        obj.entry("updated_at").or_insert(now);
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| row.get(&f.field) == Some(&f.value))
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn resolve_embed(store: &HashMap<String, Vec<Value>>, row: &Value, embed: &Embed) -> Value {
    let Some(fk) = row.get(&embed.foreign_key).filter(|v| !v.is_null()) else {
        return Value::Null;
    };
    let Some(foreign) = store
        .get(&embed.relation)
        .and_then(|rows| rows.iter().find(|r| r.get("id") == Some(fk)))
    else {
        return Value::Null;
    };
    let mut picked = Map::new();
    for column in &embed.columns {
        picked.insert(
            column.clone(),
            foreign.get(column).cloned().unwrap_or(Value::Null),
        );
    }
    Value::Object(picked)
}

#[async_trait]
impl DataService for InMemoryDataService {
    async fn select(&self, query: SelectQuery) -> Result<Vec<Value>, DataError> {
        let store = self.collections.read().await;
        let mut rows: Vec<Value> = store
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|r| matches(r, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(&order.field), b.get(&order.field));
                if order.descending { ord.reverse() } else { ord }
            });
        }

        for row in &mut rows {
            for embed in &query.embeds {
                let value = resolve_embed(&store, row, embed);
                if let Some(obj) = row.as_object_mut() {
                    obj.insert(embed.relation.clone(), value);
                }
            }
        }

        Ok(rows)
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, DataError> {
        let store = self.collections.read().await;
        Ok(store
            .get(collection)
            .map(|rows| rows.iter().filter(|r| matches(r, filters)).count() as u64)
            .unwrap_or(0))
    }

    async fn insert(&self, collection: &str, rows: Vec<Value>) -> Result<(), DataError> {
        let mut store = self.collections.write().await;
        let list = store.entry(collection.to_string()).or_default();
        for mut row in rows {
            fill_defaults(&mut row);
            list.push(row);
        }
        Ok(())
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> Result<(), DataError> {
        let mut store = self.collections.write().await;
        let id_value = json!(id);
        if let Some(rows) = store.get_mut(collection) {
            for row in rows.iter_mut() {
                if row.get("id") == Some(&id_value) {
                    if let (Some(target), Some(changes)) = (row.as_object_mut(), patch.as_object())
                    {
                        for (key, value) in changes {
                            target.insert(key.clone(), value.clone());
                        }
                        target.insert("updated_at".into(), json!(Utc::now()));
                    }
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), DataError> {
        let mut store = self.collections.write().await;
        let id_value = json!(id);
        if let Some(rows) = store.get_mut(collection) {
            rows.retain(|r| r.get("id") != Some(&id_value));
        }
        Ok(())
    }
}
