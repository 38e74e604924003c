//! HTTP data service - client for the hosted backend's REST data API.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use quill_core::ports::{DataError, DataService, Filter, SelectQuery};

use crate::config::BackendConfig;

/// REST client speaking the backend's PostgREST dialect: embedded relations
/// through the `select` parameter, `field=eq.value` filters, exact counts
/// via the `Content-Range` header.
pub struct HttpDataService {
    http: reqwest::Client,
    base: String,
    anon_key: String,
}

impl HttpDataService {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            anon_key: config.anon_key.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, collection: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base, collection))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

/// `select=` parameter: all local columns plus each embed as
/// `relation:fk(col,...)`.
fn select_param(query: &SelectQuery) -> String {
    let mut parts = vec!["*".to_string()];
    for embed in &query.embeds {
        parts.push(format!(
            "{}:{}({})",
            embed.relation,
            embed.foreign_key,
            embed.columns.join(",")
        ));
    }
    parts.join(",")
}

/// Filter literal: strings go bare, everything else in JSON form.
fn value_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn filter_pairs(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.field.clone(), format!("eq.{}", value_literal(&f.value))))
        .collect()
}

/// Total from a `Content-Range` header such as `0-24/42` or `*/42`.
fn content_range_total(header: &str) -> Option<u64> {
    header.split('/').nth(1)?.trim().parse().ok()
}

async fn error_for(response: reqwest::Response) -> DataError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    DataError::Service { status, message }
}

#[async_trait]
impl DataService for HttpDataService {
    async fn select(&self, query: SelectQuery) -> Result<Vec<Value>, DataError> {
        let mut params = vec![("select".to_string(), select_param(&query))];
        params.extend(filter_pairs(&query.filters));
        if let Some(order) = &query.order {
            let direction = if order.descending { "desc" } else { "asc" };
            params.push(("order".to_string(), format!("{}.{}", order.field, direction)));
        }

        tracing::debug!(collection = %query.collection, "selecting rows");
        let response = self
            .request(reqwest::Method::GET, &query.collection)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| DataError::Decode(e.to_string()))
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, DataError> {
        let response = self
            .request(reqwest::Method::HEAD, collection)
            .query(&filter_pairs(filters))
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total)
            .ok_or_else(|| DataError::Decode("missing Content-Range total".into()))
    }

    async fn insert(&self, collection: &str, rows: Vec<Value>) -> Result<(), DataError> {
        tracing::debug!(collection, rows = rows.len(), "inserting rows");
        let response = self
            .request(reqwest::Method::POST, collection)
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        Ok(())
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> Result<(), DataError> {
        tracing::debug!(collection, %id, "updating row");
        let response = self
            .request(reqwest::Method::PATCH, collection)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), DataError> {
        tracing::debug!(collection, %id, "deleting row");
        let response = self
            .request(reqwest::Method::DELETE, collection)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_param_includes_embeds() {
        let query = SelectQuery::new("posts")
            .embed("profiles", "author_id", &["name", "avatar_url"])
            .embed("categories", "category_id", &["name"]);
        assert_eq!(
            select_param(&query),
            "*,profiles:author_id(name,avatar_url),categories:category_id(name)"
        );
    }

    #[test]
    fn filters_render_as_eq_pairs() {
        let pairs = filter_pairs(&[
            Filter::eq("slug", "hello-world"),
            Filter::eq("reading_time", json!(4)),
        ]);
        assert_eq!(
            pairs,
            vec![
                ("slug".to_string(), "eq.hello-world".to_string()),
                ("reading_time".to_string(), "eq.4".to_string()),
            ]
        );
    }

    #[test]
    fn content_range_totals_parse() {
        assert_eq!(content_range_total("0-24/42"), Some(42));
        assert_eq!(content_range_total("*/7"), Some(7));
        assert_eq!(content_range_total("0-24/*"), None);
        assert_eq!(content_range_total("nonsense"), None);
    }
}
