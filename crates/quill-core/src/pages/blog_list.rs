//! Public blog list, optionally filtered by category.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::{Category, Post};
use crate::error::FetchError;
use crate::fetch::{FetchMachine, FetchState};
use crate::mapper;
use crate::ports::{DataService, Filter, SelectQuery};
use crate::rows::{self, CategoryRow, PostRow};

/// Everything the list screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogListView {
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub active_category: Option<String>,
}

pub struct BlogListPage {
    data: Arc<dyn DataService>,
    machine: FetchMachine<BlogListView>,
}

impl BlogListPage {
    pub fn new(data: Arc<dyn DataService>) -> Self {
        Self {
            data,
            machine: FetchMachine::new(),
        }
    }

    pub fn state(&self) -> FetchState<BlogListView> {
        self.machine.snapshot()
    }

    pub fn unmount(&self) {
        self.machine.unmount();
    }

    /// Load (or reload) the list. Safe to call again with a different
    /// category while a previous load is in flight: only the most recently
    /// begun load may commit.
    pub async fn load(&self, category_slug: Option<&str>) {
        let token = self.machine.begin();
        let outcome = self.fetch(category_slug).await;
        self.machine.resolve(token, outcome);
    }

    async fn fetch(&self, category_slug: Option<&str>) -> Result<BlogListView, FetchError> {
        let category_rows: Vec<CategoryRow> =
            rows::decode(self.data.select(SelectQuery::new("categories")).await?)?;

        // Counts are recomputed on every fetch, never carried over.
        let mut categories = Vec::with_capacity(category_rows.len());
        for row in &category_rows {
            let count = self
                .data
                .count("posts", &[Filter::eq("category_id", row.id.to_string())])
                .await?;
            categories.push(mapper::category_view(row.clone(), count));
        }

        let mut query = SelectQuery::new("posts")
            .embed("profiles", "author_id", &["name", "avatar_url"])
            .embed("categories", "category_id", &["name"])
            .order_desc("created_at");

        if let Some(slug) = category_slug {
            // An unknown slug drops the filter: the full list is returned.
            if let Some(active) = category_rows.iter().find(|c| c.slug == slug) {
                query = query.eq("category_id", active.id.to_string());
            }
        }

        let posts = rows::decode::<PostRow>(self.data.select(query).await?)?
            .into_iter()
            .map(mapper::post_view)
            .collect();

        Ok(BlogListView {
            posts,
            categories,
            active_category: category_slug.map(str::to_owned),
        })
    }
}
