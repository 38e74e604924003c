//! Admin post list: every post regardless of status, newest first.

use std::sync::Arc;

use crate::domain::Post;
use crate::error::FetchError;
use crate::fetch::{FetchMachine, FetchState};
use crate::mapper;
use crate::ports::{DataService, SelectQuery};
use crate::rows::{self, PostRow};

pub struct AdminPostsPage {
    data: Arc<dyn DataService>,
    machine: FetchMachine<Vec<Post>>,
}

impl AdminPostsPage {
    pub fn new(data: Arc<dyn DataService>) -> Self {
        Self {
            data,
            machine: FetchMachine::new(),
        }
    }

    pub fn state(&self) -> FetchState<Vec<Post>> {
        self.machine.snapshot()
    }

    pub fn unmount(&self) {
        self.machine.unmount();
    }

    pub async fn load(&self) {
        let token = self.machine.begin();
        let outcome = self.fetch().await;
        self.machine.resolve(token, outcome);
    }

    async fn fetch(&self) -> Result<Vec<Post>, FetchError> {
        let query = SelectQuery::new("posts").order_desc("created_at");
        Ok(rows::decode::<PostRow>(self.data.select(query).await?)?
            .into_iter()
            .map(mapper::post_view)
            .collect())
    }
}
