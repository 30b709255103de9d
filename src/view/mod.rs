//! Headless client view: the browser component modeled as a pure state
//! machine (`state`) plus an async driver that performs the emitted HTTP
//! requests and reconciles local state by re-fetching after each mutation.
//!
//! Error policy: every request failure is caught and logged, never surfaced.

pub mod api;
pub mod state;

use api::ApiClient;
use state::{ViewRequest, ViewState};
use tracing::warn;

pub struct TodoView {
    pub state: ViewState,
    api: ApiClient,
}

impl TodoView {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            state: ViewState::default(),
            api: ApiClient::new(base_url),
        }
    }

    /// Mount: fetch the full list once.
    pub async fn mount(&mut self) {
        self.refetch().await;
    }

    async fn refetch(&mut self) {
        match self.api.list().await {
            Ok(items) => self.state.load(items),
            Err(e) => warn!("failed to fetch todos: {e}"),
        }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.state.set_input(value);
    }

    /// Add-form submission. Blank input short-circuits without a request; on
    /// success the returned record is prepended and the input cleared.
    pub async fn submit_input(&mut self) {
        let Some(ViewRequest::Create { text }) = self.state.submit_input() else {
            return;
        };
        match self.api.create(&text).await {
            Ok(item) => self.state.created(item),
            Err(e) => warn!("failed to create todo: {e}"),
        }
    }

    /// Checkbox click: send the negated flag, then re-fetch to resync whether
    /// or not the request succeeded.
    pub async fn toggle(&mut self, id: &str) {
        let Some(ViewRequest::Toggle { id, completed }) = self.state.toggle(id) else {
            return;
        };
        if let Err(e) = self.api.toggle(&id, completed).await {
            warn!("failed to toggle todo {id}: {e}");
        }
        self.refetch().await;
    }

    pub fn begin_edit(&mut self, id: &str) {
        self.state.begin_edit(id);
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.set_draft(text);
    }

    /// Blur or Enter while editing. Leaves edit mode regardless of outcome;
    /// the request (when one is warranted) is followed by a re-fetch.
    pub async fn commit_edit(&mut self) {
        let Some(ViewRequest::Edit { id, text }) = self.state.commit_edit() else {
            return;
        };
        if let Err(e) = self.api.edit(&id, &text).await {
            warn!("failed to edit todo {id}: {e}");
        }
        self.refetch().await;
    }

    /// Escape while editing: discard the draft, no request.
    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    /// Delete click: issue the request, drop the item locally by id filter,
    /// then re-fetch as well (the double-sync the original view did).
    pub async fn delete(&mut self, id: &str) {
        let ViewRequest::Delete { id } = self.state.delete(id) else {
            return;
        };
        if let Err(e) = self.api.delete(&id).await {
            warn!("failed to delete todo {id}: {e}");
        }
        self.state.deleted(&id);
        self.refetch().await;
    }
}
