pub mod config;
pub mod rest;
pub mod storage;
pub mod view;

use config::Config;
use storage::TodoStore;

/// Shared application state passed to every route handler.
pub struct AppContext {
    pub config: Config,
    pub store: TodoStore,
}
