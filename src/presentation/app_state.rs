// Application state for HTTP handlers
use crate::application::action_registry::Shell;
use crate::infrastructure::headless_page::HeadlessPage;
use std::sync::Arc;

pub struct AppState {
    pub shell: Shell,
    pub page: Arc<HeadlessPage>,
}
