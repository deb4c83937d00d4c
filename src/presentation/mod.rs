// Presentation layer - HTTP surface of the dashboard shell
pub mod app_state;
pub mod handlers;
pub mod router;
