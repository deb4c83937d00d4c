// Infrastructure layer - External dependencies and adapters
pub mod chartjs_backend;
pub mod config;
pub mod headless_page;
pub mod rpc_source;
