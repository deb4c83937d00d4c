// Application layer - Use cases and the traits infrastructure implements
pub mod action_registry;
pub mod chart_backend;
pub mod chart_renderer;
pub mod dashboard_source;
pub mod dashboard_widget;
pub mod lifecycle;
pub mod page_view;
pub mod pulse;

#[cfg(test)]
pub mod testing;
