// Page trait - the parts of the displayed page the widget touches
use async_trait::async_trait;

#[async_trait]
pub trait PageView: Send + Sync {
    /// Whether a drawing surface with this id is attached to the page
    async fn surface_attached(&self, surface: &str) -> bool;

    /// Ids of the cards inside the container carrying `marker`, in document order.
    /// `None` when no such container is displayed.
    async fn metric_cards(&self, marker: &str, card_class: &str) -> Option<Vec<String>>;

    async fn set_card_scale(&self, card: &str, scale: f64);
}
