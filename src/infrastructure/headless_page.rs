// Headless page - server-side model of the page the shell renders the widget into
use crate::application::page_view::PageView;
use crate::infrastructure::config::PageConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub id: String,
    pub class: String,
    pub scale: f64,
}

#[derive(Debug)]
struct PageState {
    displayed: bool,
    surfaces: HashSet<String>,
    cards: Vec<MetricCard>,
}

#[derive(Debug)]
pub struct HeadlessPage {
    container_class: String,
    state: RwLock<PageState>,
}

impl HeadlessPage {
    pub fn from_config(config: &PageConfig) -> Self {
        let cards = config
            .metric_cards
            .iter()
            .map(|id| MetricCard {
                id: id.clone(),
                class: config.card_class.clone(),
                scale: 1.0,
            })
            .collect();

        Self {
            container_class: config.container_class.clone(),
            state: RwLock::new(PageState {
                displayed: true,
                surfaces: config.attached_surfaces.iter().cloned().collect(),
                cards,
            }),
        }
    }

    /// Show or hide the dashboard container (navigation away hides it)
    #[cfg(test)]
    pub async fn set_displayed(&self, displayed: bool) {
        self.state.write().await.displayed = displayed;
    }

    pub async fn cards(&self) -> Vec<MetricCard> {
        self.state.read().await.cards.clone()
    }
}

#[async_trait]
impl PageView for HeadlessPage {
    async fn surface_attached(&self, surface: &str) -> bool {
        self.state.read().await.surfaces.contains(surface)
    }

    async fn metric_cards(&self, marker: &str, card_class: &str) -> Option<Vec<String>> {
        let state = self.state.read().await;
        if !state.displayed || marker != self.container_class {
            return None;
        }

        Some(
            state
                .cards
                .iter()
                .filter(|c| c.class == card_class)
                .map(|c| c.id.clone())
                .collect(),
        )
    }

    async fn set_card_scale(&self, card: &str, scale: f64) {
        let mut state = self.state.write().await;
        if let Some(entry) = state.cards.iter_mut().find(|c| c.id == card) {
            entry.scale = scale;
        }
    }
}
