// Test doubles shared by the application tests
use crate::application::dashboard_source::DashboardSource;
use crate::application::page_view::PageView;
use crate::domain::error::DashboardError;
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub const MARKER: &str = "o_banking_dashboard_modern";
pub const CARD_CLASS: &str = "metric-card";

/// Scale change on a card, with its offset from page creation
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleEvent {
    pub card: String,
    pub scale: f64,
    pub at: Duration,
}

pub struct RecordingPage {
    created: Instant,
    surfaces: HashSet<String>,
    cards: Vec<String>,
    displayed: AtomicBool,
    events: Mutex<Vec<ScaleEvent>>,
}

impl RecordingPage {
    pub fn new(surfaces: &[&str], cards: &[&str]) -> Self {
        Self {
            created: Instant::now(),
            surfaces: surfaces.iter().map(|s| s.to_string()).collect(),
            cards: cards.iter().map(|c| c.to_string()).collect(),
            displayed: AtomicBool::new(true),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn with_cards(cards: &[&str]) -> Self {
        Self::new(&["portfolioChart", "customerChart"], cards)
    }

    pub fn hide(&self) {
        self.displayed.store(false, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<ScaleEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn events_for(&self, card: &str) -> Vec<(f64, Duration)> {
        self.events()
            .into_iter()
            .filter(|e| e.card == card)
            .map(|e| (e.scale, e.at))
            .collect()
    }
}

#[async_trait]
impl PageView for RecordingPage {
    async fn surface_attached(&self, surface: &str) -> bool {
        self.surfaces.contains(surface)
    }

    async fn metric_cards(&self, marker: &str, card_class: &str) -> Option<Vec<String>> {
        if !self.displayed.load(Ordering::SeqCst) || marker != MARKER {
            return None;
        }
        if card_class != CARD_CLASS {
            return Some(Vec::new());
        }
        Some(self.cards.clone())
    }

    async fn set_card_scale(&self, card: &str, scale: f64) {
        self.events.lock().unwrap().push(ScaleEvent {
            card: card.to_string(),
            scale,
            at: self.created.elapsed(),
        });
    }
}

/// Hands out queued results in order, repeating the last one
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<DashboardSnapshot, DashboardError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(results: Vec<Result<DashboardSnapshot, DashboardError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardSource for ScriptedSource {
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot, DashboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut results = self.results.lock().unwrap();
        if results.len() > 1 {
            results.pop_front().unwrap()
        } else {
            results
                .front()
                .cloned()
                .unwrap_or_else(|| Err(DashboardError::fetch("no scripted result")))
        }
    }
}
