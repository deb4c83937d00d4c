// Metric card pulse - periodic cosmetic feedback on the dashboard's metric cards
use crate::application::lifecycle::TaskGuard;
use crate::application::page_view::PageView;
use crate::infrastructure::config::PulseConfig;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

/// Run one pulse round and return how many cards were pulsed.
/// Card `i` scales up after `i * stagger` and back down `duration` later.
pub async fn pulse_tick(page: &dyn PageView, config: &PulseConfig) -> usize {
    let Some(cards) = page
        .metric_cards(&config.dashboard_marker, &config.card_class)
        .await
    else {
        tracing::debug!("Dashboard {} not displayed, skipping pulse", config.dashboard_marker);
        return 0;
    };

    let pulses = cards
        .iter()
        .enumerate()
        .map(|(index, card)| pulse_card(page, card, config.stagger() * index as u32, config));
    join_all(pulses).await;

    cards.len()
}

async fn pulse_card(page: &dyn PageView, card: &str, delay: Duration, config: &PulseConfig) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    page.set_card_scale(card, config.scale).await;
    tokio::time::sleep(config.duration()).await;
    page.set_card_scale(card, 1.0).await;
}

/// Start the pulse loop. The first round runs one full interval after start;
/// the loop lives as long as the returned guard.
pub fn spawn_pulse_loop(page: Arc<dyn PageView>, config: PulseConfig, period: Duration) -> TaskGuard {
    TaskGuard::spawn("metric-card-pulse", async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = IntervalStream::new(ticker);
        while ticks.next().await.is_some() {
            let pulsed = pulse_tick(page.as_ref(), &config).await;
            tracing::debug!("Pulsed {} metric cards", pulsed);
        }
    })
}

/// Return every card to its resting scale
pub async fn reset_cards(page: &dyn PageView, config: &PulseConfig) {
    if let Some(cards) = page
        .metric_cards(&config.dashboard_marker, &config.card_class)
        .await
    {
        for card in cards {
            page.set_card_scale(&card, 1.0).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::RecordingPage;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_staggers_pulses() {
        let page = RecordingPage::with_cards(&["deposits", "loans", "customers"]);

        let pulsed = pulse_tick(&page, &PulseConfig::default()).await;

        assert_eq!(pulsed, 3);
        assert_eq!(page.events().len(), 6);
        assert_eq!(page.events_for("deposits"), vec![(1.02, ms(0)), (1.0, ms(200))]);
        assert_eq!(page.events_for("loans"), vec![(1.02, ms(100)), (1.0, ms(300))]);
        assert_eq!(page.events_for("customers"), vec![(1.02, ms(200)), (1.0, ms(400))]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_without_container_mutates_nothing() {
        let page = RecordingPage::with_cards(&["deposits", "loans", "customers"]);
        page.hide();

        let pulsed = pulse_tick(&page, &PulseConfig::default()).await;

        assert_eq!(pulsed, 0);
        assert!(page.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_with_empty_container() {
        let page = RecordingPage::with_cards(&[]);
        assert_eq!(pulse_tick(&page, &PulseConfig::default()).await, 0);
        assert!(page.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_first_fires_after_interval_and_stops_with_guard() {
        let page = Arc::new(RecordingPage::with_cards(&["deposits", "loans"]));
        let config = PulseConfig::default();
        let guard = spawn_pulse_loop(page.clone(), config.clone(), config.interval());

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(page.events().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(page.events().len(), 4);
        assert_eq!(
            page.events_for("loans"),
            vec![(1.02, ms(30_100)), (1.0, ms(30_300))]
        );

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(page.events().len(), 8);

        drop(guard);
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(page.events().len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cards() {
        let page = RecordingPage::with_cards(&["deposits", "loans"]);
        reset_cards(&page, &PulseConfig::default()).await;
        assert_eq!(page.events_for("deposits"), vec![(1.0, ms(0))]);
        assert_eq!(page.events_for("loans"), vec![(1.0, ms(0))]);
    }
}
