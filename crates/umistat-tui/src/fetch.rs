//! Background fetch task — runs the two-step share fetch once per mount
//! and reports the outcome through the TUI action channel.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use umistat_api::{ShareClient, StatsWindow, TransportConfig};
use umistat_config::Config;

use crate::action::Action;

/// Spawn the one-shot stats fetch.
///
/// With an empty endpoint or share id no request is made and loading ends
/// immediately. Nothing ever re-fires the fetch.
pub fn spawn_stats_fetch(config: &Config, action_tx: UnboundedSender<Action>) {
    if config.endpoint.is_empty() || config.share_id.is_empty() {
        warn!("endpoint or share id not configured, skipping stats fetch");
        let _ = action_tx.send(Action::StatsFailed);
        return;
    }

    let endpoint = config.endpoint.clone();
    let share_id = config.share_id.clone();
    let window = StatsWindow::current(&config.timezone, &config.page_url);

    tokio::spawn(fetch_and_report(endpoint, share_id, window, action_tx));
}

/// Perform the fetch and send the resulting action.
///
/// Holds only the sender half of the action channel: if the UI has shut
/// down by the time a response arrives, the send fails and the result is
/// quietly discarded.
pub async fn fetch_and_report(
    endpoint: String,
    share_id: String,
    window: StatsWindow,
    action_tx: UnboundedSender<Action>,
) {
    info!(%endpoint, %share_id, "fetching visitor stats");

    let client = match ShareClient::new(&endpoint, &TransportConfig::default()) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "failed to build share client");
            let _ = action_tx.send(Action::StatsFailed);
            return;
        }
    };

    match client.fetch_stats(&share_id, &window).await {
        Ok(snapshot) => {
            debug!(?snapshot, "stats fetch complete");
            let _ = action_tx.send(Action::StatsLoaded(snapshot));
        }
        Err(e) => {
            warn!(error = %e, "stats fetch failed");
            let _ = action_tx.send(Action::StatsFailed);
        }
    }
}
