//! TUI module for the Landing Dashboard.
//!
//! Provides a terminal user interface built on ratatui and crossterm. The
//! widgets are drawn as floating panels; in edit mode they are moved and
//! resized with the mouse.

pub mod app;
pub mod event;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;

use std::io;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

use crate::config::schema::parse_period;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::gold::{self, GoldFetcher, GoldUpdate};
use crate::store::FileStore;
use app::App;

/// Redraw tick used when `tui.tick_rate` is invalid or zero.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

/// Gold refresh interval used when `gold.refresh_interval` is invalid or zero.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

fn duration_or(field: &str, value: &str, fallback: Duration) -> Duration {
    parse_period(field, value).unwrap_or_else(|e| {
        warn!(error = %e, "using default");
        fallback
    })
}

/// Opens the store, starts the gold fetcher and runs the dashboard until
/// the user quits.
pub async fn launch(config: &Config) -> io::Result<()> {
    let tick_rate = duration_or("tui.tick_rate", &config.tui.tick_rate, DEFAULT_TICK_RATE);
    let store = FileStore::open(config.storage_path());
    info!(path = %store.path().display(), "store opened");
    let dashboard = Dashboard::load(config.build_widgets(), store);
    let mut app = App::new(dashboard, config, tick_rate);

    let (update_tx, update_rx) = mpsc::channel::<GoldUpdate>(16);
    let (shutdown_tx, _) = broadcast::channel(1);
    match gold::client_from_config(&config.gold) {
        Ok(client) => {
            let interval = duration_or(
                "gold.refresh_interval",
                &config.gold.refresh_interval,
                DEFAULT_REFRESH_INTERVAL,
            );
            // One pending manual refresh is enough.
            let (refresh_tx, refresh_rx) = mpsc::channel(1);
            let fetcher = GoldFetcher::new(client, interval, update_tx);
            tokio::spawn(fetcher.run(refresh_rx, shutdown_tx.subscribe()));
            app = app.with_refresh(refresh_tx);
        }
        Err(e) => {
            warn!(error = %e, "gold client unavailable, showing fallback rates");
            app.apply_gold_update(GoldUpdate::Failed {
                reason: e.to_string(),
            });
        }
    }

    let result = app.run(update_rx).await;
    let _ = shutdown_tx.send(());
    result
}
