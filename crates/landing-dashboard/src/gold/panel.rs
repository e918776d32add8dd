//! Gold panel display state.

use chrono::{DateTime, Local};
use gold_rates::{format_money, GoldRates, Grouping, Purity};

use super::fetcher::GoldUpdate;
use crate::config::schema::{FallbackRates, GoldConfig};

/// Freshness of the displayed rates.
#[derive(Debug, Clone, PartialEq)]
pub enum GoldStatus {
    /// A retrieval is running (also the state before the first result).
    Updating,
    /// Showing fetched rates.
    Live {
        /// When they arrived.
        at: DateTime<Local>,
    },
    /// Showing fallback rates after a failure.
    Offline,
}

/// What the gold widget renders.
#[derive(Debug, Clone)]
pub struct GoldPanel {
    rates: Option<GoldRates>,
    status: GoldStatus,
    active: Purity,
    fallback: FallbackRates,
    currency_symbol: String,
    grouping: Grouping,
}

impl GoldPanel {
    /// Creates an empty panel waiting for the first fetch.
    pub fn new(config: &GoldConfig) -> Self {
        Self {
            rates: None,
            status: GoldStatus::Updating,
            active: Purity::K22,
            fallback: config.fallback.clone(),
            currency_symbol: config.currency_symbol.clone(),
            grouping: config.grouping,
        }
    }

    /// Folds a fetcher message into the display state.
    ///
    /// `Fetching` keeps the current rates visible and only changes the label.
    pub fn apply(&mut self, update: GoldUpdate) {
        match update {
            GoldUpdate::Fetching => self.status = GoldStatus::Updating,
            GoldUpdate::Fetched { rates, at } => {
                self.rates = Some(rates);
                self.status = GoldStatus::Live { at };
            }
            GoldUpdate::Failed { .. } => {
                self.rates = Some(GoldRates::new(self.fallback.k22, self.fallback.k24));
                self.status = GoldStatus::Offline;
            }
        }
    }

    /// Current freshness.
    pub fn status(&self) -> &GoldStatus {
        &self.status
    }

    /// Displayed unit prices, if any yet.
    pub fn rates(&self) -> Option<GoldRates> {
        self.rates
    }

    /// Whether fallback values are shown.
    pub fn is_offline(&self) -> bool {
        self.status == GoldStatus::Offline
    }

    /// Freshness label: `Updating...`, `Updated: HH:MM` or `Offline Mode`.
    pub fn status_label(&self) -> String {
        match &self.status {
            GoldStatus::Updating => "Updating...".to_string(),
            GoldStatus::Live { at } => format!("Updated: {}", at.format("%H:%M")),
            GoldStatus::Offline => "Offline Mode".to_string(),
        }
    }

    /// Date note shown next to fallback values.
    pub fn fallback_note(&self) -> Option<String> {
        self.is_offline()
            .then(|| format!("Rates as of {}", self.fallback.date))
    }

    /// Selected purity tab.
    pub fn active_tab(&self) -> Purity {
        self.active
    }

    /// Selects a purity tab.
    pub fn set_tab(&mut self, purity: Purity) {
        self.active = purity;
    }

    /// Cycles to the other purity tab.
    pub fn next_tab(&mut self) {
        self.active = match self.active {
            Purity::K22 => Purity::K24,
            Purity::K24 => Purity::K22,
        };
    }

    /// Formats a price with the configured symbol and grouping.
    pub fn format_price(&self, amount: f64) -> String {
        format_money(amount, &self.currency_symbol, self.grouping)
    }

    /// `(weight label, price)` rows for the active tab; `--` without rates.
    pub fn rows(&self) -> Vec<(String, String)> {
        match self.rates {
            Some(rates) => rates
                .presets(self.active)
                .iter()
                .map(|&(grams, price)| (format!("{grams}g"), self.format_price(price)))
                .collect(),
            None => gold_rates::WEIGHT_PRESETS
                .iter()
                .map(|grams| (format!("{grams}g"), "--".to_string()))
                .collect(),
        }
    }
}
