//! TOML configuration schema types for the Landing Dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial file only overrides what it names.
//!
//! Duration fields use human-readable strings (e.g. `"5m"`, `"250ms"`)
//! parsed by the `humantime` crate; see [`Config::validate`].

use std::collections::HashSet;
use std::time::Duration;

use chrono::FixedOffset;
use chrono_tz::Tz;
use gold_rates::{Grouping, DEFAULT_PROXY_URL, DEFAULT_TARGET_URL};
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::layout::{AxisSpec, Placement, StyleLength, Widget};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [tui]
/// [[widgets]]
/// [clock]
/// [gold]
/// [storage]
/// [logging]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terminal UI settings.
    pub tui: TuiConfig,
    /// Widget panels in paint order. Replaces the built-in set when given.
    pub widgets: Vec<WidgetConfig>,
    /// Clock widget zones.
    pub clock: ClockConfig,
    /// Gold-rate source and display.
    pub gold: GoldConfig,
    /// Persistent store location.
    pub storage: StorageConfig,
    /// Log verbosity and destination.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tui: TuiConfig::default(),
            widgets: default_widgets(),
            clock: ClockConfig::default(),
            gold: GoldConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Checks values that TOML typing alone cannot: durations, clock
    /// zones and widget keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_period("tui.tick_rate", &self.tui.tick_rate)?;
        parse_period("gold.refresh_interval", &self.gold.refresh_interval)?;
        parse_period("gold.timeout", &self.gold.timeout)?;

        for (i, zone) in self.clock.zones.iter().enumerate() {
            if zone.rule().is_some() {
                continue;
            }
            let (field, message) = match (&zone.tz, &zone.utc_offset) {
                (Some(tz), _) => ("tz", format!("unknown time zone {tz:?}")),
                (None, Some(offset)) => ("utc_offset", format!("expected an offset like \"+05:30\", got {offset:?}")),
                (None, None) => ("tz", "set tz or utc_offset".to_string()),
            };
            return Err(ConfigError::InvalidValue {
                field: format!("clock.zones[{i}].{field}"),
                message,
            });
        }

        let mut seen = HashSet::new();
        for (i, widget) in self.widgets.iter().enumerate() {
            if widget.key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("widgets[{i}].key"),
                    message: "widget key must not be empty".to_string(),
                });
            }
            if !seen.insert(widget.key.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("widgets[{i}].key"),
                    message: format!("duplicate widget key {:?}", widget.key),
                });
            }
        }
        Ok(())
    }

    /// Widgets built from the `[[widgets]]` entries.
    pub fn build_widgets(&self) -> Vec<Widget> {
        self.widgets.iter().map(WidgetConfig::to_widget).collect()
    }
}

/// Parses a humantime duration, naming the field on failure.
pub fn parse_duration(field: &str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("invalid duration {value:?}: {e}"),
    })
}

/// Like [`parse_duration`], but also rejects zero.
///
/// Timer periods and request timeouts go through this one.
pub fn parse_period(field: &str, value: &str) -> Result<Duration, ConfigError> {
    let period = parse_duration(field, value)?;
    if period.is_zero() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("duration {value:?} must be greater than zero"),
        });
    }
    Ok(period)
}

/// Parses `"+05:30"`, `"-05:00"` or `"+01"` into a fixed offset.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    let (sign, rest) = match value.chars().next()? {
        '+' => (1, &value[1..]),
        '-' => (-1, &value[1..]),
        _ => (1, value),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (parse_offset_field(h)?, parse_offset_field(m)?),
        None => (parse_offset_field(rest)?, 0),
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Digits only; a nested sign such as `"+-5"` is rejected.
fn parse_offset_field(digits: &str) -> Option<i32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Terminal UI configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Redraw tick as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// One `[[widgets]]` entry: identity, body kind and default placement.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WidgetConfig {
    /// Persistence key; must be unique.
    pub key: String,
    /// Body kind: `clock`, `gold` or `notes`.
    pub kind: String,
    /// Header title.
    pub title: String,
    /// Default horizontal position, `"center"` or a literal like `"4px"`.
    pub x: AxisSpec,
    /// Default vertical position, `"center"` or a literal.
    pub y: AxisSpec,
    /// Default width literal; empty means the built-in size.
    pub width: StyleLength,
    /// Default height literal; empty means the built-in size.
    pub height: StyleLength,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            kind: String::new(),
            title: String::new(),
            x: AxisSpec::Literal(StyleLength::px(0.0)),
            y: AxisSpec::Literal(StyleLength::px(0.0)),
            width: StyleLength::unset(),
            height: StyleLength::unset(),
        }
    }
}

impl WidgetConfig {
    fn new(key: &str, title: &str, x: &str, y: &str, width: &str, height: &str) -> Self {
        Self {
            key: key.to_string(),
            kind: key.to_string(),
            title: title.to_string(),
            x: x.into(),
            y: y.into(),
            width: width.into(),
            height: height.into(),
        }
    }

    /// Builds the runtime widget. An empty title falls back to the key.
    pub fn to_widget(&self) -> Widget {
        let title = if self.title.is_empty() {
            self.key.clone()
        } else {
            self.title.clone()
        };
        Widget::new(
            self.key.clone(),
            self.kind.clone(),
            title,
            Placement {
                x: self.x.clone(),
                y: self.y.clone(),
                width: self.width.clone(),
                height: self.height.clone(),
            },
        )
    }
}

/// Built-in panels: clock centered on top, gold and notes side by side.
pub fn default_widgets() -> Vec<WidgetConfig> {
    vec![
        WidgetConfig::new("clock", "Clock", "center", "1px", "36px", "7px"),
        WidgetConfig::new("gold", "Gold Rates", "2px", "9px", "34px", "10px"),
        WidgetConfig::new("notes", "Notes", "38px", "9px", "38px", "10px"),
    ]
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Clock widget configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Zones shown, first one as the main time and date.
    pub zones: Vec<ZoneConfig>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            zones: vec![
                ZoneConfig::named("India", "Asia/Kolkata"),
                ZoneConfig::named("France", "Europe/Paris"),
                ZoneConfig::named("USA", "America/New_York"),
            ],
        }
    }
}

/// How a clock zone maps UTC to local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRule {
    /// IANA zone, daylight saving included.
    Named(Tz),
    /// Constant offset from UTC.
    Fixed(FixedOffset),
}

/// A labelled clock zone.
///
/// `tz` names an IANA zone (`"Europe/Paris"`). `utc_offset` is a fixed
/// alternative (`"+05:30"`) used only when `tz` is absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ZoneConfig {
    /// Display label.
    pub label: String,
    /// IANA zone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
    /// Offset such as `"+05:30"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

impl ZoneConfig {
    /// Zone following an IANA name.
    pub fn named(label: &str, tz: &str) -> Self {
        Self {
            label: label.to_string(),
            tz: Some(tz.to_string()),
            utc_offset: None,
        }
    }

    /// Zone at a fixed offset.
    pub fn fixed(label: &str, utc_offset: &str) -> Self {
        Self {
            label: label.to_string(),
            tz: None,
            utc_offset: Some(utc_offset.to_string()),
        }
    }

    /// Resolved rule; `None` when the set field does not parse or neither
    /// field is set.
    pub fn rule(&self) -> Option<ZoneRule> {
        match (&self.tz, &self.utc_offset) {
            (Some(tz), _) => tz.trim().parse::<Tz>().ok().map(ZoneRule::Named),
            (None, Some(offset)) => parse_utc_offset(offset).map(ZoneRule::Fixed),
            (None, None) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Gold
// ---------------------------------------------------------------------------

/// Gold-rate source, schedule and display configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GoldConfig {
    /// Rates page to scrape.
    pub url: String,
    /// Relay proxy endpoint queried as `<proxy_url>?url=<url>`.
    pub proxy_url: String,
    /// Time between fetches (default `"5m"`).
    pub refresh_interval: String,
    /// Per-request timeout.
    pub timeout: String,
    /// Currency symbol prefixed to prices.
    pub currency_symbol: String,
    /// Digit grouping: `"indian"` or `"western"`.
    pub grouping: Grouping,
    /// Values shown when a fetch fails.
    pub fallback: FallbackRates,
}

impl Default for GoldConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TARGET_URL.to_string(),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            refresh_interval: "5m".to_string(),
            timeout: "15s".to_string(),
            currency_symbol: "₹".to_string(),
            grouping: Grouping::Indian,
            fallback: FallbackRates::default(),
        }
    }
}

/// Fixed rates shown in offline mode.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FallbackRates {
    /// Date the fallback values were taken, shown next to them.
    pub date: String,
    /// 22 carat per-gram price.
    pub k22: f64,
    /// 24 carat per-gram price.
    pub k24: f64,
}

impl Default for FallbackRates {
    fn default() -> Self {
        Self {
            date: "Nov 23, 2025".to_string(),
            k22: 7350.0,
            k24: 8020.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Store location.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON store file. Empty means
    /// `$XDG_DATA_HOME/landing-dashboard/storage.json`.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Verbosity used when `LDASH_LOG` is unset.
    pub log_level: LogLevel,
    /// Log file path. Empty means the state-dir default for the TUI.
    pub log_file: String,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
