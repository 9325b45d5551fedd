//! Tierboard: a Zellij plugin for ranking movies into a tier list.
//!
//! Tierboard shows a board of colored tiers (S, A, B, ...) above an unranked
//! pool, with a strip of movies fetched from TMDB on top. Cards are dragged
//! between those areas with the mouse or the keyboard:
//! - Search the catalog or browse trending and genre listings
//! - Drag cards onto tiers, reorder them, unrank them into the pool
//! - Quick-assign with number keys, reset with confirmation
//! - Export the ranking as Markdown via a background worker

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and gestures                      │
//! │  - Board layout (cell geometry)                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Board (board/)│   │ Catalog       │   │ Worker        │
//! │ - Partition   │   │ (catalog/)    │   │ (worker/)     │
//! │ - Store       │   │ - TMDB URLs   │   │ - Markdown    │
//! │ - Collision   │   │ - Decoding    │   │   export      │
//! │ - Gestures    │   │ - Last query  │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  UI (ui/), Domain (domain/), Paths (infrastructure/)│
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`board`]: Partition, store, collision detection and drag gestures
//! - [`catalog`]: Catalog requests, response decoding and query tracking
//! - [`domain`]: Items, container identifiers and errors
//! - [`infrastructure`]: Sandbox paths
//! - [`worker`]: Background worker writing exports
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/tierboard.wasm" {
//!         api_key "your-tmdb-key"
//!         tiers "S:#ef4444,A:#f97316,B:#eab308,C:#84cc16,D:#22c55e"
//!         theme "catppuccin-mocha"
//!         export_dir "~/tier-lists"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use tierboard::app::Key;
//! use tierboard::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Key(Key::Char('/')))?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), tierboard::TierboardError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with mouse reporting

pub mod app;
pub mod board;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, ViewMode};
pub use board::{Partition, Tier};
pub use domain::{Result, TierboardError};
pub use ui::Theme;

use crate::catalog::CatalogSettings;
use std::collections::{BTreeMap, HashSet};

/// Tiers used when the `tiers` option is missing or malformed.
pub const DEFAULT_TIERS: &str = "S:#ef4444,A:#f97316,B:#eab308,C:#84cc16,D:#22c55e";

const DEFAULT_DRAG_THRESHOLD: usize = 1;
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/tierboard.wasm" {
///     api_key "your-tmdb-key"
///     language "de-DE"
///     tiers "GOAT:#a855f7,Good:#22c55e,Meh:#eab308"
///     drag_threshold "2"
///     search_debounce_ms "300"
///     theme_file "~/.config/zellij/tierboard-theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// TMDB API key; without it the catalog stays disabled.
    pub api_key: Option<String>,

    /// Catalog language, e.g. `en-US`.
    pub language: String,

    /// Board tiers from best to worst.
    pub tiers: Vec<Tier>,

    /// Cells the pointer must travel before a press becomes a drag.
    pub drag_threshold: usize,

    pub search_debounce_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory receiving exports; `~` maps to the host mount.
    pub export_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language: CatalogSettings::default().language,
            tiers: default_tiers(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            export_dir: None,
        }
    }
}

/// The built-in S-D tiers.
#[must_use]
pub fn default_tiers() -> Vec<Tier> {
    DEFAULT_TIERS
        .split(',')
        .filter_map(|pair| pair.split_once(':'))
        .map(|(label, color)| Tier::new(label, label, color))
        .collect()
}

/// Parses a `LABEL:#rrggbb` comma list into tiers.
///
/// The label doubles as the tier id.
///
/// # Errors
///
/// Returns [`TierboardError::Config`] for an empty list, an entry without a
/// color, an empty or duplicate label, or a color that is not `#rrggbb`.
///
/// # Example
///
/// ```rust
/// use tierboard::parse_tiers;
///
/// let tiers = parse_tiers("Top:#ff0000, Bottom:#0000ff").unwrap();
/// assert_eq!(tiers[1].label(), "Bottom");
/// assert!(parse_tiers("S:#ff0000,S:#00ff00").is_err());
/// ```
pub fn parse_tiers(list: &str) -> Result<Vec<Tier>> {
    let mut seen = HashSet::new();
    let mut tiers = Vec::new();

    for entry in list.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (label, color) = entry
            .rsplit_once(':')
            .ok_or_else(|| TierboardError::Config(format!("tier '{entry}' has no color")))?;
        let (label, color) = (label.trim(), color.trim());
        if label.is_empty() {
            return Err(TierboardError::Config(format!("tier '{entry}' has an empty label")));
        }
        if !Theme::is_hex_color(color) {
            return Err(TierboardError::Config(format!("tier '{label}' has invalid color '{color}'")));
        }
        if !seen.insert(label.to_string()) {
            return Err(TierboardError::Config(format!("tier '{label}' is listed twice")));
        }
        tiers.push(Tier::new(label, label, color));
    }

    if tiers.is_empty() {
        return Err(TierboardError::Config("no tiers configured".to_string()));
    }
    Ok(tiers)
}

fn non_empty(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or malformed values fall back to their defaults; a malformed
    /// `tiers` list falls back to the default tiers as a whole.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tierboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("tiers".to_string(), "Love:#ff0000,Hate:#000000".to_string());
    /// map.insert("drag_threshold".to_string(), "3".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.tiers.len(), 2);
    /// assert_eq!(config.drag_threshold, 3);
    /// assert_eq!(config.search_debounce_ms, 500);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let tiers = match config.get("tiers").map(|list| parse_tiers(list)) {
            Some(Ok(tiers)) => tiers,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "invalid tiers option, using defaults");
                defaults.tiers
            }
            None => defaults.tiers,
        };

        let drag_threshold = config
            .get("drag_threshold")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_DRAG_THRESHOLD);

        let search_debounce_ms = config
            .get("search_debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            api_key: non_empty(config, "api_key"),
            language: non_empty(config, "language").unwrap_or(defaults.language),
            tiers,
            drag_threshold,
            search_debounce_ms,
            theme_name: non_empty(config, "theme"),
            theme_file: non_empty(config, "theme_file"),
            trace_level: non_empty(config, "trace_level"),
            export_dir: non_empty(config, "export_dir"),
        }
    }
}

/// Loads the configured theme, falling back to the default with a log line.
fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds the initial application state from configuration.
///
/// The board starts empty with the configured tiers. Catalog listings are
/// fetched once Zellij grants web access.
///
/// # Example
///
/// ```rust
/// use tierboard::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.partition().tiers().len(), 5);
/// assert_eq!(state.debounce_ms, 500);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(tiers = config.tiers.len(), "initializing tierboard plugin");

    let mut state = AppState::new(Partition::new(config.tiers.clone()), load_theme(config));
    state.catalog = CatalogSettings {
        api_key: config.api_key.clone(),
        language: config.language.clone(),
        ..CatalogSettings::default()
    };
    if !state.catalog.is_enabled() {
        tracing::warn!("no api_key configured, catalog disabled");
    }
    state.set_drag_threshold(config.drag_threshold);
    state.debounce_ms = config.search_debounce_ms;
    state.export_dir = infrastructure::get_export_dir(config.export_dir.as_deref());

    state
}
