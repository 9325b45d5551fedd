//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Tierboard library and the Zellij plugin
//! system: it translates Zellij events into library [`Event`]s and executes the
//! [`Action`]s the library returns.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← board, gestures, catalog, rendering
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ TierboardWorker  │   │  ← export file writing
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, Mouse, Timer, `WebRequestResult`, `CustomMessage`
//! 3. **Permissions granted**: Fetch the first category listing
//! 4. **Update**: Handle events, execute actions
//! 5. **Render**: Record the pane size and draw
//!
//! # Event Mapping
//!
//! - `Key` → `Event::Key` (`Ctrl+n`/`Ctrl+p` move down/up)
//! - `Mouse::LeftClick` / `Hold` / `Release` → `PointerPress` / `PointerDrag` / `PointerRelease`
//! - `Timer` → `Event::Timer` (search debounce)
//! - `WebRequestResult` → `Event::CatalogResponse` (tag read from the context)
//! - `CustomMessage` from the worker → `Event::WorkerResponse`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use tierboard::app::Key;
use tierboard::board::Point;
use tierboard::catalog::RequestTag;
use tierboard::worker::{TierboardWorker, WorkerMessage, WorkerResponse};
use tierboard::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(TierboardWorker, tierboard_worker, TIERBOARD_WORKER);

const WORKER_NAME: &str = "tierboard";

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: tierboard::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: tierboard::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Catalog lookups
    /// - `ReadApplicationState` / `ChangeApplicationState`: Hide the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        tierboard::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(tiers = config.tiers.len(), "parsed configuration");
        self.app = tierboard::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Returns `true` if the plugin UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let Some(our_event) = Self::map_event(event) else {
            return false;
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        tierboard::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Translates a Zellij event; `None` for events the library does not need.
    fn map_event(event: zellij_tile::prelude::Event) -> Option<Event> {
        match event {
            zellij_tile::prelude::Event::Key(key) => Self::map_key(&key).map(Event::Key),
            zellij_tile::prelude::Event::Mouse(mouse) => Self::map_mouse(mouse),
            zellij_tile::prelude::Event::Timer(_) => Some(Event::Timer),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                let Some(tag) = RequestTag::from_context(&context) else {
                    tracing::warn!(status, "web request result without a request tag");
                    return None;
                };
                Some(Event::CatalogResponse { tag, status, body })
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                Self::map_custom_message(&message, &payload)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Some(Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            }),
            _ => None,
        }
    }

    fn map_key(key: &KeyWithModifier) -> Option<Key> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Key::Down),
                BareKey::Char('p') => Some(Key::Up),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Up => Key::Up,
            BareKey::Down => Key::Down,
            BareKey::Left => Key::Left,
            BareKey::Right => Key::Right,
            BareKey::Enter => Key::Enter,
            BareKey::Esc => Key::Esc,
            BareKey::Tab => Key::Tab,
            BareKey::Backspace => Key::Backspace,
            BareKey::Delete => Key::Delete,
            BareKey::Char(c) => Key::Char(c),
            _ => return None,
        })
    }

    fn map_mouse(mouse: Mouse) -> Option<Event> {
        let point = |line: isize, col: usize| Point::new(isize::try_from(col).unwrap_or(isize::MAX), line);
        match mouse {
            Mouse::LeftClick(line, col) => Some(Event::PointerPress(point(line, col))),
            Mouse::Hold(line, col) => Some(Event::PointerDrag(point(line, col))),
            Mouse::Release(line, col) => Some(Event::PointerRelease(point(line, col))),
            _ => None,
        }
    }

    fn map_custom_message(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes the message as JSON and sends it to the worker.
    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    ///
    /// Fetch URLs carry the API key and are never logged.
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::Fetch { url, tag } => {
                tracing::debug!(channel = %tag.channel, serial = tag.serial, "catalog request");
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], tag.to_context());
            }
            Action::ScheduleTimer { millis } => {
                #[allow(clippy::cast_precision_loss)]
                set_timeout(*millis as f64 / 1000.0);
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}
