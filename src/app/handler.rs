//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point the plugin shim calls. It maps
//! keys, pointer input, timers, catalog responses and worker replies onto
//! [`AppState`] changes and returns whether a re-render is needed together with
//! the side effects to run.
//!
//! Key handling is layered: a drag in progress gets first pick of the keys
//! (move, drop, cancel), then the detail page, then the input mode.
//!
//! # Example
//!
//! ```rust
//! use tierboard::app::{handle_event, AppState, Event, Key};
//! use tierboard::board::{Partition, Tier};
//! use tierboard::ui::Theme;
//!
//! let mut state = AppState::new(Partition::new(vec![Tier::new("S", "S", "#ef4444")]), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Key(Key::Char('/')))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), tierboard::domain::TierboardError>(())
//! ```

use super::layout::{Focus, CARD_STEP};
use super::modes::{ConfirmKind, InputMode, SearchFocus, ViewMode};
use super::state::{DetailPage, DetailState};
use crate::app::{Action, AppState};
use crate::board::{BoardAction, Point};
use crate::catalog::{decode_detail, decode_listing, ensure_success, CatalogRequest, Channel, RequestTag, CATEGORIES};
use crate::domain::error::Result;
use crate::domain::{ContainerId, ItemId};
use crate::worker::{BoardExport, WorkerMessage, WorkerResponse};

/// Keys the plugin reacts to, independent of Zellij's key types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    Backspace,
    Delete,
    Char(char),
}

/// Events triggered by user input, system changes, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),

    /// Left button pressed at a pane cell.
    PointerPress(Point),

    /// Pointer moved with the left button held.
    PointerDrag(Point),

    /// Left button released.
    PointerRelease(Point),

    /// A debounce timer fired.
    Timer,

    /// A catalog web request finished.
    CatalogResponse {
        tag: RequestTag,
        status: u16,
        body: Vec<u8>,
    },

    /// Reports whether Zellij granted the requested permissions.
    PermissionsResult {
        granted: bool,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short event name for span fields; response bodies stay out of the logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::PointerPress(_) => "pointer_press",
            Self::PointerDrag(_) => "pointer_drag",
            Self::PointerRelease(_) => "pointer_release",
            Self::Timer => "timer",
            Self::CatalogResponse { .. } => "catalog_response",
            Self::PermissionsResult { .. } => "permissions_result",
            Self::WorkerResponse(_) => "worker_response",
        }
    }
}

type Outcome = (bool, Vec<Action>);

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean tells the shim whether the UI needs to be redrawn.
///
/// # Errors
///
/// Currently every event is handled in place; the `Result` is kept so the shim
/// has a single error path for future fallible events.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<Outcome> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    let outcome = match event {
        Event::Key(key) => {
            state.status = None;
            handle_key(state, *key)
        }
        Event::PointerPress(at) => {
            if matches!(state.view_mode, ViewMode::Detail(_)) {
                return Ok((false, vec![]));
            }
            (state.pointer_press(*at), vec![])
        }
        Event::PointerDrag(at) => {
            if matches!(state.view_mode, ViewMode::Detail(_)) {
                return Ok((false, vec![]));
            }
            (state.pointer_drag(*at), vec![])
        }
        Event::PointerRelease(at) => {
            if matches!(state.view_mode, ViewMode::Detail(_)) {
                return Ok((false, vec![]));
            }
            (state.pointer_release(*at), vec![])
        }
        Event::Timer => handle_timer(state),
        Event::CatalogResponse { tag, status, body } => handle_catalog_response(state, tag, *status, body),
        Event::PermissionsResult { granted } => handle_permissions(state, *granted),
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    };

    Ok(outcome)
}

fn handle_key(state: &mut AppState, key: Key) -> Outcome {
    if state.is_dragging() {
        if let Some(outcome) = handle_drag_key(state, key) {
            return outcome;
        }
    }

    if let ViewMode::Detail(id) = state.view_mode {
        return handle_detail_key(state, id, key);
    }

    match state.input_mode {
        InputMode::Confirm(kind) => handle_confirm_key(state, kind, key),
        InputMode::Search(SearchFocus::Typing) => handle_typing_key(state, key),
        InputMode::Search(SearchFocus::Navigating) | InputMode::Normal => handle_board_key(state, key),
    }
}

#[allow(clippy::cast_possible_wrap)]
const STEP: isize = CARD_STEP as isize;

/// Keys while a card is being dragged.
///
/// Board actions cancel the gesture and then fall through to the normal
/// bindings (`None`). Every other key is swallowed so no mode switch happens
/// under a running drag.
fn handle_drag_key(state: &mut AppState, key: Key) -> Option<Outcome> {
    let moved = match key {
        Key::Left | Key::Char('h') => state.nudge_drag(-STEP, 0),
        Key::Right | Key::Char('l') => state.nudge_drag(STEP, 0),
        Key::Up | Key::Char('k') => state.nudge_drag(0, -1),
        Key::Down | Key::Char('j') => state.nudge_drag(0, 1),
        Key::Enter | Key::Char(' ') => state.drop_drag(),
        Key::Esc => state.cancel_drag(),
        Key::Char('1'..='9' | 'a' | 'x' | 'r' | 'R' | 'q') | Key::Delete => {
            state.cancel_drag();
            tracing::debug!(key = ?key, "drag cancelled by board key");
            return None;
        }
        _ => false,
    };
    Some((moved, vec![]))
}

fn handle_detail_key(state: &mut AppState, id: ItemId, key: Key) -> Outcome {
    match key {
        Key::Esc | Key::Backspace | Key::Char('q') => {
            tracing::debug!(item = %id, "leaving detail view");
            state.view_mode = ViewMode::Board;
            state.detail = None;
            state.tracker.invalidate(Channel::Detail);
            (true, vec![])
        }
        Key::Char('a') => {
            let Some(item) = state.detail.as_ref().map(|page| page.item.clone()) else {
                return (false, vec![]);
            };
            let title = item.title.clone();
            state.status = Some(if state.dispatch(&BoardAction::AddToPool(item)) {
                format!("Added {title} to the pool")
            } else {
                format!("{title} is already on the board")
            });
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn handle_confirm_key(state: &mut AppState, kind: ConfirmKind, key: Key) -> Outcome {
    state.input_mode = InputMode::Normal;
    if matches!(key, Key::Char('y' | 'Y')) {
        let action = match kind {
            ConfirmKind::ResetRanking => BoardAction::ResetTierContents,
            ConfirmKind::ClearAll => BoardAction::ResetAll,
        };
        tracing::debug!(kind = ?kind, "bulk action confirmed");
        state.dispatch(&action);
    }
    (true, vec![])
}

fn handle_typing_key(state: &mut AppState, key: Key) -> Outcome {
    match key {
        Key::Char(c) => {
            state.search_query.push(c);
            tracing::trace!(query = %state.search_query, "search query updated");
            (true, query_changed(state))
        }
        Key::Backspace => {
            if state.search_query.pop().is_none() {
                return (false, vec![]);
            }
            (true, query_changed(state))
        }
        Key::Enter => {
            let actions = fire_search(state).into_iter().collect();
            focus_results(state);
            (true, actions)
        }
        Key::Down | Key::Tab => {
            focus_results(state);
            (true, vec![])
        }
        Key::Esc => {
            clear_search(state);
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

/// Leaves the query box for the results; an empty query leaves search mode.
fn focus_results(state: &mut AppState) {
    state.input_mode = if state.is_searching() {
        InputMode::Search(SearchFocus::Navigating)
    } else {
        InputMode::Normal
    };
    state.focus = Focus::Results;
    state.cursor = 0;
}

fn clear_search(state: &mut AppState) {
    tracing::debug!(query = %state.search_query, "search cleared");
    state.input_mode = InputMode::Normal;
    state.search_query.clear();
    state.search_results.clear();
    state.last_search = None;
    state.tracker.invalidate(Channel::Search);
    state.clamp_cursor();
}

/// Debounces a query edit. An emptied query drops the results right away.
fn query_changed(state: &mut AppState) -> Vec<Action> {
    if !state.is_searching() {
        state.search_results.clear();
        state.last_search = None;
        state.tracker.invalidate(Channel::Search);
        state.clamp_cursor();
        return vec![];
    }
    if state.debounce_ms == 0 {
        return fire_search(state).into_iter().collect();
    }
    state.pending_timers += 1;
    vec![Action::ScheduleTimer {
        millis: state.debounce_ms,
    }]
}

fn fire_search(state: &mut AppState) -> Option<Action> {
    let query = state.search_query.trim().to_string();
    if query.is_empty() || state.last_search.as_deref() == Some(query.as_str()) {
        return None;
    }
    let action = state.issue(CatalogRequest::Search(query.clone()))?;
    state.last_search = Some(query);
    Some(action)
}

fn handle_timer(state: &mut AppState) -> Outcome {
    state.pending_timers = state.pending_timers.saturating_sub(1);
    if state.pending_timers > 0 {
        return (false, vec![]);
    }
    let actions: Vec<Action> = fire_search(state).into_iter().collect();
    // the loading marker goes away when the last timer fires
    (true, actions)
}

#[allow(clippy::too_many_lines)]
fn handle_board_key(state: &mut AppState, key: Key) -> Outcome {
    match key {
        Key::Left | Key::Char('h') => {
            state.move_left();
            (true, vec![])
        }
        Key::Right | Key::Char('l') => {
            state.move_right();
            (true, vec![])
        }
        Key::Up | Key::Char('k') => {
            state.move_up();
            (true, vec![])
        }
        Key::Down | Key::Char('j') => {
            state.move_down();
            (true, vec![])
        }
        Key::Char(' ') => (state.start_keyboard_drag(), vec![]),
        Key::Enter => open_detail(state),
        Key::Char(digit @ '1'..='9') => quick_assign(state, digit),
        Key::Char('a') => {
            let Some(item) = state.selected_item().cloned() else {
                return (false, vec![]);
            };
            let title = item.title.clone();
            if state.dispatch(&BoardAction::AddToPool(item)) {
                state.status = Some(format!("Added {title} to the pool"));
            } else {
                state.status = Some(format!("{title} is already on the board"));
            }
            (true, vec![])
        }
        Key::Char('x') | Key::Delete => remove_selected(state),
        Key::Char('r') => {
            if state.summary().has_ranked() {
                state.input_mode = InputMode::Confirm(ConfirmKind::ResetRanking);
            } else {
                state.status = Some("Nothing is ranked yet".to_string());
            }
            (true, vec![])
        }
        Key::Char('R') => {
            if state.summary().has_any() {
                state.input_mode = InputMode::Confirm(ConfirmKind::ClearAll);
            } else {
                state.status = Some("The board is already empty".to_string());
            }
            (true, vec![])
        }
        Key::Char('e') => export(state),
        Key::Tab => next_category(state),
        Key::Char('/') => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            (true, vec![])
        }
        Key::Esc => {
            if state.input_mode == InputMode::Normal {
                return (false, vec![]);
            }
            clear_search(state);
            (true, vec![])
        }
        Key::Char('q') => (false, vec![Action::CloseFocus]),
        _ => (false, vec![]),
    }
}

fn open_detail(state: &mut AppState) -> Outcome {
    let Some(item) = state.selected_item().cloned() else {
        return (false, vec![]);
    };
    tracing::debug!(item = %item.id, "opening detail view");

    state.view_mode = ViewMode::Detail(item.id);
    state.detail = Some(DetailPage {
        item: item.clone(),
        state: DetailState::Loading,
    });

    let action = state.issue(CatalogRequest::ById(item.id));
    if action.is_none() {
        if let Some(page) = state.detail.as_mut() {
            page.state = DetailState::Unavailable("The catalog is not available".to_string());
        }
    }
    (true, action.into_iter().collect())
}

fn quick_assign(state: &mut AppState, digit: char) -> Outcome {
    let Some(position) = digit.to_digit(10).and_then(|d| usize::try_from(d).ok()) else {
        return (false, vec![]);
    };
    let Some(tier) = state.partition().tiers().get(position - 1).map(|t| (t.id().clone(), t.label().to_string()))
    else {
        return (false, vec![]);
    };
    let Some(item) = state.selected_item().cloned() else {
        return (false, vec![]);
    };

    let (tier_id, label) = tier;
    let title = item.title.clone();
    if state.dispatch(&BoardAction::AssignToTier { item, tier: tier_id }) {
        state.status = Some(format!("Ranked {title} in {label}"));
    }
    (true, vec![])
}

fn remove_selected(state: &mut AppState) -> Outcome {
    let Focus::Container(container) = state.focus.clone() else {
        return (false, vec![]);
    };
    let Some(item) = state.selected_item().map(|item| item.id) else {
        return (false, vec![]);
    };
    let action = match container {
        ContainerId::Pool => BoardAction::RemoveFromPool(item),
        ContainerId::Tier(tier) => BoardAction::Unrank { item, tier },
    };
    (state.dispatch(&action), vec![])
}

fn export(state: &mut AppState) -> Outcome {
    if !state.summary().has_ranked() {
        state.status = Some("Rank at least one movie before exporting".to_string());
        return (true, vec![]);
    }
    let board = BoardExport::from_partition(state.partition());
    let export_dir = state.export_dir.to_string_lossy().into_owned();
    tracing::debug!(tiers = board.tiers.len(), export_dir = %export_dir, "requesting export");
    state.status = Some("Exporting...".to_string());
    (true, vec![Action::PostToWorker(WorkerMessage::export_board(board, export_dir))])
}

fn next_category(state: &mut AppState) -> Outcome {
    if state.is_searching() {
        clear_search(state);
    }
    state.category = (state.category + 1) % CATEGORIES.len();
    state.browse_results.clear();
    if state.focus == Focus::Results {
        state.cursor = 0;
    }
    tracing::debug!(category = CATEGORIES[state.category].name, "category changed");
    let request = CATEGORIES[state.category].request();
    (true, state.issue(request).into_iter().collect())
}

fn handle_catalog_response(state: &mut AppState, tag: &RequestTag, status: u16, body: &[u8]) -> Outcome {
    if !state.tracker.accept(tag) {
        tracing::debug!(channel = %tag.channel, serial = tag.serial, "discarding superseded catalog response");
        return (false, vec![]);
    }

    match tag.channel {
        Channel::Search | Channel::Browse => {
            let items = ensure_success(status, body).and_then(|()| decode_listing(body)).unwrap_or_else(|e| {
                tracing::warn!(channel = %tag.channel, status = status, error = %e, "catalog lookup failed");
                state.status = Some(format!("Catalog lookup failed: {e}"));
                Vec::new()
            });
            tracing::debug!(channel = %tag.channel, count = items.len(), "catalog results received");

            let shown = (tag.channel == Channel::Search) == state.is_searching();
            if tag.channel == Channel::Search {
                state.search_results = items;
            } else {
                state.browse_results = items;
            }
            if shown && state.focus == Focus::Results {
                state.cursor = 0;
            }
            (true, vec![])
        }
        Channel::Detail => {
            let Some(page) = state.detail.as_mut() else {
                return (false, vec![]);
            };
            page.state = match ensure_success(status, body).and_then(|()| decode_detail(body)) {
                Ok(detail) if detail.item.id == page.item.id => DetailState::Ready(detail),
                Ok(detail) => {
                    tracing::debug!(expected = %page.item.id, got = %detail.item.id, "detail for another item");
                    return (false, vec![]);
                }
                Err(e) => {
                    tracing::warn!(item = %page.item.id, status = status, error = %e, "detail lookup failed");
                    DetailState::Unavailable(e.to_string())
                }
            };
            (true, vec![])
        }
    }
}

fn handle_permissions(state: &mut AppState, granted: bool) -> Outcome {
    state.permissions_granted = granted;
    if !granted {
        tracing::warn!("web access denied, catalog disabled");
        state.status = Some("Web access denied: the catalog is disabled".to_string());
        return (true, vec![]);
    }

    tracing::debug!("permissions granted");
    let request = CATEGORIES[state.category].request();
    (true, state.issue(request).into_iter().collect())
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Outcome {
    match response {
        WorkerResponse::Exported { path } => {
            tracing::info!(path = %path, "board exported");
            state.status = Some(format!("Exported to {path}"));
        }
        WorkerResponse::Error { message } => {
            tracing::error!(message = %message, "worker error");
            state.status = Some(format!("Export failed: {message}"));
        }
    }
    (true, vec![])
}
