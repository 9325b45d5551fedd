//! Input and view mode state types for the application.
//!
//! These enums decide which keybindings are active and what the pane shows.
//! Dragging is deliberately not a mode: it is owned by the gesture interpreter
//! and takes precedence over any input mode while it lasts.
//!
//! # Example
//!
//! ```rust
//! use tierboard::app::modes::{ConfirmKind, InputMode, SearchFocus};
//!
//! let typing = InputMode::Search(SearchFocus::Typing);
//! let confirm = InputMode::Confirm(ConfirmKind::ResetRanking);
//! assert_ne!(typing, confirm);
//! ```

use crate::domain::ItemId;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes edit the query.
    Typing,

    /// The query is kept; navigation keys act on the board and results.
    Navigating,
}

/// Bulk actions that need a `y` before they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    /// Send every ranked item back to the pool.
    ResetRanking,
    /// Remove every item from the board.
    ClearAll,
}

impl ConfirmKind {
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::ResetRanking => "Move every ranked movie back to the pool? y: yes  any other key: no",
            Self::ClearAll => "Remove every movie from the board? y: yes  any other key: no",
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Board navigation and commands.
    Normal,

    /// Catalog search, with typing or navigating focus.
    Search(SearchFocus),

    /// Waiting for confirmation of a bulk action.
    Confirm(ConfirmKind),
}

/// What the pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Results strip, tiers and pool.
    Board,

    /// Detail page of one movie.
    Detail(ItemId),
}
