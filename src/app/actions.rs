//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It mutates [`AppState`]
//! and returns a `Vec<Action>`; the plugin shim executes them in order. This
//! keeps the whole state machine testable without a running Zellij.
//!
//! [`AppState`]: crate::app::AppState
//!
//! # Example
//!
//! ```rust
//! use tierboard::app::Action;
//!
//! let actions = vec![Action::ScheduleTimer { millis: 500 }, Action::CloseFocus];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::catalog::RequestTag;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues a catalog GET request.
    ///
    /// The tag travels in the web request context and comes back with the
    /// response, where it decides whether the response is still wanted.
    Fetch {
        url: String,
        tag: RequestTag,
    },

    /// Arms a one-shot plugin timer (search debounce).
    ScheduleTimer {
        millis: u64,
    },

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}
