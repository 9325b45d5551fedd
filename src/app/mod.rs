//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the board,
//! catalog and worker layers:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └── Catalog / Worker Responses ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`layout`]: Cell geometry shared by rendering, hit-testing and collision
//! - [`modes`]: Input and view mode state machine types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod layout;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event, Key};
pub use layout::{BoardLayout, Focus};
pub use modes::{ConfirmKind, InputMode, SearchFocus, ViewMode};
pub use state::{AppState, DetailPage, DetailState};
