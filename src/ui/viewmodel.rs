//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready data only: truncated titles,
//! precomputed highlight ranges and 0-based cell positions taken from the
//! board layout, so the renderer never has to know about the partition.
//!
//! # Example
//!
//! ```rust
//! use tierboard::ui::viewmodel::{CardView, FooterInfo};
//!
//! let card = CardView {
//!     title: "Alien".to_string(),
//!     col: 8,
//!     row: 5,
//!     is_selected: true,
//!     is_candidate: false,
//!     is_dragged: false,
//!     highlight_ranges: vec![(0, 2)],
//! };
//! let footer = FooterInfo { keybindings: "q: quit".to_string(), status: None };
//! # let _ = (card, footer);
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Search box or category line.
    pub catalog_bar: CatalogBarInfo,

    /// Catalog results available for dragging onto the board.
    pub results: ResultsStrip,

    /// Tier bands in tier order, followed by the pool band.
    pub bands: Vec<BandView>,

    /// The card following the pointer while a drag is in progress.
    pub drag: Option<DragGhost>,

    /// Present when the detail page replaces the board.
    pub detail: Option<DetailView>,

    pub footer: FooterInfo,

    /// Shown instead of everything else when the pane is too small.
    pub empty_state: Option<EmptyState>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text including board counts.
    pub title: String,
}

/// The line above the results strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogBarInfo {
    /// `Search` or `Browse`.
    pub label: String,

    /// Query text or category name.
    pub text: String,

    /// Keystrokes currently go into the query.
    pub is_editing: bool,

    /// A lookup for what is shown is still in flight.
    pub is_loading: bool,
}

/// One horizontal page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsStrip {
    pub cards: Vec<CardView>,

    /// Replaces the cards when there is nothing to show.
    pub message: Option<String>,

    pub more_before: bool,
    pub more_after: bool,
}

/// A tier or the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandView {
    pub label: String,

    /// Hex color of the tier label; `None` for the pool.
    pub color: Option<String>,

    pub row: usize,
    pub lines: usize,

    /// The dragged card is hovering over this band or one of its cards.
    pub is_candidate: bool,

    pub cards: Vec<CardView>,

    /// Number of cards that did not fit.
    pub hidden: usize,
}

/// A single card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Title, already truncated to the card width.
    pub title: String,

    pub col: usize,
    pub row: usize,

    pub is_selected: bool,

    /// The dragged card is hovering over this card.
    pub is_candidate: bool,

    /// This is the card being dragged; it is drawn dimmed in place.
    pub is_dragged: bool,

    /// Character ranges to highlight (fuzzy search matches).
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// The floating copy of the dragged card.
///
/// Positions are signed: the pointer can drag the card partly off the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGhost {
    pub title: String,
    pub col: isize,
    pub row: isize,
}

/// Detail page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,

    /// Rating, year and runtime, or a loading/unavailable notice.
    pub meta: String,

    pub genres: String,
    pub synopsis: String,

    /// Poster image URL.
    pub poster: String,

    pub on_board: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,

    /// One-off feedback (export result, catalog errors), shown instead of the
    /// keybindings until the next key press.
    pub status: Option<String>,
}

/// Message shown when the board cannot be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
