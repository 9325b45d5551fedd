//! Application state management and view model computation.
//!
//! [`AppState`] is the single container for everything the plugin knows: the
//! partition store, the gesture in progress, catalog results, cursor and modes.
//! The board itself is only ever changed through [`AppState::dispatch`], which
//! funnels into the store; every other field is transient UI state.
//!
//! # Example
//!
//! ```rust
//! use tierboard::app::AppState;
//! use tierboard::board::{Partition, Tier};
//! use tierboard::ui::Theme;
//!
//! let state = AppState::new(Partition::new(vec![Tier::new("S", "S", "#ef4444")]), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.bands.len(), 2);
//! ```

use super::layout::{min_rows, BoardLayout, CardSlot, Focus, CARD_WIDTH, MIN_COLS, RESULTS_ROW};
use super::modes::{InputMode, SearchFocus, ViewMode};
use super::Action;
use crate::board::{
    BoardAction, BoardSummary, CollisionDetector, DragSnapshot, DropTargetId, GestureInterpreter,
    Partition, PartitionStore, Point, PointerSensor, RectIntersection, SensorRelease,
};
use crate::catalog::{CatalogRequest, CatalogSettings, Channel, QueryTracker, CATEGORIES};
use crate::domain::{ContainerId, Item, ItemDetail, ItemId};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BandView, CardView, CatalogBarInfo, DetailView, DragGhost, EmptyState, FooterInfo, HeaderInfo, ResultsStrip,
    UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

/// Usable width of a card's title.
const CARD_TEXT_WIDTH: usize = CARD_WIDTH - 2;

pub(crate) const MISSING_API_KEY: &str = "Set api_key in the plugin configuration to use the catalog";

/// Loading state of the detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(ItemDetail),
    /// The lookup failed; carries the reason shown to the user.
    Unavailable(String),
}

/// The item behind the detail page and what is known about it so far.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub item: Item,
    pub state: DetailState,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    store: PartitionStore,

    /// Kept current by a store subscription.
    summary: Rc<Cell<BoardSummary>>,

    gesture: GestureInterpreter,
    sensor: PointerSensor,

    /// Pointer press position of a mouse drag; `None` for keyboard drags.
    drag_anchor: Option<Point>,

    detector: Box<dyn CollisionDetector>,

    /// Catalog connection settings.
    pub catalog: CatalogSettings,

    /// Last-query-wins bookkeeping for catalog responses.
    pub tracker: QueryTracker,

    pub input_mode: InputMode,
    pub view_mode: ViewMode,

    /// Current search query string.
    pub search_query: String,

    /// Query of the last search that was sent, to skip duplicate lookups.
    pub last_search: Option<String>,

    pub search_results: Vec<Item>,
    pub browse_results: Vec<Item>,

    /// Index into [`CATEGORIES`].
    pub category: usize,

    /// Row holding the selection cursor.
    pub focus: Focus,

    /// Index of the selected card within the focused row.
    pub cursor: usize,

    pub detail: Option<DetailPage>,

    /// Debounce timers armed and not yet fired.
    pub pending_timers: usize,

    pub debounce_ms: u64,

    /// One-off feedback shown in the footer.
    pub status: Option<String>,

    pub theme: Theme,

    /// Pane size as `(rows, cols)`, refreshed on every render.
    pub viewport: (usize, usize),

    /// Whether Zellij granted web access.
    pub permissions_granted: bool,

    /// Directory receiving exports (sandbox path).
    pub export_dir: PathBuf,
}

impl AppState {
    /// Creates the state for a board with the given tiers and theme.
    ///
    /// The catalog starts disabled until [`AppState::catalog`] carries an API
    /// key and web access is granted.
    #[must_use]
    pub fn new(partition: Partition, theme: Theme) -> Self {
        let mut store = PartitionStore::new(partition);
        let summary = Rc::new(Cell::new(BoardSummary::default()));
        let sink = Rc::clone(&summary);
        store.subscribe(move |partition| sink.set(partition.summary()));

        Self {
            store,
            summary,
            gesture: GestureInterpreter::new(),
            sensor: PointerSensor::new(1),
            drag_anchor: None,
            detector: Box::new(RectIntersection),
            catalog: CatalogSettings::default(),
            tracker: QueryTracker::new(),
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Board,
            search_query: String::new(),
            last_search: None,
            search_results: Vec::new(),
            browse_results: Vec::new(),
            category: 0,
            focus: Focus::Results,
            cursor: 0,
            detail: None,
            pending_timers: 0,
            debounce_ms: 500,
            status: None,
            theme,
            viewport: (24, 80),
            permissions_granted: false,
            export_dir: crate::infrastructure::get_export_dir(None),
        }
    }

    /// Sets the pointer activation distance in cells.
    pub fn set_drag_threshold(&mut self, threshold: usize) {
        self.sensor = PointerSensor::new(threshold);
    }

    /// Replaces the overlap test used to find drop candidates.
    pub fn set_collision_detector(&mut self, detector: Box<dyn CollisionDetector>) {
        self.detector = detector;
    }

    #[must_use]
    pub const fn partition(&self) -> &Partition {
        self.store.partition()
    }

    /// Number of board changes so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.store.revision()
    }

    #[must_use]
    pub fn summary(&self) -> BoardSummary {
        self.summary.get()
    }

    #[must_use]
    pub const fn gesture(&self) -> &GestureInterpreter {
        &self.gesture
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    /// A non-empty query shows search results instead of the category listing.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// Results currently shown in the strip.
    #[must_use]
    pub fn visible_results(&self) -> &[Item] {
        if self.is_searching() {
            &self.search_results
        } else {
            &self.browse_results
        }
    }

    /// Geometry of the board for the current viewport.
    #[must_use]
    pub fn layout(&self) -> BoardLayout {
        let (rows, cols) = self.viewport;
        self.layout_for(rows, cols)
    }

    fn layout_for(&self, rows: usize, cols: usize) -> BoardLayout {
        let result_cursor = if self.focus == Focus::Results { self.cursor } else { 0 };
        BoardLayout::compute(self.partition(), self.visible_results(), result_cursor, rows, cols)
    }

    /// Rows the cursor moves through: results, tiers top to bottom, then the pool.
    fn focus_rows(&self) -> Vec<Focus> {
        std::iter::once(Focus::Results)
            .chain(
                self.partition()
                    .tiers()
                    .iter()
                    .map(|tier| Focus::Container(ContainerId::Tier(tier.id().clone()))),
            )
            .chain(std::iter::once(Focus::Container(ContainerId::Pool)))
            .collect()
    }

    fn row_items(&self, focus: &Focus) -> &[Item] {
        match focus {
            Focus::Results => self.visible_results(),
            Focus::Container(container) => self.partition().items(container).unwrap_or_default(),
        }
    }

    /// The card under the cursor.
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.row_items(&self.focus).get(self.cursor)
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor + 1 < self.row_items(&self.focus).len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.move_focus(-1);
    }

    pub fn move_down(&mut self) {
        self.move_focus(1);
    }

    fn move_focus(&mut self, step: isize) {
        let rows = self.focus_rows();
        let current = rows.iter().position(|row| row == &self.focus).unwrap_or(0);
        let Some(next) = current.checked_add_signed(step).and_then(|index| rows.get(index)) else {
            return;
        };
        self.focus = next.clone();
        self.clamp_cursor();
    }

    /// Keeps the cursor on an existing card of the focused row.
    pub fn clamp_cursor(&mut self) {
        let len = self.row_items(&self.focus).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Moves the cursor onto `item` wherever it is on the board.
    pub fn focus_item(&mut self, item: ItemId) {
        if let Some((container, index)) = self.partition().locate(item) {
            self.focus = Focus::Container(container);
            self.cursor = index;
        }
    }

    /// Selects a clicked card; results stay selected in the strip even when
    /// the item is also on the board.
    fn select_snapshot(&mut self, snapshot: &DragSnapshot) {
        if usize::try_from(snapshot.region.y).ok() == Some(RESULTS_ROW) {
            if let Some(index) = self.visible_results().iter().position(|i| i.id == snapshot.item.id) {
                self.focus = Focus::Results;
                self.cursor = index;
            }
        } else {
            self.focus_item(snapshot.item.id);
        }
    }

    /// Applies one board action. Returns `true` if the board changed.
    ///
    /// A gesture in progress is cancelled first, so a reset or remove never
    /// races a pending drop.
    pub fn dispatch(&mut self, action: &BoardAction) -> bool {
        if self.gesture.cancel() {
            tracing::debug!("gesture cancelled by board action");
        }
        self.drag_anchor = None;
        self.sensor.reset();

        let changed = self.store.dispatch(action);
        self.clamp_cursor();
        changed
    }

    /// Turns a catalog request into a fetch action and registers it with the tracker.
    ///
    /// Returns `None` when the catalog is not usable (no API key, no web access)
    /// or the URL cannot be built.
    pub fn issue(&mut self, request: CatalogRequest) -> Option<Action> {
        if !self.catalog.is_enabled() {
            tracing::debug!(request = ?request, "catalog disabled, request skipped");
            self.status = Some(MISSING_API_KEY.to_string());
            return None;
        }
        if !self.permissions_granted {
            tracing::debug!(request = ?request, "web access not granted, request skipped");
            return None;
        }

        match request.url(&self.catalog) {
            Ok(url) => {
                let tag = self.tracker.issue(request.channel());
                tracing::debug!(request = ?request, channel = %tag.channel, serial = tag.serial, "catalog request issued");
                Some(Action::Fetch {
                    url: url.to_string(),
                    tag,
                })
            }
            Err(e) => {
                tracing::warn!(request = ?request, error = %e, "failed to build catalog request");
                self.status = Some(e.to_string());
                None
            }
        }
    }

    /// Starts a keyboard drag of the selected card. Returns `true` if a drag began.
    pub fn start_keyboard_drag(&mut self) -> bool {
        let layout = self.layout();
        if !layout.fits() {
            return false;
        }
        let Some(slot) = layout.slot(&self.focus, self.cursor) else {
            tracing::debug!(focus = ?self.focus, cursor = self.cursor, "no visible card to drag");
            return false;
        };
        if !self.gesture.begin(slot.snapshot()) {
            return false;
        }
        self.sensor.reset();
        self.drag_anchor = None;
        self.gesture.drag_to(0, 0, &layout.droppables(), self.detector.as_ref());
        true
    }

    /// Moves the dragged card by whole cells (keyboard dragging).
    pub fn nudge_drag(&mut self, dx: isize, dy: isize) -> bool {
        if !self.gesture.is_dragging() {
            return false;
        }
        let droppables = self.layout().droppables();
        self.gesture.nudge(dx, dy, &droppables, self.detector.as_ref());
        true
    }

    /// Ends the gesture and applies the drop, if it calls for a change.
    pub fn drop_drag(&mut self) -> bool {
        let Some(dragged) = self.gesture.session().map(|s| s.snapshot().item.id) else {
            return false;
        };
        self.drag_anchor = None;
        if let Some(action) = self.gesture.release(self.store.partition()) {
            self.dispatch(&action);
            self.focus_item(dragged);
        }
        true
    }

    /// Abandons the gesture; the board stays as it was.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag_anchor = None;
        self.sensor.reset();
        self.gesture.cancel()
    }

    /// Pointer pressed at `at`: arms the sensor if a card is under it.
    pub fn pointer_press(&mut self, at: Point) -> bool {
        if self.gesture.is_dragging() {
            return false;
        }
        let layout = self.layout();
        let card = layout
            .fits()
            .then(|| layout.card_at(at).map(|slot| slot.snapshot()))
            .flatten();
        self.sensor.press(at, card);
        false
    }

    /// Pointer moved to `at` with the button held.
    pub fn pointer_drag(&mut self, at: Point) -> bool {
        if self.gesture.is_dragging() {
            // a keyboard drag owns the gesture
            let Some(anchor) = self.drag_anchor else {
                return false;
            };
            let droppables = self.layout().droppables();
            self.gesture
                .drag_to(at.col - anchor.col, at.row - anchor.row, &droppables, self.detector.as_ref());
            return true;
        }

        let Some((snapshot, origin)) = self.sensor.moved(at) else {
            return false;
        };
        if !self.gesture.begin(snapshot) {
            return false;
        }
        self.drag_anchor = Some(origin);
        let droppables = self.layout().droppables();
        self.gesture
            .drag_to(at.col - origin.col, at.row - origin.row, &droppables, self.detector.as_ref());
        true
    }

    /// Pointer released at `at`: drops a mouse drag, or selects a clicked card.
    pub fn pointer_release(&mut self, at: Point) -> bool {
        if self.gesture.is_dragging() {
            if self.drag_anchor.is_none() {
                return false;
            }
            self.pointer_drag(at);
            return self.drop_drag();
        }

        match self.sensor.release() {
            SensorRelease::Click(snapshot) => {
                self.select_snapshot(&snapshot);
                true
            }
            SensorRelease::Nothing => false,
        }
    }

    /// Computes a renderable UI view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();
        let catalog_bar = self.compute_catalog_bar();
        let layout = self.layout_for(rows, cols);

        if !layout.fits() {
            let min_rows = min_rows(self.partition().tiers().len());
            return UIViewModel {
                header,
                catalog_bar,
                results: ResultsStrip::default(),
                bands: vec![],
                drag: None,
                detail: None,
                footer,
                empty_state: Some(EmptyState {
                    message: "Pane too small".to_string(),
                    subtitle: format!("Tierboard needs at least {MIN_COLS}x{min_rows} cells"),
                }),
            };
        }

        if let ViewMode::Detail(_) = self.view_mode {
            return UIViewModel {
                header,
                catalog_bar,
                results: ResultsStrip::default(),
                bands: vec![],
                drag: None,
                detail: self.compute_detail(),
                footer,
                empty_state: None,
            };
        }

        let session = self.gesture.session();
        let candidate = session.and_then(|s| s.candidate());
        let dragged = session.map(|s| s.snapshot());

        let matcher = self.is_searching().then(SkimMatcherV2::default);

        let card_view = |slot: &CardSlot, focus: &Focus| {
            let (title, visible_chars) = truncate_title(&slot.item.title);
            let highlight_ranges = match (&matcher, focus) {
                (Some(m), Focus::Results) => clamp_ranges(self.compute_highlight_ranges(&slot.item.title, m), visible_chars),
                _ => vec![],
            };
            CardView {
                title,
                col: usize::try_from(slot.region.x).unwrap_or_default(),
                row: usize::try_from(slot.region.y).unwrap_or_default(),
                is_selected: !self.is_dragging() && &self.focus == focus && self.cursor == slot.index,
                is_candidate: candidate == Some(&DropTargetId::Item(slot.item.id)),
                is_dragged: dragged.is_some_and(|d| d.item.id == slot.item.id && d.origin == slot.origin),
                highlight_ranges,
            }
        };

        let result_cards: Vec<CardView> = layout.results.iter().map(|slot| card_view(slot, &Focus::Results)).collect();
        let results = ResultsStrip {
            message: result_cards.is_empty().then(|| self.empty_results_message()),
            more_before: layout.results_offset > 0,
            more_after: layout.results_offset + result_cards.len() < layout.results_total,
            cards: result_cards,
        };

        let bands = layout
            .bands
            .iter()
            .map(|band| {
                let focus = Focus::Container(band.container.clone());
                let is_candidate = match candidate {
                    Some(DropTargetId::Container(container)) => container == &band.container,
                    Some(DropTargetId::Item(id)) => band.cards.iter().any(|card| card.item.id == *id),
                    None => false,
                };
                BandView {
                    label: band.label.clone(),
                    color: band.color.clone(),
                    row: usize::try_from(band.region.y).unwrap_or_default(),
                    lines: band.region.height,
                    is_candidate,
                    cards: band.cards.iter().map(|slot| card_view(slot, &focus)).collect(),
                    hidden: band.hidden,
                }
            })
            .collect();

        let drag = session.map(|s| {
            let region = s.region();
            DragGhost {
                title: truncate_title(&s.snapshot().item.title).0,
                col: region.x,
                row: region.y,
            }
        });

        UIViewModel {
            header,
            catalog_bar,
            results,
            bands,
            drag,
            detail: None,
            footer,
            empty_state: None,
        }
    }

    fn empty_results_message(&self) -> String {
        if !self.catalog.is_enabled() {
            MISSING_API_KEY.to_string()
        } else if self.is_results_loading() {
            "Loading...".to_string()
        } else if self.is_searching() {
            format!("No results for \"{}\"", self.search_query.trim())
        } else {
            "Nothing to show".to_string()
        }
    }

    fn is_results_loading(&self) -> bool {
        if self.is_searching() {
            self.pending_timers > 0 || self.tracker.is_pending(Channel::Search)
        } else {
            self.tracker.is_pending(Channel::Browse)
        }
    }

    /// Computes character index ranges to highlight for fuzzy match visualization.
    ///
    /// Consecutive matched indices are coalesced into `(start, end)` ranges
    /// with an exclusive end.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.search_query.trim()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let summary = self.summary();
        HeaderInfo {
            title: format!(" Tierboard  ranked {}  unranked {} ", summary.ranked, summary.unranked),
        }
    }

    fn compute_catalog_bar(&self) -> CatalogBarInfo {
        let editing = self.input_mode == InputMode::Search(SearchFocus::Typing);
        if editing || self.is_searching() {
            CatalogBarInfo {
                label: "Search".to_string(),
                text: self.search_query.clone(),
                is_editing: editing,
                is_loading: self.is_results_loading(),
            }
        } else {
            let category = CATEGORIES.get(self.category).map_or("Trending", |c| c.name);
            CatalogBarInfo {
                label: "Browse".to_string(),
                text: category.to_string(),
                is_editing: false,
                is_loading: self.is_results_loading(),
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let tiers = self.partition().tiers().len();
        let keybindings = if self.is_dragging() {
            "arrows/hjkl: move  Enter/Space: drop  Esc: cancel".to_string()
        } else {
            match (self.view_mode, self.input_mode) {
                (ViewMode::Detail(_), _) => "a: add to pool  Esc/q: back".to_string(),
                (_, InputMode::Confirm(kind)) => kind.prompt().to_string(),
                (_, InputMode::Search(SearchFocus::Typing)) => {
                    "Type to search  Enter: results  Esc: clear search".to_string()
                }
                (_, InputMode::Search(SearchFocus::Navigating)) => format!(
                    "hjkl: move  Space: drag  1-{tiers}: rank  a: add  Enter: details  /: edit query  Esc: clear search"
                ),
                (_, InputMode::Normal) => format!(
                    "hjkl: move  Space: drag  1-{tiers}: rank  a: add  x: remove  Enter: details  /: search  Tab: category  e: export  r/R: reset  q: quit"
                ),
            }
        };

        FooterInfo {
            keybindings,
            status: self.status.clone(),
        }
    }

    fn compute_detail(&self) -> Option<DetailView> {
        let page = self.detail.as_ref()?;
        let on_board = self.partition().contains(page.item.id);

        let view = match &page.state {
            DetailState::Loading => DetailView {
                title: page.item.title.clone(),
                meta: "Loading details...".to_string(),
                genres: String::new(),
                synopsis: String::new(),
                poster: page.item.image.clone(),
                on_board,
            },
            DetailState::Ready(detail) => {
                let mut meta = vec![format!("Rating {}", detail.rating_label())];
                if let Some(year) = detail.release_year() {
                    meta.push(year.to_string());
                }
                if let Some(runtime) = detail.runtime.filter(|minutes| *minutes > 0) {
                    meta.push(format!("{runtime} min"));
                }
                DetailView {
                    title: detail.item.title.clone(),
                    meta: meta.join("  "),
                    genres: detail
                        .genres
                        .iter()
                        .map(|genre| genre.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    synopsis: detail.synopsis.clone(),
                    poster: detail.item.image.clone(),
                    on_board,
                }
            }
            DetailState::Unavailable(reason) => DetailView {
                title: page.item.title.clone(),
                meta: "Details unavailable".to_string(),
                genres: String::new(),
                synopsis: reason.clone(),
                poster: page.item.image.clone(),
                on_board,
            },
        };
        Some(view)
    }
}

/// Truncates a title to the card width. Returns the text and how many
/// characters of the original title it still shows.
fn truncate_title(title: &str) -> (String, usize) {
    let count = title.chars().count();
    if count <= CARD_TEXT_WIDTH {
        return (title.to_string(), count);
    }
    let kept = CARD_TEXT_WIDTH - 1;
    let mut text: String = title.chars().take(kept).collect();
    text.push('~');
    (text, kept)
}

fn clamp_ranges(ranges: Vec<(usize, usize)>, visible: usize) -> Vec<(usize, usize)> {
    ranges
        .into_iter()
        .filter(|(start, _)| *start < visible)
        .map(|(start, end)| (start, end.min(visible)))
        .collect()
}
