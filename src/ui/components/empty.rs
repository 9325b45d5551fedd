//! Empty state component renderer.
//!
//! Shown instead of the board when the pane is too small to draw it.

use crate::ui::helpers::{center, goto_cell};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centered two-line empty state message.
///
/// The message sits in the vertical middle of the pane in `empty_state_fg`,
/// with the dimmed subtitle on the line below.
///
/// # Example
///
/// ```rust
/// use tierboard::ui::components::render_empty_state;
/// use tierboard::ui::viewmodel::EmptyState;
/// use tierboard::ui::Theme;
///
/// let empty = EmptyState {
///     message: "Pane too small".to_string(),
///     subtitle: "Tierboard needs at least 24x12 cells".to_string(),
/// };
/// render_empty_state(&empty, &Theme::default(), 10, 30);
/// ```
pub fn render_empty_state(empty: &EmptyState, theme: &Theme, rows: usize, cols: usize) {
    let row = rows.saturating_sub(2) / 2;

    goto_cell(row, 0);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", center(&empty.message, cols));
    print!("{}", Theme::reset());

    if row + 1 < rows {
        goto_cell(row + 1, 0);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", center(&empty.subtitle, cols));
        print!("{}", Theme::reset());
    }
}
