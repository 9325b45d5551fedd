//! Footer component renderer.
//!
//! Shows keybinding hints, or the current status message when there is one.

use crate::ui::helpers::{center, goto_cell};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer at the specified 0-based row.
///
/// A status message replaces the hints and is drawn in `status_fg`. Text wider
/// than the pane is truncated. Returns the next available row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    goto_cell(row, 0);
    match &footer.status {
        Some(status) => {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.status_fg));
            print!("{}", center(status, cols));
        }
        None => {
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("{}", center(&footer.keybindings, cols));
        }
    }
    print!("{}", Theme::reset());
    row + 1
}
