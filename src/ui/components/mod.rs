//! Composable UI component renderers.
//!
//! Each component paints one part of the interface at an explicit position.
//!
//! # Components
//!
//! - [`header`]: Title bar with board counts
//! - [`catalog_bar`]: Search query or browse category box
//! - [`board`]: Results strip, tier bands, pool and the dragged card
//! - [`detail`]: Movie detail page
//! - [`footer`]: Keybinding hints and status messages
//! - [`empty`]: Message for panes too small to draw the board
//!
//! # Layouts
//!
//! - [`render_board_view`]: Header + Catalog bar + Results + Bands + Footer
//! - [`render_detail_view`]: Header + Detail page + Footer

mod board;
mod catalog_bar;
mod detail;
mod empty;
mod footer;
mod header;

pub use board::{render_band, render_card, render_drag_ghost, render_results};
pub use catalog_bar::render_catalog_bar;
pub use detail::render_detail;
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;

use crate::app::layout::{CATALOG_BAR_ROW, HEADER_ROW, RESULTS_ROW};
use crate::ui::helpers::goto_cell;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, UIViewModel};

/// Renders a horizontal border line at the specified 0-based row.
///
/// Returns the next available row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    goto_cell(row, 0);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the board layout.
///
/// ```text
/// [Header]
/// [Border]
/// [Catalog bar - 3 lines]
/// [Results strip]
/// [Border]
/// [Tier bands]
/// [Separator]
/// [Pool band]
/// [Border]
/// [Footer]
/// ```
///
/// The dragged card is painted last so it floats above everything else.
pub fn render_board_view(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_header(HEADER_ROW, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    debug_assert_eq!(current_row, CATALOG_BAR_ROW);
    current_row = render_catalog_bar(current_row, &vm.catalog_bar, theme, cols);
    debug_assert_eq!(current_row, RESULTS_ROW);
    current_row = render_results(current_row, &vm.results, theme, cols);
    render_border(current_row, &theme.colors.border, cols);

    if let Some((pool, tiers)) = vm.bands.split_last() {
        for band in tiers {
            render_band(band, theme, cols);
        }
        if pool.row > 0 {
            render_border(pool.row - 1, &theme.colors.border, cols);
        }
        render_band(pool, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(ghost) = &vm.drag {
        render_drag_ghost(ghost, theme, rows, cols);
    }
}

/// Renders the detail page layout.
///
/// ```text
/// [Header]
/// [Border]
/// [Detail page]
/// [Border]
/// [Footer]
/// ```
pub fn render_detail_view(vm: &UIViewModel, detail: &DetailView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_header(HEADER_ROW, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    render_detail(detail, theme, current_row + 1, border_row, cols);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
