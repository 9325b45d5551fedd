//! Catalog bar component renderer.
//!
//! A three-line box holding either the search query or the browse category.

use crate::ui::helpers::{fit, goto_cell};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CatalogBarInfo;

/// Horizontal margin for the box (spaces on left and right).
const BAR_MARGIN: usize = 2;

const LOADING: &str = " loading... ";

/// Renders the catalog bar starting at the specified 0-based row.
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Search: alien▏    loading... │ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
///
/// The frame uses `search_bar_border` while the query is being edited and the
/// plain `border` color otherwise. Returns the next available row (row + 3).
pub fn render_catalog_bar(row: usize, bar: &CatalogBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(BAR_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let frame = if bar.is_editing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    goto_cell(row, BAR_MARGIN);
    print!("{}", Theme::fg(frame));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if bar.is_editing { "▏" } else { "" };
    let mut text = format!(" {}: {}{cursor}", bar.label, bar.text);
    let loading = if bar.is_loading && inner_width > LOADING.len() * 2 {
        LOADING
    } else {
        ""
    };
    let text_width = inner_width - loading.len().min(inner_width);
    if text.chars().count() > text_width {
        // keep the end of long queries, where the typing happens
        let skip = text.chars().count() - text_width;
        text = text.chars().skip(skip).collect();
    }

    goto_cell(row + 1, BAR_MARGIN);
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&text, text_width));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{loading}");
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::reset());

    goto_cell(row + 2, BAR_MARGIN);
    print!("{}", Theme::fg(frame));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
