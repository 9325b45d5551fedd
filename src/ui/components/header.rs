//! Header component renderer.
//!
//! Renders the title bar with the board counts, centered and bold.

use crate::ui::helpers::{center, goto_cell};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified 0-based row.
///
/// Pads the line to the full width so an optional `header_bg` fills it.
/// Returns the next available row.
///
/// # Example
///
/// ```rust
/// use tierboard::ui::components::render_header;
/// use tierboard::ui::viewmodel::HeaderInfo;
/// use tierboard::ui::Theme;
///
/// let header = HeaderInfo { title: " Tierboard  ranked 0  unranked 0 ".to_string() };
/// let next_row = render_header(0, &header, &Theme::default(), 80);
/// assert_eq!(next_row, 1);
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    goto_cell(row, 0);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", center(&header.title, cols));

    print!("{}", Theme::reset());
    row + 1
}
