//! Detail page component renderer.

use crate::ui::helpers::{fit, goto_cell, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

const MARGIN: usize = 2;

/// Renders the detail page between `top` and `bottom` (exclusive, 0-based).
///
/// ```text
///   Heat
///   ★ 8.3  1995  170 min
///   Crime, Drama, Action
///
///   Obsessive master thief Neil McCauley leads a
///   top-notch crew on various daring heists...
///
///   Poster  https://image.tmdb.org/t/p/w500/abc.jpg
///   ● on the board
/// ```
///
/// The synopsis is cut short when the pane runs out of rows.
pub fn render_detail(detail: &DetailView, theme: &Theme, top: usize, bottom: usize, cols: usize) {
    let width = cols.saturating_sub(MARGIN * 2);
    let dim = Theme::fg(&theme.colors.text_dim);
    let normal = Theme::fg(&theme.colors.text_normal);

    let mut lines: Vec<String> = vec![
        format!("{}{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), fit(&detail.title, width)),
        format!("{dim}{}", fit(&detail.meta, width)),
        format!("{normal}{}", fit(&detail.genres, width)),
        String::new(),
    ];

    // poster, on-board marker and the blank line before them
    let tail = 3;
    let synopsis_room = bottom.saturating_sub(top + lines.len() + tail);
    let synopsis = wrap(&detail.synopsis, width);
    let truncated = synopsis.len() > synopsis_room;
    lines.extend(
        synopsis
            .into_iter()
            .take(synopsis_room)
            .map(|line| format!("{normal}{}", fit(&line, width))),
    );
    if truncated {
        if let Some(last) = lines.last_mut() {
            last.truncate(last.trim_end().len());
            last.push_str("...");
        }
    }

    lines.push(String::new());
    if !detail.poster.is_empty() {
        lines.push(format!("{dim}Poster  {normal}{}", fit(&detail.poster, width.saturating_sub(8))));
    }
    let marker = if detail.on_board {
        format!("{}● on the board", Theme::fg(&theme.colors.status_fg))
    } else {
        format!("{dim}○ not on the board")
    };
    lines.push(marker);

    for (offset, line) in lines.iter().enumerate() {
        let row = top + offset;
        if row >= bottom {
            break;
        }
        goto_cell(row, MARGIN);
        print!("{line}");
        print!("{}", Theme::reset());
    }
}
