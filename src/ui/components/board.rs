//! Board component renderer.
//!
//! Draws the results strip, the tier and pool bands, and the floating card
//! of an active drag. Cards are a fixed [`CARD_WIDTH`] wide; their positions
//! come from the view model, so this module only paints.

use crate::app::layout::{CARD_WIDTH, LABEL_WIDTH};
use crate::ui::helpers::{self, center, fit, goto_cell};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BandView, CardView, DragGhost, ResultsStrip};

/// Renders the results strip on a single 0-based row.
///
/// ```text
/// Results‹ [card] [card] [card]                   ›
/// ```
///
/// Returns the next available row.
pub fn render_results(row: usize, strip: &ResultsStrip, theme: &Theme, cols: usize) -> usize {
    goto_cell(row, 0);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit("Results", LABEL_WIDTH.saturating_sub(1)));
    print!("{}", if strip.more_before { "‹" } else { " " });
    print!("{}", " ".repeat(cols.saturating_sub(LABEL_WIDTH)));
    print!("{}", Theme::reset());

    if let Some(message) = &strip.message {
        goto_cell(row, LABEL_WIDTH);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", fit(message, cols.saturating_sub(LABEL_WIDTH)));
        print!("{}", Theme::reset());
    }

    for card in &strip.cards {
        render_card(card, theme);
    }

    if strip.more_after && cols > LABEL_WIDTH {
        goto_cell(row, cols - 1);
        print!("{}›{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }

    row + 1
}

/// Renders one band: the colored label block, its background and its cards.
///
/// Bands that are the current drop candidate get the `drop_target_bg`
/// background. A `+N` marker at the right edge counts cards that did not fit.
pub fn render_band(band: &BandView, theme: &Theme, cols: usize) {
    let label_width = LABEL_WIDTH.saturating_sub(1);
    let label_style = band.color.as_ref().map_or_else(
        || Theme::fg(&theme.colors.text_dim),
        |color| format!("{}{}{}", Theme::bold(), Theme::bg(color), Theme::fg(&theme.colors.tier_label_fg)),
    );
    let area = cols.saturating_sub(LABEL_WIDTH);

    for line in 0..band.lines {
        goto_cell(band.row + line, 0);
        print!("{label_style}");
        if line == 0 {
            print!("{}", center(&band.label, label_width));
        } else {
            print!("{}", " ".repeat(label_width));
        }
        print!("{} ", Theme::reset());

        if band.is_candidate {
            print!("{}", Theme::bg(&theme.colors.drop_target_bg));
        }
        print!("{}", " ".repeat(area));
        print!("{}", Theme::reset());
    }

    if band.hidden > 0 && band.lines > 0 {
        let marker = format!("+{}", band.hidden);
        let width = marker.chars().count();
        if cols > LABEL_WIDTH + width {
            goto_cell(band.row + band.lines - 1, cols - width);
            print!("{}{marker}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        }
    }

    for card in &band.cards {
        render_card(card, theme);
    }
}

/// Renders a single card at its own position.
///
/// # Styling Precedence
///
/// 1. The card being dragged is dimmed in place
/// 2. Selection colors
/// 3. Drop candidate background
/// 4. Normal card colors
///
/// Fuzzy match highlights are drawn on unselected cards only.
pub fn render_card(card: &CardView, theme: &Theme) {
    let colors = &theme.colors;
    let style = if card.is_dragged {
        format!("{}{}{}", Theme::dim(), Theme::fg(&colors.text_dim), Theme::bg(&colors.card_bg))
    } else if card.is_selected {
        format!("{}{}{}", Theme::bold(), Theme::fg(&colors.selection_fg), Theme::bg(&colors.selection_bg))
    } else if card.is_candidate {
        format!("{}{}", Theme::fg(&colors.card_fg), Theme::bg(&colors.drop_target_bg))
    } else {
        format!("{}{}", Theme::fg(&colors.card_fg), Theme::bg(&colors.card_bg))
    };

    let text_width = CARD_WIDTH - 2;
    let title: String = card.title.chars().take(text_width).collect();
    let padding = text_width - title.chars().count();

    goto_cell(card.row, card.col);
    print!("{style} ");
    helpers::render_highlighted_text(&title, &card.highlight_ranges, theme, &style, card.is_selected);
    print!("{} ", " ".repeat(padding));
    print!("{}", Theme::reset());
}

/// Renders the floating copy of the dragged card, clipped to the pane.
pub fn render_drag_ghost(ghost: &DragGhost, theme: &Theme, rows: usize, cols: usize) {
    let Ok(row) = usize::try_from(ghost.row) else {
        return;
    };
    if row >= rows {
        return;
    }

    let text: Vec<char> = format!(" {} ", fit(&ghost.title, CARD_WIDTH - 2)).chars().collect();
    let skip = usize::try_from(-ghost.col).unwrap_or(0);
    let col = usize::try_from(ghost.col).unwrap_or(0);
    let visible: String = text.iter().skip(skip).take(cols.saturating_sub(col)).collect();
    if visible.is_empty() {
        return;
    }

    goto_cell(row, col);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.drag_fg));
    print!("{}", Theme::bg(&theme.colors.drag_bg));
    print!("{visible}");
    print!("{}", Theme::reset());
}
