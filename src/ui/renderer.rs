//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; every component pads its lines to the pane
/// width and positions the cursor itself.
///
/// # Example
///
/// ```rust
/// use tierboard::app::AppState;
/// use tierboard::board::Partition;
/// use tierboard::ui::{render, Theme};
///
/// let state = AppState::new(Partition::new(vec![]), Theme::default());
/// render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Chooses between the empty state, the detail page and the board.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if let Some(empty) = &vm.empty_state {
        components::render_empty_state(empty, theme, rows, cols);
        return;
    }

    if let Some(detail) = &vm.detail {
        components::render_detail_view(vm, detail, theme, cols, rows);
    } else {
        components::render_board_view(vm, theme, cols, rows);
    }
}
