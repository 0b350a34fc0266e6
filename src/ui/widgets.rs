//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    widgets::{List, ListState},
    Frame,
};

/// Render a list scrolled so the selected item stays visible
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Range of rows, with the given heights, that fits in `available` lines
/// and includes `active`
///
/// Starts at the top and slides down only as far as needed to reach
/// `active`. Always yields at least the active row.
pub fn visible_window(heights: &[u16], available: u16, active: usize) -> std::ops::Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    while start < active && heights[start..=active].iter().sum::<u16>() > available {
        start += 1;
    }

    let mut end = start;
    let mut used = 0u16;
    while end < heights.len() && (end == start || used + heights[end] <= available) {
        used = used.saturating_add(heights[end]);
        end += 1;
    }
    start..end
}
