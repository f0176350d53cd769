use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub sidebar: Rect,
    pub page: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

/// Width of the sidebar including borders
pub const SIDEBAR_WIDTH: u16 = 22;

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(vertical[1]);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        sidebar: main_chunks[0],
        page: main_chunks[1],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

/// First visible sidebar row when `rows` rows fit and `cursor` must be shown
pub fn sidebar_offset(cursor: usize, rows: usize) -> usize {
    if rows == 0 {
        0
    } else {
        cursor.saturating_sub(rows - 1)
    }
}

/// Link index under (`col`, `row`), if any. The list scrolls to keep
/// `cursor` visible, so the same `cursor` used for drawing must be passed.
pub fn sidebar_row_at(areas: &UiAreas, col: u16, row: u16, cursor: usize) -> Option<usize> {
    let inner = rect_inner(areas.sidebar);
    if !rect_contains(inner, col, row) {
        return None;
    }
    let offset = sidebar_offset(cursor, inner.height as usize);
    Some(offset + (row - inner.y) as usize)
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_hit_testing() {
        let areas = areas(Rect::new(0, 0, 100, 30));
        assert_eq!(areas.sidebar.y, 3);
        assert_eq!(areas.sidebar.width, SIDEBAR_WIDTH);

        // first row inside the border
        assert_eq!(sidebar_row_at(&areas, 2, 4, 0), Some(0));
        assert_eq!(sidebar_row_at(&areas, 2, 7, 0), Some(3));
        // border and page area
        assert_eq!(sidebar_row_at(&areas, 0, 4, 0), None);
        assert_eq!(sidebar_row_at(&areas, 50, 4, 0), None);
    }

    #[test]
    fn test_sidebar_hit_testing_follows_scroll() {
        // 10 rows tall: three sidebar rows inside the border
        let areas = areas(Rect::new(0, 0, 60, 10));
        assert_eq!(rect_inner(areas.sidebar).height, 3);

        assert_eq!(sidebar_offset(2, 3), 0);
        assert_eq!(sidebar_offset(3, 3), 1);
        assert_eq!(sidebar_offset(5, 0), 0);

        assert_eq!(sidebar_row_at(&areas, 2, 4, 3), Some(1));
        assert_eq!(sidebar_row_at(&areas, 2, 6, 3), Some(3));
        assert_eq!(sidebar_row_at(&areas, 2, 4, 1), Some(0));
    }
}
