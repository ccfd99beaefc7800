use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub page: Rect,
    /// Zero-height when the console is closed
    pub console: Rect,
    pub footer: Rect,
}

pub fn areas(size: Rect, console_open: bool) -> UiAreas {
    let console_height = if console_open {
        Constraint::Percentage(40)
    } else {
        Constraint::Length(0)
    };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), console_height, Constraint::Length(1)])
        .split(size);

    UiAreas {
        size,
        page: vertical[0],
        console: vertical[1],
        footer: vertical[2],
    }
}
