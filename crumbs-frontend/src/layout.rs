use ratatui::prelude::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Debug, Default)]
pub struct AppLayout {
    pub crumbbar: Rect,
    pub directories: Rect,
    pub statusline: Rect,
}

impl AppLayout {
    pub fn new(rect: Rect) -> Self {
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Percentage(100),
                Constraint::Length(1),
            ])
            .split(rect);

        Self {
            crumbbar: main[0],
            directories: main[1],
            statusline: main[2],
        }
    }
}
