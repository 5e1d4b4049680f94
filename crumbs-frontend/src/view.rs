use ratatui::{
    prelude::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListState, Paragraph},
    Frame,
};

use crate::{
    crumbbar::{CrumbBar, CrumbBarWidget},
    error::AppError,
    layout::AppLayout,
    model::Model,
    terminal::TerminalWrapper,
};

pub fn render_model(terminal: &mut TerminalWrapper, model: &Model) -> Result<(), AppError> {
    terminal.draw(|frame| view(model, frame))
}

pub fn view(model: &Model, frame: &mut Frame) {
    let layout = AppLayout::new(frame.area());

    crumbbar(model, frame, layout.crumbbar);
    directories(model, frame, layout.directories);
    statusline(model, frame, layout.statusline);
}

fn crumbbar(model: &Model, frame: &mut Frame, rect: Rect) {
    let theme = &model.settings.theme;
    let bar = CrumbBar::from_history(&model.history, &model.renderer, theme);

    frame.render_widget(
        CrumbBarWidget::new(&bar).style(Style::default().bg(theme.background)),
        rect,
    );
}

fn directories(model: &Model, frame: &mut Frame, rect: Rect) {
    let list = List::new(model.directories.iter().map(|name| format!("{}/", name)))
        .highlight_style(
            Style::default()
                .fg(model.settings.theme.current_foreground)
                .bg(model.settings.theme.current_background)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !model.directories.is_empty() {
        state.select(Some(model.selection));
    }

    frame.render_stateful_widget(list, rect, &mut state);
}

fn statusline(model: &Model, frame: &mut Frame, rect: Rect) {
    let style = Style::default().fg(Color::Gray);

    let content = match &model.status {
        Some(status) => Span::styled(status.clone(), Style::default().fg(Color::Red)),
        None => Span::styled(
            model
                .history
                .current_state()
                .map(|path| path.to_string_lossy().to_string())
                .unwrap_or_default(),
            style,
        ),
    };

    let position = Line::from(Span::styled(
        format!(
            "{}/{}",
            model.history.current_index().map_or(0, |index| index + 1),
            model.history.len()
        ),
        style,
    ));

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100),
            Constraint::Length(position.width() as u16),
        ])
        .split(rect);

    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        rect,
    );

    frame.render_widget(Paragraph::new(Line::from(content)), layout[0]);
    frame.render_widget(Paragraph::new(position), layout[1]);
}
