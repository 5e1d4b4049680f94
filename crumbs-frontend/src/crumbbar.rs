use std::{fmt::Display, hash::Hash};

use crumbs_history::{BreadcrumbHistory, Entry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Theme;

/// Turns a single history entry into the content of a crumb bar segment.
pub trait StateRenderer<S, V> {
    fn render(
        &self,
        index: usize,
        entry: &Entry<S, V>,
        is_current: bool,
        theme: &Theme,
    ) -> Line<'static>;

    /// Columns between a segment and its predecessor. Negative values let the
    /// segment overlap the end of the previous one.
    fn offset(&self) -> i16 {
        0
    }
}

#[derive(Clone, Debug)]
pub struct DefaultStateRenderer {
    pub max_label_width: usize,
    pub placeholder: String,
}

impl Default for DefaultStateRenderer {
    fn default() -> Self {
        Self {
            max_label_width: 24,
            placeholder: "~".to_string(),
        }
    }
}

impl<S, V: Display> StateRenderer<S, V> for DefaultStateRenderer {
    fn render(
        &self,
        _index: usize,
        entry: &Entry<S, V>,
        is_current: bool,
        theme: &Theme,
    ) -> Line<'static> {
        let label = match &entry.value {
            Some(value) => value.to_string(),
            None => self.placeholder.clone(),
        };

        let (foreground, background) = if is_current {
            (theme.current_foreground, theme.current_background)
        } else {
            (theme.state_foreground, theme.state_background)
        };

        Line::from(vec![
            Span::styled(
                format!(" {} ", truncate(&label, self.max_label_width)),
                Style::default().fg(foreground).bg(background),
            ),
            Span::styled(
                theme.separator.clone(),
                Style::default().fg(background).bg(theme.background),
            ),
        ])
    }
}

fn truncate(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }

    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for char in label.chars() {
        let char_width = char.width().unwrap_or(0);
        if width + char_width + 1 > max_width {
            break;
        }

        width += char_width;
        result.push(char);
    }
    result.push('…');

    result
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub x: u16,
    pub width: u16,
    pub content: Line<'static>,
}

impl Segment {
    fn end(&self) -> u16 {
        self.x.saturating_add(self.width)
    }
}

/// Horizontal layout of all history entries as segments, columns are relative
/// to the start of the bar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrumbBar {
    segments: Vec<Segment>,
    current: Option<usize>,
}

impl CrumbBar {
    pub fn new<S, V>(
        entries: &[Entry<S, V>],
        renderer: &dyn StateRenderer<S, V>,
        theme: &Theme,
    ) -> Self {
        let current = entries.len().checked_sub(1);

        let mut segments: Vec<Segment> = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let content = renderer.render(index, entry, Some(index) == current, theme);
            let width = u16::try_from(content.width()).unwrap_or(u16::MAX);

            let x = match segments.last() {
                Some(previous) => {
                    let x = i32::from(previous.end()) + i32::from(renderer.offset());
                    u16::try_from(x.max(0)).unwrap_or(u16::MAX)
                }
                None => 0,
            };

            segments.push(Segment {
                index,
                x,
                width,
                content,
            });
        }

        Self { segments, current }
    }

    pub fn from_history<S, V>(
        history: &BreadcrumbHistory<S, V>,
        renderer: &dyn StateRenderer<S, V>,
        theme: &Theme,
    ) -> Self
    where
        S: Clone + Eq + Hash,
        V: Clone,
    {
        Self::new(&history.entries(), renderer, theme)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn preferred_width(&self) -> u16 {
        self.segments.iter().map(Segment::end).max().unwrap_or(0)
    }

    /// Index of the state rendered at `column`. Later segments are drawn on
    /// top of earlier ones and win on overlap.
    pub fn state_index_at(&self, column: u16) -> Option<usize> {
        self.segments
            .iter()
            .rev()
            .find(|segment| segment.x <= column && column < segment.end())
            .map(|segment| segment.index)
    }

    /// Columns to skip so the current segment stays visible in a viewport of
    /// the given width.
    pub fn scroll_offset(&self, viewport_width: u16) -> u16 {
        if self.preferred_width() <= viewport_width {
            return 0;
        }

        let current_end = self
            .current
            .and_then(|index| self.segments.get(index))
            .map(Segment::end)
            .unwrap_or(0);

        current_end.saturating_sub(viewport_width)
    }
}

pub struct CrumbBarWidget<'a> {
    bar: &'a CrumbBar,
    style: Style,
}

impl<'a> CrumbBarWidget<'a> {
    pub fn new(bar: &'a CrumbBar) -> Self {
        Self {
            bar,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for CrumbBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        buf.set_style(area, self.style);

        let width = self.bar.preferred_width();
        if width == 0 {
            return;
        }

        let line_area = Rect::new(0, 0, width, 1);
        let mut line = Buffer::empty(line_area);
        line.set_style(line_area, self.style);
        for segment in &self.bar.segments {
            line.set_line(segment.x, 0, &segment.content, segment.width);
        }

        let offset = self.bar.scroll_offset(area.width);
        let visible = area.width.min(width - offset);
        for column in 0..visible {
            buf[(area.x + column, area.y)] = line[(offset + column, 0)].clone();
        }
    }
}
