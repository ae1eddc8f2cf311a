//! One of the three navigation panes.

use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use tripane_core::{EntryKind, ListEntry};

use crate::app::state::PaneState;
use crate::theme::Theme;
use crate::ui::{format_size, truncate_start, truncate_to_width};

/// Width of the right-aligned size column.
const SIZE_WIDTH: usize = 10;

/// Pane widget: a bordered column of rows with cursor, filter and markers.
pub struct PaneView<'a> {
    state: &'a PaneState,
    title: &'a str,
    root: Option<&'a Path>,
    focused: bool,
    /// Path held in the clipboard.
    clipboard: Option<&'a Path>,
    /// Path picked up for dragging.
    drag_source: Option<&'a Path>,
    theme: &'a Theme,
}

impl<'a> PaneView<'a> {
    pub fn new(state: &'a PaneState, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            state,
            title,
            root: None,
            focused: false,
            clipboard: None,
            drag_source: None,
            theme,
        }
    }

    pub fn root(mut self, root: Option<&'a Path>) -> Self {
        self.root = root;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn markers(mut self, clipboard: Option<&'a Path>, drag_source: Option<&'a Path>) -> Self {
        self.clipboard = clipboard;
        self.drag_source = drag_source;
        self
    }

    fn block(&self) -> Block<'a> {
        let filter = self.state.filter();
        let title = if filter.is_empty() {
            format!(" {} ", self.title)
        } else {
            format!(
                " {} [/{}] {}/{} ",
                self.title,
                filter.needle(),
                self.state.visible_len(),
                self.state.total_len()
            )
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focused {
                self.theme.border_focused
            } else {
                self.theme.border
            })
            .title(title)
            .title_style(self.theme.title);

        if let Some(root) = self.root {
            let width = 30;
            block = block.title_bottom(Line::styled(
                format!(" {} ", truncate_start(&root.display().to_string(), width)),
                Style::default().fg(self.theme.muted),
            ));
        }
        block
    }

    fn render_row(&self, entry: &ListEntry, selected: bool, area: Rect, buf: &mut Buffer) {
        let (marker, marker_style) = if self.drag_source == Some(entry.path.as_path()) {
            ("✥ ", self.theme.dragging)
        } else if self.clipboard == Some(entry.path.as_path()) {
            ("⎘ ", self.theme.copied)
        } else {
            ("  ", Style::default())
        };

        let (icon, style) = match entry.kind {
            EntryKind::Directory => ("📁 ", self.theme.directory),
            EntryKind::File => ("📄 ", self.theme.file),
            EntryKind::Missing => ("⚠ ", self.theme.missing),
        };
        let style = if entry.hidden {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        };

        let size_text = if entry.kind.is_file() {
            format_size(entry.size)
        } else {
            String::new()
        };

        let fixed = marker.width() + icon.width() + SIZE_WIDTH + 1;
        let name_width = (area.width as usize).saturating_sub(fixed);
        let name = truncate_to_width(&entry.name, name_width);
        let padding = " ".repeat(name_width.saturating_sub(name.width()));

        let line = Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(icon, style),
            Span::styled(name, style),
            Span::raw(padding),
            Span::styled(
                format!(" {:>width$}", size_text, width = SIZE_WIDTH),
                Style::default().fg(self.theme.muted),
            ),
        ]);

        let line = if selected {
            line.style(if self.focused {
                self.theme.selected
            } else {
                self.theme.selected_unfocused
            })
        } else {
            line
        };

        Widget::render(line, area, buf);
    }
}

impl Widget for PaneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if let Some(error) = self.state.error() {
            Paragraph::new(Line::styled(
                format!(" {error}"),
                Style::default().fg(self.theme.error),
            ))
            .render(inner, buf);
            return;
        }

        if self.root.is_none() {
            Paragraph::new(Line::styled(
                " Select a folder to the left",
                Style::default().fg(self.theme.muted),
            ))
            .render(inner, buf);
            return;
        }

        if self.state.visible_len() == 0 {
            let text = if self.state.total_len() == 0 {
                " (empty)"
            } else {
                " (no matches)"
            };
            Paragraph::new(Line::styled(text, Style::default().fg(self.theme.muted)))
                .render(inner, buf);
            return;
        }

        let viewport = inner.height as usize;
        let selected = self.state.selected();
        let offset = (selected + 1).saturating_sub(viewport);

        for (row, (index, entry)) in self
            .state
            .visible_entries()
            .enumerate()
            .skip(offset)
            .take(viewport)
            .enumerate()
        {
            let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
            self.render_row(entry, index == selected, row_area, buf);
        }
    }
}
