//! Modal dialog widgets.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use tripane_ops::{TransferKind, TransferProgress};

use crate::app::input::InputState;
use crate::theme::Theme;
use crate::ui::{format_size, truncate_start};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        (area.width.saturating_sub(width)) / 2 + area.x,
        (area.height.saturating_sub(height)) / 2 + area.y,
        width,
        height,
    )
}

/// Text prompt with a cursor, used for the paste target.
pub struct InputModal<'a> {
    theme: &'a Theme,
    input: &'a InputState,
    title: &'a str,
    prompt: &'a str,
}

impl<'a> InputModal<'a> {
    /// Create a new input modal.
    pub fn new(theme: &'a Theme, input: &'a InputState, title: &'a str, prompt: &'a str) -> Self {
        Self {
            theme,
            input,
            title,
            prompt,
        }
    }
}

impl Widget for InputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = if self.input.error().is_some() { 9 } else { 7 };
        let popup_area = centered(area, 64, height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let mut lines = vec![
            Line::styled(self.prompt, self.theme.help_desc),
            Line::raw(""),
            input_line(self.input.buffer(), self.input.cursor(), inner.width, "  "),
        ];

        if let Some(error) = self.input.error() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(self.theme.error),
            ));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", self.theme.help_key),
            Span::raw("Confirm  "),
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Cancel"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// One-line filter prompt drawn over the footer.
pub struct FilterPrompt<'a> {
    theme: &'a Theme,
    input: &'a InputState,
    pane: &'a str,
}

impl<'a> FilterPrompt<'a> {
    pub fn new(theme: &'a Theme, input: &'a InputState, pane: &'a str) -> Self {
        Self { theme, input, pane }
    }
}

impl Widget for FilterPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let label = format!(" Filter {} /", self.pane);
        let label_width = label.chars().count() as u16;
        let mut line = input_line(
            self.input.buffer(),
            self.input.cursor(),
            area.width.saturating_sub(label_width),
            "",
        );
        line.spans.insert(
            0,
            Span::styled(
                label,
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            ),
        );

        Paragraph::new(line)
            .style(self.theme.footer)
            .render(area, buf);
    }
}

/// Render `buffer` with a block cursor, scrolled so the cursor stays in view.
fn input_line(buffer: &str, cursor: usize, width: u16, indent: &'static str) -> Line<'static> {
    let max_visible = (width as usize).saturating_sub(indent.len() + 2).max(1);
    let start = (cursor + 1).saturating_sub(max_visible);

    let chars: Vec<char> = buffer.chars().skip(start).take(max_visible).collect();
    let at = cursor - start;

    let before: String = chars.iter().take(at).collect();
    let under: String = chars.get(at).map_or_else(|| " ".to_string(), |c| c.to_string());
    let after: String = chars.iter().skip(at + 1).collect();

    Line::from(vec![
        Span::raw(indent),
        Span::raw(before),
        Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}

/// Progress dialog for a running paste or drop.
pub struct TransferProgressModal<'a> {
    theme: &'a Theme,
    kind: TransferKind,
    source: &'a std::path::Path,
    progress: Option<&'a TransferProgress>,
    cancelling: bool,
}

impl<'a> TransferProgressModal<'a> {
    pub fn new(
        theme: &'a Theme,
        kind: TransferKind,
        source: &'a std::path::Path,
        progress: Option<&'a TransferProgress>,
        cancelling: bool,
    ) -> Self {
        Self {
            theme,
            kind,
            source,
            progress,
            cancelling,
        }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            TransferKind::Copy => " Copying... ",
            TransferKind::Move => " Moving... ",
        }
    }
}

impl Widget for TransferProgressModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered(area, 60, 10);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(self.title())
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.info));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let width = (inner.width as usize).saturating_sub(12);
        let (files, bytes) = self
            .progress
            .map_or((0, 0), |p| (p.files_completed, p.bytes_processed));

        let mut lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled("  From:     ", self.theme.help_desc),
                Span::raw(truncate_start(&self.source.display().to_string(), width)),
            ]),
            Line::from(vec![
                Span::styled("  Files:    ", self.theme.help_desc),
                Span::raw(files.to_string()),
            ]),
            Line::from(vec![
                Span::styled("  Size:     ", self.theme.help_desc),
                Span::raw(format_size(bytes)),
            ]),
        ];

        if let Some(current) = self.progress.and_then(|p| p.current_file.as_ref()) {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!(
                    "  {}",
                    truncate_start(&current.display().to_string(), width + 8)
                ),
                Style::default().fg(self.theme.muted),
            ));
        }

        lines.push(Line::raw(""));
        lines.push(if self.cancelling {
            Line::styled("  Stopping...", Style::default().fg(self.theme.warning))
        } else {
            Line::from(vec![
                Span::styled(" Esc ", self.theme.help_key),
                Span::raw("Stop"),
            ])
        });

        Paragraph::new(lines).render(inner, buf);
    }
}
