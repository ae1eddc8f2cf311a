//! Application rendering.

use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use strum::IntoEnumIterator;

use tripane_nav::{ClipEntry, Level};

use crate::theme::Theme;
use crate::ui::modals::{FilterPrompt, InputModal, TransferProgressModal};
use crate::ui::{AppLayout, HelpOverlay, PaneView, truncate_start};

use super::input::InputState;
use super::state::{ActiveTransfer, AppMode, PaneState, StatusKind, StatusMessage};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub theme: &'a Theme,
    pub focus: Level,
    pub panes: &'a [PaneState; 3],
    pub roots: [Option<&'a Path>; 3],
    pub clipboard: Option<&'a ClipEntry>,
    pub drag_source: Option<&'a Path>,
    pub show_hidden: bool,
    pub status: Option<&'a StatusMessage>,
    pub input: Option<&'a InputState>,
    pub transfer: Option<&'a ActiveTransfer>,
}

/// Render the full application UI.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let layout = AppLayout::new(area);

    render_header(ctx, layout.header, buf);

    let clipboard = ctx.clipboard.map(|entry| entry.source.as_path());
    for level in Level::iter() {
        let i = level.index();
        let title = level.to_string();
        PaneView::new(&ctx.panes[i], &title, ctx.theme)
            .root(ctx.roots[i])
            .focused(ctx.focus == level)
            .markers(clipboard, ctx.drag_source)
            .render(layout.panes[i], buf);
    }

    render_footer(ctx, layout.footer, buf);
    render_overlays(ctx, area, buf);
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let theme = ctx.theme;
    let root = ctx.roots[0]
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(" tripane ", theme.header.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {}", truncate_start(&root, (area.width / 2) as usize)),
            theme.header,
        ),
    ];

    if let Some(entry) = ctx.clipboard {
        spans.push(Span::styled(
            format!("  ⎘ {} ({})", file_name(&entry.source), entry.mode),
            theme.copied,
        ));
    }
    if let Some(source) = ctx.drag_source {
        spans.push(Span::styled(
            format!("  ✥ {}", file_name(source)),
            theme.dragging,
        ));
    }
    if ctx.show_hidden {
        spans.push(Span::styled("  [hidden]", Style::default().fg(theme.muted)));
    }

    Paragraph::new(Line::from(spans))
        .style(theme.header)
        .render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let theme = ctx.theme;

    if ctx.mode == AppMode::Filter
        && let Some(input) = ctx.input
    {
        let pane = ctx.focus.to_string();
        FilterPrompt::new(theme, input, &pane).render(area, buf);
        return;
    }

    let line = match ctx.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => theme.info,
                StatusKind::Success => theme.success,
                StatusKind::Error(category) => theme.error_color(category),
            };
            Line::styled(format!(" {}", status.text), Style::default().fg(color))
        }
        None => key_hints(ctx),
    };

    Paragraph::new(line).style(theme.footer).render(area, buf);
}

fn key_hints(ctx: &RenderContext) -> Line<'static> {
    let theme = ctx.theme;
    let hints: &[(&str, &str)] = if ctx.drag_source.is_some() {
        &[("D", "drop here"), ("Esc", "release"), ("?", "help")]
    } else {
        &[
            ("l", "select"),
            ("Enter", "open"),
            ("y", "copy"),
            ("p", "paste"),
            ("m", "drag"),
            ("/", "filter"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {key} "), theme.help_key));
        spans.push(Span::styled(format!("{desc} "), theme.help_desc));
    }
    Line::from(spans)
}

fn render_overlays(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    match ctx.mode {
        AppMode::Help => HelpOverlay::new(ctx.theme).render(area, buf),
        AppMode::PastePrompt => {
            if let (Some(input), Some(entry)) = (ctx.input, ctx.clipboard) {
                let prompt = format!("Paste {} into folder:", file_name(&entry.source));
                InputModal::new(ctx.theme, input, "Paste", &prompt).render(area, buf);
            }
        }
        AppMode::Transferring => {
            if let Some(transfer) = ctx.transfer {
                let progress = transfer.progress.as_ref();
                let kind = progress.map_or(transfer.kind, |p| p.kind);
                TransferProgressModal::new(
                    ctx.theme,
                    kind,
                    &transfer.source,
                    progress,
                    transfer.cancel.is_cancelled(),
                )
                .render(area, buf);
            }
        }
        _ => {}
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
