//! Modal dialogs: the terminal rendition of the alert/confirm surface.
//!
//! At most one dialog is open at a time. It overlays the frame center on a
//! cleared region and stays until dismissed with Enter or Esc; auto-dismiss
//! is reserved for status toasts, which render in the input block instead.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::theme::Theme;
use crate::utils::scroll::wrapped_line_count;

const MIN_WIDTH: u16 = 24;
const MAX_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Success,
    Warning,
    Error,
}

impl DialogKind {
    pub fn icon(self) -> &'static str {
        match self {
            DialogKind::Info => "ℹ",
            DialogKind::Success => "✔",
            DialogKind::Warning => "⚠",
            DialogKind::Error => "✖",
        }
    }

    pub fn accent(self) -> Color {
        match self {
            DialogKind::Info => Color::Cyan,
            DialogKind::Success => Color::Green,
            DialogKind::Warning => Color::Yellow,
            DialogKind::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub text: String,
}

impl Dialog {
    pub fn info<T: Into<String>, S: Into<String>>(title: T, text: S) -> Self {
        Dialog {
            kind: DialogKind::Info,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn success<T: Into<String>, S: Into<String>>(title: T, text: S) -> Self {
        Dialog {
            kind: DialogKind::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn warning<T: Into<String>, S: Into<String>>(title: T, text: S) -> Self {
        Dialog {
            kind: DialogKind::Warning,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error<T: Into<String>, S: Into<String>>(title: T, text: S) -> Self {
        Dialog {
            kind: DialogKind::Error,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Centered overlay rect sized to the dialog text, clamped to the frame.
pub fn dialog_area(frame_area: Rect, text: &str) -> Rect {
    let width = frame_area
        .width
        .saturating_sub(4)
        .clamp(MIN_WIDTH.min(frame_area.width), MAX_WIDTH);

    let text_width = width.saturating_sub(4);
    let lines: Vec<Line> = text.lines().map(Line::from).collect();
    let text_rows = if lines.is_empty() {
        1
    } else {
        wrapped_line_count(&lines, text_width)
    };
    // Borders, one blank spacer, and the dismiss hint row.
    let height = (text_rows + 4).min(frame_area.height);

    let x = frame_area.x + frame_area.width.saturating_sub(width) / 2;
    let y = frame_area.y + frame_area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

pub fn render_dialog(f: &mut Frame, theme: &Theme, dialog: &Dialog) {
    let area = dialog_area(f.area(), &dialog.text);
    f.render_widget(Clear, area);

    let accent = Style::default().fg(dialog.kind.accent());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(accent)
        .title(Line::from(Span::styled(
            format!(" {} {} ", dialog.kind.icon(), dialog.title),
            theme.dialog_title_style.patch(accent),
        )))
        .style(Style::default().bg(theme.background_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let text_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let body: Vec<Line> = dialog
        .text
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), theme.dialog_text_style)))
        .collect();
    f.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: true }),
        text_area,
    );

    let hint_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter to dismiss",
            theme.dialog_hint_style,
        )))
        .centered(),
        hint_area,
    );
}
