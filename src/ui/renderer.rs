use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::app::App;
use crate::core::message::Role;
use crate::ui::dialog::render_dialog;
use crate::utils::scroll::{max_scroll_offset, wrapped_line_count};

pub fn ui(f: &mut Frame, app: &mut App) {
    let input_area_height = app.input_area_height();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(input_area_height + 2), // +2 for borders
        ])
        .split(f.area());

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_color)),
        f.area(),
    );

    let lines = build_display_lines(app);

    // Account for the title row the block adds above the transcript.
    let available_height = chunks[0].height.saturating_sub(1);
    let total_rows = wrapped_line_count(&lines, chunks[0].width);
    let max_offset = max_scroll_offset(total_rows, available_height);
    if app.auto_scroll {
        app.scroll_offset = max_offset;
    } else {
        app.scroll_offset = app.scroll_offset.min(max_offset);
    }

    let mut title_spans = vec![Span::styled(
        format!("Minbar v{} - {}", env!("CARGO_PKG_VERSION"), app.base_url),
        app.theme.title_style,
    )];
    if app.is_awaiting {
        title_spans.push(Span::raw(" "));
        title_spans.push(Span::styled(
            pulse_glyph(app.pulse_start),
            app.theme.activity_indicator_style,
        ));
    }

    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(Line::from(title_spans)))
        .wrap(Wrap { trim: true })
        .scroll((app.scroll_offset, 0));
    f.render_widget(messages_paragraph, chunks[0]);

    let input_title = if app.is_awaiting {
        "Waiting for the answer... (Ctrl+C to quit)"
    } else if app.select_index.is_some() {
        "Select a reply (j/k to move, Enter to copy, Esc to cancel)"
    } else {
        "Ask a question (Enter to send, Alt+Enter for new line, Ctrl+B to copy a reply, Ctrl+C to quit)"
    };
    let mut input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.input_border_style)
        .title(Span::styled(input_title, app.theme.input_title_style));
    if let Some(status) = &app.status {
        input_block = input_block.title_bottom(
            Line::from(Span::styled(format!(" {status} "), app.theme.status_style))
                .right_aligned(),
        );
    }
    let input_inner = input_block.inner(chunks[1]);
    f.render_widget(input_block, chunks[1]);
    f.render_widget(&app.textarea, input_inner);

    if let Some(dialog) = &app.dialog {
        render_dialog(f, &app.theme, dialog);
    }
}

/// Flatten the transcript into display lines. One blank spacer line follows
/// each bubble; the outstanding placeholder renders as a pulsing indicator.
pub fn build_display_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, msg) in app.messages.iter().enumerate() {
        let selected = app.select_index == Some(index);
        match msg.role {
            Role::User => {
                for (i, content_line) in msg.content.lines().enumerate() {
                    if i == 0 {
                        lines.push(Line::from(vec![
                            Span::styled("You: ", app.theme.user_prefix_style),
                            Span::styled(content_line.to_string(), app.theme.user_text_style),
                        ]));
                    } else {
                        lines.push(Line::from(Span::styled(
                            content_line.to_string(),
                            app.theme.user_text_style,
                        )));
                    }
                }
            }
            Role::Assistant if app.is_placeholder(index) => {
                lines.push(Line::from(Span::styled(
                    format!("{} Typing...", pulse_glyph(app.pulse_start)),
                    app.theme.system_text_style,
                )));
            }
            Role::Assistant => {
                let style = if selected {
                    app.theme.assistant_text_style.patch(app.theme.selection_style)
                } else {
                    app.theme.assistant_text_style
                };
                if msg.content.is_empty() {
                    lines.push(Line::from(Span::styled(String::new(), style)));
                } else {
                    for content_line in msg.content.lines() {
                        lines.push(Line::from(Span::styled(content_line.to_string(), style)));
                    }
                }
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Scroll bound for the transcript at the given frame size. The chat loop
/// uses this to clamp manual scrolling between frames.
pub fn transcript_max_scroll(app: &App, frame_size: Size) -> u16 {
    let input_rows = app.input_area_height() + 2;
    let available_height = frame_size
        .height
        .saturating_sub(input_rows)
        .saturating_sub(1);
    let lines = build_display_lines(app);
    max_scroll_offset(
        wrapped_line_count(&lines, frame_size.width),
        available_height,
    )
}

fn pulse_glyph(pulse_start: Instant) -> &'static str {
    // Two cycles per second, same cadence as the input indicator.
    let elapsed = pulse_start.elapsed().as_millis() as f32 / 1000.0;
    let phase = (elapsed * 2.0) % 2.0;
    let intensity = if phase < 1.0 { phase } else { 2.0 - phase };
    if intensity < 0.33 {
        "○"
    } else if intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new(
            reqwest::Client::new(),
            "http://127.0.0.1:5000".to_string(),
            Duration::from_millis(10),
            Theme::dark_default(),
        );
        app.dismiss_dialog();
        app
    }

    fn rendered_text(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("terminal failed");
        terminal.draw(|f| ui(f, app)).expect("draw failed");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn transcript_shows_both_roles() {
        let mut app = test_app();
        app.messages.push_back(Message::user("What breaks wudu?"));
        app.messages.push_back(Message::assistant("Several things."));

        let text = rendered_text(&mut app);
        assert!(text.contains("You: What breaks wudu?"));
        assert!(text.contains("Several things."));
    }

    #[test]
    fn placeholder_renders_typing_indicator() {
        let mut app = test_app();
        app.textarea.insert_str("hi");
        app.submit_question().expect("expected a request");

        let text = rendered_text(&mut app);
        assert!(text.contains("Typing..."));
        assert!(text.contains("Waiting for the answer"));
    }

    #[test]
    fn dialog_overlays_the_frame() {
        let mut app = test_app();
        app.dialog = Some(crate::ui::dialog::Dialog::error("Error", "bad input"));

        let text = rendered_text(&mut app);
        assert!(text.contains("Error"));
        assert!(text.contains("bad input"));
        assert!(text.contains("Enter to dismiss"));
    }

    #[test]
    fn status_toast_renders_in_the_input_block() {
        let mut app = test_app();
        app.set_status("Copied!", Instant::now());
        let text = rendered_text(&mut app);
        assert!(text.contains("Copied!"));
    }

    #[test]
    fn auto_scroll_pins_to_the_bottom() {
        let mut app = test_app();
        for i in 0..40 {
            app.messages.push_back(Message::user(format!("question {i}")));
            app.messages.push_back(Message::assistant(format!("answer {i}")));
        }
        let text = rendered_text(&mut app);
        assert!(text.contains("answer 39"));
        assert!(!text.contains("question 0 "));
        assert!(app.scroll_offset > 0);
    }

    #[test]
    fn max_scroll_is_zero_for_a_short_transcript() {
        let mut app = test_app();
        app.messages.push_back(Message::user("hi"));
        let size = Size::new(80, 24);
        assert_eq!(transcript_max_scroll(&app, size), 0);
    }
}
