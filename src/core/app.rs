//! Runtime state for an interactive chat session.
//!
//! `App` owns the transcript, the input editor, and every piece of transient
//! UI state: the in-flight gate, the placeholder bubble, the typewriter
//! reveal, the modal dialog, the status toast, and the reply-select mode.
//! The chat loop mutates it in response to events; the renderer reads it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tui_textarea::TextArea;

use crate::core::ask::{AskEvent, AskParams};
use crate::core::constants::{GENERIC_COPY_ERROR, STARTUP_NOTICE, STATUS_TOAST_MS};
use crate::core::message::Message;
use crate::core::typewriter::Typewriter;
use crate::ui::dialog::Dialog;
use crate::ui::theme::Theme;
use crate::utils::input::sanitize_text_input;

const MAX_INPUT_HEIGHT: u16 = 6;

pub struct App {
    pub messages: VecDeque<Message>,
    pub textarea: TextArea<'static>,
    pub theme: Theme,
    pub client: reqwest::Client,
    pub base_url: String,
    pub typing_interval: Duration,

    /// True from submission until the completion event arrives. Gates every
    /// submission path, not just the send control's appearance.
    pub is_awaiting: bool,
    next_request_id: u64,
    in_flight_id: Option<u64>,
    /// Index of the placeholder bubble while a request is outstanding.
    placeholder_index: Option<usize>,
    /// Active reveal: target message index and its typewriter.
    reveal: Option<(usize, Typewriter)>,

    pub dialog: Option<Dialog>,
    pub status: Option<String>,
    status_set_at: Option<Instant>,

    pub scroll_offset: u16,
    pub auto_scroll: bool,
    /// Highlighted assistant bubble while reply-select mode is active.
    pub select_index: Option<usize>,
    pub pulse_start: Instant,
    pub exit_requested: bool,
}

impl App {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        typing_interval: Duration,
        theme: Theme,
    ) -> Self {
        let mut textarea = TextArea::default();
        configure_textarea(&mut textarea, &theme);
        App {
            messages: VecDeque::new(),
            textarea,
            theme,
            client,
            base_url,
            typing_interval,
            is_awaiting: false,
            next_request_id: 0,
            in_flight_id: None,
            placeholder_index: None,
            reveal: None,
            dialog: Some(Dialog::warning("Heads up", STARTUP_NOTICE)),
            status: None,
            status_set_at: None,
            scroll_offset: 0,
            auto_scroll: true,
            select_index: None,
            pulse_start: Instant::now(),
            exit_requested: false,
        }
    }

    // --- input ---

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        configure_textarea(&mut self.textarea, &self.theme);
    }

    /// Rows the input editor needs, clamped so the transcript keeps room.
    pub fn input_area_height(&self) -> u16 {
        (self.textarea.lines().len() as u16).clamp(1, MAX_INPUT_HEIGHT)
    }

    // --- submission ---

    /// Try to turn the current input into an ask request. Returns `None`
    /// without side effects when the input is blank or a request is already
    /// outstanding; otherwise appends the user bubble and the placeholder,
    /// clears the input, and arms the in-flight gate.
    pub fn submit_question(&mut self) -> Option<AskParams> {
        if self.is_awaiting {
            return None;
        }
        let sanitized = sanitize_text_input(&self.input_text());
        let question = sanitized.trim();
        if question.is_empty() {
            return None;
        }

        self.messages.push_back(Message::user(question));
        self.messages.push_back(Message::assistant(String::new()));
        self.placeholder_index = Some(self.messages.len() - 1);

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight_id = Some(request_id);
        self.is_awaiting = true;
        self.auto_scroll = true;
        self.pulse_start = Instant::now();

        let params = AskParams {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            question: question.to_string(),
            request_id,
        };
        self.clear_input();
        Some(params)
    }

    /// Apply a completion event from the ask service. Events for anything
    /// other than the current in-flight request are stale and ignored.
    pub fn handle_ask_event(&mut self, event: AskEvent, now: Instant) {
        if self.in_flight_id != Some(event.request_id()) {
            return;
        }
        self.in_flight_id = None;
        self.is_awaiting = false;

        match event {
            AskEvent::Answered { text, .. } => {
                if let Some(index) = self.placeholder_index.take() {
                    let typewriter = Typewriter::new(text, self.typing_interval, now);
                    if let Some(msg) = self.messages.get_mut(index) {
                        msg.content = typewriter.visible_text().to_string();
                    }
                    if !typewriter.is_complete() {
                        self.reveal = Some((index, typewriter));
                    }
                    self.auto_scroll = true;
                }
            }
            AskEvent::Failed { message, .. } => {
                // The placeholder is always the newest bubble while the gate
                // is armed; drop it instead of leaving "Typing..." behind.
                if let Some(index) = self.placeholder_index.take() {
                    debug_assert_eq!(index + 1, self.messages.len());
                    self.messages.pop_back();
                    if self.select_index == Some(index) {
                        self.select_index = None;
                    }
                }
                self.dialog = Some(Dialog::error("Error", message));
            }
        }
    }

    /// True while `index` is the outstanding placeholder bubble.
    pub fn is_placeholder(&self, index: usize) -> bool {
        self.placeholder_index == Some(index)
    }

    /// Index of the message currently being revealed, if any.
    pub fn revealing_index(&self) -> Option<usize> {
        self.reveal.as_ref().map(|(index, _)| *index)
    }

    // --- typewriter ---

    /// Drive the active reveal forward. Returns true when visible content
    /// changed and a redraw is due.
    pub fn advance_typewriter(&mut self, now: Instant) -> bool {
        let Some((index, typewriter)) = self.reveal.as_mut() else {
            return false;
        };
        if !typewriter.advance(now) {
            return false;
        }
        let index = *index;
        let visible = typewriter.visible_text().to_string();
        let done = typewriter.is_complete();
        if let Some(msg) = self.messages.get_mut(index) {
            msg.content = visible;
        }
        if done {
            self.reveal = None;
        }
        true
    }

    /// Next deadline the event loop should wake for, if a reveal is running.
    pub fn reveal_tick(&self) -> Option<Duration> {
        self.reveal.as_ref().map(|_| self.typing_interval)
    }

    // --- dialogs and status ---

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn set_status<S: Into<String>>(&mut self, status: S, now: Instant) {
        self.status = Some(status.into());
        self.status_set_at = Some(now);
    }

    /// Expire the status toast once it has been shown long enough.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        let expired = matches!(
            self.status_set_at,
            Some(set_at) if now.duration_since(set_at) >= Duration::from_millis(STATUS_TOAST_MS)
        );
        if expired {
            self.status = None;
            self.status_set_at = None;
        }
        expired
    }

    // --- reply selection and copy ---

    fn selectable_indices(&self) -> Vec<usize> {
        self.messages
            .iter()
            .enumerate()
            .filter(|(i, m)| m.role.is_assistant() && !self.is_placeholder(*i))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn latest_answer_index(&self) -> Option<usize> {
        self.selectable_indices().last().copied()
    }

    /// Enter reply-select mode on the newest answer. No-op when there is
    /// nothing to select.
    pub fn enter_select_mode(&mut self) -> bool {
        match self.latest_answer_index() {
            Some(index) => {
                self.select_index = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn exit_select_mode(&mut self) {
        self.select_index = None;
    }

    pub fn select_previous(&mut self) {
        self.move_selection(|pos, len| if pos == 0 { len - 1 } else { pos - 1 });
    }

    pub fn select_next(&mut self) {
        self.move_selection(|pos, len| (pos + 1) % len);
    }

    fn move_selection(&mut self, step: impl Fn(usize, usize) -> usize) {
        let indices = self.selectable_indices();
        if indices.is_empty() {
            self.select_index = None;
            return;
        }
        let current = self
            .select_index
            .and_then(|sel| indices.iter().position(|&i| i == sel));
        let next = match current {
            Some(pos) => indices[step(pos, indices.len())],
            None => indices[indices.len() - 1],
        };
        self.select_index = Some(next);
    }

    /// Copy the highlighted answer and leave select mode.
    pub fn copy_selected(&mut self, now: Instant) {
        if let Some(index) = self.select_index {
            self.copy_message(index, now, crate::utils::clipboard::copy_to_clipboard);
        }
        self.exit_select_mode();
    }

    /// Copy the newest answer without entering select mode.
    pub fn copy_latest_answer(&mut self, now: Instant) {
        if let Some(index) = self.latest_answer_index() {
            self.copy_message(index, now, crate::utils::clipboard::copy_to_clipboard);
        }
    }

    /// Copy one assistant bubble through the given clipboard function,
    /// surfacing the outcome as a toast or an error dialog.
    pub fn copy_message<F>(&mut self, index: usize, now: Instant, copy: F)
    where
        F: FnOnce(&str) -> Result<(), String>,
    {
        let Some(msg) = self.messages.get(index) else {
            return;
        };
        if !msg.role.is_assistant() {
            return;
        }
        match copy(&msg.content) {
            Ok(()) => self.set_status("Copied!", now),
            Err(e) => {
                tracing::error!("clipboard copy failed: {e}");
                self.dialog = Some(Dialog::error("Copy Failed", GENERIC_COPY_ERROR));
            }
        }
    }
}

fn configure_textarea(textarea: &mut TextArea<'static>, theme: &Theme) {
    textarea.set_style(theme.input_text_style);
    textarea.set_cursor_style(theme.input_cursor_style);
    textarea.set_cursor_line_style(theme.input_text_style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::GENERIC_REQUEST_ERROR;
    use crate::ui::dialog::DialogKind;

    fn test_app() -> App {
        let mut app = App::new(
            reqwest::Client::new(),
            "http://127.0.0.1:5000".to_string(),
            Duration::from_millis(10),
            Theme::dark_default(),
        );
        // Tests drive the post-startup state.
        app.dismiss_dialog();
        app
    }

    fn type_input(app: &mut App, text: &str) {
        app.textarea.insert_str(text);
    }

    #[test]
    fn starts_with_the_startup_notice() {
        let app = App::new(
            reqwest::Client::new(),
            "http://127.0.0.1:5000".to_string(),
            Duration::from_millis(10),
            Theme::dark_default(),
        );
        let dialog = app.dialog.expect("startup dialog missing");
        assert_eq!(dialog.kind, DialogKind::Warning);
    }

    #[test]
    fn submit_appends_user_bubble_and_placeholder() {
        let mut app = test_app();
        type_input(&mut app, "  What breaks wudu?  ");

        let params = app.submit_question().expect("expected a request");
        assert_eq!(params.question, "What breaks wudu?");
        assert_eq!(app.messages.len(), 2);
        assert!(app.messages[0].role.is_user());
        assert_eq!(app.messages[0].content, "What breaks wudu?");
        assert!(app.messages[1].role.is_assistant());
        assert!(app.is_placeholder(1));
        assert!(app.is_awaiting);
        assert!(app.input_text().is_empty());
    }

    #[test]
    fn blank_input_submits_nothing() {
        let mut app = test_app();
        type_input(&mut app, "   \n  ");
        assert!(app.submit_question().is_none());
        assert!(app.messages.is_empty());
        assert!(!app.is_awaiting);
    }

    #[test]
    fn submission_is_refused_while_awaiting() {
        let mut app = test_app();
        type_input(&mut app, "first");
        app.submit_question().expect("expected a request");

        type_input(&mut app, "second");
        assert!(app.submit_question().is_none());
        assert_eq!(app.messages.len(), 2);
        // The typed text is kept for after the gate clears.
        assert_eq!(app.input_text(), "second");
    }

    #[test]
    fn answer_reveals_into_the_placeholder() {
        let mut app = test_app();
        let start = Instant::now();
        type_input(&mut app, "hi");
        let params = app.submit_question().expect("expected a request");

        app.handle_ask_event(
            AskEvent::Answered {
                text: "Hello".to_string(),
                request_id: params.request_id,
            },
            start,
        );
        assert!(!app.is_awaiting);
        assert!(!app.is_placeholder(1));
        assert_eq!(app.messages[1].content, "");

        assert!(app.advance_typewriter(start + Duration::from_millis(10)));
        assert_eq!(app.messages[1].content, "H");
        assert!(app.advance_typewriter(start + Duration::from_millis(50)));
        assert_eq!(app.messages[1].content, "Hello");
        assert!(app.revealing_index().is_none());
        // Settled: further ticks change nothing.
        assert!(!app.advance_typewriter(start + Duration::from_millis(60)));
    }

    #[test]
    fn reveal_never_runs_ahead_of_the_clock() {
        let mut app = test_app();
        let start = Instant::now();
        type_input(&mut app, "hi");
        let params = app.submit_question().expect("expected a request");
        app.handle_ask_event(
            AskEvent::Answered {
                text: "Hello".to_string(),
                request_id: params.request_id,
            },
            start,
        );
        app.advance_typewriter(start + Duration::from_millis(29));
        assert_eq!(app.messages[1].content, "He");
    }

    #[test]
    fn failure_removes_placeholder_and_opens_error_dialog() {
        let mut app = test_app();
        type_input(&mut app, "hi");
        let params = app.submit_question().expect("expected a request");

        app.handle_ask_event(
            AskEvent::Failed {
                message: "bad input".to_string(),
                request_id: params.request_id,
            },
            Instant::now(),
        );
        assert!(!app.is_awaiting);
        assert_eq!(app.messages.len(), 1);
        assert!(app.messages[0].role.is_user());
        let dialog = app.dialog.as_ref().expect("error dialog missing");
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_eq!(dialog.text, "bad input");
    }

    #[test]
    fn generic_failure_message_reaches_the_dialog() {
        let mut app = test_app();
        type_input(&mut app, "hi");
        let params = app.submit_question().expect("expected a request");
        app.handle_ask_event(
            AskEvent::Failed {
                message: GENERIC_REQUEST_ERROR.to_string(),
                request_id: params.request_id,
            },
            Instant::now(),
        );
        assert_eq!(
            app.dialog.as_ref().expect("dialog missing").text,
            GENERIC_REQUEST_ERROR
        );
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut app = test_app();
        type_input(&mut app, "hi");
        let params = app.submit_question().expect("expected a request");

        app.handle_ask_event(
            AskEvent::Answered {
                text: "old".to_string(),
                request_id: params.request_id + 17,
            },
            Instant::now(),
        );
        // Wrong id: gate stays armed, placeholder stays.
        assert!(app.is_awaiting);
        assert!(app.is_placeholder(1));
        assert_eq!(app.messages[1].content, "");
    }

    #[test]
    fn gate_reopens_after_failure() {
        let mut app = test_app();
        type_input(&mut app, "first");
        let params = app.submit_question().expect("expected a request");
        app.handle_ask_event(
            AskEvent::Failed {
                message: "down".to_string(),
                request_id: params.request_id,
            },
            Instant::now(),
        );
        app.dismiss_dialog();

        type_input(&mut app, "second");
        assert!(app.submit_question().is_some());
    }

    #[test]
    fn copy_hands_the_bubble_text_to_the_clipboard() {
        let mut app = test_app();
        app.messages.push_back(Message::user("q"));
        app.messages.push_back(Message::assistant("Hello"));

        let now = Instant::now();
        let mut copied = None;
        app.copy_message(1, now, |text| {
            copied = Some(text.to_string());
            Ok(())
        });
        assert_eq!(copied.as_deref(), Some("Hello"));
        assert_eq!(app.status.as_deref(), Some("Copied!"));
    }

    #[test]
    fn copy_failure_opens_the_copy_failed_dialog() {
        let mut app = test_app();
        app.messages.push_back(Message::assistant("Hello"));

        app.copy_message(0, Instant::now(), |_| Err("no command".to_string()));
        assert!(app.status.is_none());
        let dialog = app.dialog.as_ref().expect("dialog missing");
        assert_eq!(dialog.title, "Copy Failed");
        assert_eq!(dialog.text, GENERIC_COPY_ERROR);
    }

    #[test]
    fn user_bubbles_are_not_copyable() {
        let mut app = test_app();
        app.messages.push_back(Message::user("mine"));
        let mut called = false;
        app.copy_message(0, Instant::now(), |_| {
            called = true;
            Ok(())
        });
        assert!(!called);
    }

    #[test]
    fn status_toast_expires() {
        let mut app = test_app();
        let now = Instant::now();
        app.set_status("Copied!", now);
        assert!(!app.expire_status(now + Duration::from_millis(1999)));
        assert!(app.status.is_some());
        assert!(app.expire_status(now + Duration::from_millis(2000)));
        assert!(app.status.is_none());
    }

    #[test]
    fn selection_walks_answers_only() {
        let mut app = test_app();
        app.messages.push_back(Message::user("q1"));
        app.messages.push_back(Message::assistant("a1"));
        app.messages.push_back(Message::user("q2"));
        app.messages.push_back(Message::assistant("a2"));

        assert!(app.enter_select_mode());
        assert_eq!(app.select_index, Some(3));
        app.select_previous();
        assert_eq!(app.select_index, Some(1));
        app.select_previous();
        assert_eq!(app.select_index, Some(3));
        app.select_next();
        assert_eq!(app.select_index, Some(1));
        app.exit_select_mode();
        assert!(app.select_index.is_none());
    }

    #[test]
    fn placeholder_is_not_selectable() {
        let mut app = test_app();
        type_input(&mut app, "hi");
        app.submit_question().expect("expected a request");
        assert!(!app.enter_select_mode());
        assert!(app.latest_answer_index().is_none());
    }

    #[test]
    fn empty_answer_finalizes_immediately() {
        let mut app = test_app();
        type_input(&mut app, "hi");
        let params = app.submit_question().expect("expected a request");
        app.handle_ask_event(
            AskEvent::Answered {
                text: String::new(),
                request_id: params.request_id,
            },
            Instant::now(),
        );
        assert!(app.revealing_index().is_none());
        assert_eq!(app.messages[1].content, "");
        assert!(!app.is_placeholder(1));
    }
}
