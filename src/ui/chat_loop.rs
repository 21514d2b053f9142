//! Main chat event loop.
//!
//! Owns the terminal (raw mode + alternate screen), pumps crossterm events
//! through a background task, and drives the app state: submissions, ask
//! completions, the typewriter tick, and toast expiry.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Size, Terminal};
use tokio::sync::mpsc;

use crate::core::app::App;
use crate::core::ask::AskService;
use crate::core::config::Config;
use crate::ui::renderer::{transcript_max_scroll, ui};
use crate::ui::theme::Theme;
use crate::utils::input::sanitize_text_input;
use crate::utils::url::normalize_base_url;

const PAGE_SCROLL: u16 = 10;

pub async fn run_chat(endpoint_override: Option<String>) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let theme = config
        .theme
        .as_deref()
        .and_then(Theme::from_name)
        .unwrap_or_else(Theme::dark_default);
    let base_url = normalize_base_url(endpoint_override.as_deref().unwrap_or(config.endpoint()));

    let client = reqwest::Client::new();
    let mut app = App::new(client, base_url, config.typing_interval(), theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let reader = spawn_event_reader(event_tx);
    let (ask_service, mut ask_rx) = AskService::new();

    let result = run_event_loop(
        &mut terminal,
        &mut app,
        &ask_service,
        &mut event_rx,
        &mut ask_rx,
    )
    .await;

    // Restore the terminal before surfacing any error.
    reader.abort();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ask_service: &AskService,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    ask_rx: &mut mpsc::UnboundedReceiver<crate::core::ask::AskEvent>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let tick = next_tick(app);
        let frame_size = terminal.size()?;
        tokio::select! {
            maybe_event = event_rx.recv() => match maybe_event {
                Some(event) => handle_terminal_event(app, ask_service, frame_size, event),
                None => app.exit_requested = true,
            },
            maybe_completion = ask_rx.recv() => {
                if let Some(completion) = maybe_completion {
                    app.handle_ask_event(completion, Instant::now());
                }
            }
            _ = tokio::time::sleep(tick) => {}
        }

        // Drain whatever else queued up before the next draw.
        while let Ok(event) = event_rx.try_recv() {
            handle_terminal_event(app, ask_service, frame_size, event);
        }
        while let Ok(completion) = ask_rx.try_recv() {
            app.handle_ask_event(completion, Instant::now());
        }

        let now = Instant::now();
        app.advance_typewriter(now);
        app.expire_status(now);

        if app.exit_requested {
            return Ok(());
        }
    }
}

/// How long the loop may sleep before something animated needs a frame.
fn next_tick(app: &App) -> Duration {
    if let Some(interval) = app.reveal_tick() {
        return interval.max(Duration::from_millis(5));
    }
    if app.is_awaiting || app.status.is_some() {
        // Pulse indicator and toast expiry want a modest cadence.
        Duration::from_millis(100)
    } else {
        Duration::from_millis(250)
    }
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

fn handle_terminal_event(
    app: &mut App,
    ask_service: &AskService,
    frame_size: Size,
    event: Event,
) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            handle_key(app, ask_service, frame_size, key);
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => scroll_up(app, 3),
            MouseEventKind::ScrollDown => scroll_down(app, frame_size, 3),
            _ => {}
        },
        Event::Paste(text) => {
            app.textarea.insert_str(sanitize_text_input(&text));
        }
        _ => {}
    }
}

fn handle_key(app: &mut App, ask_service: &AskService, frame_size: Size, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.exit_requested = true;
                return;
            }
            KeyCode::Char('b') => {
                if app.dialog.is_none() {
                    app.enter_select_mode();
                }
                return;
            }
            KeyCode::Char('y') => {
                if app.dialog.is_none() {
                    app.copy_latest_answer(Instant::now());
                }
                return;
            }
            _ => {}
        }
    }

    // A modal dialog swallows everything except its dismiss keys.
    if app.dialog.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_dialog();
        }
        return;
    }

    if app.select_index.is_some() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('y') => {
                app.copy_selected(Instant::now());
            }
            KeyCode::Esc => app.exit_select_mode(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            app.textarea.insert_newline();
        }
        KeyCode::Enter => {
            if let Some(params) = app.submit_question() {
                ask_service.spawn_ask(params);
            }
        }
        KeyCode::Up => scroll_up(app, 1),
        KeyCode::Down => scroll_down(app, frame_size, 1),
        KeyCode::PageUp => scroll_up(app, PAGE_SCROLL),
        KeyCode::PageDown => scroll_down(app, frame_size, PAGE_SCROLL),
        KeyCode::Esc => {}
        _ => {
            app.textarea.input(key);
        }
    }
}

fn scroll_up(app: &mut App, amount: u16) {
    app.auto_scroll = false;
    app.scroll_offset = app.scroll_offset.saturating_sub(amount);
}

fn scroll_down(app: &mut App, frame_size: Size, amount: u16) {
    let max = transcript_max_scroll(app, frame_size);
    app.scroll_offset = app.scroll_offset.saturating_add(amount).min(max);
    // Reaching the bottom re-engages stick-to-bottom.
    if app.scroll_offset >= max {
        app.auto_scroll = true;
    }
}
