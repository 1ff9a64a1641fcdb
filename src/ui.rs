// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod quit_confirm;

use crate::api::QueryTransport;
use crate::app::{App, AppState};
use crate::config::ChatConfig;
use crate::constants::TICK_RATE_MS;
use crate::errors::ChatResult;
use crate::key_handlers::handle_key;
use crate::models::Message;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Enum for different types of events.
enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(config: &ChatConfig, transport: Arc<dyn QueryTransport>) -> ChatResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (reply_tx, reply_rx) = mpsc::unbounded_channel::<Message>();
    let app = App::new(config, transport, reply_tx);
    info!("chat session started for course {}", config.course_id);

    let (event_tx, event_rx) = mpsc::channel::<Event>(100);
    let poller = tokio::task::spawn_blocking(move || poll_terminal_events(event_tx));

    let res = run_app(&mut terminal, app, event_rx, reply_rx).await;
    // Dropping the receiver inside run_app stops the poller within one tick.
    let _ = poller.await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("ui loop failed: {}", err);
    }
    info!("chat session ended");

    res
}

/// Reads terminal input on a blocking thread and emits a tick every
/// `TICK_RATE_MS`. Returns once the receiving side is gone or polling fails.
fn poll_terminal_events(tx: mpsc::Sender<Event>) {
    let tick_rate = Duration::from_millis(TICK_RATE_MS);
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        match event::poll(timeout) {
            Ok(true) => {
                if let Ok(event) = event::read() {
                    if tx.blocking_send(Event::Input(event)).is_err() {
                        return;
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                error!("failed to poll terminal events: {}", e);
                return;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if tx.blocking_send(Event::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}

/// Main loop: the only place the session is mutated. Ends on quit, or when
/// the input source stops.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut event_rx: mpsc::Receiver<Event>,
    mut reply_rx: mpsc::UnboundedReceiver<Message>,
) -> ChatResult<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        tokio::select! {
            event = event_rx.recv() => match event {
                Some(Event::Input(CEvent::Key(key))) => handle_key(key, &mut app),
                Some(Event::Input(_)) => {}
                Some(Event::Tick) => app.on_tick(),
                None => {
                    warn!("terminal input closed; leaving chat");
                    break;
                }
            },
            Some(reply) = reply_rx.recv() => app.apply_reply(reply),
        }

        if app.state == AppState::Quit {
            break;
        }
    }

    Ok(())
}

/// Renders the whole screen.
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Chat + activity
                Constraint::Length(1), // Footer
            ]
            .as_ref(),
        )
        .split(size);

    header::draw_header(f, vertical[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(vertical[1]);

    chat::draw_chat(f, body[0], app);
    app.logs.render(f, body[1]);

    footer::draw_footer(f, vertical[2], app);

    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, size);
    }
}
