/// Options Screener Terminal
///
/// Search a ticker, then browse its option chain by expiration with scenario payoffs
/// at expiration shown in dollars or percent.
use std::{
    error::Error,
    fs::File,
    io,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use screener_chain::{OptionsRequest, Session, StockRequest};
use screener_terminal::{
    apply_event, render_ui, spawn_options_fetch, spawn_stock_fetch, ApiClient, ChainCursor,
    FetchEvent, TerminalConfig,
};
use tokio::sync::mpsc;
use tracing::info;

/// What a key press asks the event loop to do
enum Action {
    None,
    Quit,
    FetchStock(StockRequest),
    FetchOptions(OptionsRequest),
}

fn init_logging(config: &TerminalConfig) -> io::Result<()> {
    let file = File::create(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn handle_key(session: &mut Session, cursor: &mut ChainCursor, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => session
            .submit_input()
            .map_or(Action::None, Action::FetchStock),
        KeyCode::Backspace => {
            session.pop_input();
            Action::None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            session.toggle_side();
            Action::None
        }
        KeyCode::Char('%') | KeyCode::Char('$') => {
            session.toggle_mode();
            Action::None
        }
        KeyCode::Right | KeyCode::Char(']') => session
            .next_expiration()
            .map_or(Action::None, Action::FetchOptions),
        KeyCode::Left | KeyCode::Char('[') => session
            .prev_expiration()
            .map_or(Action::None, Action::FetchOptions),
        KeyCode::Up => {
            cursor.scroll(-1);
            Action::None
        }
        KeyCode::Down => {
            cursor.scroll(1);
            Action::None
        }
        KeyCode::PageUp => {
            cursor.page_up();
            Action::None
        }
        KeyCode::PageDown => {
            cursor.page_down();
            Action::None
        }
        KeyCode::Home => {
            cursor.scroll_to_start();
            Action::None
        }
        KeyCode::End => {
            cursor.scroll_to_end();
            Action::None
        }
        KeyCode::F(5) => session
            .retry_options()
            .map_or(Action::None, Action::FetchOptions),
        KeyCode::Delete => {
            session.dismiss_error();
            Action::None
        }
        KeyCode::Char(c) => {
            session.push_input(c);
            Action::None
        }
        _ => Action::None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = TerminalConfig::from_env();
    init_logging(&config)?;
    info!(api_url = %config.api_url, "starting screener");

    let client = Arc::new(ApiClient::new(&config)?);
    let (event_tx, mut event_rx) = mpsc::channel::<FetchEvent>(64);

    // Setup panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = Session::new(config.mode);
    let mut cursor = ChainCursor::new();
    if let Some(request) = config
        .initial_ticker
        .as_deref()
        .and_then(|ticker| session.search(ticker))
    {
        spawn_stock_fetch(Arc::clone(&client), request, event_tx.clone());
    }

    let tick_rate = config.tick_rate;
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        while let Ok(fetched) = event_rx.try_recv() {
            if let Some(request) = apply_event(&mut session, fetched) {
                spawn_options_fetch(Arc::clone(&client), request, event_tx.clone());
            }
            dirty = true;
        }

        if dirty || last_tick.elapsed() >= tick_rate {
            let clock = chrono::Local::now().format("%H:%M:%S").to_string();
            terminal.draw(|f| render_ui(f, &session, &clock, &mut cursor))?;
            last_tick = Instant::now();
            dirty = false;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0))
            .min(Duration::from_millis(50));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(&mut session, &mut cursor, key) {
                    Action::Quit => break,
                    Action::FetchStock(request) => {
                        spawn_stock_fetch(Arc::clone(&client), request, event_tx.clone());
                    }
                    Action::FetchOptions(request) => {
                        spawn_options_fetch(Arc::clone(&client), request, event_tx.clone());
                    }
                    Action::None => {}
                }
                dirty = true;
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("screener stopped");
    Ok(())
}
