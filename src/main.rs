use chainboard::app::App;
use chainboard::card::{CardOutcome, FetchTicket};
use chainboard::config::Config;
use chainboard::health::{HealthProbe, HealthReport};
use chainboard::logging;
use chainboard::source::{DataSourceClient, HttpTransport};
use chainboard::ui;

use anyhow::Result;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info};
use tui_input::backend::crossterm::EventHandler;

const TICK: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load()?;
    let log_path = logging::init(&Config::config_dir()?)?;

    let api_base = config.api_base();
    let transport = HttpTransport::new(&api_base, &config.origin, config.request_timeout())?;
    info!(
        base_url = transport.base_url(),
        log = %log_path.display(),
        "starting chainboard"
    );
    let client = DataSourceClient::new(Arc::new(transport));

    let result = run_tui(config, client).await;
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "exiting with error");
    }
    result
}

/// Messages from async tasks back to the main loop
enum AsyncMessage {
    Card(CardOutcome),
    Health { round: u64, report: HealthReport },
}

async fn run_tui(config: Config, client: DataSourceClient) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config);

    let (tx, mut rx) = mpsc::channel::<AsyncMessage>(32);

    // Initial load: every card plus one health round
    let tickets = app.start();
    spawn_tickets(tickets, &client, &tx);
    spawn_health_check(&mut app, &client, &tx);

    let result = run_event_loop(&mut terminal, &mut app, &client, tx, &mut rx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    client: &DataSourceClient,
    tx: mpsc::Sender<AsyncMessage>,
    rx: &mut mpsc::Receiver<AsyncMessage>,
) -> Result<()> {
    let refresh = app.config.health_refresh();
    let mut last_health_refresh = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Yield to the fetch tasks until one reports back or the tick elapses
        tokio::select! {
            Some(msg) = rx.recv() => handle_message(app, msg),
            _ = tokio::time::sleep(TICK) => {}
        }

        while let Ok(msg) = rx.try_recv() {
            handle_message(app, msg);
        }

        if let Some(every) = refresh {
            if last_health_refresh.elapsed() >= every {
                last_health_refresh = Instant::now();
                spawn_health_check(app, client, &tx);
            }
        }

        // Drain pending input without blocking the runtime
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;

            let Event::Key(key) = &ev else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Esc => {
                    app.should_quit = true;
                }
                KeyCode::Char('c') if ctrl => {
                    app.should_quit = true;
                }
                KeyCode::Char('r') if ctrl => {
                    if let Some(ticket) = app.retry_focused() {
                        spawn_tickets(vec![ticket], client, &tx);
                    }
                }
                KeyCode::Char('a') if ctrl => {
                    let tickets = app.retry_failed();
                    spawn_tickets(tickets, client, &tx);
                }
                KeyCode::Tab => {
                    app.focus_next();
                }
                KeyCode::BackTab => {
                    app.focus_prev();
                }
                KeyCode::Enter => {
                    // A rejected address leaves the notice on the app
                    if let Ok(tickets) = app.submit() {
                        spawn_tickets(tickets, client, &tx);
                    }
                }
                KeyCode::Up => {
                    app.select_history_prev();
                }
                KeyCode::Down => {
                    app.select_history_next();
                }
                KeyCode::Delete | KeyCode::Backspace if app.selected_history_index.is_some() => {
                    app.delete_selected_history();
                }
                _ => {
                    // Typing always returns focus to the input box
                    app.clear_history_selection();
                    app.input.handle_event(&ev);
                }
            }

            if app.should_quit {
                break;
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("shutting down");
    Ok(())
}

fn handle_message(app: &mut App, msg: AsyncMessage) {
    match msg {
        AsyncMessage::Card(outcome) => {
            app.apply_card_outcome(outcome);
        }
        AsyncMessage::Health { round, report } => {
            app.apply_health(round, report);
        }
    }
}

fn spawn_tickets(
    tickets: Vec<FetchTicket>,
    client: &DataSourceClient,
    tx: &mpsc::Sender<AsyncMessage>,
) {
    for ticket in tickets {
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = ticket.run(&client).await;
            let _ = tx.send(AsyncMessage::Card(outcome)).await;
        });
    }
}

fn spawn_health_check(app: &mut App, client: &DataSourceClient, tx: &mpsc::Sender<AsyncMessage>) {
    let round = app.begin_health_check();
    let probe = HealthProbe::new(client.clone());
    let tx = tx.clone();
    tokio::spawn(async move {
        let report = probe.check_all().await;
        let _ = tx.send(AsyncMessage::Health { round, report }).await;
    });
}
