mod app;
mod bundle;
mod catalog;
mod config;
mod display;
mod logging;
mod session;
mod share;
mod timer;
mod ui;

use clap::Parser;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};
use tracing::{error, info};

use crate::app::App;
use crate::catalog::Catalog;
use crate::config::{Cli, Config};
use crate::share::{FileShare, NoShare, ShareSurface};
use crate::timer::LifecycleEvent;

/// Longest wait for input while no tick is due.
const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    let _log_guard = logging::init(&config)?;
    info!(?config, "starting dessert clicker");

    let share: Box<dyn ShareSurface> = match &config.share_file {
        Some(path) => Box::new(FileShare::new(path)),
        None => Box::new(NoShare),
    };
    let app = App::new(Catalog::desserts(), config.tick_interval(), share);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "event loop failed");
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    app.on_focus(true, Instant::now());

    loop {
        let now = Instant::now();
        app.update_time(now);

        terminal.draw(|f| ui::draw(f, &app))?;

        let timeout = app
            .timer
            .time_until_fire(now)
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Esc => app.go_back(),
                    KeyCode::Enter | KeyCode::Char(' ') => app.on_primary_action(),
                    KeyCode::Char('s') => app.on_share_action(Instant::now()),
                    KeyCode::Char('c') => app.toggle_catalog(),
                    KeyCode::Char('p') => app.toggle_pause(Instant::now()),
                    KeyCode::Char('r') => app.recreate_requested = true,
                    KeyCode::Down => app.next_tier(),
                    KeyCode::Up => app.previous_tier(),
                    _ => {}
                },
                Event::FocusGained => app.on_focus(true, Instant::now()),
                Event::FocusLost => app.on_focus(false, Instant::now()),
                _ => {}
            }
        }

        if app.recreate_requested {
            app = app.recreate(Instant::now());
        }

        if app.should_quit {
            app.handle_lifecycle(LifecycleEvent::BecameHidden, Instant::now());
            info!(
                revenue = app.session.revenue(),
                units_sold = app.session.units_sold(),
                elapsed_seconds = app.session.elapsed_seconds(),
                "closing bakery"
            );
            return Ok(());
        }
    }
}
