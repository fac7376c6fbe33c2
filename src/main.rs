#![warn(clippy::all, clippy::pedantic)]

use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::thread;

use anyhow::Context;
use blockblaster::app::{App, AppResult};
use blockblaster::config::{self, Config};
use blockblaster::persistence::FileStore;
use blockblaster::rng;
use blockblaster::session::Session;
use blockblaster::ui;
use crossbeam_channel::{Receiver, RecvTimeoutError, unbounded};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

const LOG_PATH: &str = "blockblaster.log";
const BELL: &[u8] = b"\x07";

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_PATH)
        .with_context(|| format!("failed to create log file {LOG_PATH}"))?;

    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Block Blaster");

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            // Continue with default configuration
            Config::default()
        }
    };

    let save_dir = config.save_dir();
    info!("Records are kept in {}", save_dir.display());
    if let Some(seed) = config.gameplay.seed {
        info!("Using fixed seed {seed}");
    }
    let session = Session::new(
        rng::new_source(config.gameplay.seed),
        Box::new(FileStore::new(save_dir)),
    );
    let app = App::new(session, config.tick_dt());

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = spawn_input_thread();
    let res = run_app(&mut terminal, app, &events);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    info!("Goodbye");
    Ok(())
}

// Terminal events are read on their own thread so the game loop never blocks on input
fn spawn_input_thread() -> Receiver<Event> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    error!("Failed to read terminal event: {err}");
                    break;
                }
            }
        }
        debug!("Input thread finished");
    });
    rx
}

fn run_app<B: Backend + Write>(
    terminal: &mut Terminal<B>,
    mut app: App,
    events: &Receiver<Event>,
) -> AppResult<()> {
    loop {
        terminal.draw(|f| ui::render(f, &mut app))?;

        match events.recv_timeout(app.until_next_tick()) {
            Ok(ev) => {
                app.handle_event(&ev);
                for ev in events.try_iter() {
                    app.handle_event(&ev);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => anyhow::bail!("input thread stopped"),
        }

        app.on_tick();

        if app.take_bell() {
            let backend = terminal.backend_mut();
            backend.write_all(BELL)?;
            Write::flush(backend)?;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
