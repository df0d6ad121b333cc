mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use colog_framework::{Layout, LogStore, plugin};
use crossterm::event;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        execute,
        style::{Color, ResetColor, SetBackgroundColor},
        terminal::{
            Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
            enable_raw_mode,
        },
    },
};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::io;
use std::panic;
use std::process;
use std::time::Duration;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }

    let (layout, store) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(err) => {
            log::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run(&layout, &store) {
        eprintln!("Application Error: {:?}", err);
        process::exit(1);
    }
}

/// without a log file nothing is logged, the pager owns the terminal
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), file)?;
    log::info!("colog {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// everything that can fail before the terminal is taken over
fn load(cli: &Cli) -> Result<(Layout, LogStore)> {
    let mut layout = colog_layout::resolve(cli.layout.as_deref())?;

    let mut processors = colog_layout::plugins::load(&layout.plugins)?;
    plugin::mount_all(&mut processors, &mut layout)?;

    let store = LogStore::open(&cli.files, &layout, &processors)?;
    log::info!(
        "Loaded {} entries from {} files",
        store.total(),
        store.files().len()
    );
    Ok((layout, store))
}

fn run(layout: &Layout, store: &LogStore) -> Result<()> {
    colog_framework::install_error_hooks()?;

    let mut terminal = setup_terminal()?;

    // Ensure we restore the terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let app_result = colog_framework::start(&mut terminal, store, layout);

    // Always restore terminal before printing or exiting
    restore_terminal()?;

    app_result
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    // enter the alternate screen to not mess with the user's shell history
    execute!(stdout, EnterAlternateScreen)?;
    execute!(
        stdout,
        SetBackgroundColor(Color::Reset),
        Clear(ClearType::All)
    )?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();

    let _ = execute!(stdout, ResetColor);
    let _ = execute!(stdout, LeaveAlternateScreen);

    // Drain pending events so they don't leak to the shell
    while event::poll(Duration::from_millis(0)).unwrap_or(false) {
        let _ = event::read();
    }

    let _ = disable_raw_mode();

    Ok(())
}
