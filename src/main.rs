mod app;
mod card;
mod catalog;
mod config;
mod fetch;
mod show;
mod ui;

use app::{App, InputMode, View};
use card::RenderedList;
use catalog::{Criteria, GenreFilter, SortMode};
use clap::{Args, Parser, Subcommand};
use config::Config;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fetch::FetchFailure;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Browse the TVmaze show catalog: search, filter by genre, sort by name or rating
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a JSON config file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog endpoint returning a JSON array of shows
    #[arg(long, global = true)]
    url: Option<String>,

    /// Log level for the log file (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

/// Initial search, genre and sort selection.
#[derive(Args, Clone, Default)]
struct CriteriaArgs {
    /// Case-insensitive name search
    #[arg(short, long)]
    search: Option<String>,

    /// Exact genre name, or "all"
    #[arg(short, long)]
    genre: Option<String>,

    /// Sort order
    #[arg(long, value_enum)]
    sort: Option<SortMode>,
}

impl CriteriaArgs {
    fn into_criteria(self, default_sort: SortMode) -> Criteria {
        Criteria {
            search_term: self.search.unwrap_or_default(),
            genre: self
                .genre
                .as_deref()
                .map_or(GenreFilter::All, GenreFilter::parse),
            sort: self.sort.unwrap_or(default_sort),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive browser (default)
    Browse {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },
    /// Fetch the catalog and print the matching shows as text
    List {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },
    /// Fetch the catalog and print every genre, one per line
    Genres,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = cli.url {
        config.api_url = url;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let log_guard = init_logging(&config.log_level);
    info!("show-catalog v{} starting", env!("CARGO_PKG_VERSION"));

    let command = cli.command.unwrap_or(Commands::Browse {
        criteria: CriteriaArgs::default(),
    });
    let result = run(command, &config).await;
    if let Err(e) = &result {
        error!(error = %e, "exiting with error");
    }

    // Flush the non-blocking log writer before reporting
    drop(log_guard);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Browse { criteria } => {
            let criteria = criteria.into_criteria(config.default_sort);
            run_browse(config, criteria).await?;
        }
        Commands::List { criteria } => {
            let criteria = criteria.into_criteria(config.default_sort);
            let catalog = fetch_with_spinner(config).await.map_err(|e| e.user_message())?;
            let displayed = catalog::select(&catalog, &criteria);
            info!(shown = displayed.len(), total = catalog.len(), "printing list");

            let mut out = std::io::stdout().lock();
            match card::render(&displayed) {
                RenderedList::NoResults => writeln!(out, "{}", card::NO_RESULTS)?,
                RenderedList::Cards(cards) => {
                    for c in cards {
                        writeln!(out, "{}\n", c.to_plain_text())?;
                    }
                }
            }
        }
        Commands::Genres => {
            let catalog = fetch_with_spinner(config).await.map_err(|e| e.user_message())?;
            let mut out = std::io::stdout().lock();
            for genre in catalog::genre_vocabulary(&catalog) {
                writeln!(out, "{genre}")?;
            }
        }
    }

    Ok(())
}

/// Route tracing output to a daily log file; the terminal belongs to the UI.
fn init_logging(level: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = config::project_dirs()?.data_dir().join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "show-catalog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("show_catalog={level}")));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .init();

    Some(guard)
}

/// Non-interactive fetch with a spinner on stderr.
async fn fetch_with_spinner(config: &Config) -> Result<Vec<show::ShowRecord>, FetchFailure> {
    let client = fetch::build_client(config.request_timeout())?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading shows from {}", config.api_url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fetch::fetch_catalog(&client, &config.api_url).await;
    spinner.finish_and_clear();

    if let Err(e) = &result {
        error!(error = %e, "catalog fetch failed");
    }
    result
}

async fn run_browse(config: &Config, criteria: Criteria) -> Result<(), Box<dyn std::error::Error>> {
    let client = fetch::build_client(config.request_timeout())?;

    let mut app = App::new(criteria);
    app.begin_loading();

    // The single fetch of the session; the UI keeps drawing while it runs
    let (tx, rx) = oneshot::channel();
    let url = config.api_url.clone();
    tokio::spawn(async move {
        let result = fetch::fetch_catalog(&client, &url).await;
        let _ = tx.send(result);
    });

    // Init terminal (also installs a panic hook that restores it)
    let mut terminal = ratatui::init();

    let size = terminal.size()?;
    app.update_viewport(size.width, size.height);

    // Main loop
    let result = run_app(&mut terminal, &mut app, rx);

    // Restore terminal
    ratatui::restore();

    result?;
    info!("exiting");
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    rx: oneshot::Receiver<Result<Vec<show::ShowRecord>, FetchFailure>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pending = Some(rx);

    loop {
        if let Some(rx) = pending.as_mut() {
            match rx.try_recv() {
                Ok(result) => {
                    app.finish_loading(result);
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    app.finish_loading(Err(FetchFailure::Interrupted));
                    pending = None;
                }
            }
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short timeout so the fetch result is picked up promptly
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(width, height) => {
                    app.update_viewport(width, height);
                }
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = true;
        return;
    }

    // Nothing to interact with until the catalog is loaded
    if !app.is_loaded() {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.should_quit = true;
        }
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }
    match app.view {
        View::List => handle_list_key(app, key),
        View::Detail => handle_detail_key(app, key),
        View::Genres => handle_genres_key(app, key),
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Down | KeyCode::Char('j') => app.list_next(),
        KeyCode::Up | KeyCode::Char('k') => app.list_prev(),
        KeyCode::PageDown => app.list_page_down(),
        KeyCode::PageUp => app.list_page_up(),
        KeyCode::Home => app.list_first(),
        KeyCode::End => app.list_last(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('o') => app.cycle_sort(true),
        KeyCode::Char('O') => app.cycle_sort(false),
        KeyCode::Char('g') => app.open_genre_selector(),
        KeyCode::Char('a') => app.set_genre(GenreFilter::All),
        KeyCode::Esc => app.clear_search(),
        _ => {}
    }
}

fn handle_genres_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.view = View::List;
        }
        KeyCode::Down | KeyCode::Char('j') => app.genre_next(),
        KeyCode::Up | KeyCode::Char('k') => app.genre_prev(),
        KeyCode::Enter => app.confirm_genre(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::PageDown => app.scroll_page_down(),
        KeyCode::PageUp => app.scroll_page_up(),
        _ => {}
    }
}
