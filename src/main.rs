use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use groundwater_types::Dataset;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use groundwater_globe::data::{export::write_export, generate_dataset, WaterLevelRange};
use groundwater_globe::{
    events, logging, spawn_loader, ui, App, DataSource, FileSource, GeneratedSource,
    LoaderOptions, Settings, ThemeChoice,
};

/// Consecutive failed draws before giving up.
const MAX_DRAW_FAILURES: u32 = 5;

#[derive(Parser, Debug)]
#[command(name = "groundwater-globe")]
#[command(about = "Interactive terminal globe for groundwater monitoring points")]
struct Args {
    /// Load points from a dataset JSON file instead of generating them
    #[arg(short, long, conflicts_with_all = ["count", "seed"])]
    file: Option<PathBuf>,

    /// Number of points to generate
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export the dataset to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Log file for the interactive UI
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,
}

impl Args {
    /// Apply command-line overrides on top of loaded settings.
    fn apply(&self, settings: &mut Settings) {
        if let Some(count) = self.count {
            settings.point_count = count;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(ref path) = self.log_file {
            settings.log_file = path.clone();
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        logging::init_stderr()?;
        return export_to_file(args.file.as_deref(), export_path, &settings);
    }

    logging::init_file(&settings.log_file)?;
    info!(?settings, "starting groundwater globe");

    match args.file {
        Some(ref path) => run_with_file(path, &settings),
        None if settings.loads_immediately() => run_with_generated(&settings),
        None => run_with_loader(&settings),
    }
}

/// Run with a file-based data source
fn run_with_file(path: &Path, settings: &Settings) -> Result<()> {
    let source = Box::new(FileSource::new(path));
    run_tui(source, settings)
}

/// Run with points generated on the UI thread at startup
fn run_with_generated(settings: &Settings) -> Result<()> {
    let source = Box::new(GeneratedSource::new(settings.point_count, settings.seed));
    run_tui(source, settings)
}

/// Run with generated data delivered by a background loader task
fn run_with_loader(settings: &Settings) -> Result<()> {
    // The runtime drives the loader while the TUI runs on this thread
    let rt = tokio::runtime::Runtime::new()?;

    let options = LoaderOptions {
        count: settings.point_count,
        seed: settings.seed,
        delay: settings.load_delay(),
    };
    let (source, handle) = rt.block_on(async { spawn_loader(options) });

    let result = run_tui(Box::new(source), settings);

    handle.abort();
    result
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: &Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, settings);
    let _ = app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, settings.tick_rate());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!(error = %e, "exiting after error");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let mut draw_failures = 0u32;

    while app.running {
        match terminal.draw(|frame| ui::draw(frame, app)) {
            Ok(_) => draw_failures = 0,
            Err(e) => {
                draw_failures += 1;
                warn!(error = %e, failures = draw_failures, "failed to draw frame");
                if draw_failures >= MAX_DRAW_FAILURES {
                    bail!("Terminal drawing failed repeatedly: {}", e);
                }
            }
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if let Some(event) = events::poll_event(timeout)? {
            events::handle_event(app, event);
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            app.tick(elapsed);
            if let Err(e) = app.reload_data() {
                warn!(error = %e, "failed to poll data source");
            }
            last_tick = Instant::now();
        }
    }

    info!("shutting down");
    Ok(())
}

/// Write a dataset, either loaded from `file` or freshly generated, to a
/// JSON export
fn export_to_file(file: Option<&Path>, export_path: &Path, settings: &Settings) -> Result<()> {
    let dataset = match file {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display()))?,
        None => generate_dataset(settings.point_count, settings.seed),
    };

    let points: Vec<_> = dataset.points.iter().collect();
    write_export(export_path, &points, &WaterLevelRange::full())?;

    info!(path = %export_path.display(), points = points.len(), "export written");
    println!(
        "Exported {} points to: {}",
        points.len(),
        export_path.display()
    );
    Ok(())
}
