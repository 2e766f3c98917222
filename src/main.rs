use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, Level};

use microplastic_dashboard::config::{DashboardConfig, ThemeChoice};
use microplastic_dashboard::ui::{self, Theme};
use microplastic_dashboard::{
    events, export, App, CsvFileSource, ReadingSource, SimulatedSensor,
};

#[derive(Parser, Debug)]
#[command(name = "microplastic-dashboard")]
#[command(about = "Terminal dashboard for simulated microplastic sensor readings")]
struct Args {
    /// Path to a config file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of readings per page load
    #[arg(short = 'n', long)]
    readings: Option<usize>,

    /// Seed the simulated sensor for reproducible readings
    #[arg(short, long, conflicts_with = "file")]
    seed: Option<u64>,

    /// Replay readings from a previously downloaded CSV instead of simulating
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Write the CSV download to this path and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Print the rendered page as JSON and exit
    #[arg(long)]
    json: bool,

    /// Directory the 'd' key downloads into
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Regenerate the page every N seconds (0 disables)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Append logs to this file (the interactive page logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn headless(&self) -> bool {
        self.export.is_some() || self.json
    }

    /// Layer command-line flags over the loaded configuration.
    fn apply(&self, config: &mut DashboardConfig) {
        if let Some(readings) = self.readings {
            config.generator.readings = readings;
        }
        if self.seed.is_some() {
            config.generator.seed = self.seed;
        }
        if let Some(ref dir) = self.export_dir {
            config.export.directory = Some(dir.clone());
        }
        if let Some(refresh) = self.refresh {
            config.display.refresh_secs = refresh;
        }
        if let Some(theme) = self.theme {
            config.display.theme = theme;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut config = DashboardConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;
    info!(?config, "configuration loaded");

    let source: Box<dyn ReadingSource> = match args.file {
        Some(ref path) => {
            let source = CsvFileSource::new(path);
            info!(path = %source.path().display(), "replaying downloaded readings");
            Box::new(source)
        }
        None => Box::new(SimulatedSensor::seeded(
            config.generator.clone(),
            config.generator.seed,
        )),
    };

    // Handle headless modes (non-interactive)
    if args.headless() {
        return run_headless(&args, source, &config);
    }

    run_tui(source, &config)
}

/// Route tracing output to a file, to stderr in headless mode, or nowhere.
///
/// The interactive page owns stdout and stderr, so it only logs with
/// `--log-file`.
fn init_logging(args: &Args) -> Result<()> {
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };

    if let Some(ref path) = args.log_file {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.headless() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

/// Load one page and emit it without starting the terminal UI.
fn run_headless(
    args: &Args,
    source: Box<dyn ReadingSource>,
    config: &DashboardConfig,
) -> Result<()> {
    let mut app = App::new(
        source,
        config.alerts,
        config.export.clone(),
        Theme::dark(),
    );
    app.reload()?;

    let Some(ref view) = app.view else {
        anyhow::bail!("No data to export");
    };

    if let Some(ref path) = args.export {
        write_download(path, &view.download.content)?;
        eprintln!("Exported {} readings to: {}", view.table.rows.len(), path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(view)?);
    }

    Ok(())
}

fn write_download(path: &Path, content: &str) -> Result<()> {
    export::write_csv(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "csv exported");
    Ok(())
}

/// Run the TUI with the given reading source
fn run_tui(source: Box<dyn ReadingSource>, config: &DashboardConfig) -> Result<()> {
    // Resolve the theme before raw mode; detection queries the terminal
    let theme = Theme::from_choice(config.display.theme);

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

    // Create app and load the first page
    let mut app = App::new(source, config.alerts, config.export.clone(), theme);
    let _ = app.reload();

    let refresh = match config.display.refresh_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh: Option<Duration>,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh the page periodically
        if let Some(interval) = refresh {
            if last_refresh.elapsed() >= interval {
                let _ = app.reload();
                last_refresh = Instant::now();
            }
        }
    }

    info!(pages = app.page_loads, "dashboard closed");
    Ok(())
}
