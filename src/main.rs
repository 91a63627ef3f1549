use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
    tty::IsTty,
};
use flick::{
    app,
    config::{Config, ConfigStore, FileConfigStore},
    game::Game,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    fs::File,
    io::{self, stdin, Stdout},
    path::PathBuf,
    time::Instant,
};

/// click shrinking targets against the clock
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal aim trainer: click the targets before the session runs out. \
                  Every hit shrinks the target and moves it elsewhere; accuracy and reaction \
                  time are tracked for the whole session."
)]
pub struct Cli {
    /// session length in seconds
    #[clap(short = 's', long)]
    secs: Option<u64>,

    /// number of targets on the field
    #[clap(short = 't', long)]
    targets: Option<usize>,

    /// frame rate cap
    #[clap(long)]
    fps: Option<u32>,

    /// seed for reproducible target placement
    #[clap(long)]
    seed: Option<u64>,

    /// smallest target radius, in playfield pixels
    #[clap(long)]
    min_radius: Option<u32>,

    /// largest target radius, in playfield pixels
    #[clap(long)]
    max_radius: Option<u32>,

    /// minimum distance between a target's center and the playfield edge
    #[clap(long)]
    margin: Option<u32>,

    /// factor applied to a target's radius on every hit
    #[clap(long)]
    shrink: Option<f64>,

    /// hits removed per miss (0 or negative, e.g. -1)
    #[clap(long, allow_negative_numbers = true)]
    miss_penalty: Option<i32>,

    /// playfield width in logical pixels
    #[clap(long)]
    width: Option<u32>,

    /// playfield height in logical pixels
    #[clap(long)]
    height: Option<u32>,

    /// read settings from this file instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the resolved settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// write log records to this file (level from RUST_LOG, default info)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line values win over whatever the config file says
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(v) = self.secs {
            cfg.session_secs = v;
        }
        if let Some(v) = self.targets {
            cfg.target_count = v;
        }
        if let Some(v) = self.fps {
            cfg.fps = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = Some(v);
        }
        if let Some(v) = self.min_radius {
            cfg.min_radius = v;
        }
        if let Some(v) = self.max_radius {
            cfg.max_radius = v;
        }
        if let Some(v) = self.margin {
            cfg.spawn_margin = v;
        }
        if let Some(v) = self.shrink {
            cfg.hit_shrink = v;
        }
        if let Some(v) = self.miss_penalty {
            cfg.miss_penalty = v;
        }
        if let Some(v) = self.width {
            cfg.width = v;
        }
        if let Some(v) = self.height {
            cfg.height = v;
        }
        cfg
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

/// The alternate screen owns the terminal, so records only go to a file.
fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let env = env_logger::Env::default();
    let mut builder = match log_file {
        Some(path) => {
            let mut builder = env_logger::Builder::from_env(env.default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
            builder
        }
        None => env_logger::Builder::from_env(env.default_filter_or("off")),
    };
    builder.format_timestamp_millis();
    builder.try_init()?;
    Ok(())
}

/// Raw mode, alternate screen and mouse capture; undone again if any step fails
fn setup_terminal(title: &str) -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let entered = execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(title)
    )
    .and_then(|_| {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        Ok(terminal)
    });
    if entered.is_err() {
        if let Err(e) = restore_terminal() {
            log::error!("failed to restore terminal: {}", e);
        }
    }
    entered
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let store = cli.config_store();
    let config = cli.apply(store.load());
    if let Err(e) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e).exit();
    }
    if cli.save_config {
        store.save(&config)?;
        log::info!("saved settings to {}", store.path().display());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::from_hz(config.fps));
    let title = config.title.clone();
    let mut game = Game::new(config, Instant::now());

    let mut terminal = setup_terminal(&title)?;
    let result = app::run(&mut terminal, &mut game, &mut runner);
    restore_terminal()?;

    result?;
    Ok(())
}
