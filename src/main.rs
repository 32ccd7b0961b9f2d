//! Zhuyin Lens - command line driver
//!
//! Looks up readings and replays recorded recognition sessions through the
//! annotation engine, printing the resulting draw commands.

mod replay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use zhuyin_lens::analysis::run_tick;
use zhuyin_lens::config::{self, AppConfig};
use zhuyin_lens::overlay::{render_frame, OverlayController, OverlayState};
use zhuyin_lens::vision::readings_for;
use zhuyin_lens::{storage, PhoneticDictionary};

/// Zhuyin Lens - zhuyin annotation engine
#[derive(Parser, Debug)]
#[command(name = "zhuyin-lens")]
#[command(about = "Lays out zhuyin annotations over recognized Chinese text")]
struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Zhuyin dictionary TSV (overrides the configured path)
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the preferred reading of every character in TEXT
    Lookup {
        text: String,
    },
    /// Run a recorded session and print draw commands as JSON lines
    Replay {
        fixture: PathBuf,

        /// Tick index at which the hold gesture starts
        #[arg(long)]
        hold: Option<usize>,

        /// Tick index at which the hold gesture ends
        #[arg(long)]
        release: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_or_default_config(args.config.as_deref());

    let dictionary = load_dictionary(args.dictionary.as_deref(), &config)?;

    match args.command {
        Command::Lookup { text } => {
            for (character, reading) in readings_for(&text, &dictionary) {
                println!("{}\t{}", character, reading);
            }
        }
        Command::Replay { fixture, hold, release } => {
            run_replay(&fixture, hold, release, &dictionary, &config)?;
        }
    }

    Ok(())
}

/// Load configuration from file or fall back to defaults
fn load_or_default_config(path: Option<&Path>) -> AppConfig {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => storage::get_config_dir()
            .ok()
            .map(|dir| dir.join(storage::CONFIG_FILE)),
    };

    if let Some(path) = path.filter(|p| p.exists()) {
        match config::load_config(&path) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", path);
                return config;
            }
            Err(e) => warn!("Ignoring invalid configuration {:?}: {}", path, e),
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

fn load_dictionary(cli_path: Option<&Path>, config: &AppConfig) -> Result<PhoneticDictionary> {
    let path = match cli_path.or(config.dictionary.path.as_deref()) {
        Some(path) => path.to_path_buf(),
        None => storage::default_dictionary_path()?,
    };

    let dictionary = PhoneticDictionary::new();
    dictionary
        .load_path(&path)
        .with_context(|| format!("Failed to load dictionary {:?}", path))?;
    Ok(dictionary)
}

fn run_replay(
    fixture_path: &Path,
    hold: Option<usize>,
    release: Option<usize>,
    dictionary: &PhoneticDictionary,
    config: &AppConfig,
) -> Result<()> {
    let fixture = replay::load_fixture(fixture_path)?;
    let controller = OverlayController::new();
    let render_options = config.render_options();
    let analysis_options = config.analysis_options();
    let released = Arc::new(AtomicUsize::new(0));

    info!("Replaying {} ticks from {:?}", fixture.ticks.len(), fixture_path);

    for (index, tick) in fixture.ticks.iter().enumerate() {
        if hold == Some(index) {
            controller.press();
        }
        if release == Some(index) {
            controller.release();
        }

        let counter = released.clone();
        let lease = tick.lease(&fixture.camera, move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        if analysis_options.skip_while_frozen && controller.pause_flag().is_paused() {
            drop(lease);
        } else {
            controller.publish(run_tick(lease, tick, dictionary, &analysis_options));
        }

        let state = match controller.state() {
            OverlayState::Live => "live",
            OverlayState::Frozen => "frozen",
        };
        let commands = render_frame(&controller.active_frame(), &render_options);
        let line = serde_json::json!({
            "tick": index,
            "state": state,
            "commands": commands,
        });
        println!("{}", line);
    }

    info!(
        "Replay complete: {} ticks, {} frames released",
        fixture.ticks.len(),
        released.load(Ordering::Relaxed)
    );

    Ok(())
}
