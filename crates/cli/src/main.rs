use std::env;
use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use pinview::{PinAttributes, RunOptions};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding where logs are written.
const LOG_PATH_ENV: &str = "PINVIEW_LOG_PATH";

#[derive(Debug, Parser)]
#[command(name = "pinview", version, about = "Enter a numeric PIN code in the terminal")]
struct Cli {
    /// Number of digit cells
    #[arg(short, long, default_value_t = 4)]
    length: usize,

    /// YAML or JSON attribute file describing the PIN row (overrides --length)
    #[arg(short, long, value_name = "FILE")]
    attributes: Option<PathBuf>,

    /// Theme id or alias (nord, nord_hc, ansi256)
    #[arg(long)]
    theme: Option<String>,

    /// Start with input disabled (toggle with Ctrl+E)
    #[arg(long)]
    disabled: bool,

    /// Title shown above the PIN row
    #[arg(long)]
    title: Option<String>,
}

impl Cli {
    fn attributes(&self) -> Result<PinAttributes> {
        match &self.attributes {
            Some(path) => PinAttributes::from_path(path).with_context(|| format!("failed to load attributes from {}", path.display())),
            None => Ok(PinAttributes::with_length(self.length)),
        }
    }

    fn run_options(&self) -> Result<RunOptions> {
        Ok(RunOptions {
            attributes: self.attributes()?,
            theme: self.theme.clone(),
            start_disabled: self.disabled,
            title: self.title.clone(),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(error) = init_tracing() {
        eprintln!("pinview: logging disabled: {error:#}");
    }

    let options = cli.run_options()?;
    info!(version = env!("CARGO_PKG_VERSION"), cells = options.attributes.length(), "pinview starting");
    let outcome = pinview::run(options).inspect_err(|err| error!(error = %format!("{err:#}"), "pinview session failed"))?;
    info!(entered = outcome.last_code.is_some(), "pinview exiting");
    if let Some(code) = outcome.last_code {
        println!("{code}");
    }
    Ok(())
}

fn log_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pinview")
        .join("pinview.log")
}

/// Log to a file; the terminal is owned by the TUI while it runs.
fn init_tracing() -> Result<()> {
    init_tracing_at(&log_path())
}

fn init_tracing_at(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
