mod run;

use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use zoomy_core::{ConnectorKind, Options};

/// Rewrite graph image URLs the way the zoomy widget does.
#[derive(Debug, Parser)]
#[command(name = "zoomy", version)]
pub struct Cli {
    #[command(flatten)]
    pub widget: WidgetArgs,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct WidgetArgs {
    /// JSON file with widget options; flags below override it.
    #[arg(long, global = true)]
    pub options: Option<PathBuf>,

    /// Backend URL dialect: plain, smokeping, cricket or rrdli.
    #[arg(long, global = true)]
    pub connector: Option<ConnectorKind>,

    #[arg(long, global = true)]
    pub zoom_factor: Option<f64>,

    #[arg(long, global = true)]
    pub minrange: Option<i64>,

    #[arg(long, global = true)]
    pub maxrange: Option<i64>,

    #[arg(long, global = true)]
    pub margin_left: Option<f64>,

    #[arg(long, global = true)]
    pub margin_right: Option<f64>,

    /// Rendered image width in pixels.
    #[arg(long, global = true, default_value_t = 697.0)]
    pub width: f64,

    /// Unix time the image was loaded at; defaults to the current time.
    #[arg(long, global = true)]
    pub now: Option<i64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the timespan a graph URL displays.
    Parse { url: String },

    /// Print the timestamp under an image x-coordinate.
    At { url: String, x: f64 },

    /// Zoom by wheel steps around an x-coordinate (positive zooms in).
    Zoom {
        url: String,
        #[arg(long)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        steps: i32,
    },

    /// Drag the graph from one x-coordinate to another.
    Pan {
        url: String,
        #[arg(long)]
        from: f64,
        #[arg(long)]
        to: f64,
    },

    /// Point a graph URL at an explicit window.
    Update {
        url: String,
        #[arg(long, allow_hyphen_values = true)]
        start: i64,
        #[arg(long, allow_hyphen_values = true)]
        end: i64,
    },
}

impl WidgetArgs {
    /// Options from `--options`, or the defaults, with flag overrides applied.
    pub fn load_options(&self) -> Result<Options> {
        let mut options = match &self.options {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Options::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
            }
            None => Options::default(),
        };
        if let Some(connector) = self.connector {
            options.connector = connector;
        }
        if let Some(zoom_factor) = self.zoom_factor {
            options.zoom_factor = zoom_factor;
        }
        if let Some(minrange) = self.minrange {
            options.minrange = minrange;
        }
        if self.maxrange.is_some() {
            options.maxrange = self.maxrange;
        }
        if let Some(margin_left) = self.margin_left {
            options.margin_left = margin_left;
        }
        if let Some(margin_right) = self.margin_right {
            options.margin_right = margin_right;
        }
        options.validate()?;
        Ok(options)
    }

    pub fn now(&self) -> Result<i64> {
        match self.now {
            Some(now) => Ok(now),
            None => {
                let elapsed = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .context("system clock is before the Unix epoch")?;
                Ok(elapsed.as_secs() as i64)
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let output = run::run(&cli)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
