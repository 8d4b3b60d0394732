//! padscan - row-scan controller detection driver
//!
//! Runs detection cycles against a simulated scan bus described by a config
//! file and prints what sits on every port and socket each frame.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod config;
mod error;
mod frame;
mod output;
mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use padscan_detect::Detector;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::CliError;
use crate::report::FrameReport;

#[derive(Parser)]
#[command(name = "padscan")]
#[command(about = "Detect controllers on a multiplexed row-scan bus")]
#[command(version)]
#[command(long_about = "
padscan scans every socket of a simulated row-scan bus once per frame,
classifies what is plugged into each port and socket, and prints the
detection matrix together with live button and axis readouts.

The bus is described by a YAML or JSON config file listing the pages each
socket answers with. Use --json for one machine-readable report per line.
")]
struct Cli {
    /// Config file with run settings and the bus fixture (YAML or JSON)
    #[arg(short, long, env = "PADSCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Number of frames to run (0 runs until interrupted)
    #[arg(short = 'n', long)]
    frames: Option<u64>,

    /// Frame period in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Show the self-test pattern instead of scanning the bus
    #[arg(long)]
    demo: bool,

    /// Output format (human-readable or JSON)
    #[arg(long, help = "Output in JSON format for machine parsing")]
    json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Effective settings after applying command-line overrides to the file.
#[derive(Debug, PartialEq, Eq)]
struct Settings {
    frames: u64,
    interval_ms: u64,
    demo: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            frames: cli.frames.unwrap_or(config.frames),
            interval_ms: cli.interval_ms.unwrap_or(config.interval_ms),
            demo: cli.demo || config.demo,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("padscan={log_level},padscan_detect={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = Settings::resolve(cli, &config);
    info!(
        frames = settings.frames,
        interval_ms = settings.interval_ms,
        demo = settings.demo,
        "starting detection"
    );

    let mut detector = Detector::new(config.bus.build()?);
    let mut sync = frame::pacer(settings.interval_ms);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut completed: u64 = 0;
    while settings.frames == 0 || completed < settings.frames {
        sync.wait_frame();

        // Frames are numbered by the counter before the cycle advances it.
        let frame = detector.frame();
        let report = if settings.demo {
            let result = *detector.run_demo_cycle();
            FrameReport::matrix(frame, &result)
        } else {
            detector.run_cycle();
            FrameReport::capture(frame, &mut detector)
        };
        debug!(frame = report.frame, "frame complete");

        if cli.json {
            output::write_frame_json(&mut out, &report)?;
        } else {
            output::write_frame_human(&mut out, &report)?;
        }
        out.flush().map_err(CliError::from)?;
        completed += 1;
    }

    Ok(())
}
