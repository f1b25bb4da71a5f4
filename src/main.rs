mod flight;

use clap::Parser;
use cockpit::{CockpitConfig, CockpitWindow};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use flight::{drain_pending, spawn_stdin_reader, FlightDataSource};

/// Cockpit instrument panel.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Frame rate cap.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// TrueType/OpenType font for gauge labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Read JSON state snapshots from stdin, one per line, instead of the
    /// built-in demo flight.
    #[arg(long)]
    stdin: bool,

    /// Start with gauges movable and resizable.
    #[arg(long)]
    edit: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "starting");

    let config = CockpitConfig::builder()
        .window_width(args.width)
        .window_height(args.height)
        .max_framerate(args.fps)
        .start_in_edit_mode(args.edit)
        .maybe_font_path(args.font)
        .build();
    let window = CockpitWindow::new(config)?;

    if args.stdin {
        let receiver = spawn_stdin_reader();
        window.show(move |_| drain_pending(&receiver))?;
    } else {
        let mut source = FlightDataSource::new();
        window.show(move |elapsed| Some(source.next(elapsed)))?;
    }
    Ok(())
}
