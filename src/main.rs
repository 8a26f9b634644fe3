//! # DroneASM
//!
//! Compile and fly DroneASM programs.
//!

mod term;

use clap::Parser;
use drone_asm::mach::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "droneasm")]
#[command(about = "Assembler and virtual machine for DroneASM")]
struct Cli {
    /// Program to run. Omit for an interactive session.
    file: Option<PathBuf>,

    /// Fly a Tello instead of the simulator
    #[arg(long)]
    live: bool,

    /// Compile only
    #[arg(long)]
    check: bool,

    /// Seconds TAKE_PIC waits for a camera frame
    #[arg(long, default_value_t = 10.0)]
    frame_timeout: f64,

    /// Directory for Tello command logs
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Also write pictures shown with DISPLAY to this directory
    #[arg(long)]
    show_dir: Option<PathBuf>,

    /// Print vehicle telemetry after each run
    #[arg(long)]
    telemetry: bool,

    /// Debug logging, unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::default();
    if cli.frame_timeout.is_finite() {
        config.frame_timeout = Duration::from_secs_f64(cli.frame_timeout.max(0.0).min(3600.0));
    }
    if let Some(dir) = cli.log_dir {
        config.tello.log_dir = Some(dir);
    }
    let options = term::Options {
        live: cli.live,
        check: cli.check,
        telemetry: cli.telemetry,
        show_dir: cli.show_dir,
    };
    let code = match cli.file {
        Some(path) => term::run_file(&path, config, &options),
        None => term::main(config, &options),
    };
    std::process::exit(code);
}
