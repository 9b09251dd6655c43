use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use appicon_gen::{IconGenerator, IconLayout};

#[derive(Parser)]
#[command(name = "appicon-gen")]
#[command(about = "Generate PNG and Windows ICO icons from appicon.svg")]
struct Cli {
    /// Asset directory containing appicon.svg (defaults to the crate's build/ directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Emit debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let layout = match cli.dir {
        Some(dir) => IconLayout::new(dir),
        None => IconLayout::default(),
    };
    tracing::debug!(event = "args", dir = %layout.dir().display());

    if let Err(e) = IconGenerator::new(layout).run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
