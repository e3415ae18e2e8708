use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = hostman::cli::Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = hostman::cli::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// RUST_LOG wins; otherwise warn, raised by each -v.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
