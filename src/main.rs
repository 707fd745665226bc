use clap::Parser;
use linesift::{run, Cli, Config, Error};
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr so the data stream on stdout stays clean;
    // quiet unless RUST_LOG asks for more.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match Config::resolve(cli) {
        Ok(config) => config,
        Err(err) => fail(&err),
    };
    if let Err(err) = run(&config) {
        fail(&err);
    }
}

/// Fatal-path diagnostics go to standard output, with the process
/// exiting nonzero; partial output already written is preserved.
fn fail(err: &Error) -> ! {
    println!("{err}");
    std::process::exit(1);
}
