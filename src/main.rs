use clap::Parser;
use log::{debug, warn};
use snafu::ErrorCompat;

mod args;
mod tracker;

fn main() {
    let args = args::Args::parse();
    // Values already set in the environment win over the .env file.
    let dotenv = dotenvy::dotenv();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    if let Ok(p) = dotenv {
        debug!("main: loaded environment from {}", p.display());
    }
    debug!("main: args: {:?}", args);

    if let Err(e) = tracker::run_tracker(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(s) = source {
            eprintln!("  caused by: {}", s);
            source = std::error::Error::source(s);
        }
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(if e.is_configuration() { 2 } else { 1 });
    }
}
