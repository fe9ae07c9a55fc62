use clap::Parser;
use log::{debug, error};

mod args;
mod rank;

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::builder()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();
    }
    debug!("args: {:?}", args);

    if args.catalog {
        rank::catalog::print_catalog();
        return;
    }

    if let Err(e) = rank::run_ranking(&args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
