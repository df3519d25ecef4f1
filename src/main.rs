extern crate env_logger;
#[macro_use]
extern crate log;

use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod file;
mod gc;
mod io;
mod matcher;
mod reader;
mod scan;
mod select;
mod seq;
mod summary;

use cli::Cli;
use config::RunConfig;
use scan::RecordScanner;

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("fastascan v{}", cli::VERSION);

    let config = RunConfig::try_from(&cli)?;
    config.log_plan();

    // time everything!
    let now = std::time::Instant::now();

    // the input is opened first, so that nothing is created if it is missing
    let mut tokens = reader::open(&config.input)?;
    let writer = io::get_writer(&config.output)?;
    let merge = match &config.merge {
        Some(path) => Some(io::merge_writer(path)?),
        None => None,
    };

    let report = RecordScanner::new(&config, writer, merge).scan(&mut tokens)?;

    let elapsed = now.elapsed().as_secs_f64();
    summary::log_stats(&report, elapsed);

    if let Some(path) = &config.summary {
        let run_summary = summary::summarize(&config, report, elapsed)?;
        summary::write_summary(path, &run_summary)?;
    }

    info!("Completed successfully.");
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));
    }
}
