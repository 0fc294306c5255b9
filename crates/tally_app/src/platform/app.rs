use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tally_engine::{export_counts, run_blocking, LogProgressSink};
use tally_logging::{level_for, tally_error, tally_info};

use super::cli::Cli;
use super::config::{self, FileConfig};
use super::logging::{self, LogDestination};
use super::render;

pub fn run_app() -> ExitCode {
    let cli = Cli::parse();

    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, level_for(cli.quiet, cli.verbose));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tally_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let file = match &cli.config {
        Some(path) => config::load(path)?,
        None => FileConfig::default(),
    };
    let settings = config::resolve(cli, file);
    tally_info!(
        "Counting words in {} with {} workers",
        settings.url,
        settings.pipeline.workers
    );

    let output = run_blocking(&settings.url, &settings.pipeline, &LogProgressSink)
        .with_context(|| format!("word count of {} failed", settings.url))?;

    if let Some(path) = &settings.output {
        export_counts(path, &output.counts, settings.top)
            .with_context(|| format!("failed to export counts to {}", path.display()))?;
    }

    if !cli.no_chart {
        let top = output.counts.top_n(settings.top);
        print!(
            "{}",
            render::bar_chart(&render::chart_title(settings.top), &top, cli.width)
        );
    }
    Ok(())
}
