mod cli;
mod config;
mod core;
mod logging;
mod utils;

use crate::cli::{Cli, Commands, OutputArgs};
use crate::core::RunSource;
use crate::core::score::RunMetrics;
use anyhow::Result;
use clap::Parser;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Show(args) => render(RunSource::Harness(&args.input), &args.output),
        Commands::Score(args) => {
            let metrics = RunMetrics::from_signed(
                args.passed && !args.failed,
                args.elapsed,
                args.commits,
            )?;
            render(RunSource::Metrics(metrics), &args.output)
        }
        Commands::Init(args) => {
            if args.config.is_some() {
                eprintln!(
                    "warning: --config is ignored by `fixboard init`; writing ./{}",
                    config::CONFIG_FILE_NAME
                );
            }

            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn render(source: RunSource<'_>, output: &OutputArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(output.config.as_deref(), &cwd)?;
    if let Some(path) = &loaded.source {
        tracing::info!(config = %path.display(), "loaded config");
    }

    let report = core::run_report(source, &loaded.config)?;

    let output_json = output.json || loaded.config.general.json;
    if output_json {
        let json_report = core::report::JsonReport::from(&report);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        core::report::print_human(&report, &loaded.config);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}
