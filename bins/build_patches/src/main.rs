mod config;

use std::process::ExitCode;

use clap::Parser;
use config::Opts;
use ips_builder::{BuildOptions, Error, PatchBuilder, SystemHost};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = if verbose == 0 { "info" } else { "debug" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    init_logging(opts.verbose);

    let layout = match config::load_layout(&opts) {
        Ok(layout) => layout,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let builder = PatchBuilder::new(layout, SystemHost).with_options(BuildOptions {
        strict: opts.strict,
    });

    info!("Working in {}", builder.layout().resources.display());

    let report = match builder.run() {
        Ok(report) => report,
        Err(Error::MissingPrerequisite { prerequisite, path }) => {
            // Nothing was built, but this is not treated as a failed run.
            println!("{}", Error::MissingPrerequisite { prerequisite, path });
            if let Some(url) = prerequisite.download_hint() {
                println!("Please download the {} from {}", prerequisite, url);
            }
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    for failed in report.failures() {
        warn!(
            "{} did not build cleanly (assembler: {}, patch tool: {})",
            failed.source.display(),
            failed.assembler,
            failed.patcher
        );
    }
    info!("Built {} patch(es)", report.outcomes.len());

    if let Some(destination) = &opts.copy_to {
        if let Err(err) = builder.copy_patches(destination) {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
