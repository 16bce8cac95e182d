//! qa-embed entrypoint.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;

use qa_embed::cli::{AskArgs, AugmentArgs, Cli, Commands};
use qa_embed::config::Config;
use qa_embed::constants::ERROR_PREFIX;
use qa_embed::dataset::OutputTarget;
use qa_embed::{pipeline, retrieval};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{ERROR_PREFIX}: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;

    match cli.command {
        Some(Commands::Ask(args)) => {
            args.model.apply(&mut config);
            if let Some(ref path) = args.responses {
                config.responses_path = Some(path.clone());
            }
            ask(&config, &args)
        }
        None => {
            cli.augment.model.apply(&mut config);
            augment(&config, cli.augment)
        }
    }
}

fn augment(config: &Config, args: AugmentArgs) -> anyhow::Result<()> {
    let input = args.input.context("missing input path")?;
    let target = OutputTarget::resolve(args.output_file, &input);

    tracing::info!(
        input = %input.display(),
        target = ?target,
        encoder = ?config.encoder_path,
        ner = ?config.ner_path,
        "qa-embed starting"
    );

    let count = pipeline::run(config, &input, &target, args.pretty)?;

    tracing::info!(records = count, "qa-embed finished");
    Ok(())
}

fn ask(config: &Config, args: &AskArgs) -> anyhow::Result<()> {
    let reply = retrieval::ask(config, &args.index, &args.query)?;
    println!("{reply}");
    Ok(())
}
