//! irjs command-line tool
//!
//! Lowers a JSON-encoded IR module to JavaScript.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use irjs_cli::arguments::split_internal_arguments;
use irjs_cli::messages::color_choice;
use irjs_cli::{
    CompilerConfig, InternalArgumentsParser, LanguageFeature, MessageCollector,
    PrintingMessageCollector,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "irjs")]
#[command(about = "Lower typed IR modules to JavaScript", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower an IR module (JSON) to JavaScript
    Lower {
        /// Input IR file
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Config file (defaults to ./irjs.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Lower declarations on worker threads
        #[arg(long)]
        parallel: bool,
        /// Number of worker threads
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Spaces per indentation level
        #[arg(long)]
        indent: Option<usize>,
    },

    /// List language features accepted by -XX:+Feature / -XX:-Feature
    Features,
}

fn main() -> Result<()> {
    let (args, internal) = split_internal_arguments(std::env::args());
    let cli = Cli::parse_from(args);

    setup_logging(cli.verbose, cli.quiet);

    let mut collector = PrintingMessageCollector::new(color_choice());
    let toggles = InternalArgumentsParser::new(&mut collector)
        .parse_all(internal.iter().map(String::as_str));

    match cli.command {
        Commands::Lower {
            input,
            output,
            config,
            parallel,
            jobs,
            indent,
        } => {
            let working_dir = std::env::current_dir().context("failed to read working directory")?;
            let mut compiler_config = CompilerConfig::discover(config.as_deref(), &working_dir)?;
            compiler_config.apply_overrides(parallel, jobs, indent)?;

            let features = compiler_config.resolve_features(&toggles, &mut collector);
            for (feature, state) in &features {
                tracing::debug!(%feature, %state, "language feature");
            }

            if collector.has_errors() {
                std::process::exit(1);
            }

            match output {
                Some(path) => irjs_cli::compile_to_file(&input, &path, &compiler_config)?,
                None => print!("{}", irjs_cli::compile_file(&input, &compiler_config)?),
            }
        }

        Commands::Features => {
            if collector.has_errors() {
                std::process::exit(1);
            }
            for feature in LanguageFeature::ALL {
                println!("{}", feature);
            }
        }
    }

    Ok(())
}

fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("info"),
                1 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .init();
}
