use clap::{Parser, Subcommand};
use json_mapper_cli::commands::{templates_cmd, transform_cmd};
use json_mapper_cli::errors::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// json-mapper: reshape JSON documents with declarative mapping rules
#[derive(Parser)]
#[command(name = "json-mapper")]
#[command(about = "Reshape JSON documents with declarative mapping rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a mapping configuration to a source document
    Transform(transform_cmd::TransformArgs),

    /// List the templates available to transformations
    Templates(templates_cmd::TemplatesArgs),

    /// Show the CLI version
    Version,
}

fn run(command: &Commands) -> Result<(), Error> {
    match command {
        Commands::Transform(args) => transform_cmd::execute(args),
        Commands::Templates(args) => templates_cmd::execute(args),
        Commands::Version => {
            println!(
                "json-mapper version {}",
                option_env!("JSON_MAPPER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

fn main() {
    // Logs go to stderr so stdout carries only the transformed document.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("JSON_MAPPER_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli.command) {
        error!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
