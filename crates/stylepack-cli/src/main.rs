//! stylepack CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::EngineArgs;

#[derive(Parser)]
#[command(name = "stylepack")]
#[command(version)]
#[command(about = "Resolve, expand and compile stylesheets with dependency tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a stylesheet to CSS (SCSS via grass)
    Compile {
        /// Root stylesheet
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        /// Directory for the on-disk compile cache
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Minify the output
        #[arg(long)]
        minified: bool,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Print the stylesheet with every import expanded
    Expand {
        /// Root stylesheet
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// List the files a stylesheet depends on, root first
    Deps {
        /// Root stylesheet
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        /// Print file-digest:// URIs instead of paths
        #[arg(long)]
        uris: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stylepack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            engine,
            cache_dir,
            minified,
            output,
        } => commands::compile::execute(commands::compile::CompileArgs {
            input,
            engine,
            cache_dir,
            minified,
            output,
        }),
        Commands::Expand { input, engine } => commands::expand::execute(&input, &engine),
        Commands::Deps {
            input,
            engine,
            uris,
        } => commands::deps::execute(&input, &engine, uris),
    }
}
