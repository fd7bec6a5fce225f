use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use harfix_cli::commands;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "harfix")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Convert Firefox HAR captures into Chrome-compatible HAR files",
    long_about = "Harfix repairs HTTP Archive (HAR) files exported from Firefox so that tools \
                  expecting Chrome's conventions can import them: it rewrites string-typed \
                  numeric fields as numbers, fills in missing structure and timing phases, \
                  converts numeric timestamps to ISO-8601 text, and defaults absent MIME types."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, pretty)
    #[arg(short, long, global = true, default_value = "pretty")]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Firefox HAR file to a Chrome-compatible one
    Convert {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (defaults to <FILE>_chrome_compatible.har)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report the repairs a conversion would apply, without writing anything
    Check {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Convert { file, output } => commands::convert::execute(&file, output),
        Commands::Check { file } => commands::check::execute(&file, &cli.format),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            commands::completion::execute(shell, &mut cmd)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("harfix=debug,harfix_core=debug")
    } else {
        EnvFilter::new("harfix=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
