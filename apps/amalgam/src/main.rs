//! Amalgam CLI.
//!
//! The `amalgam` command flattens a multi-file project into the single
//! source file that contest judges accept.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "amalgam")]
#[command(about = "Inline local #include \"*.hpp\" headers into one submission file")]
#[command(version)]
struct Cli {
    /// Project root; include paths resolve against it (defaults to current dir)
    #[arg(short = 'C', long, env = "AMALGAM_ROOT")]
    root: Option<PathBuf>,

    /// Main document, relative to the root
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Submission file to write, relative to the root
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Header extension that marks an include as local
    #[arg(long = "ext")]
    header_extension: Option<String>,

    /// Print the flattened document instead of writing the output file
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Report what flattening would do without writing anything
    #[arg(long)]
    check: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let mode = if cli.check {
        commands::Mode::Check
    } else if cli.stdout {
        commands::Mode::Stdout
    } else {
        commands::Mode::Write
    };

    commands::execute(commands::FlattenArgs {
        root: cli.root,
        input: cli.input,
        output: cli.output,
        header_extension: cli.header_extension,
        mode,
    })
}
