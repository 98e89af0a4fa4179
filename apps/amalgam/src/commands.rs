//! Flatten command.
//!
//! Loads the project configuration, applies CLI overrides, and either writes
//! the submission file, prints it, or only reports what would happen.

use amalgam::{ConfigOverrides, LoadedConfig, flatten_document, flatten_project, load_with_overrides};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    Stdout,
    Check,
}

#[derive(Debug)]
pub struct FlattenArgs {
    pub root: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub header_extension: Option<String>,
    pub mode: Mode,
}

pub fn execute(args: FlattenArgs) -> Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let overrides = ConfigOverrides {
        input: args.input,
        output: args.output,
        header_extension: args.header_extension,
    };

    let loaded = load_with_overrides(&root, &overrides)
        .with_context(|| format!("Failed to load configuration for {}", root.display()))?;
    report_config(&loaded);

    match args.mode {
        Mode::Write => cmd_write(&loaded),
        Mode::Stdout => cmd_stdout(&loaded),
        Mode::Check => cmd_check(&loaded),
    }
}

fn report_config(loaded: &LoadedConfig) {
    if let Some(source) = &loaded.source {
        tracing::info!("Using config file {}", source.display());
    }
    for warning in &loaded.warnings {
        eprintln!("{} {}", "WARN".yellow(), warning);
    }
}

fn cmd_write(loaded: &LoadedConfig) -> Result<()> {
    let outcome = flatten_project(&loaded.config).with_context(|| {
        format!(
            "Failed to flatten {}",
            loaded.config.input_path().display()
        )
    })?;

    println!(
        "{} Wrote {} ({} lines, {} includes, {} rounds)",
        "OK".green(),
        outcome.output.display().to_string().cyan(),
        outcome.lines,
        outcome.inlined,
        outcome.rounds
    );
    Ok(())
}

fn cmd_stdout(loaded: &LoadedConfig) -> Result<()> {
    let report = flatten_document(&loaded.config).with_context(|| {
        format!(
            "Failed to flatten {}",
            loaded.config.input_path().display()
        )
    })?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.document.render().as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush().context("Failed to write to stdout")?;
    Ok(())
}

fn cmd_check(loaded: &LoadedConfig) -> Result<()> {
    let report = flatten_document(&loaded.config).with_context(|| {
        format!(
            "Failed to flatten {}",
            loaded.config.input_path().display()
        )
    })?;

    if report.inlined == 0 {
        println!(
            "{} {} has no local includes",
            "OK".green(),
            loaded.config.input_path().display()
        );
    } else {
        println!(
            "{} {} would inline {} includes in {} rounds ({} lines) into {}",
            "OK".green(),
            loaded.config.input_path().display(),
            report.inlined,
            report.rounds,
            report.document.len(),
            loaded.config.output_path().display().to_string().cyan()
        );
    }
    Ok(())
}
