//! sqldoc CLI
//!
//! Checks the SQL examples and structure of markdown documentation.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sqldoc::{CodeBlock, Config, Validator};
use sqldoc_core::ast::render_script;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Validate the SQL examples in markdown documentation.
#[derive(Parser)]
#[command(name = "sqldoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./sqldoc.toml when present).
    #[arg(short, long, env = "SQLDOC_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every SQL example and the document structure.
    Check {
        /// SQL dialect to parse with.
        #[arg(short, long, env = "SQLDOC_DIALECT")]
        dialect: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Fail on lint warnings too.
        #[arg(long)]
        strict: bool,

        /// Require every statement to end with `;`.
        #[arg(long)]
        require_semicolon: bool,

        /// Language tag marking SQL blocks (repeatable).
        #[arg(short, long = "lang")]
        languages: Vec<String>,

        /// Markdown files to check.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List the SQL blocks of a document.
    Extract {
        /// Language tag marking SQL blocks (repeatable).
        #[arg(short, long = "lang")]
        languages: Vec<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Markdown file.
        file: PathBuf,
    },

    /// Print the canonical SQL of every example that parses.
    Render {
        /// SQL dialect to parse with.
        #[arg(short, long, env = "SQLDOC_DIALECT")]
        dialect: Option<String>,

        /// Markdown file.
        file: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_ascii_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let mut config = Config::discover(cli.config.as_deref(), &cwd)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Check {
            dialect,
            format,
            strict,
            require_semicolon,
            languages,
            files,
        } => {
            if let Some(dialect) = dialect {
                config.dialect = dialect;
            }
            if !languages.is_empty() {
                config.languages = languages;
            }
            config.require_semicolon |= require_semicolon;
            debug!(?config, "effective configuration");

            let validator = Validator::new(&config)?;
            let report = validator.check_files(files.as_slice())?;
            match format {
                Format::Text => report.render_text(&mut out, cli.verbose)?,
                Format::Json => report.render_json(&mut out)?,
            }
            out.flush()?;

            Ok(if report.has_failures(strict) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }

        Commands::Extract {
            languages,
            format,
            file,
        } => {
            if !languages.is_empty() {
                config.languages = languages;
            }
            let validator = Validator::new(&config)?;
            let markdown = sqldoc::read_document(&file)?;
            let blocks: Vec<CodeBlock> = validator.extract(&markdown).collect();

            match format {
                Format::Text => {
                    for block in &blocks {
                        writeln!(
                            out,
                            "-- {}:{} [{}]",
                            file.display(),
                            block.fence_line,
                            block.language
                        )?;
                        write!(out, "{}", block.content)?;
                    }
                }
                Format::Json => {
                    #[derive(Serialize)]
                    struct Extracted<'a> {
                        path: &'a std::path::Path,
                        blocks: &'a [CodeBlock],
                    }
                    let extracted = Extracted {
                        path: &file,
                        blocks: &blocks,
                    };
                    serde_json::to_writer_pretty(&mut out, &extracted)
                        .context("failed to write JSON")?;
                    writeln!(out)?;
                }
            }
            out.flush()?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Render { dialect, file } => {
            if let Some(dialect) = dialect {
                config.dialect = dialect;
            }
            let validator = Validator::new(&config)?;
            let markdown = sqldoc::read_document(&file)?;

            let mut failed = false;
            for block in validator.extract(&markdown) {
                if validator.checker().is_skipped(&block) {
                    continue;
                }
                match validator.checker().parse(&block) {
                    Ok(statements) if !statements.is_empty() => {
                        writeln!(out, "-- {}:{}", file.display(), block.fence_line)?;
                        writeln!(out, "{}", render_script(&statements))?;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        failed = true;
                        eprintln!(
                            "{}:{}:{}: {}",
                            file.display(),
                            err.line,
                            err.column,
                            err.message
                        );
                    }
                }
            }
            out.flush()?;
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
