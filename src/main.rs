//! `maverpc` - Configuration tool for the JSON-RPC upstream router.
//!
//! Copyright (C) 2026 Maverick
//! SPDX-License-Identifier: AGPL-3.0-only
//!
//! Loads the router declaration, sets up logging at the declared level, and
//! checks, prints or scaffolds the configuration.

use clap::{Parser, Subcommand, ValueEnum};
use maverpc::config::{
    ConfigError, ConfigFormat, LogLevel, ProcessEnv, ResolvedConfig, RouterConfig,
    default_declaration, load_path, render, to_string,
};
use maverpc::logging::{self, LogFormat};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// File picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "maverpc.yaml";

#[derive(Debug, Parser)]
#[command(name = "maverpc", version, about)]
struct Cli {
    /// Declaration file (.yaml, .yml, .json or .toml).
    #[arg(short = 'c', long = "config", env = "MAVERPC_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate and resolve the declaration.
    Check,
    /// Print the resolved declaration with credentials redacted.
    Show {
        #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Write the built-in declaration to a file.
    Init {
        #[arg(short = 'o', long = "output", default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    match cli.command {
        Command::Init { output, force } => {
            let _guard = logging::init(LogLevel::Info, LogFormat::from_env());
            write_declaration(&output, force)
        }
        Command::Check => {
            let (resolved, _guard) = load(cli.config.as_deref())?;
            print_summary(&resolved);
            Ok(())
        }
        Command::Show { format } => {
            let (resolved, _guard) = load(cli.config.as_deref())?;
            let format = match format {
                OutputFormat::Yaml => ConfigFormat::Yaml,
                OutputFormat::Json => ConfigFormat::Json,
            };
            let text = render(&resolved, format)?;
            println!("{}", text.trim_end());
            Ok(())
        }
    }
}

/// Reads the declaration, starts logging at its level, then resolves it.
fn load(path: Option<&Path>) -> Result<(ResolvedConfig, WorkerGuard), ConfigError> {
    let (declaration, source) = read_declaration(path)?;
    let guard = logging::init(declaration.log_level, LogFormat::from_env());
    info!(source = %source, log_level = %declaration.log_level, "Declaration read");

    let resolved = declaration.resolve(&ProcessEnv)?;
    info!(
        projects = resolved.projects.len(),
        upstreams = resolved.upstream_count(),
        "Configuration resolved"
    );
    Ok((resolved, guard))
}

fn read_declaration(path: Option<&Path>) -> Result<(RouterConfig, String), ConfigError> {
    if let Some(path) = path {
        return Ok((load_path(path)?, path.display().to_string()));
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.exists() {
        return Ok((load_path(fallback)?, DEFAULT_CONFIG_FILE.to_string()));
    }

    Ok((default_declaration(), "built-in".to_string()))
}

fn write_declaration(output: &Path, force: bool) -> Result<(), ConfigError> {
    if !force && output.exists() {
        return Err(ConfigError::Io {
            path: output.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "file exists, pass --force to overwrite",
            ),
        });
    }

    let existed = output.exists();
    let format = ConfigFormat::from_path(output)?;
    let text = to_string(&default_declaration(), format)?;
    fs::write(output, text).map_err(|source| ConfigError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    if existed {
        warn!(path = %output.display(), "Overwrote existing declaration");
    }
    info!(path = %output.display(), %format, "Declaration written");
    println!("wrote {}", output.display());
    Ok(())
}

fn print_summary(resolved: &ResolvedConfig) {
    for project in &resolved.projects {
        for upstream in &project.upstreams {
            let batch = upstream.transport.batch.map_or_else(
                || "off".to_string(),
                |b| format!("{}@{}", b.max_size, humantime::format_duration(b.max_wait)),
            );
            println!(
                "{}/{}\t{}\tbatch={}\theaders={}",
                project.id,
                upstream.id,
                upstream.endpoint,
                batch,
                upstream.transport.headers.len()
            );
        }
    }
    println!("ok");
}
