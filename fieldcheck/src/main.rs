//! Declarative form field validation CLI.
//!
//! Loads a rule set (`fieldcheck.toml`, or the built-in sign-up form when the
//! file is missing), validates a snapshot of field values, and prints one
//! verdict per field.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use fieldcheck::check::{CheckRequest, run_check};
use fieldcheck::exit_codes;
use fieldcheck::forms::signup_form;
use fieldcheck::io::rules_file::{DEFAULT_RULES_PATH, load_rules, write_rules};
use fieldcheck::logging;
use fieldcheck::presenter::{Format, render_report, render_rules};

#[derive(Parser)]
#[command(
    name = "fieldcheck",
    version,
    about = "Declarative form field validation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the built-in sign-up rule set to a rules file.
    Init {
        #[arg(long, default_value = DEFAULT_RULES_PATH)]
        rules: PathBuf,
        /// Overwrite an existing rules file.
        #[arg(short, long)]
        force: bool,
    },
    /// Check a rules file (schema + invariants) and list its fields.
    Rules {
        #[arg(long, default_value = DEFAULT_RULES_PATH)]
        rules: PathBuf,
    },
    /// Validate field values against the rule set.
    Check {
        #[arg(long, default_value = DEFAULT_RULES_PATH)]
        rules: PathBuf,
        /// JSON object of field id to value.
        #[arg(long)]
        values: Option<PathBuf>,
        /// Set a field value (repeatable); applied after `--values`.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        assignments: Vec<String>,
        /// Validate only this field.
        #[arg(long)]
        field: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // `--help` and `--version` come back as errors printed to stdout.
            let code = if err.use_stderr() {
                exit_codes::ERROR
            } else {
                exit_codes::OK
            };
            err.print().context("print usage")?;
            return Ok(code);
        }
    };
    match cli.command {
        Command::Init { rules, force } => cmd_init(&rules, force),
        Command::Rules { rules } => cmd_rules(&rules),
        Command::Check {
            rules,
            values,
            assignments,
            field,
            format,
        } => cmd_check(
            &CheckRequest {
                rules_path: &rules,
                values_path: values.as_deref(),
                assignments: &assignments,
                field: field.as_deref(),
            },
            format,
        ),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        println!("init: skipped existing {}", path.display());
        return Ok(exit_codes::OK);
    }
    let registry = signup_form().context("build built-in signup form")?;
    write_rules(path, &registry).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), fields = registry.len(), "rules written");
    println!("init: wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_rules(path: &Path) -> Result<i32> {
    let registry = load_rules(path)?;
    print!("{}", render_rules(&registry));
    Ok(exit_codes::OK)
}

fn cmd_check(request: &CheckRequest<'_>, format: Format) -> Result<i32> {
    let report = run_check(request)?;
    print!("{}", render_report(&report, format)?);
    Ok(report.exit_code())
}
