//! CLI entry point for rpe.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `rpe-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use rpe_app::{
    EvaluateInput, ExplainOutput, format_explanation, format_not_found, format_policies,
    list_policies, parse_report_json, render_markdown, run_evaluate, run_explain,
    runtime_error_report, serialize_report, verdict_exit_code,
};
use rpe_settings::Overrides;
use std::collections::BTreeMap;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rpe",
    version,
    about = "Evaluate cloud resource snapshots against security policies"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate resource snapshots and write a JSON report.
    Evaluate {
        /// Resource snapshots: a JSON object, a JSON array, or JSON Lines.
        #[arg(long)]
        resources: Utf8PathBuf,

        /// Path to config (TOML, or JSON). A missing file means defaults.
        #[arg(long, default_value = "rpe.toml")]
        config: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/rpe/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/rpe/report.md")]
        markdown_out: Utf8PathBuf,

        /// Override fail_on (error|warning).
        #[arg(long)]
        fail_on: Option<String>,

        /// Extra exclusion label, `key=value`. Repeatable.
        #[arg(long = "exclude-label", value_parser = parse_label)]
        exclude_labels: Vec<(String, String)>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/rpe/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a policy id or code with remediation guidance.
    Explain {
        /// The policy id (e.g. "bigquery.dataset.no_authenticated_access") or code.
        identifier: String,
    },

    /// List registered policies and the resource types they apply to.
    Policies,

    /// Print the JSON Schema of the config file.
    ConfigSchema,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Evaluate {
            resources,
            config,
            report_out,
            write_markdown,
            markdown_out,
            fail_on,
            exclude_labels,
        } => cmd_evaluate(EvaluateArgs {
            resources,
            config,
            report_out,
            write_markdown,
            markdown_out,
            overrides: Overrides {
                fail_on,
                exclude_labels: exclude_labels.into_iter().collect::<BTreeMap<_, _>>(),
            },
        }),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::Policies => {
            print!("{}", format_policies(&list_policies()));
            Ok(())
        }
        Commands::ConfigSchema => {
            println!("{}", rpe_settings::config_schema_json()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Logs go to stderr; stdout carries rendered output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_label(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{s}`")),
    }
}

struct EvaluateArgs {
    resources: Utf8PathBuf,
    config: Utf8PathBuf,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
    overrides: Overrides,
}

fn cmd_evaluate(args: EvaluateArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let resources_text = std::fs::read_to_string(&args.resources)
            .with_context(|| format!("read resources: {}", args.resources))?;

        // Missing config file is allowed (defaults apply).
        let config_text = if args.config.exists() {
            std::fs::read_to_string(&args.config)
                .with_context(|| format!("read config: {}", args.config))?
        } else {
            debug!(config = %args.config, "config file not found, using defaults");
            String::new()
        };

        let output = run_evaluate(EvaluateInput {
            resources_text: &resources_text,
            config_text: &config_text,
            overrides: args.overrides.clone(),
        })?;

        write_report_file(&args.report_out, &output.report).context("write report json")?;

        if args.write_markdown {
            let md = render_markdown(&output.report);
            write_text_file(&args.markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(&output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(&args.report_out, &report) {
                error!("could not write error report: {write_err:#}");
            }
            eprintln!("rpe error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &rpe_app::RpeReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_policy_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_policy_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
