//! Canvas template CLI
//!
//! Usage:
//!   canvas-cli render --template <FILE> --record <FILE> [--output <FILE>]
//!   canvas-cli migrate --input <FILE> [--output <FILE>]
//!   canvas-cli placeholders --template <FILE>
//!
//! Set `RUST_LOG=debug` to see normalization repairs and skipped elements.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mail_merge::{placeholders_in, render_canvas_document, unknown_placeholders, SyllabusRecord};
use store::{migrate_legacy_json, Template};

#[derive(Parser)]
#[command(name = "canvas-cli")]
#[command(about = "Render, migrate and inspect canvas templates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a template's placeholders from a syllabus record
    Render {
        /// Template JSON file
        #[arg(short, long)]
        template: PathBuf,

        /// Syllabus record JSON file
        #[arg(short, long)]
        record: PathBuf,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Flatten a legacy nested-group document
    Migrate {
        /// Legacy document JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the placeholders a template uses and which of them are unknown
    Placeholders {
        /// Template JSON file
        #[arg(short, long)]
        template: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render { template, record, output } => {
            let json = render(&template, &record)?;
            emit(&json, output.as_deref())
        }
        Command::Migrate { input, output } => {
            let json = migrate(&input)?;
            emit(&json, output.as_deref())
        }
        Command::Placeholders { template } => {
            let json = placeholders(&template)?;
            emit(&json, None)
        }
    }
}

fn render(template_path: &Path, record_path: &Path) -> Result<String> {
    let mut template = Template::load(template_path)
        .with_context(|| format!("loading template '{}'", template_path.display()))?;
    let record = SyllabusRecord::load(record_path)
        .with_context(|| format!("loading record '{}'", record_path.display()))?;

    template.canvas_document = render_canvas_document(&template.canvas_document, &record);
    tracing::info!(template = %template_path.display(), "rendered template");
    Ok(template.to_json()?)
}

fn migrate(input: &Path) -> Result<String> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("reading legacy document '{}'", input.display()))?;
    let (document, report) = migrate_legacy_json(&content)
        .with_context(|| format!("migrating '{}'", input.display()))?;

    tracing::info!(
        groups = report.groups_removed,
        elements = report.elements,
        "flattened legacy document"
    );
    Ok(document.to_json()?)
}

fn placeholders(template_path: &Path) -> Result<String> {
    let template = Template::load(template_path)
        .with_context(|| format!("loading template '{}'", template_path.display()))?;
    let document = &template.canvas_document;

    let report = serde_json::json!({
        "used": placeholders_in(document),
        "unknown": unknown_placeholders(document),
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

fn emit(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing '{}'", path.display()))?;
        }
        None => println!("{}", json),
    }
    Ok(())
}
