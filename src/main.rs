//! CLI entry point for template-registry

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use template_registry::config::Settings;
use template_registry::registry::REGISTRY_FILE;
use template_registry::{UpdateOutcome, Workspace};

#[derive(Parser)]
#[command(name = "template-registry")]
#[command(version)]
#[command(about = "Update templates.json with metadata from a template README", long_about = None)]
struct Cli {
    /// README path, relative to the repository root
    document: PathBuf,

    /// Repository root (defaults to current directory)
    #[arg(short, long, env = "GITHUB_WORKSPACE")]
    workspace: Option<String>,

    /// Commit date stored as `last-commit-date`
    #[arg(long, env = "LAST_COMMIT_DATE")]
    last_commit_date: Option<String>,

    /// Registry file, relative to the repository root
    #[arg(long, default_value = REGISTRY_FILE)]
    registry: String,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let filter = if cli.debug {
        "template_registry=debug,info"
    } else {
        "template_registry=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // An empty GITHUB_WORKSPACE means the current directory
    let workspace_root = match cli.workspace.filter(|root| !root.is_empty()) {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir()?,
    };

    let settings = Settings::new(workspace_root)
        .with_registry_file(cli.registry)
        .with_last_commit_date(cli.last_commit_date.as_deref());
    let workspace = Workspace::new(settings);

    if let UpdateOutcome::Updated { template, .. } = workspace.update(&cli.document)? {
        println!(
            "Updated {} with metadata from {}",
            workspace.settings.registry_file, template
        );
    }
    println!("Successfully processed {}", cli.document.display());

    Ok(())
}
