//! nbgrid CLI - notebook autorun registration and pre-commit hook management

#![deny(warnings)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use nbgrid_core::{git, hook, notebook, registry};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nbgrid")]
#[command(about = "Register notebooks for automatic re-execution as a git pre-commit step")]
#[command(version = env!("NBGRID_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the pre-commit hook into .git/hooks
    Install {
        /// Overwrite an existing pre-commit hook
        #[arg(long)]
        force: bool,
    },
    /// Remove the pre-commit hook
    Uninstall,
    /// Register a notebook for autorun
    Mark {
        /// Notebook path, relative to the repository root
        notebook: String,
    },
    /// Remove a notebook from the autorun registry
    Unmark {
        /// Notebook path, relative to the repository root
        notebook: String,
    },
    /// List registered notebooks and whether they exist on disk
    List,
    /// Drop registry entries whose notebook is missing on disk
    Prune,
    /// Execute all registered notebooks and strip execution metadata
    Run,
    /// Export a notebook to an HTML file
    Export {
        /// Notebook path, relative to the repository root
        notebook: String,

        /// Omit code cells from the exported HTML
        #[arg(long)]
        exclude_source: bool,

        /// Output file path (default: notebook name with .html extension)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Install { force } => {
            let root = git::repo_root()?;
            hook::install(&root, force)?;
            println!("installed pre-commit hook");
        }
        Commands::Uninstall => {
            let root = git::repo_root()?;
            // a missing hook is reported, not crashed on
            if let Err(e) = hook::uninstall(&root) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            println!("uninstalled pre-commit hook");
        }
        Commands::Mark { notebook } => {
            let root = git::repo_root()?;
            registry::mark(&root, &notebook)?;
            println!("registered {}", notebook);
        }
        Commands::Unmark { notebook } => {
            let root = git::repo_root()?;
            registry::unmark(&root, &notebook)?;
            println!("unregistered {}", notebook);
        }
        Commands::List => {
            let root = git::repo_root()?;
            let entries = registry::list(&root)?;
            if entries.is_empty() {
                println!("no notebooks registered");
            }
            for entry in entries {
                let status = if entry.exists { "ok" } else { "missing" };
                println!("{:<10} {}", status, entry.filename);
            }
        }
        Commands::Prune => {
            let root = git::repo_root()?;
            let dropped = registry::prune(&root)?;
            if dropped.is_empty() {
                println!("nothing to prune");
            }
            for name in dropped {
                println!("pruned {}", name);
            }
        }
        Commands::Run => {
            let root = git::repo_root()?;
            let count = notebook::run_all(&root).context("notebook run failed")?;
            println!("ran {} notebook(s)", count);
        }
        Commands::Export {
            notebook,
            exclude_source,
            output,
        } => {
            let root = git::repo_root()?;
            notebook::export_html(&root, &notebook, exclude_source, output.as_deref())?;
            println!("exported {}", notebook);
        }
    }

    Ok(())
}
