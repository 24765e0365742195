//! `langm` command-line entry point.
//!
//! Parses arguments, resolves the managing directory, loads the registry once,
//! and hands both to the command handlers in `langm::commands`. Failures are
//! printed to stderr with their cause chain and exit with status 1.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use langm::commands::{self, AddRequest, DialoguerPicker, NamedPicker, RuntimePicker};
use langm::{ActiveLink, Capability, LangmPaths, RegistryStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const ENV_LOG: &str = "LANGM_LOG";

#[derive(Parser, Debug)]
#[command(name = "langm")]
#[command(version, about = "Capability-based runtime manager for Node.js, Java and GraalVM")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a runtime directory
    Add {
        /// Runtime installation directory
        path: PathBuf,
        /// Register with the node capability instead of auto-detecting
        #[arg(long, short = 'n')]
        node: bool,
        /// Register with the java capability instead of auto-detecting
        #[arg(long, short = 'j')]
        java: bool,
        /// Entry name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },
    /// List registered runtimes, grouped by capability
    #[command(alias = "ls")]
    List {
        /// Only show runtimes with this capability (node or java)
        capability: Option<Capability>,
    },
    /// Choose the active runtime
    Use {
        /// Only offer runtimes with this capability (node or java)
        capability: Option<Capability>,
        /// Select this entry without prompting
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the active runtime and check the link
    Current,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("langm: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = LangmPaths::resolve()?;
    let mut store = RegistryStore::load(&paths.config_file)
        .with_context(|| format!("loading registry from {}", paths.root.display()))?;

    match cli.command {
        Commands::Add {
            path,
            node,
            java,
            name,
        } => {
            let request = AddRequest {
                path,
                node,
                java,
                name,
            };
            let outcome = commands::add(&mut store, &request)?;
            println!("{outcome}");
        }
        Commands::List { capability } => {
            println!("{}", commands::list(store.registry(), capability));
        }
        Commands::Use { capability, name } => {
            let link = ActiveLink::new(&paths.current_link);
            let picker: Box<dyn RuntimePicker> = match name {
                Some(name) => Box::new(NamedPicker::new(name)),
                None => Box::new(DialoguerPicker),
            };
            let outcome = commands::switch(&mut store, &link, capability, picker.as_ref())?;
            println!("{outcome}");
        }
        Commands::Current => {
            let link = ActiveLink::new(&paths.current_link);
            println!("{}", commands::current(store.registry(), &link)?);
        }
    }
    Ok(())
}

/// Log level comes from `LANGM_LOG` (default: warn); output goes to stderr so
/// stdout stays reserved for command output.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .without_time()
        .try_init()
        .ok();
}
