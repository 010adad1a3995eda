//! gfxtarget CLI — inspect how device identifiers resolve to GPU targets.

mod commands;
mod logger;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gfxtarget", version, about = "Canonical GPU target names and database keys")]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a raw device identifier into a target descriptor
    Resolve {
        /// Raw device identifier (e.g., "gfx906:sramecc-:xnack+", "Ellesmere")
        raw: Option<String>,
        /// Replace the raw device identifier
        #[arg(long)]
        device_arch: Option<String>,
        /// Force the architecture name, skipping alias lookup
        #[arg(long)]
        enforce_device: Option<String>,
        /// Output format (human, json, toml)
        #[arg(long)]
        format: Option<String>,
        /// Ignore environment variables and gfxtarget.toml
        #[arg(long)]
        no_env: bool,
    },
    /// List legacy device names and their canonical architecture
    Aliases,
    /// Show override sources and constants
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    logger::init(cli.verbose)?;
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Resolve {
            raw,
            device_arch,
            enforce_device,
            format,
            no_env,
        } => commands::resolve::run(
            &cwd,
            &commands::resolve::ResolveArgs {
                raw,
                device_arch,
                enforce_device,
                format,
                no_env,
            },
        ),
        Commands::Aliases => commands::aliases::run(),
        Commands::Doctor => commands::doctor::run(&cwd),
    }
}
