mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use protofilters_core::config::loader::ConfigLoader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pfilters",
    version,
    about = "Render prototype templates with GOV.UK style-guide filters"
)]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/protofilters/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a template file and print the result
    Render(RenderArgs),

    /// List the available filters
    List(ListArgs),

    /// Validate configuration and print the resolved settings
    Doctor,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file to render, or `-` for stdin
    pub template: PathBuf,

    /// JSON or YAML file whose top-level keys become template variables
    #[arg(long, short)]
    pub data: Option<PathBuf>,

    /// Pretend the current time is this ISO 8601 date or date-time
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show filters in this group (array, date, number, object, string)
    #[arg(long)]
    pub group: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Doctor => {
            cmd::doctor::run(cli.config.as_deref());
            Ok(())
        }
        Commands::Render(args) => {
            let rc = ConfigLoader::load(cli.config.as_deref())?;
            logging::init(&rc)?;
            cmd::render::run(&rc, &args)
        }
        Commands::List(args) => {
            let rc = ConfigLoader::load(cli.config.as_deref())?;
            logging::init(&rc)?;
            cmd::list::run(&args)
        }
    };

    logging::flush();
    result
}
