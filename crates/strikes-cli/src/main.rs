mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, employee::EmployeeSubcommand, strike::StrikeSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "strikes",
    about = "Studio strike tracker — three strikes and you bring the treats",
    version,
    propagate_version = true
)]
struct Cli {
    /// Tracker root (default: nearest directory with .strikes/, else cwd)
    #[arg(long, global = true, env = "STRIKES_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .strikes/ with a default config and the seed roster
    Init,

    /// Show the scoreboard
    Board,

    /// Manage employees
    Employee {
        #[command(subcommand)]
        subcommand: EmployeeSubcommand,
    },

    /// Hand out and reset strikes
    Strike {
        #[command(subcommand)]
        subcommand: StrikeSubcommand,
    },

    /// Inspect the tracker configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Launch the web UI
    Ui {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Board => cmd::board::run(&root, cli.json),
        Commands::Employee { subcommand } => cmd::employee::run(&root, subcommand, cli.json),
        Commands::Strike { subcommand } => cmd::strike::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Ui { port, no_open } => cmd::ui::run(&root, port, no_open),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
