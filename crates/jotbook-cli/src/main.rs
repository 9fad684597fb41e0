use clap::{Parser, Subcommand};
use jotbook_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod session;

use session::Session;

#[derive(Parser)]
#[command(name = "jotbook", version, about = "Jotbook: a plain-text terminal journal")]
struct Cli {
    /// Journal to use (defaults to journal.default_name from the config)
    #[arg(short, long, global = true)]
    journal: Option<String>,
    /// Abort a change when the backup copy cannot be written
    #[arg(long, global = true)]
    strict: bool,
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Entry(commands::entries::EntryAction),
    /// List journals
    Journals,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive menu (default when no command is given)
    Menu,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("JOTBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let open = || -> Result<(Config, Session), Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let session = Session::open(&config, cli.journal.as_deref(), cli.strict, cli.no_color)?;
        Ok((config, session))
    };

    match cli.command {
        Some(Commands::Config { action }) => commands::config::run(action),
        Some(Commands::Entry(action)) => {
            let (_, session) = open()?;
            commands::entries::run(&session, action)
        }
        Some(Commands::Journals) => {
            let (_, session) = open()?;
            commands::journals::run(&session)
        }
        Some(Commands::Menu) | None => {
            let (config, mut session) = open()?;
            commands::menu::run(&mut session, config, Some(Config::path()?))
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
