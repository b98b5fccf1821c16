use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use eventsx::cli::{
    handle_budget_command, handle_enroll, handle_enrollments, handle_event_command,
    handle_unenroll, handle_user_command,
};
use eventsx::config::{paths::EventsxPaths, settings::Settings};
use eventsx::storage::{FileKeyValueStore, Storage};

/// Environment variable holding the log filter (e.g. "eventsx=debug")
const LOG_ENV: &str = "EVENTSX_LOG";

#[derive(Parser)]
#[command(
    name = "eventsx",
    version,
    about = "Browse events, enroll, and plan your event budget",
    long_about = "EventsX lets you browse the event catalog, enroll in events and \
                  estimate what attending will cost: tickets, accommodation and \
                  transport to the capital."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and the sample event catalog
    Init,

    /// Show current configuration and paths
    Config,

    /// Event catalog commands
    #[command(subcommand, alias = "events")]
    Event(eventsx::cli::EventCommands),

    /// Account and session commands
    #[command(subcommand)]
    User(eventsx::cli::UserCommands),

    /// Enroll in an event and add it to your budget
    Enroll {
        /// Event title or ID
        event: String,
    },

    /// Cancel an enrollment
    Unenroll {
        /// Event title or ID
        event: String,
    },

    /// List the events you are enrolled in
    Enrollments,

    /// Budget calculator commands
    #[command(subcommand)]
    Budget(eventsx::cli::BudgetCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Initialize paths and settings
    let paths = EventsxPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    let store = FileKeyValueStore::new(paths.local_store_file());

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing EventsX at: {}", paths.base_dir().display());
            let seeded = eventsx::storage::initialize_storage(&paths)?;
            settings.setup_completed = true;
            settings.save(&paths)?;
            println!("Initialization complete!");
            if seeded > 0 {
                println!();
                println!("{} sample events have been added to the catalog.", seeded);
            }
            println!();
            println!("Run 'eventsx event list' to browse events.");
            println!("Run 'eventsx user register --help' to create an account.");
        }
        Some(Commands::Config) => {
            println!("EventsX Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Local store:      {}", paths.local_store_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Initialized:     {}", settings.setup_completed);
        }
        Some(Commands::Event(cmd)) => {
            handle_event_command(&storage, &store, &settings, cmd)?;
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, &store, cmd)?;
        }
        Some(Commands::Enroll { event }) => {
            handle_enroll(&storage, &store, &settings, &event)?;
        }
        Some(Commands::Unenroll { event }) => {
            handle_unenroll(&storage, &store, &event)?;
        }
        Some(Commands::Enrollments) => {
            handle_enrollments(&storage, &store, &settings)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &store, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("EventsX - events, enrollments and budgets");
            println!();
            println!("Run 'eventsx --help' for usage information.");
            if eventsx::storage::needs_initialization(&paths) {
                println!("Run 'eventsx init' to get started.");
            }
        }
    }

    Ok(())
}
