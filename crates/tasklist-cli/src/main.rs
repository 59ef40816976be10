use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tasklist_core::{
    Config, FileStorage, HttpTaskClient, LocalTaskApi, Snapshot, TaskApi, TaskId, TaskManager,
};

mod commands;
mod serve;
mod tui;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Minimal task list: REST server, terminal client and data tools", long_about = None)]
struct Cli {
    /// Task file to use instead of the configured one
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST server and browser client
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Open the browser once the server is up
        #[arg(long)]
        open: bool,
    },
    /// Interactive terminal client
    Tui {
        /// Server URL to talk to
        #[arg(long, conflicts_with = "local")]
        url: Option<String>,

        /// Work on the task file directly instead of through a server
        #[arg(long)]
        local: bool,

        /// Write logs to stderr
        #[arg(long)]
        log: bool,
    },
    /// Add a new task
    Add {
        /// Task description
        description: String,
        /// Task category
        category: String,
    },
    /// Remove a task by id
    Remove {
        /// Task id to remove
        id: TaskId,
    },
    /// List all tasks
    List {
        /// Only show tasks in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Manage the task file, snapshots and backups
    #[command(subcommand)]
    Data(DataCommands),
}

#[derive(Subcommand)]
enum DataCommands {
    /// Create an empty task file if none exists
    Init,
    /// Reset the task file to the seed snapshot
    Seed,
    /// Reset the task file to the test snapshot
    Test,
    /// Reset the task file to the demo snapshot
    Demo,
    /// Show task counts and categories for every data file
    Info,
    /// Preview the first tasks of each snapshot
    Sample,
    /// Back up the task file
    Backup,
    /// List backup files
    Backups,
    /// Restore the task file from a backup
    Restore {
        /// Backup file (path or name in the backup directory)
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it only logs when asked.
    let logging = !matches!(cli.command, Commands::Tui { log: false, .. });
    if logging {
        init_tracing();
    }

    let mut config = Config::load()?;
    if let Some(data_file) = cli.data_file {
        config.storage.data_file = data_file;
    }
    let storage = || FileStorage::with_config(&config.storage);

    match cli.command {
        Commands::Serve { port, open } => {
            let serve_config = serve::ServeConfig {
                host: config.server.host.clone(),
                port: port.unwrap_or(config.server.port),
                open_browser: open,
                data_file: config.storage.data_file.clone(),
                write_mode: config.storage.write_mode,
            };
            serve::start_server(serve_config).await?;
        }
        Commands::Tui { url, local, .. } => {
            let (api, source) = if local {
                let storage = storage();
                let source = storage.path().display().to_string();
                let api: Arc<dyn TaskApi> = Arc::new(LocalTaskApi::new(TaskManager::new(storage)));
                (api, source)
            } else {
                let client = match url {
                    Some(url) => HttpTaskClient::new(url),
                    None => HttpTaskClient::with_config(&config.client),
                };
                let source = client.base_url().to_string();
                let api: Arc<dyn TaskApi> = Arc::new(client);
                (api, source)
            };
            tui::run(api, source).await?;
        }
        Commands::Add {
            description,
            category,
        } => {
            println!("{}", commands::add(storage(), &description, &category)?);
        }
        Commands::Remove { id } => {
            println!("{}", commands::remove(storage(), id)?);
        }
        Commands::List { category } => {
            for line in commands::list(storage(), category.as_deref())? {
                println!("{}", line);
            }
        }
        Commands::Data(cmd) => run_data_command(cmd, &config)?,
    }

    Ok(())
}

fn run_data_command(cmd: DataCommands, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use commands::data;

    let storage = &config.storage;
    let lines = match cmd {
        DataCommands::Init => vec![data::init(storage)?],
        DataCommands::Seed => vec![data::reset(storage, Snapshot::Seed)?],
        DataCommands::Test => vec![data::reset(storage, Snapshot::Test)?],
        DataCommands::Demo => vec![data::reset(storage, Snapshot::Demo)?],
        DataCommands::Info => data::info(storage),
        DataCommands::Sample => data::sample(storage),
        DataCommands::Backup => vec![data::backup(storage)?],
        DataCommands::Backups => data::backups(storage)?,
        DataCommands::Restore { file } => vec![data::restore(storage, &file)?],
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
