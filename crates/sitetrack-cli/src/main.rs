//! sitetrack - construction-site task board CLI
//!
//! Tracks site, tender, costing and drawing tasks from the command line,
//! with a board view grouped by category and status and a Today view
//! ordered by floor.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sitetrack_core::{Category, Config, Priority, Status, Store, TaskDraft, TaskPatch};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "sitetrack")]
#[command(about = "Construction-site task board", version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output for scripting
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new task
    Add(AddArgs),

    /// Show board lanes grouped by category and status
    #[command(alias = "ls")]
    List {
        /// Only show one category
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,

        /// Only show one status lane
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Show the Today view, ordered by floor
    Today {
        /// Only show one category
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,
    },

    /// Show task details
    Show {
        /// Task ID (full or unique prefix)
        id: String,
    },

    /// Edit task fields
    Edit(EditArgs),

    /// Mark a task completed
    Done {
        /// Task ID (full or unique prefix)
        id: String,
    },

    /// Reopen a completed task
    Reopen {
        /// Task ID (full or unique prefix)
        id: String,
    },

    /// Flag a task for the Today view
    TodayAdd {
        /// Task ID (full or unique prefix)
        id: String,
    },

    /// Remove a task from the Today view
    TodayRemove {
        /// Task ID (full or unique prefix)
        id: String,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Remove {
        /// Task ID (full or unique prefix)
        id: String,
    },

    /// Export all tasks to a JSON document
    Export {
        /// Output file (defaults to site-tracker-tasks.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Merge tasks from a JSON document
    Import {
        /// Document to import
        path: PathBuf,
    },

    /// Show storage information and task counts
    Status,

    /// Inspect or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Print the active configuration
    Show,
    /// Change a configuration value
    Set {
        /// Configuration key (data_dir, log_file)
        key: String,
        /// New value
        value: String,
    },
}

#[derive(Args)]
struct AddArgs {
    /// Task name
    name: String,

    /// Board category
    #[arg(short, long, value_enum)]
    category: CategoryArg,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: String,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: String,

    /// Person responsible
    #[arg(short, long)]
    assigned: String,

    /// Priority
    #[arg(short, long, value_enum)]
    priority: PriorityArg,

    /// Initial status
    #[arg(short, long, value_enum, default_value = "open")]
    status: StatusArg,

    /// Floor or level (drives Today view ordering)
    #[arg(short, long, default_value = "")]
    floor: String,

    /// Free-text remarks
    #[arg(short, long, default_value = "")]
    remarks: String,
}

impl AddArgs {
    fn into_draft(self) -> TaskDraft {
        TaskDraft {
            category: self.category.into(),
            name: self.name,
            start_date: self.start,
            end_date: self.end,
            assigned_to: self.assigned,
            priority: self.priority.into(),
            status: self.status.into(),
            floor: self.floor,
            remarks: self.remarks,
        }
    }
}

#[derive(Args)]
struct EditArgs {
    /// Task ID (full or unique prefix)
    id: String,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New category
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,

    /// New start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: Option<String>,

    /// New end date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: Option<String>,

    /// New assignee
    #[arg(long)]
    assigned: Option<String>,

    /// New priority
    #[arg(long, value_enum)]
    priority: Option<PriorityArg>,

    /// New status
    #[arg(long, value_enum)]
    status: Option<StatusArg>,

    /// New floor
    #[arg(long)]
    floor: Option<String>,

    /// New remarks
    #[arg(long)]
    remarks: Option<String>,
}

impl EditArgs {
    fn into_patch(self) -> (String, TaskPatch) {
        let patch = TaskPatch {
            category: self.category.map(Into::into),
            name: self.name,
            start_date: self.start,
            end_date: self.end,
            assigned_to: self.assigned,
            priority: self.priority.map(Into::into),
            status: self.status.map(Into::into),
            floor: self.floor,
            remarks: self.remarks,
            is_today: None,
        };
        (self.id, patch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CategoryArg {
    Site,
    Tender,
    Cost,
    Drawing,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Site => Category::Site,
            CategoryArg::Tender => Category::Tender,
            CategoryArg::Cost => Category::Cost,
            CategoryArg::Drawing => Category::Drawing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    Open,
    InProgress,
    Completed,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => Status::Open,
            StatusArg::InProgress => Status::InProgress,
            StatusArg::Completed => Status::Completed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work without opening the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(&key, &value, &output)
            }
            Some(ConfigCommands::Show) | None => commands::config::show(&output),
        };
    }

    let config = Config::load().context("Could not load configuration")?;
    init_logging(&config);

    let mut store = Store::open_with_config(config);

    match cli.command {
        Commands::Add(args) => commands::task::add(&mut store, args.into_draft(), &output),
        Commands::List { category, status } => commands::board::list(
            &store,
            category.map(Into::into),
            status.map(Into::into),
            &output,
        ),
        Commands::Today { category } => {
            commands::board::today(&store, category.map(Into::into), &output)
        }
        Commands::Show { id } => commands::task::show(&store, &id, &output),
        Commands::Edit(args) => {
            let (id, patch) = args.into_patch();
            commands::task::edit(&mut store, &id, patch, &output)
        }
        Commands::Done { id } => commands::task::done(&mut store, &id, &output),
        Commands::Reopen { id } => commands::task::reopen(&mut store, &id, &output),
        Commands::TodayAdd { id } => commands::task::today_add(&mut store, &id, &output),
        Commands::TodayRemove { id } => commands::task::today_remove(&mut store, &id, &output),
        Commands::Remove { id } => commands::task::delete(&mut store, &id, &output),
        Commands::Export { out } => commands::transfer::export(&store, out, &output),
        Commands::Import { path } => commands::transfer::import(&mut store, &path, &output),
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // handled before the store opens
    }
}

/// Initialize file-based logging
///
/// Only active when the SITETRACK_LOG environment variable is set.
/// Logs to config.log_file, or {data_dir}/debug.log by default.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("SITETRACK_LOG") else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match File::create(&log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot open log file {}: {err}", log_path.display());
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "sitetrack_core={},sitetrack_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("logging to {}", log_path.display());
}
