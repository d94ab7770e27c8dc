use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::process::ExitCode;
use std::str::FromStr;

use medidesk::commands::{
    cmd_cache_clear, cmd_cache_path, cmd_cache_status, cmd_config_get, cmd_config_set,
    cmd_config_show, cmd_create, cmd_ls, cmd_rm, cmd_set, cmd_show, cmd_stats, cmd_watch,
};
use medidesk::query::SortField;
use medidesk::types::{Resource, VALID_RESOURCES};

#[derive(Parser)]
#[command(name = "medidesk")]
#[command(about = "Terminal client for a hospital management REST API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records of a resource
    #[command(visible_alias = "l")]
    Ls {
        /// Resource: patients, doctors, appointments, invoices,
        /// payments, users, wards, audit
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Free-text search over the resource's main fields
        #[arg(short, long)]
        search: Option<String>,

        /// Shorthand for --field status=<value>
        #[arg(long)]
        status: Option<String>,

        /// Field equality filter, name=value (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Fuzzy-match the search text instead of substring matching
        #[arg(long)]
        fuzzy: bool,

        /// Sort by: id, date, status
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortField>,

        /// Page number requested from the server
        #[arg(long)]
        page: Option<u32>,

        /// Page size requested from the server
        #[arg(long)]
        limit: Option<u32>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Read the local snapshot instead of the API
        #[arg(long)]
        cached: bool,
    },

    /// Display one record
    #[command(visible_alias = "s")]
    Show {
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Record id
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Create a record from JSON
    #[command(visible_alias = "c")]
    Create {
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Full record as JSON; the id may be omitted
        #[arg(long)]
        data: String,
    },

    /// Replace a record wholesale
    Set {
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Record id
        id: String,

        /// Full record as JSON
        #[arg(long)]
        data: String,
    },

    /// Delete records (bulk deletes honor the severity guardrail)
    Rm {
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Record ids
        #[arg(required = true)]
        ids: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Follow a resource with auto-refresh until Ctrl-C
    Watch {
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Refresh interval in seconds (default: poll.interval)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Page size requested from the server
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Summary statistics for a resource
    Stats {
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(short, long = "field")]
        fields: Vec<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long)]
        json: bool,

        #[arg(long)]
        cached: bool,
    },

    /// Inspect or clear the snapshot cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Read or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show snapshot freshness and sizes
    Status,
    /// Delete all snapshot files
    Clear,
    /// Print the cache directory
    Path,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show all configuration values
    Show,
    /// Read one value
    Get { key: String },
    /// Set one value
    Set { key: String, value: String },
}

fn parse_resource(s: &str) -> Result<Resource, String> {
    Resource::from_str(s).map_err(|_| {
        format!(
            "unknown resource '{}', expected one of: {}",
            s,
            VALID_RESOURCES.join(", ")
        )
    })
}

fn parse_sort(s: &str) -> Result<SortField, String> {
    SortField::from_str(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ls {
            resource,
            search,
            status,
            fields,
            from,
            to,
            fuzzy,
            sort,
            page,
            limit,
            json,
            cached,
        } => match medidesk::commands::build_criteria(search, status, &fields, from, to, fuzzy) {
            Ok(criteria) => cmd_ls(resource, criteria, sort, page, limit, json, cached).await,
            Err(e) => Err(e),
        },

        Commands::Show { resource, id, json } => cmd_show(resource, id, json).await,

        Commands::Create { resource, data } => cmd_create(resource, data).await,

        Commands::Set { resource, id, data } => cmd_set(resource, id, data).await,

        Commands::Rm { resource, ids, yes } => cmd_rm(resource, ids, yes).await,

        Commands::Watch {
            resource,
            search,
            status,
            fields,
            interval,
            limit,
        } => match medidesk::commands::build_criteria(search, status, &fields, None, None, false) {
            Ok(criteria) => cmd_watch(resource, criteria, interval, limit).await,
            Err(e) => Err(e),
        },

        Commands::Stats {
            resource,
            search,
            status,
            fields,
            from,
            to,
            json,
            cached,
        } => match medidesk::commands::build_criteria(search, status, &fields, from, to, false) {
            Ok(criteria) => cmd_stats(resource, criteria, json, cached).await,
            Err(e) => Err(e),
        },

        Commands::Cache { action } => match action {
            CacheAction::Status => cmd_cache_status(),
            CacheAction::Clear => cmd_cache_clear(),
            CacheAction::Path => cmd_cache_path(),
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Get { key } => cmd_config_get(&key),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "medidesk", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
