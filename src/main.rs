use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dnd5e::api::format_api_error;
use dnd5e::browser::History;
use dnd5e::config::Config;
use dnd5e::render::{render, render_table, summary, OutputFormat};
use dnd5e::resource::table::URL_COLUMN;
use dnd5e::resource::{
    get_all_patterns, get_kind, resolve, Endpoint, Resource, API_PREFIX, NESTED_SEPARATOR,
};
use dnd5e::VERSION;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command line client for the D&D 5e SRD API
#[derive(Parser, Debug)]
#[command(name = "dnd5e", version, about, long_about = None)]
struct Args {
    /// API root URL
    #[arg(long, global = true)]
    root: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Request header added to the default Accept header, repeatable
    #[arg(long = "header", value_name = "KEY=VALUE", value_parser = parse_header, global = true)]
    headers: Vec<(String, String)>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a path and print its table
    Get {
        path: String,
        /// Fetch every row's link as well
        #[arg(long)]
        links: bool,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Print the kind each path resolves to
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// List the known endpoints
    Endpoints,
    /// Walk the API interactively
    Browse { path: Option<String> },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty header name in '{}'", raw));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("dnd5e {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("dnd5e").join("dnd5e.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".dnd5e").join("dnd5e.log");
    }
    PathBuf::from("dnd5e.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        tracing::error!("{:#}", err);
        eprintln!("Error: {}", format_api_error(&err));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();

    match args.command {
        Command::Resolve { paths } => {
            for path in paths {
                let kind = resolve(&path);
                let pattern = kind.pattern().unwrap_or_else(|| "-".to_string());
                println!("{}\t{}\t{}", path, kind, pattern);
            }
            Ok(())
        }
        Command::Endpoints => {
            for pattern in get_all_patterns() {
                if let Some(kind) = get_kind(pattern) {
                    println!("{:<32} {:<28} {}", pattern, kind.to_string(), kind.display_name());
                }
            }
            Ok(())
        }
        Command::Get {
            path,
            links,
            format,
        } => {
            let client = config.client(args.root.as_deref(), args.timeout, &args.headers)?;
            let mut resource = Resource::fetch(&client, &path)
                .await
                .with_context(|| format!("Failed to fetch {}", path))?;
            if links {
                let linked = resource.materialize_links().await;
                tracing::info!("Followed {} links from {}", linked, path);
            }
            print!("{}", render(&resource, format)?);
            Ok(())
        }
        Command::Browse { path } => {
            let client = config.client(args.root.as_deref(), args.timeout, &args.headers)?;
            let start = path
                .or_else(|| config.last_path.clone())
                .unwrap_or_else(|| API_PREFIX.to_string());
            let resource = Resource::fetch(&client, &start)
                .await
                .with_context(|| format!("Failed to fetch {}", start))?;
            browse(History::new(resource), &mut config).await
        }
    }
}

/// What one line typed into `browse` asks for
#[derive(Debug, PartialEq)]
enum BrowseCommand {
    Quit,
    Back,
    Refresh,
    Help,
    /// Row position or row key
    Row(String),
    /// Absolute API path
    Open(String),
    /// Nested list column of the current page
    Nested(String),
    Empty,
}

impl BrowseCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => BrowseCommand::Empty,
            "q" | "quit" => BrowseCommand::Quit,
            "b" | "back" => BrowseCommand::Back,
            "r" | "refresh" => BrowseCommand::Refresh,
            "?" | "h" | "help" => BrowseCommand::Help,
            _ if line.starts_with('/') => BrowseCommand::Open(line.to_string()),
            _ => match line.strip_prefix("n ") {
                Some(column) => BrowseCommand::Nested(column.trim().to_string()),
                None => BrowseCommand::Row(line.to_string()),
            },
        }
    }
}

const BROWSE_HELP: &str = "\
<row>       follow a row's link, by number or key
/api/...    open a path
n <column>  open a nested list column
b           back
r           refresh
q           quit";

async fn browse(mut history: History, config: &mut Config) -> Result<()> {
    println!("dnd5e {} - type ? for help", VERSION);
    show(history.current());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match BrowseCommand::parse(&line) {
            BrowseCommand::Quit => break,
            BrowseCommand::Empty => continue,
            BrowseCommand::Help => {
                println!("{}", BROWSE_HELP);
                continue;
            }
            BrowseCommand::Back => {
                history.back();
            }
            BrowseCommand::Refresh => {
                if let Err(e) = history.current_mut().refresh().await {
                    eprintln!("Refresh failed: {}", format_api_error(&e));
                }
            }
            BrowseCommand::Open(path) => {
                if let Err(e) = history.open(&path).await {
                    eprintln!("Cannot open {}: {}", path, format_api_error(&e));
                    continue;
                }
            }
            BrowseCommand::Nested(column) => match history.current().nested(&column) {
                Some(resource) => history.push(resource),
                None => {
                    eprintln!("No nested list in column '{}'", column);
                    continue;
                }
            },
            BrowseCommand::Row(row) => {
                let Some(path) = link_for_row(history.current(), &row) else {
                    eprintln!("No link for row '{}'", row);
                    continue;
                };
                if let Err(e) = history.open(&path).await {
                    eprintln!("Cannot open {}: {}", path, format_api_error(&e));
                    continue;
                }
            }
        }

        let current = history.current();
        show(current);
        // nested pages are rebuilt from their parent
        let page = current.path().split(NESTED_SEPARATOR).next().unwrap_or(API_PREFIX);
        if let Err(e) = config.set_last_path(page) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    Ok(())
}

fn show(resource: &Resource) {
    let kind = resource.kind();
    let title = kind
        .endpoint()
        .map(Endpoint::display_name)
        .unwrap_or_else(|| kind.display_name());
    match resource.status() {
        Some(status) => println!("\n{} [{}] {}", resource.path(), status, title),
        None => println!("\n{} {}", resource.path(), title),
    }
    if let Some(line) = resource.record().ok().as_ref().and_then(summary) {
        println!("{}", line);
    }
    print!("{}", render_table(resource.table()));
}

/// Link path of a row picked by position or key
fn link_for_row(resource: &Resource, row: &str) -> Option<String> {
    let table = resource.table();
    let position = match table.row_by_key(row) {
        Some(position) => position,
        None => row.parse::<usize>().ok()?,
    };
    table
        .get(position, URL_COLUMN)?
        .as_text()
        .map(str::to_string)
}
