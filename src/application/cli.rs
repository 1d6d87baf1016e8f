#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::debug_log_dir;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendArc;
use crate::domain::services::actions::help_text;
use crate::domain::services::actions::read_upload;
use crate::domain::services::IngestionStatusBridge;
use crate::domain::services::ResultAdapter;
use crate::domain::services::ResultsView;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Runs a single query. Blank text is ignored without contacting the
/// backend.
async fn run_query(backend: BackendArc, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }

    let response = backend.query(text).await?;
    let rendered = ResultAdapter::normalize(&response);
    println!("{}", ResultsView::plain(Some(&rendered)).join("\n"));

    return Ok(());
}

async fn run_connect(backend: BackendArc, connection_string: &str) -> Result<()> {
    let registration = backend.register_database(connection_string).await?;
    if let Some(schema) = registration.schema {
        println!("Connected & schema discovered.");
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        println!("Connected (no schema returned).");
    }

    return Ok(());
}

async fn run_upload(backend: BackendArc, paths: Vec<PathBuf>) -> Result<()> {
    let mut files = vec![];
    for path in paths.iter() {
        files.push(read_upload(path).await?);
    }

    let summary = backend.upload_documents(files).await?;
    let mut bridge = IngestionStatusBridge::default();
    bridge.set(summary.ingestion_status());

    println!("Uploaded: {}", summary.total_indexed);
    println!("{}", bridge.summary());

    return Ok(());
}

async fn run_schema(backend: BackendArc) -> Result<()> {
    let schema = backend.schema().await?;
    println!("{}", serde_json::to_string_pretty(&schema)?);

    return Ok(());
}

async fn run_status(backend: BackendArc) -> Result<()> {
    let mut bridge = IngestionStatusBridge::default();
    bridge.set(backend.ingestion_status().await?);
    println!("{}", bridge.summary());

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Querydeck")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Querydeck with environment variable RUST_LOG=querydeck")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_query() -> Command {
    return Command::new("query")
        .about("Runs a single natural language query and prints the result.")
        .arg(
            Arg::new("text")
                .help("Query text, e.g. \"list employees in Engineering\".")
                .num_args(1..)
                .required(true),
        );
}

fn subcommand_connect() -> Command {
    return Command::new("connect")
        .about("Registers a database with the backend and prints its discovered schema.")
        .arg(Arg::new("connection").help(format!(
            "Database connection string. [default: {}]",
            Config::default(ConfigKey::ConnectionString)
        )));
}

fn subcommand_upload() -> Command {
    return Command::new("upload")
        .about("Uploads documents (.txt .csv .pdf .docx) to be indexed.")
        .arg(
            Arg::new("paths")
                .help("Files to upload.")
                .num_args(1..)
                .value_parser(value_parser!(PathBuf))
                .required(true),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return format!("TUI {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown")
    );

    return Command::new("querydeck")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_query())
        .subcommand(subcommand_connect())
        .subcommand(subcommand_upload())
        .subcommand(Command::new("schema").about("Prints the schema discovered for the connected database."))
        .subcommand(Command::new("status").about("Prints how many documents are indexed."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(
            Arg::new(ConfigKey::BackendURL.to_string())
                .short('u')
                .long(ConfigKey::BackendURL.to_string())
                .env("QUERYDECK_BACKEND_URL")
                .num_args(1)
                .help(format!("Query engine API URL. [default: {}]", Config::default(ConfigKey::BackendURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
                .long(ConfigKey::BackendHealthCheckTimeout.to_string())
                .env("QUERYDECK_BACKEND_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(
                    format!("Time to wait in milliseconds before timing out when doing a healthcheck for the backend. [default: {}]", Config::default(ConfigKey::BackendHealthCheckTimeout)),
                )
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConnectionString.to_string())
                .long(ConfigKey::ConnectionString.to_string())
                .env("QUERYDECK_CONNECTION_STRING")
                .num_args(1)
                .help(format!("Database connection string used by /connect when none is given. [default: {}]", Config::default(ConfigKey::ConnectionString)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("QUERYDECK_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true),
        );
}

async fn load_config(matches: &ArgMatches, subcmd_matches: &ArgMatches) -> Result<BackendArc> {
    Config::load(vec![matches, subcmd_matches]).await?;
    return BackendManager::get();
}

/// Handles one-shot subcommands. Returns `true` when the terminal UI should
/// start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = debug_log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("query", subcmd_matches)) => {
            let backend = load_config(&matches, subcmd_matches).await?;
            let text = subcmd_matches
                .get_many::<String>("text")
                .map(|words| return words.cloned().collect::<Vec<String>>().join(" "))
                .unwrap_or_default();
            run_query(backend, &text).await?;
            return Ok(false);
        }
        Some(("connect", subcmd_matches)) => {
            let backend = load_config(&matches, subcmd_matches).await?;
            let connection_string = subcmd_matches
                .get_one::<String>("connection")
                .cloned()
                .unwrap_or_else(|| return Config::get(ConfigKey::ConnectionString));
            run_connect(backend, &connection_string).await?;
            return Ok(false);
        }
        Some(("upload", subcmd_matches)) => {
            let backend = load_config(&matches, subcmd_matches).await?;
            let paths = subcmd_matches
                .get_many::<PathBuf>("paths")
                .map(|paths| return paths.cloned().collect::<Vec<PathBuf>>())
                .unwrap_or_default();
            run_upload(backend, paths).await?;
            return Ok(false);
        }
        Some(("schema", subcmd_matches)) => {
            let backend = load_config(&matches, subcmd_matches).await?;
            run_schema(backend).await?;
            return Ok(false);
        }
        Some(("status", subcmd_matches)) => {
            let backend = load_config(&matches, subcmd_matches).await?;
            run_status(backend).await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
