//! tutordash-logs - replay command log streams
//!
//! Feeds recorded event streams through the log-stream synchronizer and
//! prints the resulting log container, logging every page hook it fires.
//! Handy for checking how a captured stream would render on the dashboard.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{debug, error, info, warn};

use tutordash_logs::stream::{frames_from_reader, pump};
use tutordash_logs::ui::escape_html;
use tutordash_logs::{
    init, init_with_config, Config, FileStore, KeyValueStore, LogStreamSynchronizer, MemoryStore,
    PageHooks, StreamLayout, ViewScope,
};

/// Replay configuration
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug mode
    debug: bool,
    /// Override the stream layout
    layout: Option<StreamLayout>,
    /// Persist the command record in this file instead of memory
    store_path: Option<PathBuf>,
    /// Which commands count as relevant
    scope: ViewScope,
    /// Print the log container as escaped HTML
    html: bool,
    /// Stream files, replayed as consecutive connections; stdin when empty
    inputs: Vec<PathBuf>,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let Some(path) = args.get(i + 1) else {
                        bail!("Missing config file path");
                    };
                    app_args.config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--layout" | "-l" => {
                    app_args.layout = match args.get(i + 1).map(String::as_str) {
                        Some("merged") => Some(StreamLayout::Merged),
                        Some("separate") => Some(StreamLayout::Separate),
                        other => bail!("Invalid layout: {:?} (expected merged or separate)", other),
                    };
                    i += 1;
                }
                "--store" | "-s" => {
                    let Some(path) = args.get(i + 1) else {
                        bail!("Missing store file path");
                    };
                    app_args.store_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--default-store" => {
                    app_args.store_path = Some(FileStore::default_path());
                }
                "--only" => {
                    let Some(prefix) = args.get(i + 1) else {
                        bail!("Missing command prefix");
                    };
                    match &mut app_args.scope {
                        ViewScope::Prefixes(prefixes) => prefixes.push(prefix.clone()),
                        scope => *scope = ViewScope::Prefixes(vec![prefix.clone()]),
                    }
                    i += 1;
                }
                "--detached" => {
                    app_args.scope = ViewScope::Detached;
                }
                "--html" => {
                    app_args.html = true;
                }
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("tutordash-logs v{}", env!("CARGO_PKG_VERSION"));
                    process::exit(0);
                }
                "-" => app_args.inputs.clear(),
                arg if arg.starts_with('-') => {
                    bail!("Unknown option: {}", arg);
                }
                path => app_args.inputs.push(PathBuf::from(path)),
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("tutordash-logs - replay command log streams");
    println!();
    println!("USAGE:");
    println!("    tutordash-logs [OPTIONS] [STREAM]...");
    println!();
    println!("Each STREAM file holds one frame per line (JSON strings, optionally as");
    println!("server-sent-event 'data:' lines). Several files are replayed as");
    println!("consecutive connections sharing one command record. Reads stdin");
    println!("when no file is given.");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -d, --debug            Enable debug mode");
    println!("    -l, --layout <LAYOUT>  Stream layout (merged, separate)");
    println!("    -s, --store <PATH>     Persist the command record in PATH");
    println!("        --default-store    Persist the command record in the user data dir");
    println!("        --only <PREFIX>    Only commands starting with PREFIX are relevant (repeatable)");
    println!("        --detached         No command is relevant, output only");
    println!("        --html             Print the log container as escaped HTML");
    println!("    -h, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    TUTORDASH_CONFIG_DIR   Directory searched first for logs.toml/logs.json");
    println!("    TUTORDASH_DEBUG        Enable debug mode (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse arguments: {}", e);
        print_help();
        process::exit(1);
    });

    let debug_env = env::var("TUTORDASH_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let log_level = if args.debug || debug_env { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    debug!("Arguments: {:?}", args);
    let config = load_configuration(&args)?;

    match &args.store_path {
        Some(path) => {
            let store = FileStore::open(path)
                .with_context(|| format!("opening store {}", path.display()))?;
            replay(&args, config, store).await
        }
        None => replay(&args, config, MemoryStore::new()).await,
    }
}

/// Load configuration from file or use defaults
fn load_configuration(args: &AppArgs) -> Result<Config> {
    let mut config = match &args.config_path {
        Some(path) => init_with_config(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => init()?,
    };
    if let Some(layout) = args.layout {
        config.stream.layout = layout;
    }
    Ok(config)
}

fn logging_hooks() -> PageHooks {
    PageHooks::new()
        .on_show_cancel_button(|| info!("[page] cancel button shown"))
        .on_show_run_button(|| info!("[page] run button shown"))
        .on_deactivate_inputs(|| info!("[page] inputs disabled, command running"))
        .on_activate_inputs(|| info!("[page] inputs enabled"))
        .on_show_plugin_enable_bar(|| info!("[page] plugin enable bar shown"))
        .on_show_plugin_page_button(|| info!("[page] plugin page button shown"))
        .on_show_local_launch_button(|| info!("[page] local launch button shown"))
        .on_show_toast(|toast| {
            info!("[page] toast '{}': {}", toast.title, toast.description);
        })
        .on_hide_toast(|| info!("[page] toast removed"))
}

async fn replay<K: KeyValueStore>(args: &AppArgs, config: Config, store: K) -> Result<()> {
    let mut sync = LogStreamSynchronizer::new(
        String::new(),
        store,
        config,
        logging_hooks(),
        args.scope.clone(),
    );

    if args.inputs.is_empty() {
        replay_one(&mut sync, BufReader::new(tokio::io::stdin()), Path::new("<stdin>")).await?;
    } else {
        for (n, path) in args.inputs.iter().enumerate() {
            if n > 0 {
                sync.reconnect();
            }
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening stream {}", path.display()))?;
            replay_one(&mut sync, BufReader::new(file), path).await?;
        }
    }

    let (_, log) = sync.into_parts();
    if args.html {
        println!("{}", escape_html(&log));
    } else {
        print!("{}", log);
    }
    Ok(())
}

async fn replay_one<K, R>(
    sync: &mut LogStreamSynchronizer<K, String>,
    reader: R,
    name: &Path,
) -> Result<()>
where
    K: KeyValueStore,
    R: AsyncBufRead + Unpin,
{
    match pump(sync, frames_from_reader(reader)).await {
        Ok(report) => {
            info!(
                "{}: {} frames, {} dropped, outcome {:?}",
                name.display(),
                report.accepted,
                report.dropped,
                report.completed
            );
            if report.dropped > 0 {
                warn!("{}: {} malformed frames skipped", name.display(), report.dropped);
            }
            Ok(())
        }
        Err(e) => {
            error!("{}: {}", name.display(), e);
            Err(e.into())
        }
    }
}
