use clap::{Parser, Subcommand};
use shotstage::config::{Config, SyncConfig};
use shotstage::picker::render::{format_relative, format_size};
use shotstage::{paths, scan, sync_script};

#[derive(Parser, Debug)]
#[command(name = "shotstage")]
#[command(
    version,
    about = "Terminal screenshot picker and staging extension for coding-agent hosts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the configured sources and list discovered screenshots
    List,
    /// Print the resolved screenshot sources and where they came from
    Sources,
    /// Print the SSH sync script for remote screenshot mirroring
    SyncScript {
        /// Remote host (user@host); overrides nothing if the config sets one
        #[arg(long)]
        host: Option<String>,
    },
    /// Write a documented example config to ~/.config/shotstage/config.toml
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Command::List => {
            let sources = paths::resolve_sources(&config);
            let tabs = scan::build_tabs(&sources, config.ui.tab_label_width);
            let mut total = 0;
            for tab in &tabs {
                println!("{} ({})", tab.pattern, tab.screenshots.len());
                for record in &tab.screenshots {
                    println!(
                        "  {:<44} {:>8}  {:>9}",
                        record.name,
                        format_relative(record.modified),
                        format_size(record.size_bytes)
                    );
                }
                total += tab.screenshots.len();
            }
            if total == 0 {
                println!("No screenshots found");
            }
        }
        Command::Sources => {
            if !config.sources.paths.is_empty() {
                println!("Sources (from config):");
            } else if std::env::var(paths::SOURCE_DIR_ENV).is_ok_and(|v| !v.trim().is_empty()) {
                println!("Sources (from ${}):", paths::SOURCE_DIR_ENV);
            } else {
                println!("Sources (platform default):");
            }
            for source in paths::resolve_sources(&config) {
                println!("  {source}");
            }
        }
        Command::SyncScript { host } => {
            let sync = config.sync.clone().unwrap_or_default();
            let host = host
                .or_else(|| sync.remote_host.clone())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "No remote host: pass --host or set sync.remote_host in config.toml"
                    )
                })?;
            // CLI --host wins over the config entry
            let sync = SyncConfig {
                remote_host: None,
                ..sync
            };
            print!("{}", sync_script::generate(&sync, &host));
            log::info!(
                "Install with: {}",
                sync_script::install_one_liner(&sync, &host)
            );
        }
        Command::InitConfig => {
            let path = Config::create_default_file()?;
            println!("Created {}", path.display());
        }
    }

    Ok(())
}
