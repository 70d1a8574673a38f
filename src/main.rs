//! nihao - a group welcome bot for OneBot-compatible chat platforms.
//!
//! # Overview
//!
//! nihao greets new members of whitelisted groups and lets group admins
//! maintain that whitelist from chat. It consumes OneBot v11 events delivered
//! by a host adapter (one JSON event per stdin line) and emits
//! `send_group_msg` actions (one JSON action per stdout line); the transport
//! itself is the host's concern.
//!
//! # Features
//!
//! - **Join Greetings**: new members of whitelisted groups are welcomed,
//!   optionally with an @-mention
//! - **Chat Administration**: `add_group <id>` / `remove_group <id>` (and
//!   their Chinese synonyms `添加欢迎群` / `删除欢迎群`) from monitored
//!   groups maintain the whitelist
//! - **Write-Through Persistence**: every whitelist change is flushed to the
//!   data directory before it is acknowledged, and survives restarts
//! - **YAML Configuration**: with `NIHAO_` environment variable overrides
//!
//! # Usage
//!
//! ```bash
//! nihao --config config.yaml --data ./nihao-data
//! ```
//!
//! # Architecture
//!
//! - [`config`] - YAML configuration loading and the plugin settings snapshot
//! - [`store`] - write-through persistence of the settings snapshot
//! - [`events`] - typed views over the raw inbound event JSON
//! - [`segments`] - outbound message segments in the OneBot wire shape
//! - [`commands`] - admin command parsing and the add/remove handlers
//! - [`plugin`] - the two event entry points with their error boundaries
//! - [`bot`] - the stdin/stdout event loop
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - logging level (default: `info`)
//! - `NIHAO_PLUGIN__*` - configuration overrides, e.g.
//!   `NIHAO_PLUGIN__WELCOME_TEXT`

use std::path::Path;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config, plugin::WelcomePlugin, store::FileConfigStore};

mod bot;
mod commands;
mod config;
mod events;
mod plugin;
mod segments;
mod store;

/// Command-line arguments for the nihao bot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Every key is optional; see the [`config`] module for the format.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// Holds `config.json`, the snapshot of the plugin settings that is
    /// rewritten on every whitelist mutation and restored on startup.
    #[arg(short, long)]
    data: String,
}

/// Main entry point for the nihao bot.
///
/// Initializes logging (`RUST_LOG`, default `info`), parses arguments, loads
/// the configuration, restores a persisted settings snapshot when one exists,
/// and runs the event loop until the input stream closes.
///
/// Configuration errors are logged and terminate the process cleanly; once
/// the loop is running, no single event can bring it down.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting nihao {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let snapshot_path = Path::new(&args.data)
        .join("config.json")
        .to_string_lossy()
        .into_owned();
    let store = FileConfigStore::new(snapshot_path);

    // A snapshot persisted by a previous run wins over the file values, so
    // whitelist changes made from chat survive restarts
    let plugin_config = match store.load().await {
        Some(snapshot) => snapshot,
        None => config.plugin,
    };

    let plugin = WelcomePlugin::new(plugin_config, store);
    Bot::new(plugin).start().await;
}
