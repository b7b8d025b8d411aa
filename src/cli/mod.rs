use anyhow::Result;
use clap::{Parser, Subcommand};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod device;
pub mod notify;
pub mod render;
pub mod unsubscribe;

use crate::core::PushConfig;
use crate::device::FileStore;
use crate::manager::SubscriptionManager;
use crate::platform::HeadlessPlatform;

#[derive(Subcommand)]
enum Command {
    /// Print this machine's device id, creating it if needed
    DeviceId {},
    /// Generate a random UUID v4
    Uuid {},
    /// Send a test notification through the backend
    Notify {
        /// Device to notify, can be repeated
        #[arg(long = "device-id", required = true)]
        device_ids: Vec<String>,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
        /// URL to open when the notification is clicked
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Remove subscriptions from the backend, defaults to this device
    Unsubscribe {
        #[arg(long = "device-id")]
        device_ids: Vec<String>,
    },
    /// Render a push payload the way the background receiver would
    Render {
        /// JSON message body, omit for an empty message
        #[arg(long)]
        payload: Option<String>,
        /// Also simulate a click on the notification
        #[arg(long, action, default_value = "false")]
        click: bool,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_manager(store: FileStore) -> Result<SubscriptionManager<HeadlessPlatform, FileStore>> {
    let config = PushConfig::from_env()?;
    Ok(SubscriptionManager::new(
        config,
        HeadlessPlatform::default(),
        store,
    ))
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let storage_path = env::var("PUSH_HELPER_STORAGE_PATH").unwrap_or("./".to_string());
    let store = FileStore::new(&storage_path);

    // Handle each sub command
    match args.command {
        Some(Command::DeviceId {}) => {
            device::run(&store);
        }
        Some(Command::Uuid {}) => {
            device::generate();
        }
        Some(Command::Notify {
            device_ids,
            title,
            body,
            url,
            tag,
        }) => {
            notify::run(&build_manager(store)?, device_ids, title, body, url, tag).await?;
        }
        Some(Command::Unsubscribe { device_ids }) => {
            unsubscribe::run(&build_manager(store)?, device_ids).await?;
        }
        Some(Command::Render { payload, click }) => {
            render::run(payload, click).await?;
        }
        None => {}
    }

    Ok(())
}
