//! backstage - command-line front end for the artist dashboard
//!
//! Keeps the dashboard snapshots in a local data folder and talks to the
//! booking API through backstage-proxy.

use std::path::Path;

use anyhow::{Context, Result};
use backstage_common::config::{self, TomlConfig};
use backstage_common::persistence::FileStore;
use backstage_common::sync::HttpSyncClient;
use backstage_common::{time, Session};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging level comes from the config file, so read it first and report
    // any problem once the subscriber is up
    let loaded = TomlConfig::load(cli.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| config::LoggingConfig::default().level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let toml_config = loaded.unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        TomlConfig::default()
    });

    let root_folder = config::resolve_root_folder(cli.root_folder.as_deref(), &toml_config);
    let proxy_url = config::resolve_proxy_url(cli.proxy_url.as_deref(), &toml_config);
    debug!("Data folder: {}", root_folder.display());
    debug!("Proxy: {}", proxy_url);

    let session = open_session(&root_folder, &proxy_url).await?;

    let mut stdout = std::io::stdout().lock();
    commands::run(&session, cli.command, time::today(), &mut stdout).await
}

async fn open_session(root_folder: &Path, proxy_url: &str) -> Result<Session<FileStore, HttpSyncClient>> {
    let client = HttpSyncClient::new(proxy_url).context("Failed to create HTTP client")?;
    Ok(Session::open(FileStore::new(root_folder), client).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backstage_common::persistence::DATA_KEY;
    use backstage_common::Action;
    use backstage_common::model::Artist;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_session_survives_restart() {
        let dir = TempDir::new().unwrap();

        let first = open_session(dir.path(), config::DEFAULT_PROXY_URL).await.unwrap();
        first.dispatch(Action::AddArtist(Artist::new("CYRIL", "#FF6B35"))).await;
        assert!(dir.path().join(format!("{}.json", DATA_KEY)).exists());

        let second = open_session(dir.path(), config::DEFAULT_PROXY_URL).await.unwrap();
        assert_eq!(second.state().await, first.state().await);
    }
}
