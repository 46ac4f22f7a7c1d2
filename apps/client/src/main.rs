//! Client environment: rehydrate and enumerate.
//!
//! Reads the snapshot produced by `ormlink-server`, reconstructs the
//! configuration, and—because client adapters are bundled here—lets
//! `rehydrate` initialize immediately.

use anyhow::Context;
use ormlink::prelude::*;
use ormlink_logger::Logger;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ClientAppConfig {
    /// The snapshot written by the server environment.
    snapshot: PathBuf,
}

impl Default for ClientAppConfig {
    fn default() -> Self {
        Self { snapshot: PathBuf::from("snapshot.json") }
    }
}

fn load_config<T: serde::de::DeserializeOwned>(name: &str) -> anyhow::Result<T> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .add_source(config::Environment::with_prefix("ORMLINK").separator("__"))
        .build()
        .context("Failed to build config")?;
    settings.try_deserialize().context("Failed to deserialize config")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Logger::builder().init()?;

    let cfg: ClientAppConfig =
        load_config("client").context("Critical: Configuration is malformed")?;

    let payload = tokio::fs::read(&cfg.snapshot).await.with_context(|| {
        format!("Failed to read snapshot {} (run ormlink-server first)", cfg.snapshot.display())
    })?;
    let state: DehydratedState =
        serde_json::from_slice(&payload).context("Snapshot is not valid dehydrated state")?;

    let plugin = OrmPlugin::builder(MemEngine::new)
        .environment(Environment::Client)
        .client_adapters(vec![Arc::new(MemAdapter::new("memAdapter")) as AdapterRef])
        .build();
    plugin.rehydrate(state).await.context("Rehydration failed")?;

    let registry = plugin.registry();
    info!(identities = ?registry.identities(), "Client models rehydrated");

    let mut store = StoreContext::default();
    plugin.bind_store_context(&mut store);
    if let Some(orm) = &store.orm {
        for identity in registry.identities() {
            let associations = orm.associations(&identity)?;
            info!(model = %identity, associations = associations.len(), "Model ready");
        }
    }

    plugin.tear_down().await.context("ORM teardown failed")?;
    Ok(())
}
