//! Server environment: configure, initialize, dehydrate.
//!
//! Loads scope configuration from `server.toml` (with `ORMLINK__`
//! environment overrides), materializes the models on the in-memory
//! engine, and writes the dehydrated snapshot for the client environment.

use anyhow::Context;
use ormlink::prelude::*;
use ormlink_logger::Logger;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ServerAppConfig {
    /// Where the dehydrated snapshot is written for the client to pick up.
    snapshot: PathBuf,
    /// Scope patches fed to the plugin verbatim.
    orm: ConfigPatch,
}

impl Default for ServerAppConfig {
    fn default() -> Self {
        Self { snapshot: PathBuf::from("snapshot.json"), orm: demo_patch() }
    }
}

/// The configuration used when no `server.toml` is present.
fn demo_patch() -> ConfigPatch {
    ConfigPatch::common(json!({
        "models": [{
            "identity": "user",
            "globalId": "User",
            "connection": "mem",
            "attributes": {
                "username": { "type": "string" },
                "pets": { "collection": "pet", "via": "owner" }
            }
        }, {
            "identity": "pet",
            "connection": "mem",
            "attributes": {
                "name": { "type": "string" },
                "owner": { "model": "user" }
            }
        }],
        "connections": { "mem": { "adapter": "memAdapter" } }
    }))
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

    let cfg: ServerAppConfig =
        load_config("server").context("Critical: Configuration is malformed")?;

    let plugin = OrmPlugin::builder(MemEngine::new).build();
    plugin.configure(cfg.orm)?;
    plugin
        .initialize(vec![Arc::new(MemAdapter::new("memAdapter")) as AdapterRef])
        .await
        .context("ORM initialization failed")?;

    let registry = plugin.registry();
    info!(identities = ?registry.identities(), "Live models registered");

    let state = plugin.dehydrate();
    let payload = serde_json::to_vec_pretty(&state)?;
    tokio::fs::write(&cfg.snapshot, payload)
        .await
        .with_context(|| format!("Failed to write snapshot: {}", cfg.snapshot.display()))?;
    info!(path = %cfg.snapshot.display(), "Configuration dehydrated");

    plugin.tear_down().await.context("ORM teardown failed")?;
    Ok(())
}
