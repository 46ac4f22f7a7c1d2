use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One of the three layered configuration scopes.
///
/// `Common` applies everywhere; `Server` and `Client` refine it for their
/// respective runtime environments. The effective configuration for an
/// environment is `Common` overridden leaf-by-leaf by that environment's
/// scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Common,
    Server,
    Client,
}

impl Scope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Server => "server",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The runtime environment a plugin instance materializes models for.
///
/// An environment selects which scope overrides `Common` when the
/// effective configuration is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Server,
    Client,
}

impl Environment {
    /// The scope that overrides `Common` for this environment.
    #[must_use]
    pub const fn scope(self) -> Scope {
        match self {
            Self::Server => Scope::Server,
            Self::Client => Scope::Client,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scope().as_str())
    }
}

/// Recursively merges `patch` into `base`.
///
/// Plain objects are merged key-by-key; every other value kind (scalars,
/// arrays, `null`) replaces the base value wholesale. Keys absent from
/// `patch` are left untouched in `base`, so later scopes only win on the
/// leaves they actually set.
pub fn deep_merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match base_map.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base_map.insert(key, value);
                    },
                }
            }
        },
        (slot, patch) => *slot = patch,
    }
}
