use crate::domain::models::{Config, RecordId};
use std::path::{Path, PathBuf};

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/data-release/config.toml"))
}

/// Reads `path`, or the per-user config file when it exists, or defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?;
    Ok(toml::from_str(&raw)?)
}

/// Applies `METADATA_PORT`, `METADATA_ENDPOINT` and `ADMIN_USER_ID`.
///
/// `METADATA_PORT` follows the container-link form `tcp://host:port`.
pub fn apply_env_overrides(cfg: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    let set = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
    if let Some(port) = set("METADATA_PORT") {
        cfg.metadata.endpoint_url = port.replacen("tcp", "http", 1);
    }
    if let Some(endpoint) = set("METADATA_ENDPOINT") {
        cfg.metadata.endpoint_url = endpoint;
    }
    if let Some(admin) = set("ADMIN_USER_ID") {
        cfg.release.admin_user_id = RecordId::parse(&admin);
    }
}
