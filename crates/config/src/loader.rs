use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    error::{ConfigError, Context, Result},
    schema::{BanterConfig, GeminiConfig},
};

/// Standard config file name, checked project-local then user-global.
const CONFIG_FILENAME: &str = "banter.toml";

/// Load config from an explicit path.
pub fn load_config(path: &Path) -> Result<BanterConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut cfg: BanterConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./banter.toml` (project-local)
/// 2. `~/.config/banter/banter.toml` (user-global)
///
/// Falls back to `BanterConfig::default()` (plus environment overrides)
/// when no file is found or the file fails to parse.
pub fn discover_and_load() -> BanterConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    let mut cfg = BanterConfig::default();
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    cfg
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return Some(local);
    }

    if let Some(dirs) = directories::ProjectDirs::from("", "", "banter") {
        let p = dirs.config_dir().join(CONFIG_FILENAME);
        if p.exists() {
            return Some(p);
        }
    }

    None
}

/// Apply `BANTER_*` environment overrides on top of file values.
///
/// `lookup` is injected so tests can override without touching the process
/// environment.
fn apply_env_overrides<F>(cfg: &mut BanterConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bind) = lookup("BANTER_BIND") {
        cfg.server.bind = bind;
    }
    if let Some(port) = lookup("BANTER_PORT") {
        match port.parse() {
            Ok(p) => cfg.server.port = p,
            Err(_) => warn!(value = %port, "ignoring non-numeric BANTER_PORT"),
        }
    }
    if let Some(url) = lookup("BANTER_FRONTEND_URL") {
        cfg.server.frontend_url = Some(url);
    }
    if let Some(model) = lookup("BANTER_GEMINI_MODEL") {
        cfg.gemini.model = model;
    }
}

/// Read the persona / system-instruction text for the generative backend.
///
/// A missing file is startup-fatal: the caller is expected to abort before
/// serving traffic.
pub fn load_system_instruction(gemini: &GeminiConfig) -> Result<String> {
    let path = Path::new(&gemini.system_instruction_path);
    std::fs::read_to_string(path).map_err(|source| ConfigError::PersonaFile {
        path: path.display().to_string(),
        source,
    })
}
