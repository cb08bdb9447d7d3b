use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Instrument used when the config does not name one.
pub const DEFAULT_INSTRUMENT: &str = "wellness_check";

const APP_DIR: &str = "com.haven.cli";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HavenConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Directory holding the journal and any other persisted state.
    pub data_dir: PathBuf,
    /// Added in v1; older configs are backfilled with [`DEFAULT_INSTRUMENT`].
    pub instrument_id: String,
    /// Backfilled with the migration time when a v0 config lacks it.
    pub created_at: jiff::Timestamp,
}

impl HavenConfig {
    /// A fresh config pointing at the platform data directory.
    pub fn with_defaults() -> eyre::Result<Self> {
        Ok(Self {
            config_version: CURRENT_VERSION,
            data_dir: default_data_dir()?,
            instrument_id: DEFAULT_INSTRUMENT.to_string(),
            created_at: jiff::Timestamp::now(),
        })
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join(APP_DIR))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

/// Load the config file, or defaults when none has been saved.
pub fn load_or_default() -> eyre::Result<HavenConfig> {
    if has_config() {
        load_config()
    } else {
        tracing::debug!("no config file, using defaults");
        HavenConfig::with_defaults()
    }
}

pub fn load_config() -> eyre::Result<HavenConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> eyre::Result<HavenConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(v) => u32::try_from(v)
            .map_err(|_| eyre::eyre!("config_version {v} is not a valid version"))?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: HavenConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Haven."
        ));
    }

    // v0 → v1: add instrument_id and created_at
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("instrument_id")
            .or_insert(serde_json::Value::String(DEFAULT_INSTRUMENT.to_string()));
        obj.entry("created_at")
            .or_insert(serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added instrument_id, created_at)");
    }

    Ok(json)
}

pub fn save_config(config: &HavenConfig) -> eyre::Result<PathBuf> {
    let path = config_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &HavenConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Set restrictive permissions on Unix before renaming
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
