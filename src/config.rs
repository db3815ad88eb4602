use serde::{Deserialize, Serialize};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::core::errors::{OrgError, OrgResult};

const CONFIG_DIR: &str = ".config/oporg";
const CONFIG_FILE: &str = "config.json";

pub const ENV_CONFIG_PATH: &str = "OPORG_CONFIG_PATH";
pub const ENV_FAKE_STORAGE_PATH: &str = "OP_FAKE_STORAGE_PATH";
pub const ENV_OP_CLI_PATH: &str = "OP_CLI_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Fake,
    Opcli,
}

impl FromStr for BackendKind {
    type Err = OrgError;

    fn from_str(value: &str) -> OrgResult<Self> {
        match value {
            "fake" => Ok(Self::Fake),
            "opcli" => Ok(Self::Opcli),
            other => Err(OrgError::UnsupportedBackend(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub backend: BackendKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_storage_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_cli_path: Option<PathBuf>,
}

impl RuntimeConfig {
    pub fn fake(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendKind::Fake,
            fake_storage_path: Some(path.into()),
            op_cli_path: None,
        }
    }

    pub fn opcli(binary: Option<PathBuf>) -> Self {
        Self {
            backend: BackendKind::Opcli,
            fake_storage_path: None,
            op_cli_path: binary,
        }
    }

    /// A non-empty `OP_FAKE_STORAGE_PATH` selects the fake backend; otherwise
    /// the `op` backend is used, with `OP_CLI_PATH` overriding the binary.
    pub fn from_env() -> Self {
        Self::from_vars(
            non_empty_var(ENV_FAKE_STORAGE_PATH),
            non_empty_var(ENV_OP_CLI_PATH),
        )
    }

    fn from_vars(fake_storage_path: Option<String>, op_cli_path: Option<String>) -> Self {
        match fake_storage_path {
            Some(path) => Self::fake(path),
            None => Self::opcli(op_cli_path.map(PathBuf::from)),
        }
    }

    /// Reads a saved config. No file at `path` is `Ok(None)`.
    pub fn load(path: &Path) -> OrgResult<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(OrgError::Config(format!(
                    "could not read {}: {err}",
                    path.display()
                )));
            }
        };

        let config = serde_json::from_str(&content).map_err(|err| {
            OrgError::Config(format!("{} is not a valid config: {err}", path.display()))
        })?;
        Ok(Some(config))
    }

    /// Writes the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> OrgResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(OrgError::Write)?;
        }
        let data = serde_json::to_vec_pretty(self).map_err(OrgError::Marshal)?;
        fs::write(path, data).map_err(OrgError::Write)
    }

    pub fn resolve_from(path: &Path) -> OrgResult<Self> {
        Ok(Self::load(path)?.unwrap_or_else(Self::from_env))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Location of the saved config: `$OPORG_CONFIG_PATH`, else
/// `~/.config/oporg/config.json`.
pub fn config_file_path() -> OrgResult<PathBuf> {
    if let Some(path) = non_empty_var(ENV_CONFIG_PATH) {
        return Ok(PathBuf::from(path));
    }

    let home = env::var("HOME")
        .map_err(|_| OrgError::Config("HOME environment variable is not set".to_owned()))?;
    Ok(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE))
}

/// The saved config when there is one, else the environment.
pub fn resolve() -> OrgResult<RuntimeConfig> {
    RuntimeConfig::resolve_from(&config_file_path()?)
}
