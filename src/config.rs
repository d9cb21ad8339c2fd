use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use crate::inference::DEFAULT_MODEL;

pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_DATA_DIR: &str = ".codecritic";
pub const DEFAULT_TOKEN_ENV: &str = "CODECRITIC_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CodecriticConfig {
    pub port: Option<u16>,
    pub data_dir: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub inference: InferenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InferenceConfig {
    /// Endpoint URL; `{model}` is replaced by the model identifier
    pub endpoint: Option<String>,
    /// Environment variable holding the bearer token
    pub token_env: Option<String>,
}

impl CodecriticConfig {
    /// Config written by `codecritic init`
    pub fn starter() -> Self {
        Self {
            port: Some(DEFAULT_PORT),
            data_dir: Some(DEFAULT_DATA_DIR.to_string()),
            model: Some(DEFAULT_MODEL.to_string()),
            inference: InferenceConfig {
                endpoint: Some(
                    "https://api.cloudflare.com/client/v4/accounts/<account-id>/ai/run/{model}"
                        .to_string(),
                ),
                token_env: Some(DEFAULT_TOKEN_ENV.to_string()),
            },
        }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("codecritic.toml")
}

/// Database file backing the agent instance called `name`
pub fn database_path_in(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.sqlite3", name))
}

/// Read the config at `path` (or `./codecritic.toml`), falling back to defaults when absent
pub fn load_config(path: Option<&Path>) -> anyhow::Result<CodecriticConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(CodecriticConfig::default());
        }
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };

    toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

/// Write `config` to `path`, creating parent directories.
///
/// Without `force` an existing file is left alone and an error is returned.
pub fn write_config(path: &Path, config: &CodecriticConfig, force: bool) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display())
        }
        Err(e) => return Err(e).with_context(|| format!("creating {}", path.display())),
    };

    file.write_all(toml::to_string_pretty(config)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_keys_missing() {
        let config: CodecriticConfig = toml::from_str("").unwrap();
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
        assert!(config.inference.endpoint.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: CodecriticConfig = toml::from_str(
            r#"
            port = 9000
            model = "@cf/mistral/mistral-7b-instruct-v0.1"

            [inference]
            endpoint = "http://localhost:11434/run/{model}"
            token_env = "MY_TOKEN"
            "#,
        )
        .unwrap();
        assert_eq!(config.port(), 9000);
        assert_eq!(config.model(), "@cf/mistral/mistral-7b-instruct-v0.1");
        assert_eq!(config.inference.token_env.as_deref(), Some("MY_TOKEN"));
    }

    #[test]
    fn test_write_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codecritic.toml");

        write_config(&path, &CodecriticConfig::starter(), false).unwrap();
        assert!(write_config(&path, &CodecriticConfig::starter(), false).is_err());
        write_config(&path, &CodecriticConfig::starter(), true).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.port(), DEFAULT_PORT);
        assert_eq!(loaded.inference.token_env.as_deref(), Some(DEFAULT_TOKEN_ENV));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/conf/codecritic.toml");

        write_config(&path, &CodecriticConfig::starter(), false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.port(), DEFAULT_PORT);
        assert!(config.inference.endpoint.is_none());
    }

    #[test]
    fn test_invalid_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "port = \"eighty\"").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{}", err).contains("broken.toml"));
    }

    #[test]
    fn test_database_path_per_name() {
        let path = database_path_in(Path::new(".codecritic"), "code-reviewer");
        assert_eq!(path, PathBuf::from(".codecritic/code-reviewer.sqlite3"));
    }
}
