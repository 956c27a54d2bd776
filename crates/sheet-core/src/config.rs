use crate::backoff::{CoolDownLadder, DEFAULT_COOL_DOWNS};
use crate::orchestrator::RetryPolicy;
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ACCOUNT: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_cool_downs")]
    pub cool_downs: Vec<u64>,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub api_host: Option<String>,
    #[serde(default = "default_account")]
    pub account: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cool_downs: default_cool_downs(),
            max_retries: None,
            api_host: None,
            account: default_account(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).context("read config")?;
        let config: Self = serde_json::from_str(&data).context("parse config")?;
        config.ladder().context("validate cool_downs")?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("create config directory")?;
        }
        let data = serde_json::to_string_pretty(self).context("serialize config")?;
        fs::write(path, data).context("write config")?;
        Ok(())
    }

    pub fn ladder(&self) -> anyhow::Result<CoolDownLadder> {
        Ok(CoolDownLadder::new(self.cool_downs.clone())?)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
        }
    }
}

fn default_cool_downs() -> Vec<u64> {
    DEFAULT_COOL_DOWNS.to_vec()
}

fn default_account() -> String {
    DEFAULT_ACCOUNT.to_string()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let project =
        ProjectDirs::from("com", "sheet-reader", "sheet-reader").context("resolve project dirs")?;
    Ok(project.config_dir().join("config.json"))
}
