use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    challenge::DEFAULT_DEPOSIT_COUNT,
    currency::{CurrencyCode, LocaleConfig},
    errors::{ChallengeError, Result},
    utils::paths::{config_file_in, ensure_dir, resolve_base},
};

const TMP_SUFFIX: &str = "tmp";

/// User preferences shared by every challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_deposit_count")]
    pub default_deposit_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_challenge: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            default_deposit_count: DEFAULT_DEPOSIT_COUNT,
            last_opened_challenge: None,
        }
    }
}

impl Config {
    fn default_deposit_count() -> usize {
        DEFAULT_DEPOSIT_COUNT
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().len() != 3 {
            return Err(ChallengeError::Config(format!(
                "currency `{}` is not an ISO 4217 code",
                self.currency
            )));
        }
        if self.default_deposit_count == 0 {
            return Err(ChallengeError::Config(
                "default deposit count must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Loads and persists [`Config`] as JSON inside the data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(resolve_base(None))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| ChallengeError::Config(format!("{}: {}", self.path.display(), err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
