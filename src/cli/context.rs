use std::{env, path::PathBuf};

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::{
    config::{Config, ConfigManager},
    currency::{format_currency_value, format_date, CurrencyCode, LocaleConfig},
    storage::JsonStorage,
    utils::paths::{resolve_base, slug},
};

use super::{CliResult, SCRIPT_ENV};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        match env::var(SCRIPT_ENV) {
            Ok(value) if !value.is_empty() && value != "0" => CliMode::Script,
            _ => CliMode::Interactive,
        }
    }
}

/// Everything a command needs: storage, preferences and prompt styling.
pub struct ShellContext {
    pub mode: CliMode,
    pub theme: ColorfulTheme,
    pub storage: JsonStorage,
    pub config_manager: ConfigManager,
    pub config: Config,
    locale: LocaleConfig,
    currency: CurrencyCode,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> CliResult<Self> {
        Self::with_base_dir(mode, resolve_base(None))
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> CliResult<Self> {
        if mode == CliMode::Script {
            colored::control::set_override(false);
        }
        let storage = JsonStorage::new(Some(base.clone()), None)?;
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        Ok(Self {
            mode,
            theme: ColorfulTheme::default(),
            storage,
            locale: config.locale_config(),
            currency: config.currency_code(),
            config_manager,
            config,
        })
    }

    /// Asks for confirmation unless `assume_yes` is set or running a script.
    pub fn confirm(&self, prompt: &str, assume_yes: bool) -> CliResult<bool> {
        if assume_yes || self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub fn money(&self, amount: f64) -> String {
        format_currency_value(amount, &self.currency, &self.locale)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        format_date(&self.locale, date)
    }

    pub fn persist_config(&mut self) -> CliResult {
        self.config_manager.save(&self.config)?;
        self.locale = self.config.locale_config();
        self.currency = self.config.currency_code();
        Ok(())
    }

    /// Remembers the challenge so `show` works without arguments.
    pub fn remember(&mut self, name: &str) -> CliResult {
        let key = slug(name);
        if self.config.last_opened_challenge.as_deref() == Some(key.as_str()) {
            return Ok(());
        }
        self.config.last_opened_challenge = Some(key);
        self.persist_config()
    }

    pub fn forget(&mut self, name: &str) -> CliResult {
        if self.config.last_opened_challenge.as_deref() == Some(slug(name).as_str()) {
            self.config.last_opened_challenge = None;
            self.persist_config()?;
        }
        Ok(())
    }
}
