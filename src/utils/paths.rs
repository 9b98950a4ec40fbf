use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".challenge_core";
const CHALLENGE_DIR: &str = "challenges";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "CHALLENGE_CORE_HOME";

/// Returns the application-specific data directory, defaulting to `~/.challenge_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Resolves a caller-supplied root or falls back to [`app_data_dir`].
pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(app_data_dir)
}

pub fn challenges_dir_in(base: &Path) -> PathBuf {
    base.join(CHALLENGE_DIR)
}

pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

/// Lower-case, dash-separated file stem for a challenge name.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "challenge".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slug("  Viagem  de Férias! "), "viagem-de-férias");
        assert_eq!(slug("Car/2025"), "car-2025");
        assert_eq!(slug("!!!"), "challenge");
    }

    #[test]
    fn paths_hang_off_base() {
        let base = PathBuf::from("/tmp/cc");
        assert_eq!(challenges_dir_in(&base), base.join("challenges"));
        assert_eq!(config_file_in(&base), base.join("config.json"));
    }
}
