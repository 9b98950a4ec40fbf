use chrono::Utc;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    challenge::Challenge,
    config::{tmp_path, write_atomic},
    errors::{ChallengeError, Result},
    utils::paths::{backups_dir_in, challenges_dir_in, ensure_dir, resolve_base, slug},
};

use super::StorageBackend;

const CHALLENGE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const DEFAULT_RETENTION: usize = 5;

/// Stores each challenge as a pretty-printed JSON file named after its slug,
/// keeping timestamped copies of the previous version on every overwrite.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    challenges_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = resolve_base(root);
        let challenges_dir = challenges_dir_in(&root);
        let backups_dir = backups_dir_in(&root);
        ensure_dir(&challenges_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            root,
            challenges_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn challenge_path(&self, name: &str) -> PathBuf {
        self.challenges_dir
            .join(format!("{}.{}", slug(name), CHALLENGE_EXTENSION))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(slug(name))
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let target = dir.join(format!("{}_{}.{}", slug(name), timestamp, CHALLENGE_EXTENSION));
        fs::copy(path, &target)?;
        self.prune_backups(name)
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        for stale in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(stale) {
                tracing::warn!(path = %stale.display(), %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, challenge: &Challenge) -> Result<PathBuf> {
        challenge.validate()?;
        let path = self.challenge_path(&challenge.name);
        self.backup_existing_file(&challenge.name, &path)?;
        save_challenge_to_path(challenge, &path)?;
        tracing::info!(challenge = %challenge.name, path = %path.display(), "challenge saved");
        Ok(path)
    }

    fn load(&self, name: &str) -> Result<Challenge> {
        let path = self.challenge_path(name);
        if !path.exists() {
            return Err(ChallengeError::NotFound(name.to_string()));
        }
        load_challenge_from_path(&path)
    }

    fn list(&self) -> Result<Vec<Challenge>> {
        let mut challenges = Vec::new();
        for entry in fs::read_dir(&self.challenges_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(CHALLENGE_EXTENSION) {
                continue;
            }
            match load_challenge_from_path(&path) {
                Ok(challenge) => challenges.push(challenge),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "skipping unreadable challenge")
                }
            }
        }
        challenges.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(challenges)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.challenge_path(name);
        if !path.exists() {
            return Err(ChallengeError::NotFound(name.to_string()));
        }
        self.backup_existing_file(name, &path)?;
        fs::remove_file(&path)?;
        tracing::info!(challenge = name, "challenge deleted");
        Ok(())
    }

    /// Newest first.
    fn list_backups(&self, name: &str) -> Result<Vec<PathBuf>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(CHALLENGE_EXTENSION) {
                entries.push(path);
            }
        }
        entries.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(entries)
    }

    fn restore_backup(&self, name: &str, backup: &Path) -> Result<Challenge> {
        if !backup.exists() {
            return Err(ChallengeError::NotFound(format!(
                "backup `{}` for `{}`",
                backup.display(),
                name
            )));
        }
        let challenge = load_challenge_from_path(backup)?;
        let path = self.challenge_path(name);
        self.backup_existing_file(name, &path)?;
        save_challenge_to_path(&challenge, &path)?;
        Ok(challenge)
    }
}

/// Writes the challenge to disk atomically by staging to a temporary file.
pub fn save_challenge_to_path(challenge: &Challenge, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(challenge)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a challenge snapshot from disk, returning structured errors on failure.
pub fn load_challenge_from_path(path: &Path) -> Result<Challenge> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
