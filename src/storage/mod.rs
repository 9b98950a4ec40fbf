pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{challenge::Challenge, errors::Result};

/// Abstraction over persistence backends capable of storing challenges.
pub trait StorageBackend: Send + Sync {
    fn save(&self, challenge: &Challenge) -> Result<PathBuf>;
    fn load(&self, name: &str) -> Result<Challenge>;
    fn list(&self) -> Result<Vec<Challenge>>;
    fn delete(&self, name: &str) -> Result<()>;
    fn list_backups(&self, name: &str) -> Result<Vec<PathBuf>>;
    fn restore_backup(&self, name: &str, backup: &Path) -> Result<Challenge>;

    /// Ad-hoc export outside the managed directory.
    fn save_to_path(&self, challenge: &Challenge, path: &Path) -> Result<()> {
        json_backend::save_challenge_to_path(challenge, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Challenge> {
        json_backend::load_challenge_from_path(path)
    }
}

pub use json_backend::JsonStorage;
