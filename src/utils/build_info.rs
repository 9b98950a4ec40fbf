//! Build provenance embedded by `build.rs` as `CHALLENGE_CORE_BUILD_*`
//! environment variables.

const UNKNOWN: &str = "unknown";

macro_rules! build_env {
    ($key:literal) => {
        match option_env!(concat!("CHALLENGE_CORE_BUILD_", $key)) {
            Some(value) => value,
            None => UNKNOWN,
        }
    };
}

/// Crate version as compiled.
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where and how this binary was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub tree: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub const BUILD: BuildInfo = BuildInfo {
    version: CORE_VERSION,
    commit: build_env!("HASH"),
    tree: build_env!("STATUS"),
    built_at: build_env!("TIMESTAMP"),
    target: build_env!("TARGET"),
    profile: build_env!("PROFILE"),
    rustc: build_env!("RUSTC"),
};

pub fn current() -> BuildInfo {
    BUILD
}

impl BuildInfo {
    /// Built from a checkout with uncommitted changes.
    pub fn is_dirty(&self) -> bool {
        self.tree == "dirty"
    }

    /// Commit hash, flagged with `+` when the tree was dirty.
    pub fn revision(&self) -> String {
        if self.is_dirty() {
            format!("{}+", self.commit)
        } else {
            self.commit.to_string()
        }
    }

    /// Label/value rows shown by the `version` command.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Revision", self.revision()),
            ("Built at", self.built_at.to_string()),
            ("Target", format!("{} ({})", self.target, self.profile)),
            ("Rustc", self.rustc.to_string()),
        ]
    }

    /// One line for the startup log.
    pub fn summary(&self) -> String {
        format!(
            "challenge_core {} @ {} [{} {}]",
            self.version,
            self.revision(),
            self.target,
            self.profile
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(tree: &'static str) -> BuildInfo {
        BuildInfo {
            version: "1.2.3",
            commit: "abc1234",
            tree,
            built_at: "2025-01-01T00:00:00Z",
            target: "x86_64-unknown-linux-gnu",
            profile: "debug",
            rustc: "rustc 1.80.0",
        }
    }

    #[test]
    fn dirty_trees_mark_the_revision() {
        assert_eq!(sample("clean").revision(), "abc1234");
        assert_eq!(sample("dirty").revision(), "abc1234+");
        assert_eq!(
            sample("dirty").summary(),
            "challenge_core 1.2.3 @ abc1234+ [x86_64-unknown-linux-gnu debug]"
        );
    }

    #[test]
    fn embedded_version_matches_manifest() {
        assert_eq!(current().version, env!("CARGO_PKG_VERSION"));
        assert!(!current().commit.is_empty());
        assert_eq!(current().rows().len(), 4);
    }
}
