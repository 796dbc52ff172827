use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::ProgressState;

/// Where progress is kept between runs.
pub trait ProgressStore {
    fn load_progress(&self) -> anyhow::Result<Option<ProgressState>>;
    fn save_progress(&mut self, state: &ProgressState) -> anyhow::Result<()>;
    /// Forgets the saved progress; the next load starts a new game.
    fn clear_progress(&mut self) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Option<ProgressState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load_progress(&self) -> anyhow::Result<Option<ProgressState>> {
        Ok(self.state.clone())
    }

    fn save_progress(&mut self, state: &ProgressState) -> anyhow::Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn clear_progress(&mut self) -> anyhow::Result<()> {
        self.state = None;
        Ok(())
    }
}

/// Progress as a TOML document on disk. A missing file is a fresh start.
#[derive(Clone, Debug)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for TomlFileStore {
    fn load_progress(&self) -> anyhow::Result<Option<ProgressState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let source = std::fs::read_to_string(&self.path)
            .with_context(|| format!("unable to read {}", self.path.display()))?;
        let state = toml::from_str::<ProgressState>(&source)
            .with_context(|| format!("unable to parse progress in {}", self.path.display()))?;
        Ok(Some(state))
    }

    fn save_progress(&mut self, state: &ProgressState) -> anyhow::Result<()> {
        let document = toml::to_string_pretty(state).context("unable to serialize progress")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("unable to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, document)
            .with_context(|| format!("unable to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "progress saved");
        Ok(())
    }

    fn clear_progress(&mut self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "progress cleared");
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error).with_context(|| format!("unable to remove {}", self.path.display())),
        }
    }
}
