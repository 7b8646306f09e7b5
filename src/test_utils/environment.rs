//! Isolated working directory for integration and library tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::{DataFixture, TemplateFixture};
use crate::config::Config;
use crate::document::EngineKind;

/// Temporary project with `data/`, `templates/` and a config file that
/// selects the HTML engine, so tests never need WeasyPrint.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
}

impl TestEnvironment {
    /// Create an empty project directory.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            temp_dir,
            project_dir,
        })
    }

    /// Project root.
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// `data/` under the project root (not created until written to).
    pub fn data_dir(&self) -> PathBuf {
        self.project_dir.join("data")
    }

    /// `templates/` under the project root (not created until written to).
    pub fn templates_dir(&self) -> PathBuf {
        self.project_dir.join("templates")
    }

    /// `output/` under the project root.
    pub fn output_dir(&self) -> PathBuf {
        self.project_dir.join("output")
    }

    /// Write a data fixture into `data/`.
    pub fn add_data(&self, fixture: &DataFixture) -> Result<PathBuf> {
        fixture.write_to(&self.data_dir())
    }

    /// Write a template fixture into `templates/`.
    pub fn add_template(&self, fixture: &TemplateFixture) -> Result<PathBuf> {
        fixture.write_to(&self.templates_dir())
    }

    /// Config used by tests: HTML engine, output under the project.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.engine.kind = EngineKind::Html;
        config.output_dir = self.output_dir();
        config
    }

    /// Write [`TestEnvironment::config`] to `config.toml` in the temp root.
    pub fn write_config(&self) -> Result<PathBuf> {
        let path = self.temp_dir.path().join("config.toml");
        self.config().save_to(&path)?;
        Ok(path)
    }

    /// Read a file relative to the project root.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(fs::read_to_string(self.project_dir.join(path))?)
    }

    /// Whether a path relative to the project root exists.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.project_dir.join(path).exists()
    }
}
