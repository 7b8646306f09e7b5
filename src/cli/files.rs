//! `invoicegen files`: list data files and templates.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_TEMPLATES_DIR, LISTED_DATA_EXTENSIONS, TEMPLATE_EXTENSIONS,
};
use crate::core::InvoiceError;

/// List data files and templates available for rendering.
#[derive(Args, Debug)]
pub struct FilesCommand {
    /// Directory holding .csv/.json data files
    #[arg(long, default_value = DEFAULT_DATA_DIR, value_name = "DIR")]
    data_dir: PathBuf,

    /// Directory holding .html templates
    #[arg(long, default_value = DEFAULT_TEMPLATES_DIR, value_name = "DIR")]
    templates_dir: PathBuf,
}

impl FilesCommand {
    pub fn execute(self) -> Result<()> {
        let data = list_files(&self.data_dir, LISTED_DATA_EXTENSIONS)?;
        let templates = list_files(&self.templates_dir, TEMPLATE_EXTENSIONS)?;

        print_section("Data files", &self.data_dir, &data);
        print_section("Templates", &self.templates_dir, &templates);

        let empty: Vec<String> = [(&data, &self.data_dir), (&templates, &self.templates_dir)]
            .into_iter()
            .filter(|(files, _)| files.is_empty())
            .map(|(_, dir)| dir.display().to_string())
            .collect();
        if !empty.is_empty() {
            return Err(InvoiceError::NoInputFiles {
                dir: empty.join(", "),
            }
            .into());
        }
        Ok(())
    }
}

fn print_section(title: &str, dir: &Path, files: &[String]) {
    println!("{} ({}):", title.bold(), dir.display());
    if files.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for name in files {
        println!("  {name}");
    }
}

/// File names in `dir` whose extension is in `extensions` (case-insensitive),
/// sorted case-insensitively. A missing directory lists as empty.
///
/// # Errors
///
/// Returns an error if `dir` exists but cannot be read.
pub fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<String>> {
    if !dir.is_dir() {
        tracing::debug!("Directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if !path.is_file() || !matches {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort_by_cached_key(|n| (n.to_lowercase(), n.clone()));
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_files_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        for name in ["b.json", "A.CSV", "c.txt", "notes.md"] {
            std::fs::write(temp.path().join(name), "").unwrap();
        }
        std::fs::create_dir(temp.path().join("dir.csv")).unwrap();

        let files = list_files(temp.path(), LISTED_DATA_EXTENSIONS).unwrap();
        assert_eq!(files, vec!["A.CSV", "b.json"]);
    }

    #[test]
    fn test_missing_directory_is_empty_and_not_created() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");
        assert!(list_files(&dir, LISTED_DATA_EXTENSIONS).unwrap().is_empty());
        assert!(!dir.exists());
    }
}
