//! Input discovery and reading
//!
//! Explicit file arguments are always taken. Directories are walked with the
//! `ignore` crate, keeping files whose extension is a configured document
//! extension and that match none of the exclude globs.

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::InputSettings;

/// Raw text of one input document
#[derive(Debug, Clone)]
pub struct InputDocument {
    /// `None` for stdin
    pub path: Option<PathBuf>,
    pub text: String,
}

impl InputDocument {
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            text,
        })
    }

    pub fn stdin() -> Result<Self> {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
        Ok(Self { path: None, text })
    }

    /// Name used in headers and messages
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| "<stdin>".to_string(), |path| path.display().to_string())
    }
}

pub struct InputDiscovery {
    settings: InputSettings,
    exclude: GlobSet,
}

impl InputDiscovery {
    pub fn new(settings: &InputSettings) -> Result<Self> {
        let exclude = build_globset(&settings.exclude).context("Invalid input.exclude pattern")?;
        Ok(Self {
            settings: settings.clone(),
            exclude,
        })
    }

    /// Expand files and directories into document paths, in argument order,
    /// without duplicates.
    pub fn discover(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();

        for path in paths {
            if path.is_file() {
                found.push(path.clone());
            } else if path.is_dir() {
                self.walk(path, &mut found);
            } else {
                bail!("Input not found: {}", path.display());
            }
        }

        let mut seen = HashSet::new();
        found.retain(|path| seen.insert(path.clone()));

        tracing::info!("Discovered {} input documents", found.len());
        Ok(found)
    }

    fn walk(&self, root: &Path, found: &mut Vec<PathBuf>) {
        let walker = WalkBuilder::new(root)
            .git_ignore(self.settings.use_gitignore)
            .git_exclude(self.settings.use_gitignore)
            .git_global(self.settings.use_gitignore)
            .ignore(self.settings.use_gitignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !self.has_document_extension(path) {
                tracing::trace!("Skipping {} (extension)", path.display());
                continue;
            }
            if self.is_excluded(path, root) {
                tracing::debug!("Skipping {} (excluded)", path.display());
                continue;
            }
            found.push(path.to_path_buf());
        }
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.settings.accepts_extension(ext))
    }

    /// Patterns are matched against the full path and the path below `root`
    fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        self.exclude.is_match(path)
            || path
                .strip_prefix(root)
                .is_ok_and(|relative| self.exclude.is_match(relative))
    }
}

/// Compile glob patterns; a trailing `/` matches everything below a directory
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = if pattern.ends_with('/') {
            format!("{pattern}**")
        } else {
            pattern.clone()
        };
        builder.add(Glob::new(&pattern)?);
    }
    Ok(builder.build()?)
}
