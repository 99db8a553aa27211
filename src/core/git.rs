use anyhow::{Context, Result};
use git2::{DiffFormat, Repository};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Source of the staged diff text. Any failure to produce a diff is reported
/// as absence, which callers treat the same as "no changes".
pub trait DiffSource: Send + Sync {
    fn staged_diff(&self) -> Option<String>;
}

pub struct GitDiffSource {
    repo_path: PathBuf,
}

impl GitDiffSource {
    pub fn new(repo_path: impl AsRef<Path>) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    fn collect_staged_diff(&self) -> Result<String> {
        let repo =
            Repository::discover(&self.repo_path).context("failed to find git repository")?;

        let head = repo.head()?.peel_to_tree()?;
        let mut index = repo.index()?;
        let oid = index.write_tree()?;
        let index_tree = repo.find_tree(oid)?;

        let diff = repo.diff_tree_to_tree(Some(&head), Some(&index_tree), None)?;

        let mut diff_text = Vec::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            // The origin marker carries the +/- prefix the parser relies on.
            match line.origin() {
                '+' | '-' | ' ' => diff_text.push(line.origin() as u8),
                _ => {}
            }
            diff_text.extend_from_slice(line.content());
            true
        })?;

        Ok(String::from_utf8_lossy(&diff_text).to_string())
    }
}

impl DiffSource for GitDiffSource {
    fn staged_diff(&self) -> Option<String> {
        match self.collect_staged_diff() {
            Ok(diff) => Some(diff),
            Err(err) => {
                warn!("failed to read staged diff: {:#}", err);
                None
            }
        }
    }
}
