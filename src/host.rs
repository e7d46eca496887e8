//! The editor side: which tabs are open, and opening or closing them.

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Result, TabHeroError};
use crate::models::TabReference;

/// Editors tried after `$VISUAL` and `$EDITOR`
const FALLBACK_EDITORS: [&str; 3] = ["nvim", "vim", "nano"];

#[allow(async_fn_in_trait)]
pub trait TabHost {
    /// Tabs currently open, in tab order
    fn open_tabs(&self) -> Vec<TabReference>;
    /// Opens the tabs and returns how many were opened
    async fn open(&self, tabs: &[TabReference]) -> Result<usize>;
    async fn close_all(&self) -> Result<()>;
}

/// Terminal host: the files named on the command line count as the open tabs,
/// and sets are opened by launching an editor on their files.
#[derive(Debug, Clone)]
pub struct EditorHost {
    files: Vec<PathBuf>,
    editor: Option<String>,
}

impl EditorHost {
    /// `files` are resolved against `base` when relative
    pub fn new(files: &[PathBuf], base: &Path) -> Self {
        let files = files.iter().map(|f| absolutize(f, base)).collect();
        Self {
            files,
            editor: None,
        }
    }

    /// Uses `command` instead of looking at the environment
    pub fn with_editor(mut self, command: Option<String>) -> Self {
        self.editor = command;
        self
    }

    fn candidates(&self) -> Vec<String> {
        match &self.editor {
            Some(command) => vec![command.clone()],
            None => editor_candidates(
                std::env::var("VISUAL").ok(),
                std::env::var("EDITOR").ok(),
            ),
        }
    }
}

impl TabHost for EditorHost {
    fn open_tabs(&self) -> Vec<TabReference> {
        self.files.iter().map(|f| TabReference::from_path(f)).collect()
    }

    async fn open(&self, tabs: &[TabReference]) -> Result<usize> {
        let paths = existing_paths(tabs);
        if paths.is_empty() {
            return Ok(0);
        }

        let candidates = self.candidates();
        for candidate in &candidates {
            let mut parts = candidate.split_whitespace();
            let Some(program) = parts.next() else {
                continue;
            };

            match Command::new(program).args(parts).args(&paths).status().await {
                Ok(status) => {
                    if !status.success() {
                        warn!(editor = %program, status = %status, "editor exited with failure");
                    }
                    debug!(editor = %program, files = paths.len(), "opened tab set in editor");
                    return Ok(paths.len());
                }
                Err(err) => debug!(editor = %program, error = %err, "could not launch editor"),
            }
        }

        Err(TabHeroError::EditorLaunch {
            tried: candidates.join(", "),
        })
    }

    async fn close_all(&self) -> Result<()> {
        // Each open replaces the editor process, so nothing stays open here
        debug!("no editor tabs to close");
        Ok(())
    }
}

pub fn editor_candidates(visual: Option<String>, editor: Option<String>) -> Vec<String> {
    visual
        .into_iter()
        .chain(editor)
        .filter(|e| !e.trim().is_empty())
        .chain(FALLBACK_EDITORS.iter().map(|e| e.to_string()))
        .collect()
}

/// Local files behind the references. Other schemes and missing files are skipped.
pub fn existing_paths(tabs: &[TabReference]) -> Vec<PathBuf> {
    tabs.iter()
        .filter_map(|tab| match tab.file_path() {
            Some(path) if path.exists() => Some(path),
            Some(path) => {
                warn!(file = %path.display(), "skipping missing file");
                None
            }
            None => {
                warn!(uri = %tab.uri, "skipping tab that is not a local file");
                None
            }
        })
        .collect()
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    std::fs::canonicalize(&joined).unwrap_or(joined)
}
