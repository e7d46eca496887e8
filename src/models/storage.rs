use crate::error::{Result, TabHeroError};
use crate::models::{Document, NewTabSet, TabSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Directory under the workspace holding editor settings
pub const SETTINGS_DIR: &str = ".vscode";
/// File name of the tab set document
pub const DOCUMENT_FILE: &str = "tab-hero.json";

/// Whole-document persistence. Writes must be all-or-nothing for readers.
pub trait DocumentBackend {
    /// Where the document lives, for messages
    fn location(&self) -> &Path;
    fn exists(&self) -> bool;
    fn read(&self) -> Result<String>;
    fn write(&self, contents: &str) -> Result<()>;
}

/// Stores the document as a JSON file inside the workspace
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_workspace(workspace: &Path) -> Self {
        Self::new(workspace.join(SETTINGS_DIR).join(DOCUMENT_FILE))
    }
}

impl DocumentBackend for FileBackend {
    fn location(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| TabHeroError::DocumentRead {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, contents: &str) -> Result<()> {
        let write_err = |source: std::io::Error| TabHeroError::DocumentWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Write beside the target then rename so readers never see a partial file
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, contents).map_err(write_err)?;
        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            write_err(source)
        })
    }
}

/// Tab set storage for one workspace.
///
/// Every mutation is a full read-modify-write of the document. Failed writes are
/// logged and the operation still reports its in-memory result; failed reads fall
/// back to an empty document.
#[derive(Debug)]
pub struct TabSetStore<B = FileBackend> {
    backend: B,
}

impl TabSetStore<FileBackend> {
    /// Binds a store to `<workspace>/.vscode/tab-hero.json`, creating an empty
    /// document there if none exists yet.
    pub fn initialize(workspace: Option<&Path>) -> Result<Self> {
        let workspace = workspace.ok_or_else(|| TabHeroError::Configuration {
            reason: "tab sets are stored per workspace".to_string(),
        })?;

        Ok(Self::with_backend(FileBackend::for_workspace(workspace)))
    }
}

impl<B: DocumentBackend> TabSetStore<B> {
    pub fn with_backend(backend: B) -> Self {
        let store = Self { backend };
        if !store.backend.exists() {
            debug!(path = %store.backend.location().display(), "creating empty tab set document");
            store.write_all(&Document::default());
        }
        store
    }

    pub fn location(&self) -> &Path {
        self.backend.location()
    }

    /// Reads the document, telling a failed read apart from a missing document
    pub fn load(&self) -> Result<Document> {
        if !self.backend.exists() {
            return Ok(Document::default());
        }

        let content = self.backend.read()?;
        serde_json::from_str(&content).map_err(|source| TabHeroError::DocumentParse {
            path: self.backend.location().to_path_buf(),
            source,
        })
    }

    /// Reads the document, substituting an empty one on any failure
    pub fn read_all(&self) -> Document {
        match self.load() {
            Ok(document) => document,
            Err(err) => {
                warn!(error = %err, "using empty tab set document");
                Document::default()
            }
        }
    }

    /// Persists the whole document. Returns whether the write succeeded.
    pub fn write_all(&self, document: &Document) -> bool {
        let result = serde_json::to_string_pretty(document)
            .map_err(|source| TabHeroError::DocumentSerialize { source })
            .and_then(|content| self.backend.write(&content));

        match result {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "tab set document was not saved");
                false
            }
        }
    }

    pub fn save(&self, input: NewTabSet) -> TabSet {
        let mut document = self.read_all();
        let tab_set = TabSet::new(input);

        if tab_set.is_favorite {
            document.mark_favorite(&tab_set.id);
        }
        document.tab_sets.push(tab_set.clone());
        self.write_all(&document);

        debug!(id = %tab_set.id, name = %tab_set.name, tabs = tab_set.tabs.len(), "saved tab set");
        tab_set
    }

    pub fn get_all(&self) -> Vec<TabSet> {
        self.read_all().tab_sets
    }

    /// Sets saved under exactly `branch`; `None` matches sets without a branch
    pub fn get_by_branch(&self, branch: Option<&str>) -> Vec<TabSet> {
        self.get_all()
            .into_iter()
            .filter(|s| s.branch.as_deref() == branch)
            .collect()
    }

    pub fn get_favorites(&self) -> Vec<TabSet> {
        self.get_all().into_iter().filter(|s| s.is_favorite).collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<TabSet> {
        self.read_all().find(id).cloned()
    }

    pub fn rename(&self, id: &str, new_name: &str) -> bool {
        let mut document = self.read_all();
        let Some(tab_set) = document.find_mut(id) else {
            return false;
        };

        tab_set.rename(new_name.to_string());
        self.write_all(&document);
        true
    }

    /// Flips the favorite flag. Returns the new value, or `None` for an unknown id.
    pub fn toggle_favorite(&self, id: &str) -> Option<bool> {
        let mut document = self.read_all();
        let is_favorite = document.find_mut(id)?.toggle_favorite();

        if is_favorite {
            document.mark_favorite(id);
        } else {
            document.unmark_favorite(id);
        }
        self.write_all(&document);
        Some(is_favorite)
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut document = self.read_all();
        if !document.remove(id) {
            return false;
        }

        self.write_all(&document);
        true
    }

    /// Most recently updated set saved under `branch`. On equal stamps the earlier
    /// set in the document wins.
    pub fn get_latest_for_branch(&self, branch: &str) -> Option<TabSet> {
        self.get_by_branch(Some(branch))
            .into_iter()
            .fold(None, |latest: Option<TabSet>, candidate| match latest {
                Some(current) if current.updated_at >= candidate.updated_at => Some(current),
                _ => Some(candidate),
            })
    }

    /// Sets visible with `current_branch` checked out, in document order
    pub fn get_by_scope(&self, current_branch: Option<&str>) -> Vec<TabSet> {
        self.get_all()
            .into_iter()
            .filter(|s| s.is_visible_on(current_branch))
            .collect()
    }
}
