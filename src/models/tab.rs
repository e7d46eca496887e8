use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// One saved editor tab inside a tab set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabReference {
    pub uri: String,
    pub file_name: String,
    pub language_id: String,
}

impl TabReference {
    pub fn new(
        uri: impl Into<String>,
        file_name: impl Into<String>,
        language_id: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            file_name: file_name.into(),
            language_id: language_id.into(),
        }
    }

    /// Builds a reference for a file on disk. The path should already be absolute.
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Self {
            uri: path_to_uri(path),
            language_id: language_id_for(path).to_string(),
            file_name,
        }
    }

    /// Local path for `file://` references, `None` for any other scheme
    pub fn file_path(&self) -> Option<PathBuf> {
        uri_to_path(&self.uri)
    }
}

/// `file://` URI for an absolute path, percent-encoded the way editors write it
pub fn path_to_uri(path: &Path) -> String {
    match Url::from_file_path(path) {
        Ok(url) => url.to_string(),
        Err(()) => path.to_string_lossy().to_string(),
    }
}

pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Editor language identifier for a file, based on its name and extension
pub fn language_id_for(path: &Path) -> &'static str {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match file_name.as_str() {
        "dockerfile" => return "dockerfile",
        "makefile" => return "makefile",
        _ => {}
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "rs" => "rust",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "typescriptreact",
        "py" => "python",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "php" => "php",
        "rb" => "ruby",
        "swift" => "swift",
        "kt" | "kts" => "kotlin",
        "dart" => "dart",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "sql" => "sql",
        "sh" | "bash" | "zsh" => "shellscript",
        "ps1" => "powershell",
        "yml" | "yaml" => "yaml",
        "json" => "json",
        "xml" => "xml",
        "md" => "markdown",
        "toml" => "toml",
        "ini" => "ini",
        "lua" => "lua",
        _ => "plaintext",
    }
}
