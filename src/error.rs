use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabHeroError>;

#[derive(Debug, Error)]
pub enum TabHeroError {
    #[error("no workspace folder is open: {reason}")]
    Configuration { reason: String },
    #[error("failed to read tab set document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tab set document {path}: {source}")]
    DocumentParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write tab set document {path}: {source}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize tab set document: {source}")]
    DocumentSerialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not launch any editor (tried {tried})")]
    EditorLaunch { tried: String },
    #[error("failed to read answer from terminal: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },
}
