//! tabhero - named sets of editor tabs
//!
//! Saves the files open in an editor under a name, optionally tied to the git
//! branch they were opened on, and restores them later. Sets live in a small JSON
//! document inside the workspace (`.vscode/tab-hero.json`) and can be renamed,
//! deleted and marked as favorites.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod host;
pub mod models;

pub use config::Config;
pub use error::{Result, TabHeroError};
pub use models::{Document, NewTabSet, Scope, TabReference, TabSet, TabSetStore};
